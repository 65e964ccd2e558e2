//! Per-frame and batched spectra
//!
//! A [`Spectrum`] is one frame of STFT output: `N/2` magnitude bins
//! (`1..=N/2`), `N/2 - 1` phase bins (`1..N/2`) and the DC scalar.
//! [`FrameSpectra`] stacks many frames row-wise so transforms can run as a
//! single matrix multiply over the frame dimension.

use ndarray::{aview1, Array1, Array2, Axis};

use crate::error::TransformError;
use crate::Result;

/// One frame of spectral data
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Real projections for bins `1..=N/2`
    pub magnitude: Vec<f64>,
    /// Conjugated imaginary projections for bins `1..N/2`
    pub phase: Vec<f64>,
    /// Zero-frequency amplitude
    pub ac: f64,
}

impl Spectrum {
    pub fn new(magnitude: Vec<f64>, phase: Vec<f64>, ac: f64) -> Self {
        Self {
            magnitude,
            phase,
            ac,
        }
    }

    /// Check the bin counts against a frame size
    pub fn validate(&self, frame_size: usize) -> Result<()> {
        check_shape(self.magnitude.len(), self.phase.len(), frame_size)
    }
}

/// Stacked spectra, one row per frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpectra {
    /// Shape `(frames, N/2)`
    pub magnitude: Array2<f64>,
    /// Shape `(frames, N/2 - 1)`
    pub phase: Array2<f64>,
    /// Length `frames`
    pub ac: Array1<f64>,
}

impl FrameSpectra {
    /// Number of frames held
    pub fn num_frames(&self) -> usize {
        self.ac.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ac.is_empty()
    }

    /// Check the bin counts and frame counts against a frame size
    pub fn validate(&self, frame_size: usize) -> Result<()> {
        let frames = self.num_frames();
        if self.magnitude.nrows() != frames || self.phase.nrows() != frames {
            return Err(TransformError::InvalidInput(format!(
                "Frame count mismatch: {} magnitude rows, {} phase rows, {} DC values",
                self.magnitude.nrows(),
                self.phase.nrows(),
                frames
            )));
        }
        check_shape(self.magnitude.ncols(), self.phase.ncols(), frame_size)
    }

    /// Stack per-frame spectra into matrices
    pub fn from_spectra(spectra: &[Spectrum], frame_size: usize) -> Result<Self> {
        let n_freq = frame_size / 2;
        let n_phase = n_freq.saturating_sub(1);

        let mut magnitude = Array2::zeros((spectra.len(), n_freq));
        let mut phase = Array2::zeros((spectra.len(), n_phase));
        let mut ac = Array1::zeros(spectra.len());

        for (idx, spectrum) in spectra.iter().enumerate() {
            spectrum.validate(frame_size).map_err(|e| match e {
                TransformError::InvalidInput(msg) => {
                    TransformError::InvalidInput(format!("frame {}: {}", idx, msg))
                }
                other => other,
            })?;
            magnitude.row_mut(idx).assign(&aview1(&spectrum.magnitude));
            phase.row_mut(idx).assign(&aview1(&spectrum.phase));
            ac[idx] = spectrum.ac;
        }

        Ok(Self {
            magnitude,
            phase,
            ac,
        })
    }

    /// Split back into per-frame spectra
    pub fn to_spectra(&self) -> Vec<Spectrum> {
        self.magnitude
            .axis_iter(Axis(0))
            .zip(self.phase.axis_iter(Axis(0)))
            .zip(self.ac.iter())
            .map(|((magnitude, phase), &ac)| Spectrum::new(magnitude.to_vec(), phase.to_vec(), ac))
            .collect()
    }
}

fn check_shape(magnitude_len: usize, phase_len: usize, frame_size: usize) -> Result<()> {
    let n_freq = frame_size / 2;
    if magnitude_len != n_freq {
        return Err(TransformError::InvalidInput(format!(
            "Magnitude must have {} bins for frame size {}, got {}",
            n_freq, frame_size, magnitude_len
        )));
    }
    if phase_len + 1 != n_freq {
        return Err(TransformError::InvalidInput(format!(
            "Phase must have {} bins for frame size {}, got {}",
            n_freq.saturating_sub(1),
            frame_size,
            phase_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_shape_contract() {
        let ok = Spectrum::new(vec![0.0; 512], vec![0.0; 511], 0.0);
        assert!(ok.validate(1024).is_ok());

        let bad_magnitude = Spectrum::new(vec![0.0; 511], vec![0.0; 511], 0.0);
        assert!(matches!(
            bad_magnitude.validate(1024),
            Err(TransformError::InvalidInput(_))
        ));

        let bad_phase = Spectrum::new(vec![0.0; 512], vec![0.0; 512], 0.0);
        assert!(matches!(
            bad_phase.validate(1024),
            Err(TransformError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_stack_and_split() {
        let spectra = vec![
            Spectrum::new(vec![1.0, 2.0], vec![3.0], 4.0),
            Spectrum::new(vec![5.0, 6.0], vec![7.0], 8.0),
        ];
        let stacked = FrameSpectra::from_spectra(&spectra, 4).unwrap();
        assert_eq!(stacked.num_frames(), 2);
        assert_eq!(stacked.magnitude[[1, 0]], 5.0);
        assert_eq!(stacked.phase[[0, 0]], 3.0);
        assert_eq!(stacked.to_spectra(), spectra);
    }

    #[test]
    fn test_stack_reports_offending_frame() {
        let spectra = vec![
            Spectrum::new(vec![1.0, 2.0], vec![3.0], 4.0),
            Spectrum::new(vec![5.0], vec![7.0], 8.0),
        ];
        match FrameSpectra::from_spectra(&spectra, 4) {
            Err(TransformError::InvalidInput(msg)) => assert!(msg.starts_with("frame 1")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
