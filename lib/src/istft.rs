//! Inverse Short-Time Fourier Transform (ISTFT)
//!
//! Spectra are projected back to time-domain frames through the inverse
//! basis, divided by the analysis window and overlap-added at the hop
//! length.

use ndarray::{s, Array1, Array2};

use crate::basis::{synthesis_compensation, InverseBasis};
use crate::config::TransformConfig;
use crate::spectrum::{FrameSpectra, Spectrum};
use crate::window::WindowType;
use crate::Result;

/// Inverse transform bound to one frame size, hop length and window
#[derive(Debug, Clone)]
pub struct InverseTransform {
    config: TransformConfig,
    basis: InverseBasis,
    compensation: Array1<f64>,
}

impl InverseTransform {
    /// Create an inverse transform from a validated configuration
    pub fn new(config: TransformConfig) -> Result<Self> {
        let config = TransformConfig::new(config.frame_size, config.hop_length, config.window)?;
        let basis = InverseBasis::new(config.frame_size)?;
        let compensation = synthesis_compensation(config.window, config.frame_size)?;
        Ok(Self {
            config,
            basis,
            compensation,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Read-only access to the synthesis basis
    pub fn basis(&self) -> &InverseBasis {
        &self.basis
    }

    /// Per-sample reciprocal window applied to every reconstructed frame
    pub fn compensation(&self) -> &Array1<f64> {
        &self.compensation
    }

    /// The compensation as a `(N, N)` diagonal matrix
    pub fn compensation_matrix(&self) -> Array2<f64> {
        Array2::from_diag(&self.compensation)
    }

    /// Reconstruct a signal from per-frame spectra
    pub fn apply(&self, spectra: &[Spectrum]) -> Result<Vec<f64>> {
        let stacked = FrameSpectra::from_spectra(spectra, self.config.frame_size)?;
        self.reconstruct(&stacked)
    }

    /// Reconstruct a signal from stacked spectra
    pub fn reconstruct(&self, spectra: &FrameSpectra) -> Result<Vec<f64>> {
        spectra.validate(self.config.frame_size)?;
        if spectra.is_empty() {
            return Ok(Vec::new());
        }

        let frames = synthesize_frames(&self.basis, spectra) * &self.compensation;
        let output = overlap_add(&frames, self.config.hop_length);

        log::trace!(
            "ISTFT: {} frames -> {} samples",
            spectra.num_frames(),
            output.len()
        );

        Ok(output)
    }
}

/// Project stacked spectra back to `(frames, N)` time-domain frames.
///
/// Shared by the ISTFT and the single-frame inverse so both follow the same
/// conjugation, DC re-injection and normalization.
pub(crate) fn synthesize_frames(basis: &InverseBasis, spectra: &FrameSpectra) -> Array2<f64> {
    // complex conjugate
    let phase = -&spectra.phase;

    let real_part = spectra.magnitude.dot(&basis.real().t());
    let imag_part = phase.dot(&basis.imag().t());

    let mut output = real_part - imag_part;
    for (mut row, &ac) in output.rows_mut().into_iter().zip(spectra.ac.iter()) {
        row += basis.ac_cof() * ac;
    }

    output / basis.frame_size() as f64
}

/// Sum frames into one buffer at `hop_length` offsets
fn overlap_add(frames: &Array2<f64>, hop_length: usize) -> Vec<f64> {
    let (num_frames, frame_size) = frames.dim();
    let mut output = Array1::<f64>::zeros((num_frames - 1) * hop_length + frame_size);

    for (idx, frame) in frames.rows().into_iter().enumerate() {
        let start = idx * hop_length;
        let mut target = output.slice_mut(s![start..start + frame_size]);
        target += &frame;
    }

    output.to_vec()
}

/// Build an inverse transform from raw parameters
pub fn make_inverse_transform(
    frame_size: usize,
    hop_length: usize,
    window: WindowType,
) -> Result<InverseTransform> {
    InverseTransform::new(TransformConfig::new(frame_size, hop_length, window)?)
}
