//! Short-Time Fourier Transform (STFT) by dense projection
//!
//! Frames are cut at multiples of the hop length without padding and
//! projected onto the fixed forward basis in one matrix multiply.

use ndarray::Array2;

use crate::basis::ForwardBasis;
use crate::config::TransformConfig;
use crate::error::TransformError;
use crate::spectrum::{FrameSpectra, Spectrum};
use crate::window::WindowType;
use crate::Result;

/// Forward transform bound to one frame size, hop length and window
#[derive(Debug, Clone)]
pub struct ForwardTransform {
    config: TransformConfig,
    basis: ForwardBasis,
}

impl ForwardTransform {
    /// Create a forward transform from a validated configuration
    pub fn new(config: TransformConfig) -> Result<Self> {
        let config = TransformConfig::new(config.frame_size, config.hop_length, config.window)?;
        let basis = ForwardBasis::new(config.frame_size)?;
        Ok(Self { config, basis })
    }

    /// Get the configuration
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Read-only access to the projection basis
    pub fn basis(&self) -> &ForwardBasis {
        &self.basis
    }

    /// Analyze a signal and return one spectrum per frame
    pub fn apply(&self, signal: &[f64]) -> Result<Vec<Spectrum>> {
        Ok(self.project(signal)?.to_spectra())
    }

    /// Analyze a signal, keeping all frames stacked
    pub fn project(&self, signal: &[f64]) -> Result<FrameSpectra> {
        let frames = self.frame(signal)?;

        let magnitude = frames.dot(&self.basis.real().t());
        // complex conjugate
        let phase = -frames.dot(&self.basis.imag().t());
        let ac = frames.dot(self.basis.dc());

        log::trace!(
            "STFT: {} samples -> magnitude {:?}, phase {:?}",
            signal.len(),
            magnitude.dim(),
            phase.dim()
        );

        Ok(FrameSpectra {
            magnitude,
            phase,
            ac,
        })
    }

    /// Stack the frames of `signal` into a `(frames, N)` matrix
    fn frame(&self, signal: &[f64]) -> Result<Array2<f64>> {
        let frame_size = self.config.frame_size;
        let hop_length = self.config.hop_length;

        if signal.len() < frame_size {
            return Err(TransformError::InvalidInput(format!(
                "Signal has {} samples, shorter than the frame size {}",
                signal.len(),
                frame_size
            )));
        }

        let num_frames = self.config.num_frames(signal.len());
        Ok(Array2::from_shape_fn((num_frames, frame_size), |(frame, t)| {
            signal[frame * hop_length + t]
        }))
    }
}

/// Build a forward transform from raw parameters
pub fn make_forward_transform(
    frame_size: usize,
    hop_length: usize,
    window: WindowType,
) -> Result<ForwardTransform> {
    ForwardTransform::new(TransformConfig::new(frame_size, hop_length, window)?)
}
