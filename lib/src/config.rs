//! Transform configuration
//!
//! Frame size, hop length and window are fixed when a transform is built.
//! All configuration checks happen here, before any basis is allocated.

use crate::error::TransformError;
use crate::window::WindowType;
use crate::Result;

/// Framing parameters shared by the forward and inverse transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformConfig {
    /// Samples per frame (n_fft), positive and even
    pub frame_size: usize,
    /// Stride between consecutive frame starts, in 1..=frame_size
    pub hop_length: usize,
    /// Analysis/synthesis window
    pub window: WindowType,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            frame_size: 1024,
            hop_length: 512,
            window: WindowType::Hanning,
        }
    }
}

impl TransformConfig {
    /// Create a new configuration with validation
    pub fn new(frame_size: usize, hop_length: usize, window: WindowType) -> Result<Self> {
        validate_frame_size(frame_size)?;

        if hop_length == 0 || hop_length > frame_size {
            return Err(TransformError::InvalidConfiguration(format!(
                "Hop length must be between 1 and the frame size ({}), got {}",
                frame_size, hop_length
            )));
        }

        Ok(Self {
            frame_size,
            hop_length,
            window,
        })
    }

    /// Number of magnitude bins per frame: DC excluded, Nyquist included
    pub fn n_freq(&self) -> usize {
        self.frame_size / 2
    }

    /// Number of phase bins per frame: DC and Nyquist both excluded
    pub fn n_phase(&self) -> usize {
        self.frame_size / 2 - 1
    }

    /// Frames produced for a signal of `signal_len` samples (no padding)
    pub fn num_frames(&self, signal_len: usize) -> usize {
        if signal_len < self.frame_size {
            0
        } else {
            (signal_len - self.frame_size) / self.hop_length + 1
        }
    }

    /// Overlap-add length for `num_frames` frames
    pub fn output_length(&self, num_frames: usize) -> usize {
        if num_frames == 0 {
            0
        } else {
            (num_frames - 1) * self.hop_length + self.frame_size
        }
    }

    /// Get the overlap percentage
    pub fn overlap_percent(&self) -> f64 {
        (1.0 - self.hop_length as f64 / self.frame_size as f64) * 100.0
    }
}

/// Frame sizes must be positive and even
pub(crate) fn validate_frame_size(frame_size: usize) -> Result<()> {
    if frame_size == 0 || frame_size % 2 != 0 {
        return Err(TransformError::InvalidConfiguration(format!(
            "Frame size must be a positive even number, got {}",
            frame_size
        )));
    }
    Ok(())
}
