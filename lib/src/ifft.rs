//! Single-frame inverse transform
//!
//! One magnitude/phase/DC triple back to one frame of `N` samples. This is
//! exactly one frame of the ISTFT synthesis step, without synthesis windowing
//! and without overlap-add.

use ndarray::{aview1, Array1, Axis};

use crate::basis::InverseBasis;
use crate::istft::synthesize_frames;
use crate::spectrum::FrameSpectra;
use crate::Result;

/// Reusable single-frame inverse holding its own inverse basis
#[derive(Debug, Clone)]
pub struct SingleFrameInverse {
    basis: InverseBasis,
}

impl SingleFrameInverse {
    /// Create a single-frame inverse for `frame_size` samples
    pub fn new(frame_size: usize) -> Result<Self> {
        Ok(Self {
            basis: InverseBasis::new(frame_size)?,
        })
    }

    pub fn frame_size(&self) -> usize {
        self.basis.frame_size()
    }

    /// Read-only access to the synthesis basis
    pub fn basis(&self) -> &InverseBasis {
        &self.basis
    }

    /// Reconstruct one frame. With `ac` set to `None` the DC term is left out.
    pub fn apply(&self, magnitude: &[f64], phase: &[f64], ac: Option<f64>) -> Result<Vec<f64>> {
        let frame = FrameSpectra {
            magnitude: aview1(magnitude).insert_axis(Axis(0)).to_owned(),
            phase: aview1(phase).insert_axis(Axis(0)).to_owned(),
            ac: Array1::from_elem(1, ac.unwrap_or(0.0)),
        };
        frame.validate(self.frame_size())?;

        Ok(synthesize_frames(&self.basis, &frame).row(0).to_vec())
    }
}

/// One-shot complex-to-real inverse of a single frame.
///
/// Builds the inverse basis on every call. Callers inverting many frames of
/// the same size should hold a [`SingleFrameInverse`] instead.
pub fn single_frame_inverse(
    magnitude: &[f64],
    phase: &[f64],
    ac: f64,
    frame_size: usize,
) -> Result<Vec<f64>> {
    SingleFrameInverse::new(frame_size)?.apply(magnitude, phase, Some(ac))
}
