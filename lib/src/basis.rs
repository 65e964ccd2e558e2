//! Fixed Fourier projection bases
//!
//! The forward basis projects a frame of `N` samples onto the complex
//! exponentials `exp(-2πi·t·f/N)` for `f` in `0..=N/2`. The inverse basis
//! maps the half spectrum back with `exp(+2πi·t·f/N)`.
//!
//! Bin bookkeeping, shared by every transform in the crate:
//!
//! - bin 0 (DC) never enters a main basis. The forward side keeps it as a
//!   separate row, the inverse side re-injects it linearly via `ac_cof`.
//! - magnitude channels cover bins `1..=N/2` (Nyquist included).
//! - phase channels cover bins `1..N/2`. The Nyquist sine column is
//!   identically zero for integer sample positions, so it carries nothing.
//! - the inverse basis doubles every column to stand in for the discarded
//!   negative-frequency half, then halves the Nyquist column back since it
//!   has no distinct mirror.

use std::f64::consts::PI;

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::config::validate_frame_size;
use crate::window::{compensation, generate_window, WindowType};
use crate::Result;

/// `exp(sign·2πi·t·f/n)`, with the angle reduced modulo `n` first
fn kernel(sign: f64, t: usize, f: usize, n: usize) -> Complex64 {
    let angle = 2.0 * PI * ((t * f) % n) as f64 / n as f64;
    Complex64::from_polar(1.0, sign * angle)
}

/// Analysis kernels. The window never enters here; it only shapes the
/// synthesis compensation.
#[derive(Debug, Clone)]
pub struct ForwardBasis {
    frame_size: usize,
    real: Array2<f64>,
    imag: Array2<f64>,
    dc: Array1<f64>,
}

impl ForwardBasis {
    /// Build the forward basis for `frame_size` samples
    pub fn new(frame_size: usize) -> Result<Self> {
        validate_frame_size(frame_size)?;

        let n_freq = frame_size / 2;

        let dc = Array1::from_shape_fn(frame_size, |t| kernel(-1.0, t, 0, frame_size).re);
        let real = Array2::from_shape_fn((n_freq, frame_size), |(row, t)| {
            kernel(-1.0, t, row + 1, frame_size).re
        });
        let imag = Array2::from_shape_fn((n_freq - 1, frame_size), |(row, t)| {
            kernel(-1.0, t, row + 1, frame_size).im
        });

        log::debug!(
            "Forward basis: real {:?}, imag {:?}",
            real.dim(),
            imag.dim()
        );

        Ok(Self {
            frame_size,
            real,
            imag,
            dc,
        })
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Cosine kernels for bins `1..=N/2`, shape `(N/2, N)`
    pub fn real(&self) -> &Array2<f64> {
        &self.real
    }

    /// Sine kernels for bins `1..N/2`, shape `(N/2 - 1, N)`
    pub fn imag(&self) -> &Array2<f64> {
        &self.imag
    }

    /// Zero-frequency row, length `N`
    pub fn dc(&self) -> &Array1<f64> {
        &self.dc
    }
}

/// Synthesis kernels with the ×2 / Nyquist-halving convention applied
#[derive(Debug, Clone)]
pub struct InverseBasis {
    frame_size: usize,
    real: Array2<f64>,
    imag: Array2<f64>,
    ac_cof: f64,
}

impl InverseBasis {
    /// Build the inverse basis for `frame_size` samples
    pub fn new(frame_size: usize) -> Result<Self> {
        validate_frame_size(frame_size)?;

        let n_freq = frame_size / 2;
        let ac_cof = kernel(1.0, 0, 0, frame_size).re;

        let real = Array2::from_shape_fn((frame_size, n_freq), |(t, col)| {
            let f = col + 1;
            let value = 2.0 * kernel(1.0, t, f, frame_size).re;
            if f == n_freq {
                value / 2.0
            } else {
                value
            }
        });
        let imag = Array2::from_shape_fn((frame_size, n_freq - 1), |(t, col)| {
            2.0 * kernel(1.0, t, col + 1, frame_size).im
        });

        log::debug!(
            "Inverse basis: real {:?}, imag {:?}, ac_cof {}",
            real.dim(),
            imag.dim(),
            ac_cof
        );

        Ok(Self {
            frame_size,
            real,
            imag,
            ac_cof,
        })
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Cosine kernels for bins `1..=N/2`, shape `(N, N/2)`
    pub fn real(&self) -> &Array2<f64> {
        &self.real
    }

    /// Sine kernels for bins `1..N/2`, shape `(N, N/2 - 1)`
    pub fn imag(&self) -> &Array2<f64> {
        &self.imag
    }

    /// Real part of the zero-frequency kernel; scales the DC re-injection
    pub fn ac_cof(&self) -> f64 {
        self.ac_cof
    }
}

/// Reciprocal-window compensation vector for synthesis
pub fn synthesis_compensation(window_type: WindowType, frame_size: usize) -> Result<Array1<f64>> {
    validate_frame_size(frame_size)?;
    let window = generate_window(window_type, frame_size);
    Ok(Array1::from(compensation(window_type, &window)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use ndarray::s;

    fn assert_scaled_identity(m: &Array2<f64>, scale: f64) {
        for ((i, j), &v) in m.indexed_iter() {
            let expected = if i == j { scale } else { 0.0 };
            assert!(
                (v - expected).abs() < 1e-9,
                "entry ({}, {}) = {}, expected {}",
                i,
                j,
                v,
                expected
            );
        }
    }

    #[test]
    fn test_basis_shapes() {
        let forward = ForwardBasis::new(1024).unwrap();
        assert_eq!(forward.real().dim(), (512, 1024));
        assert_eq!(forward.imag().dim(), (511, 1024));
        assert_eq!(forward.dc().len(), 1024);

        let inverse = InverseBasis::new(1024).unwrap();
        assert_eq!(inverse.real().dim(), (1024, 512));
        assert_eq!(inverse.imag().dim(), (1024, 511));
        assert_eq!(inverse.ac_cof(), 1.0);
    }

    #[test]
    fn test_odd_frame_size_rejected() {
        for frame_size in [0, 7, 1023] {
            assert!(matches!(
                ForwardBasis::new(frame_size),
                Err(TransformError::InvalidConfiguration(_))
            ));
            assert!(matches!(
                InverseBasis::new(frame_size),
                Err(TransformError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_nyquist_column_halved() {
        let n = 16;
        let inverse = InverseBasis::new(n).unwrap();
        let nyquist = inverse.real().column(n / 2 - 1);
        for (t, &v) in nyquist.iter().enumerate() {
            let expected = if t % 2 == 0 { 1.0 } else { -1.0 };
            assert!((v - expected).abs() < 1e-12);
        }
        // Bin 1 keeps the doubling
        assert!((inverse.real()[[0, 0]] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_forward_inverse_orthogonality() {
        let n = 32;
        let inner = n / 2 - 1;
        let forward = ForwardBasis::new(n).unwrap();
        let inverse = InverseBasis::new(n).unwrap();

        // Undo the doubling to compare the bare kernels
        let inv_real = inverse.real().slice(s![.., ..inner]).to_owned() / 2.0;
        let fwd_real = forward.real().slice(s![..inner, ..]).to_owned();
        assert_scaled_identity(&fwd_real.dot(&inv_real), n as f64 / 2.0);

        let inv_imag = inverse.imag().to_owned() / 2.0;
        assert_scaled_identity(&forward.imag().dot(&inv_imag), -(n as f64) / 2.0);
    }

    #[test]
    fn test_forward_basis_is_plain_kernel() {
        let n = 8;
        let forward = ForwardBasis::new(n).unwrap();
        assert!(forward.dc().iter().all(|&v| v == 1.0));
        // Bin 1 cosine row starts at 1 and crosses zero a quarter period in
        assert_eq!(forward.real()[[0, 0]], 1.0);
        assert!(forward.real()[[0, 2]].abs() < 1e-15);
        // Sine rows follow exp(-iθ)
        assert!((forward.imag()[[0, 2]] + 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_synthesis_compensation() {
        let cof = synthesis_compensation(WindowType::Hanning, 8).unwrap();
        assert_eq!(cof.len(), 8);
        assert_eq!(cof[0], 0.0);
        assert!(cof.iter().skip(1).all(|&c| c.is_finite() && c > 0.0));

        let unit = synthesis_compensation(WindowType::None, 8).unwrap();
        assert!(unit.iter().all(|&c| c == 1.0));
    }
}
