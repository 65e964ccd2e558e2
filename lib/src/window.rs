//! Window functions for dense STFT analysis and synthesis
//!
//! Analysis projects raw frames. The window only enters on the synthesis
//! side, where each reconstructed frame is divided by it through a floored
//! reciprocal so that zero crossings never blow up.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::TransformError;

/// Floor applied to window weights before taking their reciprocal
pub const WINDOW_EPSILON: f64 = 1e-14;

/// Window function types available for framing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Symmetric Hann window
    #[default]
    Hanning,
    /// Periodic Hann window (the usual FFT-bin convention)
    HanningPeriodic,
    /// Symmetric Hamming window
    Hamming,
    /// Bartlett (triangular) window
    Bartlett,
    /// Unit weights
    None,
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for WindowType {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hanning" | "hann" => Ok(WindowType::Hanning),
            "hanning_periodic" | "hann_periodic" => Ok(WindowType::HanningPeriodic),
            "hamming" => Ok(WindowType::Hamming),
            "bartlett" => Ok(WindowType::Bartlett),
            "none" | "rectangular" => Ok(WindowType::None),
            _ => Err(TransformError::InvalidConfiguration(format!(
                "Unknown window type '{}', valid types: {}",
                s,
                WindowType::all()
                    .iter()
                    .map(|w| w.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl WindowType {
    /// Get all available window types
    pub fn all() -> &'static [WindowType] {
        &[
            WindowType::Hanning,
            WindowType::HanningPeriodic,
            WindowType::Hamming,
            WindowType::Bartlett,
            WindowType::None,
        ]
    }

    /// Name accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Hanning => "hanning",
            WindowType::HanningPeriodic => "hanning_periodic",
            WindowType::Hamming => "hamming",
            WindowType::Bartlett => "bartlett",
            WindowType::None => "none",
        }
    }

    /// Whether the window actually tapers the frame
    pub fn is_tapered(&self) -> bool {
        !matches!(self, WindowType::None)
    }
}

/// Generate a window function of the specified type and size
pub fn generate_window(window_type: WindowType, size: usize) -> Vec<f64> {
    let mut window = vec![0.0; size];

    match window_type {
        WindowType::Hanning => generate_hanning(&mut window, size.saturating_sub(1)),
        WindowType::HanningPeriodic => generate_hanning(&mut window, size),
        WindowType::Hamming => generate_hamming(&mut window),
        WindowType::Bartlett => generate_bartlett(&mut window),
        WindowType::None => window.fill(1.0),
    }

    window
}

/// Hann window over `period` samples: symmetric for `n - 1`, periodic for `n`
fn generate_hanning(window: &mut [f64], period: usize) {
    if period == 0 {
        window.fill(1.0);
        return;
    }
    for (i, w) in window.iter_mut().enumerate() {
        *w = 0.5 * (1.0 - (2.0 * PI * i as f64 / period as f64).cos());
    }
}

fn generate_hamming(window: &mut [f64]) {
    let n = window.len();
    if n < 2 {
        window.fill(1.0);
        return;
    }
    for (i, w) in window.iter_mut().enumerate() {
        *w = 0.54 - 0.46 * (2.0 * PI * i as f64 / (n - 1) as f64).cos();
    }
}

fn generate_bartlett(window: &mut [f64]) {
    let n = window.len();
    if n < 2 {
        window.fill(1.0);
        return;
    }
    for (i, w) in window.iter_mut().enumerate() {
        *w = 1.0 - (2.0 * i as f64 / (n - 1) as f64 - 1.0).abs();
    }
}

/// Per-sample synthesis compensation for a window.
///
/// Each weight is floored to [`WINDOW_EPSILON`] and inverted. For tapered
/// windows the first tap is zeroed so the frame boundary never amplifies
/// rounding noise; unit windows compensate with all ones.
pub fn compensation(window_type: WindowType, window: &[f64]) -> Vec<f64> {
    let mut cof: Vec<f64> = window
        .iter()
        .map(|&w| 1.0 / w.max(WINDOW_EPSILON))
        .collect();

    if window_type.is_tapered() {
        if let Some(first) = cof.first_mut() {
            *first = 0.0;
        }
    }

    cof
}
