//! Comparison of the dense STFT against a radix FFT reference

use densestft_lib::{FrameSpectra, TransformConfig};
use num_complex::Complex64;
use realfft::RealFftPlanner;

/// Largest absolute deviation per output channel
#[derive(Debug, Clone, Copy, Default)]
pub struct Deviation {
    pub ac: f64,
    pub magnitude: f64,
    pub phase: f64,
}

impl Deviation {
    pub fn max(&self) -> f64 {
        self.ac.max(self.magnitude).max(self.phase)
    }
}

/// Compare stacked dense spectra with `realfft` on the same raw frames
pub fn compare_with_fft(
    config: &TransformConfig,
    signal: &[f64],
    spectra: &FrameSpectra,
) -> Result<Deviation, String> {
    let frame_size = config.frame_size;
    let mut planner = RealFftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(frame_size);

    let mut input = fft.make_input_vec();
    let mut output: Vec<Complex64> = fft.make_output_vec();
    let mut deviation = Deviation::default();

    for frame_idx in 0..spectra.num_frames() {
        let start = frame_idx * config.hop_length;
        input.copy_from_slice(&signal[start..start + frame_size]);
        fft.process(&mut input, &mut output)
            .map_err(|e| format!("FFT error: {}", e))?;

        deviation.ac = deviation.ac.max((spectra.ac[frame_idx] - output[0].re).abs());
        for k in 1..=config.n_freq() {
            let diff = (spectra.magnitude[[frame_idx, k - 1]] - output[k].re).abs();
            deviation.magnitude = deviation.magnitude.max(diff);
        }
        for k in 1..config.n_freq() {
            // phase holds the conjugated imaginary part
            let diff = (spectra.phase[[frame_idx, k - 1]] + output[k].im).abs();
            deviation.phase = deviation.phase.max(diff);
        }
    }

    log::debug!(
        "Reference deviation over {} frames: {:?}",
        spectra.num_frames(),
        deviation
    );

    Ok(deviation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use densestft_lib::{ForwardTransform, WindowType};

    #[test]
    fn test_dense_matches_reference() {
        let config = TransformConfig::new(128, 48, WindowType::Hamming).unwrap();
        let signal: Vec<f64> = (0..600).map(|i| ((i * 13) % 17) as f64 / 17.0 - 0.5).collect();
        let spectra = ForwardTransform::new(config).unwrap().project(&signal).unwrap();

        let deviation = compare_with_fft(&config, &signal, &spectra).unwrap();
        assert!(deviation.max() < 1e-9, "{:?}", deviation);
    }
}
