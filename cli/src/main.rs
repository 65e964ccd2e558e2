//! Dense STFT command-line driver
//!
//! Loads an audio file, runs the dense-projection STFT per channel, and
//! optionally checks it against a radix FFT or writes the ISTFT
//! reconstruction back to disk.

mod audio_io;
mod reference;

use std::error::Error;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use densestft_lib::{ForwardTransform, InverseTransform, TransformConfig, WindowType};

fn build_command() -> Command {
    Command::new("Dense STFT")
        .version(densestft_lib::VERSION)
        .about("STFT/ISTFT by dense Fourier projection")
        .arg(
            Arg::new("file")
                .help("Audio file to analyze")
                .value_name("FILE")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("frame-size")
                .long("frame-size")
                .short('n')
                .help("Samples per frame, positive and even")
                .value_name("SIZE")
                .value_parser(clap::value_parser!(usize))
                .default_value("1024"),
        )
        .arg(
            Arg::new("hop-length")
                .long("hop-length")
                .short('p')
                .help("Stride between frames, at most the frame size")
                .value_name("HOP")
                .value_parser(clap::value_parser!(usize))
                .default_value("512"),
        )
        .arg(
            Arg::new("window-type")
                .long("window-type")
                .short('t')
                .help("Window (hanning, hanning_periodic, hamming, bartlett, none)")
                .value_name("TYPE")
                .default_value("hanning"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the ISTFT reconstruction to this WAV file")
                .value_name("OUT"),
        )
        .arg(
            Arg::new("compare")
                .long("compare")
                .help("Compare the dense STFT against a radix FFT reference")
                .action(ArgAction::SetTrue),
        )
}

fn config_from_matches(matches: &ArgMatches) -> Result<TransformConfig, Box<dyn Error>> {
    let frame_size = *matches.get_one::<usize>("frame-size").ok_or("missing frame size")?;
    let hop_length = *matches.get_one::<usize>("hop-length").ok_or("missing hop length")?;
    let window: WindowType = matches
        .get_one::<String>("window-type")
        .ok_or("missing window type")?
        .parse()?;

    Ok(TransformConfig::new(frame_size, hop_length, window)?)
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = config_from_matches(matches)?;
    let filename = matches.get_one::<String>("file").ok_or("missing file")?;

    let stft = ForwardTransform::new(config)?;
    let istft = InverseTransform::new(config)?;

    println!("Loading file: {}", filename);
    let (info, channels) = audio_io::read_audio_file(filename)?;
    log::info!(
        "Loaded audio: {} channels, {} Hz, {:.2}s",
        info.channels,
        info.sample_rate,
        info.duration_seconds()
    );

    println!("Transform configuration:");
    println!("  Frame size: {}", config.frame_size);
    println!("  Hop length: {}", config.hop_length);
    println!("  Overlap: {:.1}%", config.overlap_percent());
    println!("  Window type: {}", config.window);
    println!(
        "  Bins: {} magnitude, {} phase",
        config.n_freq(),
        config.n_phase()
    );

    let mut reconstructed = Vec::with_capacity(channels.len());
    for (ch_idx, signal) in channels.iter().enumerate() {
        let spectra = stft.project(signal)?;
        println!(
            "Channel {}: {} samples -> {} frames",
            ch_idx,
            signal.len(),
            spectra.num_frames()
        );

        if matches.get_flag("compare") {
            let deviation = reference::compare_with_fft(&config, signal, &spectra)?;
            println!(
                "  Max deviation from FFT reference: ac {:.3e}, magnitude {:.3e}, phase {:.3e}",
                deviation.ac, deviation.magnitude, deviation.phase
            );
        }

        if matches.contains_id("output") {
            reconstructed.push(istft.reconstruct(&spectra)?);
        }
    }

    if let Some(output) = matches.get_one::<String>("output") {
        audio_io::write_audio_file(output, info.sample_rate, &reconstructed)?;
        println!(
            "Saved reconstruction: {} channels, {} samples to {}",
            reconstructed.len(),
            reconstructed.first().map_or(0, Vec::len),
            output
        );
    }

    Ok(())
}

fn main() {
    let matches = build_command().get_matches();

    densestft_lib::init();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_defaults() {
        let matches = build_command().get_matches_from(["densestft", "in.wav"]);
        let config = config_from_matches(&matches).unwrap();
        assert_eq!(config, TransformConfig::default());
        assert!(!matches.get_flag("compare"));
    }

    #[test]
    fn test_invalid_configuration_reported() {
        let matches = build_command().get_matches_from(["densestft", "in.wav", "-n", "1023"]);
        assert!(config_from_matches(&matches).is_err());

        let matches = build_command().get_matches_from(["densestft", "in.wav", "-t", "kaiser"]);
        assert!(config_from_matches(&matches).is_err());
    }

    #[test]
    fn test_analyze_and_reconstruct_file() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("densestft_cli_in_{}.wav", process::id()));
        let output = dir.join(format!("densestft_cli_out_{}.wav", process::id()));
        let signal: Vec<f64> = (0..2048).map(|i| (i as f64 * 0.02).sin() * 0.25).collect();
        audio_io::write_audio_file(&input, 8000, &[signal.clone()]).unwrap();

        let matches = build_command().get_matches_from([
            "densestft",
            input.to_str().unwrap(),
            "-n",
            "256",
            "-p",
            "256",
            "-t",
            "none",
            "--compare",
            "-o",
            output.to_str().unwrap(),
        ]);
        run(&matches).unwrap();

        let (info, data) = audio_io::read_audio_file(&output).unwrap();
        std::fs::remove_file(&input).ok();
        std::fs::remove_file(&output).ok();

        assert_eq!(info.channels, 1);
        assert_eq!(data[0].len(), 2048);
        for (a, b) in signal.iter().zip(data[0].iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
