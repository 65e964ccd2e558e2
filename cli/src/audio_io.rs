//! Audio I/O for the driver
//!
//! Decodes any format Symphonia can probe into per-channel `f64` buffers and
//! writes reconstructed channels back out as 32-bit float WAV via hound.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Audio metadata information
#[derive(Debug, Clone)]
pub struct AudioInfo {
    pub sample_rate: u32,
    pub channels: usize,
    pub duration_samples: usize,
}

impl AudioInfo {
    pub fn duration_seconds(&self) -> f64 {
        self.duration_samples as f64 / self.sample_rate as f64
    }
}

/// Read an audio file into one buffer per channel
pub fn read_audio_file<P: AsRef<Path>>(
    path: P,
) -> Result<(AudioInfo, Vec<Vec<f64>>), Box<dyn Error>> {
    let file = File::open(path.as_ref())?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format.default_track().ok_or("No default track found")?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or("Sample rate not specified")?;
    let channels = track
        .codec_params
        .channels
        .ok_or("Channels not specified")?
        .count();

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|_| "Unsupported codec")?;

    let mut channel_buffers: Vec<Vec<f64>> = vec![Vec::new(); channels];

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(err) => return Err(Box::new(err)),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::warn!("Skipping undecodable packet: {}", msg);
                continue;
            }
            Err(err) => return Err(Box::new(err)),
        };

        // Planar layout: all samples of channel 0, then channel 1, ...
        let mut samples = SampleBuffer::<f64>::new(decoded.capacity() as u64, *decoded.spec());
        samples.copy_planar_ref(decoded);
        let frames = samples.len() / channels.max(1);
        for (c, buffer) in channel_buffers.iter_mut().enumerate() {
            buffer.extend_from_slice(&samples.samples()[c * frames..(c + 1) * frames]);
        }
    }

    let info = AudioInfo {
        sample_rate,
        channels,
        duration_samples: channel_buffers.first().map_or(0, Vec::len),
    };

    Ok((info, channel_buffers))
}

/// Write channels to a 32-bit float WAV file
pub fn write_audio_file<P: AsRef<Path>>(
    path: P,
    sample_rate: u32,
    channel_data: &[Vec<f64>],
) -> Result<(), Box<dyn Error>> {
    let spec = WavSpec {
        channels: channel_data.len() as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let file = File::create(path)?;
    let mut writer = WavWriter::new(BufWriter::new(file), spec)?;

    let num_samples = channel_data.iter().map(Vec::len).min().unwrap_or(0);
    for sample_idx in 0..num_samples {
        for channel in channel_data {
            writer.write_sample(channel[sample_idx] as f32)?;
        }
    }

    writer.finalize()?;
    Ok(())
}
