//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use hound::{SampleFormat, WavSpec, WavWriter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Seeded uniform noise in [-0.5, 0.5).
pub fn noise(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-0.5f32..0.5)).collect()
}

/// Write mono 16-bit PCM.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for &s in samples {
        #[allow(clippy::cast_possible_truncation)]
        let value = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
        writer.write_sample(value).unwrap();
    }
    writer.finalize().unwrap();
}

/// Band-limited test signal: a sum of sinusoids with seeded frequencies
/// and phases, all below `max_hz`. Rendering the same `Tones` at different
/// rates gives the same waveform sampled on different grids.
pub struct Tones {
    partials: Vec<(f64, f64)>,
}

impl Tones {
    /// `count` partials between 30 Hz and `max_hz`.
    pub fn new(count: usize, max_hz: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let partials = (0..count)
            .map(|_| {
                (
                    rng.gen_range(30.0..max_hz),
                    rng.gen_range(0.0..std::f64::consts::TAU),
                )
            })
            .collect();
        Self { partials }
    }

    /// `frames` samples at `rate`, starting `start_secs` into the waveform.
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self, rate: u32, start_secs: f64, frames: usize) -> Vec<f32> {
        let gain = 0.4 / (self.partials.len() as f64).sqrt();
        (0..frames)
            .map(|i| {
                let t = start_secs + i as f64 / f64::from(rate);
                let sum: f64 = self
                    .partials
                    .iter()
                    .map(|&(hz, phase)| (std::f64::consts::TAU * hz * t + phase).sin())
                    .sum();
                #[allow(clippy::cast_possible_truncation)]
                let value = (sum * gain) as f32;
                value
            })
            .collect()
    }
}

/// Write interleaved two-channel 16-bit PCM.
pub fn write_stereo_wav(path: &Path, left: &[f32], right: &[f32], sample_rate: u32) {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for (&l, &r) in left.iter().zip(right) {
        for s in [l, r] {
            #[allow(clippy::cast_possible_truncation)]
            let value = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            writer.write_sample(value).unwrap();
        }
    }
    writer.finalize().unwrap();
}
