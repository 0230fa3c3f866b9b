//! Audio resampling using rubato.

use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

/// Input frames handed to the resampler per call.
const CHUNK_SIZE: usize = 1024;

/// Resample mono audio to the target sample rate.
///
/// Returns the input unchanged if already at the target rate. The output
/// length is `ceil(len * to_rate / from_rate)` and sample `i` of the input
/// lands at `i * to_rate / from_rate` in the output: the resampler's
/// internal delay is removed, so signals from different native rates share
/// one timeline.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples);
    }
    if from_rate == 0 || to_rate == 0 {
        return Err(Error::Resample {
            reason: format!("invalid sample rates {from_rate} -> {to_rate}"),
        });
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        1,
        1,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_in = resampler.input_frames_next();
    let delay = resampler.output_delay();
    let expected_len = expected_output_len(samples.len(), from_rate, to_rate);
    let mut output = Vec::with_capacity(expected_len + delay + 2 * CHUNK_SIZE);

    let mut chunks = samples.chunks_exact(frames_in);
    for chunk in chunks.by_ref() {
        output.extend_from_slice(&process_chunk(&mut resampler, chunk, frames_in)?);
    }

    // Zero-pad the tail to a full chunk
    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let mut padded = remainder.to_vec();
        padded.resize(frames_in, 0.0);
        output.extend_from_slice(&process_chunk(&mut resampler, &padded, frames_in)?);
    }

    // Flush the delayed tail with silence
    let silence = vec![0.0; frames_in];
    while output.len() < delay + expected_len {
        output.extend_from_slice(&process_chunk(&mut resampler, &silence, frames_in)?);
    }

    output.drain(..delay);
    output.truncate(expected_len);
    Ok(output)
}

/// Run one fixed-size mono chunk through the resampler.
fn process_chunk(resampler: &mut Fft<f32>, chunk: &[f32], frames_in: usize) -> Result<Vec<f32>> {
    let input_adapter = SequentialSlice::new(chunk, 1, frames_in).map_err(|e| Error::Resample {
        reason: format!("failed to create input adapter: {e}"),
    })?;

    let resampled = resampler
        .process(&input_adapter, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;

    Ok(resampled.take_data())
}

/// Output length that corresponds to `input_len` frames after resampling.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn expected_output_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((input_len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}
