//! Audio decoding using symphonia.

use crate::error::{Error, Result};
use std::fs::File;
use std::ops::ControlFlow;
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};
use symphonia::core::codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions};
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Decoded audio data.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Audio samples as mono f32 in range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Duration in seconds, measured at the native sample rate.
    pub duration_secs: f64,
}

/// A frame range decoded without downmixing.
#[derive(Debug, Clone)]
pub struct InterleavedAudio {
    /// Interleaved f32 samples.
    pub samples: Vec<f32>,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Native sample rate in Hz.
    pub sample_rate: u32,
    /// Frames decoded from the start of the stream up to where decoding stopped.
    pub frames_seen: u64,
}

impl InterleavedAudio {
    /// Number of frames held in `samples`.
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }
}

/// An opened, probed audio stream ready for packet decoding.
struct OpenedStream {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    sample_rate: u32,
}

/// Decode an audio file to mono f32 samples.
///
/// Supports WAV, AIFF, FLAC, MP3, and AAC/M4A. Multi-channel audio is mixed
/// down by averaging the channels.
///
/// Gapless decoding is on: for MP3 the encoder delay and padding recorded
/// in the LAME/Xing header are dropped, so frame 0 is the first frame of
/// programme audio. That is the timeline ffmpeg seeks on, so offsets found
/// here apply to either extraction backend.
pub fn decode_audio_file(path: &Path) -> Result<DecodedAudio> {
    let mut stream = open_stream(path)?;
    let sample_rate = stream.sample_rate;
    let mut samples = Vec::new();

    decode_buffers(path, &mut stream, |buffer| {
        append_mono(buffer, &mut samples);
        ControlFlow::Continue(())
    })?;

    if samples.is_empty() {
        return Err(Error::EmptyAudio {
            path: path.to_path_buf(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let duration_secs = samples.len() as f64 / f64::from(sample_rate);

    Ok(DecodedAudio {
        samples,
        sample_rate,
        duration_secs,
    })
}

/// Decode frames `[start_frame, end_frame)` of an audio file, keeping all channels.
///
/// Decoding stops as soon as the end frame has been reached, so short spans
/// near the start of a long file are cheap. The returned span is shorter than
/// requested when the stream ends early.
pub fn decode_frame_range(path: &Path, start_frame: u64, end_frame: u64) -> Result<InterleavedAudio> {
    let mut stream = open_stream(path)?;
    read_frames(path, &mut stream, start_frame, end_frame)
}

/// Decode `duration_secs` of audio starting at `start_secs`, keeping all channels.
///
/// Times are converted to frames at the file's native rate by rounding.
pub fn decode_time_range(path: &Path, start_secs: f64, duration_secs: f64) -> Result<InterleavedAudio> {
    let mut stream = open_stream(path)?;
    let rate = f64::from(stream.sample_rate);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let start_frame = (start_secs.max(0.0) * rate).round() as u64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let span_frames = (duration_secs.max(0.0) * rate).round() as u64;
    read_frames(path, &mut stream, start_frame, start_frame.saturating_add(span_frames))
}

fn read_frames(
    path: &Path,
    stream: &mut OpenedStream,
    start_frame: u64,
    end_frame: u64,
) -> Result<InterleavedAudio> {
    let sample_rate = stream.sample_rate;
    let mut samples = Vec::new();
    let mut channels: u16 = 0;
    let mut frames_seen: u64 = 0;

    decode_buffers(path, stream, |buffer| {
        let spec = *buffer.spec();
        #[allow(clippy::cast_possible_truncation)]
        let buffer_channels = spec.channels.count() as u16;
        if channels == 0 {
            channels = buffer_channels;
        }

        let interleaved = interleave(buffer);
        let ch = usize::from(buffer_channels.max(1));
        let buffer_frames = (interleaved.len() / ch) as u64;
        let buffer_start = frames_seen;
        let buffer_end = frames_seen + buffer_frames;
        frames_seen = buffer_end;

        if buffer_end > start_frame && buffer_start < end_frame {
            #[allow(clippy::cast_possible_truncation)]
            let from = (start_frame.saturating_sub(buffer_start)) as usize;
            #[allow(clippy::cast_possible_truncation)]
            let to = (end_frame.min(buffer_end) - buffer_start) as usize;
            samples.extend_from_slice(&interleaved[from * ch..to * ch]);
        }

        if frames_seen >= end_frame {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    Ok(InterleavedAudio {
        samples,
        channels: channels.max(1),
        sample_rate,
        frames_seen,
    })
}

/// Reader options shared by every decode path.
fn format_options() -> FormatOptions {
    FormatOptions {
        enable_gapless: true,
        ..Default::default()
    }
}

/// Probe a file and build a decoder for its first audio track.
fn open_stream(path: &Path) -> Result<OpenedStream> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    // Create hint from file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &format_options(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;

    let decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    Ok(OpenedStream {
        format,
        decoder,
        track_id,
        sample_rate,
    })
}

/// Feed every decoded buffer of the selected track to `on_buffer`.
fn decode_buffers<F>(path: &Path, stream: &mut OpenedStream, mut on_buffer: F) -> Result<()>
where
    F: FnMut(AudioBufferRef<'_>) -> ControlFlow<()>,
{
    use symphonia::core::errors::Error as SymphoniaError;

    loop {
        let packet = match stream.format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != stream.track_id {
            continue;
        }

        let decoded = match stream.decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // A corrupt packet is skipped; the stream itself is still usable.
            Err(SymphoniaError::DecodeError(reason)) => {
                debug!("Skipping undecodable packet in {}: {reason}", path.display());
                continue;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if on_buffer(decoded).is_break() {
            break;
        }
    }

    Ok(())
}

/// Convert any decoded buffer to interleaved f32.
fn interleave(buffer: AudioBufferRef<'_>) -> Vec<f32> {
    let mut sample_buffer = SampleBuffer::<f32>::new(buffer.capacity() as u64, *buffer.spec());
    sample_buffer.copy_interleaved_ref(buffer);
    sample_buffer.samples().to_vec()
}

/// Append decoded samples to the output buffer, converting to mono.
fn append_mono(buffer: AudioBufferRef<'_>, output: &mut Vec<f32>) {
    let channels = buffer.spec().channels.count().max(1);
    let interleaved = interleave(buffer);

    if channels == 1 {
        output.extend_from_slice(&interleaved);
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / channels as f32;
    output.extend(
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() * scale),
    );
}
