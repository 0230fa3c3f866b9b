//! Audio decoding and preparation.

mod decode;
mod resample;
mod signal;

pub use decode::{
    DecodedAudio, InterleavedAudio, decode_audio_file, decode_frame_range, decode_time_range,
};
pub use resample::resample;
pub use signal::{AudioSignal, LoadedSignal, load_signal};
