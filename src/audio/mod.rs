//! Audio source: decoding, resampling and chunking.

mod chunker;
mod decode;
mod resample;

pub use chunker::AudioChunks;
pub use decode::{DecodedAudio, decode_audio_file};
pub use resample::resample;
