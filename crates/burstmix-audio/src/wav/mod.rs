//! Audio I/O adapter.
//!
//! The only module that knows about the RIFF/WAVE container. Loading accepts
//! mono 16-bit integer PCM and nothing else; storing writes the canonical
//! 44-byte-header layout with no timestamps or variable metadata.

mod format;
mod pcm;
mod reader;
mod writer;


pub use format::WavFormat;
pub use pcm::pcm_hash;
pub use reader::{load, load_from_bytes};
pub use writer::{encode, samples_to_pcm16, store, write_wav};
