//! Core WAV encoding and atomic storage.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::format::WavFormat;
use crate::buffer::PcmBuffer;
use crate::error::MixResult;

/// Writes a complete WAV file to a writer.
///
/// The header is the canonical 44-byte PCM layout with no extra chunks, so
/// equal samples always encode to equal bytes.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // Total file size minus 8 bytes for RIFF header

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Converts 16-bit samples to little-endian PCM bytes.
pub fn samples_to_pcm16(samples: &[i16]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        pcm.extend_from_slice(&sample.to_le_bytes());
    }
    pcm
}

/// Encodes a buffer as a complete mono 16-bit WAV file.
pub fn encode(buffer: &PcmBuffer) -> Vec<u8> {
    let pcm = samples_to_pcm16(&buffer.samples);
    let mut out = Vec::with_capacity(44 + pcm.len());
    write_wav(&mut out, &WavFormat::mono(buffer.sample_rate), &pcm)
        .expect("writing to Vec should not fail");
    out
}

/// Stores a buffer as a mono 16-bit WAV file at `path`.
///
/// Parent directories are created as needed. The file is written to a
/// temporary sibling and renamed into place, so `path` either holds the
/// complete file or is left untouched.
pub fn store(path: &Path, buffer: &PcmBuffer) -> MixResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let bytes = encode(buffer);
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
