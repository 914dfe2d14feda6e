//! Concatenation of same-format recordings.

use std::path::{Path, PathBuf};

use crate::buffer::PcmBuffer;
use crate::error::{MixError, MixResult};
use crate::wav;

/// Joins buffers end to end. All inputs must share a sample rate.
pub fn concat(inputs: &[PcmBuffer]) -> MixResult<PcmBuffer> {
    let first = inputs
        .first()
        .ok_or_else(|| MixError::config("no input recordings provided"))?;

    let total: usize = inputs.iter().map(PcmBuffer::len).sum();
    let mut samples = Vec::with_capacity(total);
    for (idx, input) in inputs.iter().enumerate() {
        if input.sample_rate != first.sample_rate {
            return Err(MixError::config(format!(
                "input {} is {}Hz but input 0 is {}Hz",
                idx, input.sample_rate, first.sample_rate
            )));
        }
        samples.extend_from_slice(&input.samples);
    }

    Ok(PcmBuffer::new(samples, first.sample_rate))
}

/// Loads `inputs` in order, joins them, and stores the result at `output`.
pub fn concat_files(inputs: &[PathBuf], output: &Path) -> MixResult<PcmBuffer> {
    if inputs.is_empty() {
        return Err(MixError::config("no input WAVs provided"));
    }

    let mut buffers = Vec::with_capacity(inputs.len());
    for path in inputs {
        let buffer = wav::load(path)?;
        if let Some(first) = buffers.first().map(|b: &PcmBuffer| b.sample_rate) {
            if buffer.sample_rate != first {
                return Err(MixError::format(
                    path,
                    format!(
                        "sample rate {}Hz does not match {}Hz of the first input",
                        buffer.sample_rate, first
                    ),
                ));
            }
        }
        buffers.push(buffer);
    }

    let joined = concat(&buffers)?;
    wav::store(output, &joined)?;
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_preserves_order() {
        let a = PcmBuffer::new(vec![1, 2], 8000);
        let b = PcmBuffer::new(vec![3], 8000);
        let c = PcmBuffer::new(vec![], 8000);
        let joined = concat(&[a, b, c]).unwrap();
        assert_eq!(joined.samples, vec![1, 2, 3]);
        assert_eq!(joined.sample_rate, 8000);
    }

    #[test]
    fn test_concat_rejects_rate_mismatch() {
        let err = concat(&[
            PcmBuffer::new(vec![1], 8000),
            PcmBuffer::new(vec![2], 16000),
        ])
        .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.code(), "MIX_002");
        assert!(err.to_string().contains("input 1 is 16000Hz"));
    }

    #[test]
    fn test_concat_rejects_empty_list() {
        assert!(concat(&[]).unwrap_err().is_configuration());
    }

    #[test]
    fn test_concat_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");
        wav::store(&a, &PcmBuffer::new(vec![10, 20], 8000)).unwrap();
        wav::store(&b, &PcmBuffer::new(vec![30], 8000)).unwrap();

        let out = dir.path().join("out").join("joined.wav");
        concat_files(&[a, b], &out).unwrap();

        assert_eq!(wav::load(&out).unwrap().samples, vec![10, 20, 30]);
    }

    #[test]
    fn test_concat_files_mismatch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");
        wav::store(&a, &PcmBuffer::new(vec![1], 8000)).unwrap();
        wav::store(&b, &PcmBuffer::new(vec![2], 44100)).unwrap();

        let out = dir.path().join("joined.wav");
        let err = concat_files(&[a, b], &out).unwrap_err();
        assert!(matches!(err, MixError::Format { .. }));
        assert!(!out.exists());
    }
}
