//! PCM content hashing.

/// BLAKE3 hash of the samples as 16-bit little-endian PCM, lowercase hex.
///
/// Equals the BLAKE3 hash of the `data` chunk written by [`super::store`].
pub fn pcm_hash(samples: &[i16]) -> String {
    let mut hasher = blake3::Hasher::new();
    for &s in samples {
        hasher.update(&s.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
