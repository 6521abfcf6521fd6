//! Embedding BLOB conversion and cosine similarity computation.

use super::Error;

pub type Result<T> = std::result::Result<T, Error>;

const F32_BYTES: usize = std::mem::size_of::<f32>();

/// Convert a vector of f32 embedding values to a BLOB (little-endian bytes).
///
/// # Errors
///
/// Returns `Error::MismatchedDimensions` if the vector length is not `dimensions`.
pub fn vec_to_blob(vec: &[f32], dimensions: usize) -> Result<Vec<u8>> {
    if vec.len() != dimensions {
        return Err(Error::MismatchedDimensions {
            expected: dimensions,
            actual: vec.len(),
        });
    }
    Ok(vec.iter().flat_map(|&x| x.to_le_bytes()).collect())
}

/// Convert a BLOB (little-endian bytes) to a vector of f32 embedding values.
///
/// Any whole number of values decodes; a length mismatch against the query
/// vector is handled at scoring time, not here.
///
/// # Errors
///
/// Returns `Error::InvalidBlobSize` if the blob length is not a multiple of 4.
pub fn blob_to_vec(blob: &[u8]) -> Result<Vec<f32>> {
    if blob.len() % F32_BYTES != 0 {
        return Err(Error::InvalidBlobSize { actual: blob.len() });
    }
    let mut vec = Vec::with_capacity(blob.len() / F32_BYTES);
    for chunk in blob.chunks_exact(F32_BYTES) {
        let val = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        vec.push(val);
    }
    Ok(vec)
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns `0.0` when the vectors differ in length, are empty, have zero
/// magnitude, or contain NaN/infinite values. Otherwise the result lies in
/// `[-1.0, 1.0]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if !denominator.is_finite() || !dot.is_finite() || denominator == 0.0 {
        return 0.0;
    }

    // Rounding can push parallel vectors a hair past 1.0.
    (dot / denominator).clamp(-1.0, 1.0)
}
