//! Cosine similarity between embedding vectors

/// Added to the denominator so the zero vector scores 0.0 instead of NaN.
const NORM_EPSILON: f32 = 1e-9;

/// Cosine similarity between two vectors of equal dimension.
///
/// Callers must pass vectors produced by the same embedding model; the
/// dimensions are not reconciled here.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "embedding dimensions must match");

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    dot / (norm_a * norm_b + NORM_EPSILON)
}
