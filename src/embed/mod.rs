// Sentence embeddings and vector similarity.

pub mod download;
pub mod onnx;
pub mod traits;

/// Cosine similarity between two equal-length vectors, clamped to [0, 1].
///
/// Sentence-transformer embeddings of related prose point in broadly the
/// same direction, so the negative half of the range carries no signal for
/// salience scoring; it is clamped away. Mismatched lengths and zero
/// vectors score 0.0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}
