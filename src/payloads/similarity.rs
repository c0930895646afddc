//! Cosine similarity over phrase embeddings.

use serde::Serialize;

use crate::error::{Error, Result};

/// Reference Python snippet that finds the most similar phrase pair.
pub const MOST_SIMILAR_SNIPPET: &str = r#"
import numpy as np
from itertools import combinations

def cosine_similarity(vec1, vec2):
    """Compute cosine similarity between two vectors."""
    return np.dot(vec1, vec2) / (np.linalg.norm(vec1) * np.linalg.norm(vec2))

def most_similar(embeddings):
    """Find the most similar pair of phrases based on cosine similarity."""
    phrases = list(embeddings.keys())  # Extract phrase keys
    max_similarity = -1  # Initialize lowest possible similarity
    most_similar_pair = None

    # Iterate over all unique pairs of phrases
    for phrase1, phrase2 in combinations(phrases, 2):
        similarity = cosine_similarity(np.array(embeddings[phrase1]), np.array(embeddings[phrase2]))

        if similarity > max_similarity:
            max_similarity = similarity
            most_similar_pair = (phrase1, phrase2)

    return most_similar_pair
"#;

const MIN_SIMILARITY: f64 = -1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPair {
    pub first: String,
    pub second: String,
    pub similarity: f64,
}

/// Returns `None` when either vector has zero norm or the score is not
/// finite (overflowing components).
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<Option<f64>> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(None);
    }
    let similarity = dot / (norm_a * norm_b);
    Ok(similarity.is_finite().then_some(similarity))
}

/// Scans every unordered pair in input order; ties keep the earlier pair.
///
/// A pair must score strictly above -1 to be picked, so only antiparallel
/// vectors yield `None`.
pub fn most_similar(embeddings: &[(String, Vec<f64>)]) -> Result<Option<SimilarPair>> {
    let mut best: Option<SimilarPair> = None;
    let mut best_score = MIN_SIMILARITY;

    for (i, (first, left)) in embeddings.iter().enumerate() {
        for (second, right) in &embeddings[i + 1..] {
            let Some(similarity) = cosine_similarity(left, right)? else {
                continue;
            };
            if similarity > best_score {
                best_score = similarity;
                best = Some(SimilarPair {
                    first: first.clone(),
                    second: second.clone(),
                    similarity,
                });
            }
        }
    }

    Ok(best)
}
