//! Pairwise similarity functions for artworks
//!
//! Every function is total and returns a score in [0.0, 1.0] where 1.0 means
//! identical. Missing inputs map to fixed low priors instead of errors.

use ahash::AHashSet;
use kinship_core::FeatureVector;

/// Score when either medium is missing: weak evidence of dissimilarity
pub const MISSING_MEDIUM_PRIOR: f32 = 0.2;

/// Score when either year is missing
pub const MISSING_YEAR_PRIOR: f32 = 0.3;

/// `(max year gap, score)` bands, checked in order
pub const YEAR_BANDS: [(u32, f32); 4] = [(0, 1.0), (2, 0.8), (5, 0.6), (10, 0.4)];

/// Score for a year gap beyond the last band
pub const DISTANT_YEAR_SCORE: f32 = 0.1;

/// Cosine similarity of two feature vectors, clamped to [0, 1]
///
/// Absent or empty vectors, vectors of different length and zero vectors
/// all score 0. A length mismatch is treated as "incomparable" and not as an
/// error; it usually means two extractor versions produced the vectors.
pub fn cosine(a: Option<&FeatureVector>, b: Option<&FeatureVector>) -> f32 {
    match (a, b) {
        (Some(a), Some(b)) => a.cosine_similarity(b),
        _ => 0.0,
    }
}

/// Similarity of two free-text medium descriptions
///
/// Case-insensitive exact match scores 1.0, otherwise the Jaccard index of
/// the whitespace-separated word sets, so "oil on canvas" and "oil on wood
/// panel" still share credit. Empty or blank text counts as missing.
pub fn medium_similarity(a: Option<&str>, b: Option<&str>) -> f32 {
    let (a, b) = match (non_blank(a), non_blank(b)) {
        (Some(a), Some(b)) => (a.to_lowercase(), b.to_lowercase()),
        _ => return MISSING_MEDIUM_PRIOR,
    };

    if a == b {
        return 1.0;
    }

    jaccard_tokens(&a, &b)
}

/// Similarity of two creation years as a step function of the gap
///
/// A year of 0 is treated as missing.
pub fn year_similarity(a: Option<i32>, b: Option<i32>) -> f32 {
    let (a, b) = match (a.filter(|y| *y != 0), b.filter(|y| *y != 0)) {
        (Some(a), Some(b)) => (a as i64, b as i64),
        _ => return MISSING_YEAR_PRIOR,
    };

    let gap = (a - b).unsigned_abs();
    YEAR_BANDS
        .iter()
        .find(|(max_gap, _)| gap <= *max_gap as u64)
        .map(|(_, score)| *score)
        .unwrap_or(DISTANT_YEAR_SCORE)
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Jaccard index over whitespace tokens; inputs are already lower-cased
fn jaccard_tokens(a: &str, b: &str) -> f32 {
    let tokens_a: AHashSet<&str> = a.split_whitespace().collect();
    let tokens_b: AHashSet<&str> = b.split_whitespace().collect();

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}
