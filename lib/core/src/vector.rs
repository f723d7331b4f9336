use serde::{Deserialize, Serialize};

/// Visual feature embedding produced by the external conversion service
///
/// Dimensionality is fixed per deployment but not known to this crate, so a
/// vector of any length is accepted. Serialized as a plain JSON array.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FeatureVector {
    data: Vec<f32>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Cosine similarity clamped to [0, 1]
    ///
    /// Orientation-opposite vectors are unrelated, not anti-related, so
    /// negative cosines floor at 0. A length mismatch, an empty vector or a
    /// zero vector all yield 0.
    #[inline]
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f32 {
        match crate::kernels::cosine(&self.data, &other.data) {
            Some(c) if c.is_finite() => c.clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}
