//! Kinship relationships between artworks
//!
//! A relationship is an undirected link. Storage keeps it as an ordered
//! `(artwork_a, artwork_b)` pair, but `a→b` and `b→a` are the same
//! relationship; [`PairKey`] is the canonical form used for deduplication.

use crate::artwork::ArtworkId;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Canonical `(min, max)` ordering of an unordered artwork pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    low: ArtworkId,
    high: ArtworkId,
}

impl PairKey {
    pub fn new(a: ArtworkId, b: ArtworkId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn of(a: &ArtworkId, b: &ArtworkId) -> Self {
        Self::new(a.clone(), b.clone())
    }

    pub fn low(&self) -> &ArtworkId {
        &self.low
    }

    pub fn high(&self) -> &ArtworkId {
        &self.high
    }

    pub fn contains(&self, id: &ArtworkId) -> bool {
        &self.low == id || &self.high == id
    }
}

/// Pairs that already have a stored relationship, in either direction
#[derive(Debug, Clone, Default)]
pub struct ExistingPairs {
    pairs: AHashSet<PairKey>,
}

impl ExistingPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, a: ArtworkId, b: ArtworkId) -> bool {
        self.pairs.insert(PairKey::new(a, b))
    }

    pub fn contains(&self, a: &ArtworkId, b: &ArtworkId) -> bool {
        self.pairs.contains(&PairKey::of(a, b))
    }

    pub fn contains_key(&self, key: &PairKey) -> bool {
        self.pairs.contains(key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(ArtworkId, ArtworkId)> for ExistingPairs {
    fn from_iter<I: IntoIterator<Item = (ArtworkId, ArtworkId)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(a, b)| PairKey::new(a, b)).collect(),
        }
    }
}

impl FromIterator<PairKey> for ExistingPairs {
    fn from_iter<I: IntoIterator<Item = PairKey>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Which scoring path produced a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    /// Feature-vector cosine dominates, metadata breaks ties
    Vector,
    /// Medium and year only
    Metadata,
}

impl std::fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringMethod::Vector => write!(f, "vector"),
            ScoringMethod::Metadata => write!(f, "metadata"),
        }
    }
}

/// Per-dimension scores behind a relationship
///
/// Serialized with an inline `method` tag, e.g.
/// `{"method":"vector","visual":0.93,"medium":1.0,"year":0.8}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum DimensionBreakdown {
    Vector { visual: f32, medium: f32, year: f32 },
    Metadata { medium: f32, year: f32 },
}

impl DimensionBreakdown {
    pub fn method(&self) -> ScoringMethod {
        match self {
            DimensionBreakdown::Vector { .. } => ScoringMethod::Vector,
            DimensionBreakdown::Metadata { .. } => ScoringMethod::Metadata,
        }
    }
}

/// A proposed (or stored) kinship link between two artworks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinshipRelationship {
    pub artwork_a: ArtworkId,
    pub artwork_b: ArtworkId,
    /// In [0, 1], rounded to 3 decimals
    pub similarity_score: f32,
    pub dimensions: DimensionBreakdown,
}

impl KinshipRelationship {
    pub fn pair(&self) -> PairKey {
        PairKey::of(&self.artwork_a, &self.artwork_b)
    }

    pub fn method(&self) -> ScoringMethod {
        self.dimensions.method()
    }
}
