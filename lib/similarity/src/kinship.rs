//! Kinship builder
//!
//! Scores a source artwork against a candidate pool and proposes the
//! relationships worth keeping. Pure computation: the caller supplies the
//! pool and the already-linked pairs, and persists the proposals.

use crate::config::KinshipConfig;
use crate::scorer::{cosine, medium_similarity, year_similarity};
use ahash::AHashSet;
use kinship_core::{
    Artwork, ArtworkId, DimensionBreakdown, Error, ExistingPairs, KinshipRelationship, PairKey, Result,
    ScoringMethod,
};
use rayon::prelude::*;
use serde::Serialize;

/// Score of one source/candidate pair before thresholding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    /// Weighted sum as computed, used for the relevance threshold
    pub raw: f32,
    /// Weighted score, clamped to [0, 1] and rounded to 3 decimals
    pub score: f32,
    pub dimensions: DimensionBreakdown,
}

/// Result of one kinship pass
#[derive(Debug, Clone, Serialize)]
pub struct KinshipOutcome {
    pub artwork_id: ArtworkId,
    /// New, non-duplicate relationship proposals in pool order
    pub created: Vec<KinshipRelationship>,
    /// `vector` when the source had a usable feature vector
    pub method: ScoringMethod,
    /// Number of candidates scored
    pub compared: usize,
}

impl KinshipOutcome {
    pub fn kinship_created(&self) -> usize {
        self.created.len()
    }
}

/// Computes kinship proposals with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct KinshipBuilder {
    config: KinshipConfig,
}

impl KinshipBuilder {
    /// Create a builder; the configuration is validated and normalized
    pub fn new(mut config: KinshipConfig) -> Result<Self> {
        config.validate_and_normalize()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &KinshipConfig {
        &self.config
    }

    /// Score a single pair
    ///
    /// Uses the vector path when both artworks carry a usable feature vector,
    /// the metadata path otherwise.
    pub fn score_pair(&self, source: &Artwork, candidate: &Artwork) -> PairScore {
        let medium = medium_similarity(source.medium.as_deref(), candidate.medium.as_deref());
        let year = year_similarity(source.year, candidate.year);

        let (raw, dimensions) = match (source.feature_vector(), candidate.feature_vector()) {
            (Some(a), Some(b)) => {
                let visual = cosine(Some(a), Some(b));
                let w = &self.config.vector_weights;
                (
                    visual * w.visual + medium * w.medium + year * w.year,
                    DimensionBreakdown::Vector { visual, medium, year },
                )
            }
            _ => {
                let w = &self.config.metadata_weights;
                (
                    medium * w.medium + year * w.year,
                    DimensionBreakdown::Metadata { medium, year },
                )
            }
        };

        PairScore { raw, score: round_score(raw), dimensions }
    }

    /// Propose relationships between `source` and every candidate in `pool`
    ///
    /// Candidates with the source's own id are skipped. A candidate is proposed
    /// when its score clears `min_score` and the pair is neither in `existing`
    /// nor already proposed earlier in this pass.
    pub fn compute(&self, source: &Artwork, pool: &[Artwork], existing: &ExistingPairs) -> KinshipOutcome {
        let scored: Vec<(&Artwork, PairScore)> = pool
            .par_iter()
            .filter(|candidate| candidate.id != source.id)
            .map(|candidate| (candidate, self.score_pair(source, candidate)))
            .collect();

        let compared = scored.len();
        let mut proposed: AHashSet<PairKey> = AHashSet::new();
        let mut created = Vec::new();

        for (candidate, pair) in scored {
            if pair.raw <= self.config.min_score {
                continue;
            }

            let key = PairKey::of(&source.id, &candidate.id);
            if existing.contains_key(&key) || !proposed.insert(key) {
                continue;
            }

            created.push(KinshipRelationship {
                artwork_a: source.id.clone(),
                artwork_b: candidate.id.clone(),
                similarity_score: pair.score,
                dimensions: pair.dimensions,
            });
        }

        let method = if source.has_feature_vector() {
            ScoringMethod::Vector
        } else {
            ScoringMethod::Metadata
        };

        KinshipOutcome {
            artwork_id: source.id.clone(),
            created,
            method,
            compared,
        }
    }

    /// Locate `source_id` among `artworks` and score it against every other
    /// approved artwork
    ///
    /// Fails with [`Error::ArtworkNotFound`] when the source is not supplied.
    pub fn compute_for(
        &self,
        source_id: &ArtworkId,
        artworks: &[Artwork],
        existing: &ExistingPairs,
    ) -> Result<KinshipOutcome> {
        let source = artworks
            .iter()
            .find(|a| &a.id == source_id)
            .ok_or_else(|| Error::ArtworkNotFound(source_id.clone()))?;

        let pool: Vec<Artwork> = artworks
            .iter()
            .filter(|a| a.approved && &a.id != source_id)
            .cloned()
            .collect();

        Ok(self.compute(source, &pool, existing))
    }
}

/// Clamp to [0, 1] and round to 3 decimals
fn round_score(raw: f32) -> f32 {
    let rounded = (raw.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
    rounded.min(1.0)
}
