//! File-similarity ranker
//!
//! Ranks a candidate pool against an uploaded file for "find similar"
//! search. With a query feature vector, candidates that carry one are scored
//! by cosine similarity; everything else falls back to a coarse file-type
//! match. Scores are integer percentages bucketed into three tiers.

use crate::config::RankerConfig;
use crate::scorer::cosine;
use kinship_core::{Artwork, ArtworkId, FeatureVector, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// What the caller knows about the uploaded file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

impl FileQuery {
    pub fn new(features: Option<FeatureVector>, file_type: Option<String>) -> Self {
        Self { features, file_type }
    }

    /// Build a query from an uploaded file name, e.g. `sketch.HTML` -> `html`
    pub fn from_file_name(file_name: &str, features: Option<FeatureVector>) -> Self {
        Self {
            features,
            file_type: file_type_from_name(file_name),
        }
    }

    /// The query vector, if one is usable for scoring
    pub fn feature_vector(&self) -> Option<&FeatureVector> {
        self.features.as_ref().filter(|v| !v.is_empty())
    }
}

/// Lower-cased text after the last `.` of a file name
///
/// A name without a dot yields the whole name, matching how the upload path
/// has always derived it.
pub fn file_type_from_name(file_name: &str) -> Option<String> {
    file_name
        .rsplit('.')
        .next()
        .map(|ext| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Overall method used for a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingMethod {
    Vector,
    TypeMatch,
    /// The pool was empty
    None,
}

/// One ranked search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMatch {
    pub id: ArtworkId,
    pub title: String,
    /// Attribution, e.g. `@ada`
    pub artist: String,
    /// Percentage in [0, 100]
    pub score: u32,
}

/// Tiered ranking response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSimilarity {
    pub high: Vec<FileMatch>,
    pub moderate: Vec<FileMatch>,
    pub distant: Vec<FileMatch>,
    pub method: RankingMethod,
}

impl FileSimilarity {
    pub fn empty() -> Self {
        Self {
            high: Vec::new(),
            moderate: Vec::new(),
            distant: Vec::new(),
            method: RankingMethod::None,
        }
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.moderate.len() + self.distant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ranks candidate pools with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct FileSimilarityRanker {
    config: RankerConfig,
}

impl FileSimilarityRanker {
    /// Create a ranker; the configuration is validated
    pub fn new(config: RankerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Percentage score of one candidate
    ///
    /// `use_vectors` is the pool-level decision; a candidate without a vector
    /// still falls back to type matching.
    pub fn score_candidate(&self, query: &FileQuery, candidate: &Artwork, use_vectors: bool) -> u32 {
        if use_vectors {
            if let (Some(q), Some(c)) = (query.feature_vector(), candidate.feature_vector()) {
                return (cosine(Some(q), Some(c)) * 100.0).round() as u32;
            }
        }
        self.type_match_score(query.file_type.as_deref(), candidate.file_type.as_deref())
    }

    /// Coarse categorical score from file types alone
    pub fn type_match_score(&self, query_type: Option<&str>, candidate_type: Option<&str>) -> u32 {
        match (query_type, candidate_type) {
            (Some(q), Some(c)) if q.eq_ignore_ascii_case(c) => self.config.exact_type_score,
            (Some(q), Some(c)) if self.config.is_code_like(q) && self.config.is_code_like(c) => {
                self.config.code_like_score
            }
            _ => self.config.fallback_score,
        }
    }

    /// Score, sort and bucket the pool
    pub fn rank(&self, query: &FileQuery, pool: &[Artwork]) -> FileSimilarity {
        if pool.is_empty() {
            return FileSimilarity::empty();
        }

        let use_vectors = query.feature_vector().is_some() && pool.iter().any(Artwork::has_feature_vector);

        let mut scored: Vec<FileMatch> = pool
            .iter()
            .map(|artwork| FileMatch {
                id: artwork.id.clone(),
                title: artwork.title.clone(),
                artist: artwork.attribution(),
                score: self.score_candidate(query, artwork, use_vectors),
            })
            .collect();

        // Stable: ties keep pool order
        scored.sort_by_key(|m| Reverse(m.score));

        let c = &self.config;
        let tier = |lo: u32, hi: Option<u32>| -> Vec<FileMatch> {
            scored
                .iter()
                .filter(|m| m.score >= lo && hi.map_or(true, |hi| m.score < hi))
                .take(c.tier_limit)
                .cloned()
                .collect()
        };

        FileSimilarity {
            high: tier(c.high_cutoff, None),
            moderate: tier(c.moderate_cutoff, Some(c.high_cutoff)),
            distant: tier(c.distant_cutoff, Some(c.moderate_cutoff)),
            method: if use_vectors {
                RankingMethod::Vector
            } else {
                RankingMethod::TypeMatch
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranker() -> FileSimilarityRanker {
        FileSimilarityRanker::new(RankerConfig::default()).unwrap()
    }

    fn typed(id: u64, file_type: &str) -> Artwork {
        Artwork::new(id).with_title(format!("Work {}", id)).with_artist("ada").with_file_type(file_type)
    }

    /// Unit vector at `angle` so the cosine against [1, 0] is `cos(angle)`
    fn angled(id: u64, cosine: f32) -> Artwork {
        let sine = (1.0 - cosine * cosine).max(0.0).sqrt();
        Artwork::new(id).with_features(vec![cosine, sine])
    }

    #[test]
    fn test_empty_pool() {
        let result = ranker().rank(&FileQuery::default(), &[]);
        assert_eq!(result, FileSimilarity::empty());
        assert_eq!(result.method, RankingMethod::None);
    }

    #[test]
    fn test_type_match_scores() {
        let r = ranker();
        assert_eq!(r.type_match_score(Some("png"), Some("png")), 60);
        assert_eq!(r.type_match_score(Some("png"), Some("PNG")), 60);
        assert_eq!(r.type_match_score(Some("html"), Some("js")), 55);
        assert_eq!(r.type_match_score(Some("png"), Some("jpg")), 10);
        assert_eq!(r.type_match_score(None, Some("png")), 10);
        assert_eq!(r.type_match_score(Some("png"), None), 10);
    }

    #[test]
    fn test_type_match_tiers() {
        let pool = vec![typed(1, "jpg"), typed(2, "png"), typed(3, "js")];
        let query = FileQuery::from_file_name("upload.png", None);

        let result = ranker().rank(&query, &pool);

        assert_eq!(result.method, RankingMethod::TypeMatch);
        assert!(result.high.is_empty());
        // png exact (60) is moderate; jpg/js (10) fall below the distant cutoff
        assert_eq!(result.moderate.len(), 1);
        assert_eq!(result.moderate[0].id, ArtworkId::from(2u64));
        assert_eq!(result.moderate[0].artist, "@ada");
        assert!(result.distant.is_empty());
    }

    #[test]
    fn test_code_like_uploads() {
        let pool = vec![typed(1, "htm"), typed(2, "html")];
        let query = FileQuery::from_file_name("sketch.HTML", None);

        let result = ranker().rank(&query, &pool);
        let scores: Vec<u32> = result.moderate.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![60, 55]);
    }

    #[test]
    fn test_tier_boundaries() {
        let pool = vec![angled(1, 0.70), angled(2, 0.40), angled(3, 0.15), angled(4, 0.14)];
        let query = FileQuery::new(Some(FeatureVector::new(vec![1.0, 0.0])), None);

        let result = ranker().rank(&query, &pool);

        assert_eq!(result.method, RankingMethod::Vector);
        assert_eq!(result.high.iter().map(|m| m.score).collect::<Vec<_>>(), vec![70]);
        assert_eq!(result.moderate.iter().map(|m| m.score).collect::<Vec<_>>(), vec![40]);
        assert_eq!(result.distant.iter().map(|m| m.score).collect::<Vec<_>>(), vec![15]);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_tiers_truncated_and_disjoint() {
        let pool: Vec<Artwork> = (0..8).map(|i| angled(i, 1.0)).chain((8..16).map(|i| angled(i, 0.5))).collect();
        let query = FileQuery::new(Some(FeatureVector::new(vec![1.0, 0.0])), None);

        let result = ranker().rank(&query, &pool);

        assert_eq!(result.high.len(), 5);
        assert_eq!(result.moderate.len(), 5);
        assert!(result.distant.is_empty());
        assert!(result.high.iter().all(|h| !result.moderate.iter().any(|m| m.id == h.id)));
        // ties keep pool order
        assert_eq!(result.high[0].id, ArtworkId::from(0u64));
    }

    #[test]
    fn test_mixed_pool_falls_back_per_candidate() {
        let pool = vec![angled(1, 1.0).with_file_type("png"), typed(2, "png")];
        let query = FileQuery::new(Some(FeatureVector::new(vec![1.0, 0.0])), Some("png".to_string()));

        let result = ranker().rank(&query, &pool);

        assert_eq!(result.method, RankingMethod::Vector);
        assert_eq!(result.high[0].score, 100);
        assert_eq!(result.moderate[0].score, 60);
    }

    #[test]
    fn test_query_vector_without_pool_vectors_is_type_match() {
        let pool = vec![typed(1, "png")];
        let query = FileQuery::new(Some(FeatureVector::new(vec![1.0, 0.0])), Some("png".to_string()));
        assert_eq!(ranker().rank(&query, &pool).method, RankingMethod::TypeMatch);
    }

    #[test]
    fn test_empty_query_vector_is_no_vector() {
        let pool = vec![angled(1, 1.0)];
        let query = FileQuery::new(Some(FeatureVector::default()), None);
        assert_eq!(ranker().rank(&query, &pool).method, RankingMethod::TypeMatch);
    }

    #[test]
    fn test_file_type_from_name() {
        assert_eq!(file_type_from_name("a.b.PNG"), Some("png".to_string()));
        assert_eq!(file_type_from_name("README"), Some("readme".to_string()));
        assert_eq!(file_type_from_name("trailing."), None);
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(serde_json::to_string(&RankingMethod::TypeMatch).unwrap(), "\"type-match\"");
        assert_eq!(serde_json::to_string(&RankingMethod::None).unwrap(), "\"none\"");
    }
}
