//! # kinship
//!
//! Artwork similarity and kinship engine.
//!
//! Scores pairs of artworks by cosine similarity over visual feature vectors,
//! falling back to medium and year metadata when vectors are missing, turns
//! those scores into a deduplicated relationship graph ("kinship"), and ranks
//! galleries against uploaded files in high / moderate / distant tiers.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! kinship --http-port 6333 --artworks gallery.json
//! curl -X POST localhost:6333/kinship/calculate/42
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use kinship::prelude::*;
//!
//! let builder = KinshipBuilder::new(KinshipConfig::default()).unwrap();
//!
//! let source = Artwork::new("a").with_features(vec![1.0, 0.0]).with_medium("ink").with_year(2020);
//! let pool = vec![Artwork::new("b").with_features(vec![1.0, 0.0]).with_medium("ink").with_year(2020)];
//!
//! let outcome = builder.compute(&source, &pool, &ExistingPairs::new());
//! assert_eq!(outcome.method, ScoringMethod::Vector);
//! assert_eq!(outcome.created[0].similarity_score, 1.0);
//!
//! let ranker = FileSimilarityRanker::new(RankerConfig::default()).unwrap();
//! let result = ranker.rank(&FileQuery::from_file_name("study.png", None), &pool);
//! assert_eq!(result.method, RankingMethod::TypeMatch);
//! ```
//!
//! ## Crate Structure
//!
//! - `kinship-core` - Artworks, feature vectors, relationships, in-memory gallery
//! - `kinship-similarity` - Scorer, kinship builder, file-similarity ranker, settings
//! - `kinship-api` - REST API

// Re-export core types
pub use kinship_core::{
    Artwork, ArtworkId, FeatureVector,
    KinshipRelationship, DimensionBreakdown, ScoringMethod,
    PairKey, ExistingPairs,
    Gallery, KinshipRecord,
    Error, Result,
};

// Re-export similarity engine
pub use kinship_similarity::{
    KinshipBuilder, KinshipOutcome, KinshipConfig,
    FileSimilarityRanker, FileQuery, FileSimilarity, FileMatch, RankingMethod, RankerConfig,
    Settings, ConfigError,
};

// Re-export API
pub use kinship_api::{ApiState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Artwork, ArtworkId, FeatureVector,
        KinshipRelationship, DimensionBreakdown, ScoringMethod,
        ExistingPairs,
        KinshipBuilder, KinshipOutcome, KinshipConfig,
        FileSimilarityRanker, FileQuery, FileSimilarity, RankingMethod, RankerConfig,
        Settings,
    };
}

/// Pairwise similarity functions
pub mod scorer {
    pub use kinship_similarity::scorer::{cosine, medium_similarity, year_similarity};
}
