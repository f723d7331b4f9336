//! # Kinship Similarity
//!
//! Artwork similarity scoring and the two pipelines built on it.
//!
//! ## Components
//!
//! - **Scorer** ([`scorer`]): bounded [0, 1] pairwise functions: clamped
//!   cosine over feature vectors, Jaccard-based medium overlap, stepped
//!   year proximity
//! - **Kinship builder** ([`KinshipBuilder`]): scores a source artwork against
//!   a pool (vector path or metadata fallback), drops noise, deduplicates
//!   against existing pairs and proposes relationships
//! - **File-similarity ranker** ([`FileSimilarityRanker`]): scores a pool
//!   against an uploaded file and buckets hits into high / moderate / distant
//!   tiers
//!
//! Everything here is pure: no I/O, no shared state, safe to call
//! concurrently for different queries.
//!
//! ## Example
//!
//! ```rust
//! use kinship_core::{Artwork, ExistingPairs, ScoringMethod};
//! use kinship_similarity::{KinshipBuilder, KinshipConfig};
//!
//! let builder = KinshipBuilder::new(KinshipConfig::default()).unwrap();
//!
//! let source = Artwork::new("dawn").with_medium("acrylic").with_year(2020);
//! let pool = vec![Artwork::new("dusk").with_medium("acrylic").with_year(2020)];
//!
//! let outcome = builder.compute(&source, &pool, &ExistingPairs::new());
//! assert_eq!(outcome.method, ScoringMethod::Metadata);
//! assert_eq!(outcome.created[0].similarity_score, 1.0);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────>│   Kinship   │────>│  Proposals  │
//! │   + pool    │     │   Builder   │     │ (deduped)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                     ┌─────────────┐
//!                     │   Scorer    │
//!                     └─────────────┘
//!                            │
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ File query  │────>│    File     │────>│    Tiers    │
//! │   + pool    │     │   Ranker    │     │ high/mod/dis│
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```

pub mod config;
pub mod kinship;
pub mod ranker;
pub mod scorer;

pub use config::{ConfigError, KinshipConfig, MetadataWeights, RankerConfig, Settings, VectorWeights};
pub use kinship::{KinshipBuilder, KinshipOutcome, PairScore};
pub use ranker::{file_type_from_name, FileMatch, FileQuery, FileSimilarity, FileSimilarityRanker, RankingMethod};
pub use scorer::{cosine, medium_similarity, year_similarity};
