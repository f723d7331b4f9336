//! # Kinship Core
//!
//! Core types for the kinship engine.
//!
//! - [`Artwork`] - An artwork as the scoring core sees it (identity, feature
//!   vector, medium, year, file type)
//! - [`FeatureVector`] - Visual embedding with a clamped cosine similarity
//! - [`KinshipRelationship`] - An undirected similarity link with its
//!   per-dimension breakdown
//! - [`PairKey`] / [`ExistingPairs`] - Canonical unordered pairs for
//!   deduplication
//! - [`Gallery`] - Thread-safe in-memory store used by the server
//!
//! ## Example
//!
//! ```rust
//! use kinship_core::{Artwork, FeatureVector};
//!
//! let a = Artwork::new("a").with_features(vec![1.0, 0.0]);
//! let b = Artwork::new("b").with_features(vec![1.0, 0.0]);
//!
//! let va = a.feature_vector().unwrap();
//! let vb = b.feature_vector().unwrap();
//! assert_eq!(va.cosine_similarity(vb), 1.0);
//! # let _ = FeatureVector::default();
//! ```

pub mod artwork;
pub mod error;
pub mod gallery;
pub mod relationship;
pub mod vector;

/// Numeric kernels behind the cosine similarity
pub mod kernels;

pub use artwork::{Artwork, ArtworkId};
pub use error::{Error, Result};
pub use gallery::{Gallery, KinshipRecord, DEFAULT_KINSHIP_LIMIT};
pub use relationship::{DimensionBreakdown, ExistingPairs, KinshipRelationship, PairKey, ScoringMethod};
pub use vector::FeatureVector;
