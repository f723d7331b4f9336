//! # Kinship API
//!
//! REST surface over the kinship engine.
//!
//! | Method | Path | |
//! |--------|------|--|
//! | GET | `/health` | liveness and gallery counts |
//! | PUT | `/artworks` | upsert a batch of artworks |
//! | GET | `/artworks/{id}` | fetch one artwork |
//! | POST | `/kinship/calculate/{id}` | build and store kinship for a stored artwork |
//! | GET | `/kinship/{id}` | strongest stored relationships of an artwork |
//! | POST | `/kinship/compute` | stateless kinship over supplied data |
//! | POST | `/search/similar` | tiered file-similarity search over the gallery |
//! | POST | `/search/rank` | stateless ranking over a supplied pool |

pub mod rest;

pub use rest::{configure, ApiState, RestApi, FILE_SEARCH_POOL_LIMIT};
