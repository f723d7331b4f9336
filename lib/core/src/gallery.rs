use crate::{Artwork, ArtworkId, ExistingPairs, KinshipRelationship, PairKey};
use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Default number of relationships returned per artwork
pub const DEFAULT_KINSHIP_LIMIT: usize = 20;

/// A relationship as held by the gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinshipRecord {
    #[serde(flatten)]
    pub relationship: KinshipRelationship,
    pub created_at: DateTime<Utc>,
}

/// In-memory artwork and kinship store
///
/// Stands in for the hosted storage layer: it hands out candidate pools and
/// the set of already-linked pairs, and it is the single place that enforces
/// at most one relationship per unordered pair.
pub struct Gallery {
    artworks: Arc<RwLock<BTreeMap<ArtworkId, Artwork>>>,
    kinship: Arc<RwLock<HashMap<PairKey, KinshipRecord>>>,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            artworks: Arc::new(RwLock::new(BTreeMap::new())),
            kinship: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Build a gallery from a JSON array of artworks
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let artworks: Vec<Artwork> = serde_json::from_str(json)?;
        let gallery = Self::new();
        gallery.upsert_batch(artworks);
        Ok(gallery)
    }

    pub fn len(&self) -> usize {
        self.artworks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.read().is_empty()
    }

    /// Insert or replace an artwork
    pub fn upsert(&self, artwork: Artwork) {
        tracing::debug!(id = %artwork.id, "upserting artwork");
        self.artworks.write().insert(artwork.id.clone(), artwork);
    }

    pub fn upsert_batch(&self, artworks: Vec<Artwork>) -> usize {
        let count = artworks.len();
        let mut map = self.artworks.write();
        for artwork in artworks {
            map.insert(artwork.id.clone(), artwork);
        }
        tracing::debug!(count, "upserted artwork batch");
        count
    }

    pub fn get(&self, id: &ArtworkId) -> Option<Artwork> {
        self.artworks.read().get(id).cloned()
    }

    /// Snapshot of every artwork, approved or not, in id order
    pub fn artworks(&self) -> Vec<Artwork> {
        self.artworks.read().values().cloned().collect()
    }

    /// Up to `limit` approved artworks, in id order
    pub fn approved(&self, limit: usize) -> Vec<Artwork> {
        self.artworks
            .read()
            .values()
            .filter(|a| a.approved)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Snapshot of every pair that already has a relationship
    pub fn existing_pairs(&self) -> ExistingPairs {
        self.kinship.read().keys().cloned().collect()
    }

    pub fn relationship_count(&self) -> usize {
        self.kinship.read().len()
    }

    /// Store proposals, skipping any pair that is already linked
    ///
    /// Proposals are computed against a snapshot of [`existing_pairs`], so two
    /// concurrent recomputations may propose the same pair; the check here runs
    /// under the write lock and keeps the first one.
    ///
    /// [`existing_pairs`]: Gallery::existing_pairs
    pub fn insert_relationships(&self, proposals: Vec<KinshipRelationship>) -> usize {
        let now = Utc::now();
        let mut kinship = self.kinship.write();
        let mut inserted = 0;

        for relationship in proposals {
            let key = relationship.pair();
            if kinship.contains_key(&key) {
                tracing::debug!(a = %key.low(), b = %key.high(), "skipping duplicate kinship pair");
                continue;
            }
            kinship.insert(key, KinshipRecord { relationship, created_at: now });
            inserted += 1;
        }

        inserted
    }

    /// Relationships touching `id`, strongest first
    pub fn kinship_for(&self, id: &ArtworkId, limit: usize) -> Vec<KinshipRecord> {
        let mut records: Vec<KinshipRecord> = self
            .kinship
            .read()
            .iter()
            .filter(|(key, _)| key.contains(id))
            .map(|(_, record)| record.clone())
            .collect();

        // Ties broken by pair so the listing is stable across calls
        records.sort_by(|a, b| {
            OrderedFloat(b.relationship.similarity_score)
                .cmp(&OrderedFloat(a.relationship.similarity_score))
                .then_with(|| a.relationship.pair().cmp(&b.relationship.pair()))
        });
        records.truncate(limit);
        records
    }
}
