use crate::vector::FeatureVector;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque artwork identity
///
/// Ordered so that pools and listings iterate deterministically. Text ids
/// are normalized on the way in, whether they come from JSON, a path
/// segment or `From<&str>`: UUID text becomes `Uuid`, decimal text becomes
/// `Integer`, so `"42"` and `42` name the same artwork.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum ArtworkId {
    Uuid(Uuid),
    Integer(u64),
    String(String),
}

impl std::fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtworkId::Uuid(u) => write!(f, "{}", u),
            ArtworkId::Integer(i) => write!(f, "{}", i),
            ArtworkId::String(s) => write!(f, "{}", s),
        }
    }
}

impl ArtworkId {
    fn parse_text(s: &str) -> Option<Self> {
        if let Ok(u) = Uuid::parse_str(s) {
            return Some(ArtworkId::Uuid(u));
        }
        s.parse::<u64>().ok().map(ArtworkId::Integer)
    }
}

impl From<String> for ArtworkId {
    fn from(s: String) -> Self {
        ArtworkId::parse_text(&s).unwrap_or(ArtworkId::String(s))
    }
}

impl From<&str> for ArtworkId {
    fn from(s: &str) -> Self {
        ArtworkId::parse_text(s).unwrap_or_else(|| ArtworkId::String(s.to_string()))
    }
}

impl From<u64> for ArtworkId {
    fn from(i: u64) -> Self {
        ArtworkId::Integer(i)
    }
}

impl From<Uuid> for ArtworkId {
    fn from(u: Uuid) -> Self {
        ArtworkId::Uuid(u)
    }
}

impl std::str::FromStr for ArtworkId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ArtworkId::from(s))
    }
}

impl<'de> Deserialize<'de> for ArtworkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Integer(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Integer(i) => ArtworkId::Integer(i),
            RawId::Text(s) => ArtworkId::from(s),
        })
    }
}

fn default_approved() -> bool {
    true
}

/// An artwork as seen by the scoring core
///
/// Read-only for the duration of a scoring pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default)]
    pub title: String,
    /// Username used for attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "deserialize_year", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default = "default_approved")]
    pub approved: bool,
}

impl Artwork {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ArtworkId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            artist: None,
            features: None,
            medium: None,
            year: None,
            file_type: None,
            approved: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_features(mut self, features: Vec<f32>) -> Self {
        self.features = Some(FeatureVector::new(features));
        self
    }

    #[inline]
    #[must_use]
    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = Some(medium.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }

    /// True when the artwork carries a non-empty feature vector
    #[inline]
    pub fn has_feature_vector(&self) -> bool {
        self.feature_vector().is_some()
    }

    /// The feature vector, if one is usable for scoring
    #[inline]
    pub fn feature_vector(&self) -> Option<&FeatureVector> {
        self.features.as_ref().filter(|v| !v.is_empty())
    }

    /// Display attribution, e.g. `@ada`
    pub fn attribution(&self) -> String {
        format!("@{}", self.artist.as_deref().unwrap_or("unknown"))
    }
}

/// Years arrive as numbers or numeric strings; anything else is treated as
/// missing rather than rejected.
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_vector_capability() {
        let none = Artwork::new("a");
        let empty = Artwork::new("b").with_features(vec![]);
        let some = Artwork::new("c").with_features(vec![0.1, 0.2]);

        assert!(!none.has_feature_vector());
        assert!(!empty.has_feature_vector());
        assert!(some.has_feature_vector());
        assert_eq!(some.feature_vector().map(|v| v.dim()), Some(2));
    }

    #[test]
    fn test_deserialize_full_record() {
        let artwork: Artwork = serde_json::from_value(json!({
            "id": "b9c1b0a4-3f4e-4e8e-9d7a-2c1f0e9b8a71",
            "title": "Tide Study",
            "artist": "ada",
            "features": [0.1, 0.2, 0.3],
            "medium": "oil on canvas",
            "year": 2021,
            "file_type": "png"
        }))
        .unwrap();

        assert!(matches!(artwork.id, ArtworkId::Uuid(_)));
        assert_eq!(artwork.year, Some(2021));
        assert!(artwork.approved);
        assert_eq!(artwork.attribution(), "@ada");
    }

    #[test]
    fn test_year_coercion() {
        let from_str: Artwork = serde_json::from_value(json!({"id": 1, "year": "1999"})).unwrap();
        assert_eq!(from_str.year, Some(1999));

        let from_float: Artwork = serde_json::from_value(json!({"id": 2, "year": 2001.0})).unwrap();
        assert_eq!(from_float.year, Some(2001));

        let garbage: Artwork = serde_json::from_value(json!({"id": 3, "year": "circa 1900"})).unwrap();
        assert_eq!(garbage.year, None);

        let null: Artwork = serde_json::from_value(json!({"id": 4, "year": null})).unwrap();
        assert_eq!(null.year, None);
    }

    #[test]
    fn test_id_parsing() {
        assert_eq!("17".parse::<ArtworkId>().unwrap(), ArtworkId::Integer(17));
        assert_eq!("abc".parse::<ArtworkId>().unwrap(), ArtworkId::from("abc"));
        let uuid = Uuid::new_v4();
        assert_eq!(uuid.to_string().parse::<ArtworkId>().unwrap(), ArtworkId::Uuid(uuid));
    }

    #[test]
    fn test_id_json_forms() {
        let int: ArtworkId = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(int, ArtworkId::Integer(7));
        let text: ArtworkId = serde_json::from_value(json!("seven")).unwrap();
        assert_eq!(text, ArtworkId::from("seven"));
    }

    #[test]
    fn test_numeric_text_id_matches_path_form() {
        let from_json: ArtworkId = serde_json::from_value(json!("42")).unwrap();
        let from_path: ArtworkId = "42".parse().unwrap();
        assert_eq!(from_json, ArtworkId::Integer(42));
        assert_eq!(from_json, from_path);
        assert_eq!(ArtworkId::from("42"), from_path);

        let uuid = Uuid::new_v4();
        let from_json: ArtworkId = serde_json::from_value(json!(uuid.to_string())).unwrap();
        assert_eq!(from_json, ArtworkId::Uuid(uuid));
    }

    #[test]
    fn test_missing_artist_attribution() {
        assert_eq!(Artwork::new(1u64).attribution(), "@unknown");
    }
}
