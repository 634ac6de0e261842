//! Wire models returned by the favorites API.
//!
//! Field names follow the backend's JSON exactly (snake_case for profile
//! fields). The denormalized display fields on [`FavoriteProfile`] are not
//! authoritative here and must not be cached past the current fetch --
//! profiles can change independently of the favorites list.

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::ProfileId;

// ---------------------------------------------------------------------------
// FavoriteProfile
// ---------------------------------------------------------------------------

/// A single favorited profile as returned by `GET /favorites`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteProfile {
    /// Profile identifier (positive integer, owned by the backend).
    pub id: ProfileId,
    /// Display name.
    pub name: String,
    /// Avatar / card image URL, if any.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Short teaser line shown on the card.
    #[serde(default)]
    pub insight: Option<String>,
    /// Category id, absent for uncategorized profiles.
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Category display name, absent for uncategorized profiles.
    #[serde(default)]
    pub category_name: Option<String>,
    /// URL slug of the category.
    #[serde(default)]
    pub category_slug: Option<String>,
    /// Subcategory display name, if any.
    #[serde(default)]
    pub subcategory_name: Option<String>,
    /// When the favorite was created. Set by the backend, read-only here.
    #[serde(default)]
    pub favorited_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// CategoryBucket
// ---------------------------------------------------------------------------

/// The per-category bucket inside a [`GroupedFavorites`] mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategoryBucket {
    /// Category id; `None` for the "Uncategorized" bucket.
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Category slug; `None` for the "Uncategorized" bucket.
    #[serde(default)]
    pub category_slug: Option<String>,
    /// Favorites in this category, in list order.
    pub profiles: Vec<FavoriteProfile>,
}

// ---------------------------------------------------------------------------
// GroupedFavorites
// ---------------------------------------------------------------------------

/// Favorites grouped by category display name.
///
/// On the wire this is a JSON object keyed by category name. JSON objects are
/// unordered in theory but the backend emits buckets in first-encounter order
/// and the view relies on it, so this type preserves insertion order instead
/// of using a hash map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedFavorites {
    groups: Vec<(String, CategoryBucket)>,
}

impl GroupedFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of category buckets.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of profiles across all buckets.
    pub fn profile_count(&self) -> usize {
        self.groups.iter().map(|(_, b)| b.profiles.len()).sum()
    }

    /// Look up a bucket by category name.
    pub fn get(&self, category_name: &str) -> Option<&CategoryBucket> {
        self.groups
            .iter()
            .find(|(name, _)| name == category_name)
            .map(|(_, bucket)| bucket)
    }

    /// Iterate buckets in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryBucket)> {
        self.groups.iter().map(|(name, b)| (name.as_str(), b))
    }

    /// All profile ids in list order (bucket order, then in-bucket order).
    pub fn profile_ids(&self) -> Vec<ProfileId> {
        self.groups
            .iter()
            .flat_map(|(_, b)| b.profiles.iter().map(|p| p.id))
            .collect()
    }

    /// Get the bucket for `category_name`, creating it at the end of the
    /// iteration order on first encounter.
    pub(crate) fn bucket_mut(&mut self, category_name: &str) -> &mut CategoryBucket {
        if let Some(idx) = self.groups.iter().position(|(name, _)| name == category_name) {
            return &mut self.groups[idx].1;
        }
        self.groups
            .push((category_name.to_string(), CategoryBucket::default()));
        &mut self.groups.last_mut().expect("just pushed").1
    }
}

impl Serialize for GroupedFavorites {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (name, bucket) in &self.groups {
            map.serialize_entry(name, bucket)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GroupedFavorites {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupedVisitor;

        impl<'de> Visitor<'de> for GroupedVisitor {
            type Value = GroupedFavorites;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of category name to favorites bucket")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, bucket)) =
                    access.next_entry::<String, CategoryBucket>()?
                {
                    groups.push((name, bucket));
                }
                Ok(GroupedFavorites { groups })
            }
        }

        deserializer.deserialize_map(GroupedVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: i64, category: Option<&str>) -> FavoriteProfile {
        FavoriteProfile {
            id: ProfileId::new(id).unwrap(),
            name: format!("Profile {id}"),
            image_url: None,
            insight: None,
            category_id: category.map(|_| 1),
            category_name: category.map(String::from),
            category_slug: category.map(str::to_lowercase),
            subcategory_name: None,
            favorited_at: None,
        }
    }

    #[test]
    fn deserialize_preserves_bucket_order() {
        let json = r#"{
            "Health": {"category_id": 3, "category_slug": "health", "profiles": []},
            "Business": {"category_id": 1, "category_slug": "business", "profiles": []},
            "Art": {"category_id": 2, "category_slug": "art", "profiles": []}
        }"#;

        let grouped: GroupedFavorites = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = grouped.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Health", "Business", "Art"]);
    }

    #[test]
    fn serialize_round_trip_keeps_order() {
        let mut grouped = GroupedFavorites::new();
        grouped.bucket_mut("Zeta").profiles.push(profile(1, Some("Zeta")));
        grouped.bucket_mut("Alpha").profiles.push(profile(2, Some("Alpha")));

        let json = serde_json::to_string(&grouped).unwrap();
        let back: GroupedFavorites = serde_json::from_str(&json).unwrap();

        let names: Vec<&str> = back.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
        assert_eq!(back, grouped);

        let ids: Vec<i64> = back.profile_ids().iter().map(|p| p.get()).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn profile_tolerates_missing_optional_fields() {
        let json = r#"{"id": 42, "name": "Ada"}"#;
        let p: FavoriteProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.id.get(), 42);
        assert!(p.category_name.is_none());
        assert!(p.favorited_at.is_none());
    }

    #[test]
    fn profile_parses_full_wire_shape() {
        let json = r#"{
            "id": 7,
            "name": "Grace",
            "image_url": "https://cdn.example/grace.jpg",
            "insight": "Systems thinking",
            "category_id": 3,
            "category_name": "Engineering",
            "category_slug": "engineering",
            "subcategory_name": "Compilers",
            "favorited_at": "2024-06-01T12:00:00Z"
        }"#;
        let p: FavoriteProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.category_name.as_deref(), Some("Engineering"));
        assert!(p.favorited_at.is_some());
    }
}
