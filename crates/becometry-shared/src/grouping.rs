//! The favorites aggregate view: a pure fold from a flat favorites list to
//! the category-grouped shape used for display.
//!
//! No I/O happens here; the functions are deliberately trivial to unit test.

use crate::constants::UNCATEGORIZED;
use crate::models::{FavoriteProfile, GroupedFavorites};

/// Group a flat favorites list by category display name.
///
/// Iterates the list in its given order and appends each entry to its
/// category's bucket, creating buckets in first-encounter order. Profiles
/// without a category name land in the `"Uncategorized"` bucket. Bucket
/// metadata (`category_id`, `category_slug`) is taken from the first profile
/// seen for that category.
pub fn group_by_category(profiles: Vec<FavoriteProfile>) -> GroupedFavorites {
    let mut grouped = GroupedFavorites::new();

    for profile in profiles {
        let name = profile
            .category_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        let bucket = grouped.bucket_mut(&name);
        if bucket.profiles.is_empty() {
            bucket.category_id = profile.category_id;
            bucket.category_slug = profile.category_slug.clone();
        }
        bucket.profiles.push(profile);
    }

    grouped
}

/// Flatten a grouped view back into a single list, bucket order first, then
/// in-bucket order. Inverse of [`group_by_category`] up to grouping.
pub fn flatten(grouped: &GroupedFavorites) -> Vec<FavoriteProfile> {
    grouped
        .iter()
        .flat_map(|(_, bucket)| bucket.profiles.iter().cloned())
        .collect()
}
