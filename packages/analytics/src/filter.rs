//! Category filtering over aggregated location groups.

use arrest_map_arrest_models::LocationGroup;

/// Filter value that selects every category.
pub const ALL_CATEGORIES: &str = "all";

/// Returns `true` when `category` requests the unfiltered view.
#[must_use]
pub fn is_unfiltered(category: Option<&str>) -> bool {
    category.is_none_or(|c| c.is_empty() || c == ALL_CATEGORIES)
}

/// Restricts `locations` to people carrying exactly `category`.
///
/// An absent, empty, or `"all"` category returns every group unchanged.
/// Otherwise each group keeps only its matching people, and groups left
/// with nobody are dropped. A category nobody carries yields an empty list.
#[must_use]
pub fn filter_by_category(
    locations: &[LocationGroup],
    category: Option<&str>,
) -> Vec<LocationGroup> {
    let category = match category {
        Some(c) if !is_unfiltered(Some(c)) => c,
        _ => return locations.to_vec(),
    };

    locations
        .iter()
        .filter_map(|group| {
            let people: Vec<_> = group
                .people
                .iter()
                .filter(|p| p.has_category(category))
                .cloned()
                .collect();

            (!people.is_empty()).then(|| LocationGroup {
                lat: group.lat,
                lng: group.lng,
                location: group.location.clone(),
                people,
            })
        })
        .collect()
}
