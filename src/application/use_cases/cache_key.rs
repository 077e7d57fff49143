//! Cache key derivation for search criteria.

use crate::domain::value_objects::SearchCriteria;

const ISO_DATE: &str = "%Y-%m-%d";

/// Builds the cache key of `criteria`.
///
/// Format: `ORIGIN|DEST|YYYY-MM-DD|RETURN|PAX|cabin|filters|sort_field|sort_order`,
/// with an empty `RETURN` for one-way searches and `filters` as produced by
/// [`FilterSet::canonical_key`](crate::domain::value_objects::FilterSet::canonical_key).
#[must_use]
pub fn cache_key(criteria: &SearchCriteria) -> String {
    let return_date = criteria
        .return_date()
        .map(|d| d.format(ISO_DATE).to_string())
        .unwrap_or_default();
    let sort = criteria.sort();
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}",
        criteria.origin(),
        criteria.destination(),
        criteria.departure_date().format(ISO_DATE),
        return_date,
        criteria.passengers(),
        criteria.cabin_class(),
        criteria.filters().canonical_key(),
        sort.field().as_str(),
        sort.order().as_str(),
    )
}
