use super::filter::FilterCriteria;
use super::sort::SortKey;
use crate::models::Property;

/// Produce the displayed list: keep what passes the criteria, then order it.
///
/// The sort is stable, so listings that compare equal keep their collection
/// order. An empty result does not tell an empty collection apart from one
/// the criteria emptied; callers check `raw` for that.
pub fn derive<'a>(raw: &'a [Property], criteria: &FilterCriteria, sort: SortKey) -> Vec<&'a Property> {
    let keep = criteria.predicate();
    let mut visible: Vec<&Property> = raw.iter().filter(|p| keep(*p)).collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}
