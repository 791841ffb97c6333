use super::derive::derive;
use super::filter::{FilterCriteria, FilterField, FilterInput};
use super::sort::SortKey;
use crate::models::Property;
use crate::validation::FieldErrors;
use tracing::debug;

/// Transient list-view state: the active filter criteria and sort key.
///
/// Never persisted. Criteria only get here after passing validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListView {
    criteria: FilterCriteria,
    sort: SortKey,
}

impl ListView {
    pub fn new(criteria: FilterCriteria, sort: SortKey) -> Result<Self, FieldErrors<FilterField>> {
        criteria.validate()?;
        Ok(Self { criteria, sort })
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn has_active_filters(&self) -> bool {
        !self.criteria.is_empty()
    }

    /// Replace the criteria; invalid criteria leave the current ones in place
    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> Result<(), FieldErrors<FilterField>> {
        criteria.validate()?;
        debug!(?criteria, "applying filters");
        self.criteria = criteria;
        Ok(())
    }

    /// Apply bounds straight from the filter panel
    pub fn apply_input(&mut self, input: &FilterInput) -> Result<(), FieldErrors<FilterField>> {
        let criteria = input.parse()?;
        self.apply_filters(criteria)
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        debug!(sort = sort.token(), "sort changed");
        self.sort = sort;
    }

    /// The displayed list for the given collection
    pub fn visible<'a>(&self, raw: &'a [Property]) -> Vec<&'a Property> {
        derive(raw, &self.criteria, self.sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::tests::listing;

    #[test]
    fn invalid_filters_do_not_replace_active_ones() {
        let mut view = ListView::default();
        let good = FilterCriteria {
            min_rent: Some(1000.0),
            ..FilterCriteria::default()
        };
        view.apply_filters(good).unwrap();
        assert!(view.has_active_filters());

        let bad = FilterCriteria {
            min_rent: Some(5.0),
            max_rent: Some(1.0),
            ..FilterCriteria::default()
        };
        assert!(view.apply_filters(bad).is_err());
        assert_eq!(view.criteria(), &good);

        view.clear_filters();
        assert!(!view.has_active_filters());
    }

    #[test]
    fn panel_input_flows_through_to_the_list() {
        let raw = vec![
            listing("a", Some(900.0), Some(500)),
            listing("b", Some(1200.0), Some(700)),
            listing("c", Some(1400.0), Some(300)),
        ];
        let mut view = ListView::default();
        view.apply_input(&FilterInput {
            min_rent: "1000".to_string(),
            ..FilterInput::default()
        })
        .unwrap();
        view.set_sort(SortKey::SizeAsc);

        let ids: Vec<_> = view.visible(&raw).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["c", "b"]);
    }

    #[test]
    fn new_rejects_invalid_criteria() {
        let criteria = FilterCriteria {
            max_size: Some(-1.0),
            ..FilterCriteria::default()
        };
        assert!(ListView::new(criteria, SortKey::PriceAsc).is_err());
    }
}
