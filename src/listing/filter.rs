use crate::models::Property;
use crate::validation::FieldErrors;
use std::fmt;

/// Inclusive rent and size bounds; `None` leaves that side open
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterCriteria {
    /// Minimum monthly rent
    pub min_rent: Option<f64>,
    /// Maximum monthly rent
    pub max_rent: Option<f64>,
    /// Minimum size in square feet
    pub min_size: Option<f64>,
    /// Maximum size in square feet
    pub max_size: Option<f64>,
}

/// Bounds of the filter panel, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterField {
    MinRent,
    MaxRent,
    MinSize,
    MaxSize,
}

impl FilterField {
    pub fn name(&self) -> &'static str {
        match self {
            FilterField::MinRent => "min_rent",
            FilterField::MaxRent => "max_rent",
            FilterField::MinSize => "min_size",
            FilterField::MaxSize => "max_size",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const NOT_A_NUMBER: &str = "Must be a number";
const NEGATIVE: &str = "Must be a positive number";

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.bounds().iter().all(|(_, bound)| bound.is_none())
    }

    fn bounds(&self) -> [(FilterField, Option<f64>); 4] {
        [
            (FilterField::MinRent, self.min_rent),
            (FilterField::MaxRent, self.max_rent),
            (FilterField::MinSize, self.min_size),
            (FilterField::MaxSize, self.max_size),
        ]
    }

    /// Check the criteria themselves before they are used to filter.
    ///
    /// An inverted range is reported on its lower bound; a negative bound is
    /// reported on itself and takes precedence.
    pub fn validate(&self) -> Result<(), FieldErrors<FilterField>> {
        let mut errors = FieldErrors::new();

        if let (Some(min), Some(max)) = (self.min_rent, self.max_rent) {
            if min > max {
                errors.insert(FilterField::MinRent, "Min rent must be less than max rent");
            }
        }
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min > max {
                errors.insert(FilterField::MinSize, "Min size must be less than max size");
            }
        }

        for (field, bound) in self.bounds() {
            match bound {
                Some(value) if !value.is_finite() => errors.insert(field, NOT_A_NUMBER),
                Some(value) if value < 0.0 => errors.insert(field, NEGATIVE),
                _ => {}
            }
        }

        errors.into_result(())
    }

    /// Whether a listing satisfies every active bound
    pub fn matches(&self, property: &Property) -> bool {
        within(property.rent, self.min_rent, self.max_rent)
            && within(property.size.map(f64::from), self.min_size, self.max_size)
    }

    /// Predicate form of [`FilterCriteria::matches`]
    pub fn predicate(self) -> impl Fn(&Property) -> bool {
        move |property| self.matches(property)
    }
}

/// A missing value never satisfies an active bound
fn within(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

/// Filter bounds exactly as typed into the panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub min_rent: String,
    pub max_rent: String,
    pub min_size: String,
    pub max_size: String,
}

impl FilterInput {
    /// Parse and validate; blank bounds stay open
    pub fn parse(&self) -> Result<FilterCriteria, FieldErrors<FilterField>> {
        let mut errors = FieldErrors::new();
        let mut bound = |field: FilterField, raw: &str| -> Option<f64> {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => Some(value),
                _ => {
                    errors.insert(field, NOT_A_NUMBER);
                    None
                }
            }
        };

        let criteria = FilterCriteria {
            min_rent: bound(FilterField::MinRent, &self.min_rent),
            max_rent: bound(FilterField::MaxRent, &self.max_rent),
            min_size: bound(FilterField::MinSize, &self.min_size),
            max_size: bound(FilterField::MaxSize, &self.max_size),
        };

        if let Err(range_errors) = criteria.validate() {
            for (field, message) in range_errors.iter() {
                if !errors.contains(field) {
                    errors.insert(*field, message);
                }
            }
        }

        errors.into_result(criteria)
    }

    pub fn has_any(&self) -> bool {
        [&self.min_rent, &self.max_rent, &self.min_size, &self.max_size]
            .iter()
            .any(|raw| !raw.trim().is_empty())
    }
}
