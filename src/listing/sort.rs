use crate::models::Property;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Orderings offered by the list view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    CreatedDesc,
    CreatedAsc,
    PriceDesc,
    PriceAsc,
    SizeDesc,
    SizeAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::CreatedDesc,
        SortKey::CreatedAsc,
        SortKey::PriceDesc,
        SortKey::PriceAsc,
        SortKey::SizeDesc,
        SortKey::SizeAsc,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            SortKey::CreatedDesc => "created_desc",
            SortKey::CreatedAsc => "created_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::PriceAsc => "price_asc",
            SortKey::SizeDesc => "size_desc",
            SortKey::SizeAsc => "size_asc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::CreatedDesc => "Newest First",
            SortKey::CreatedAsc => "Oldest First",
            SortKey::PriceDesc => "Highest Price",
            SortKey::PriceAsc => "Lowest Price",
            SortKey::SizeDesc => "Largest Size",
            SortKey::SizeAsc => "Smallest Size",
        }
    }

    /// Unknown or missing tokens fall back to the default ordering
    pub fn from_token_or_default(token: Option<&str>) -> Self {
        token.and_then(|t| t.parse().ok()).unwrap_or_default()
    }

    pub fn is_descending(&self) -> bool {
        matches!(
            self,
            SortKey::CreatedDesc | SortKey::PriceDesc | SortKey::SizeDesc
        )
    }

    /// Compare two listings under this key.
    ///
    /// `created_*` compares identifiers as strings. That tracks insertion order
    /// only for ids that embed a creation time up front (like Mongo object
    /// ids); no creation timestamp is stored on the record.
    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        let ascending = match self {
            SortKey::CreatedDesc | SortKey::CreatedAsc => a.id.as_str().cmp(b.id.as_str()),
            SortKey::PriceDesc | SortKey::PriceAsc => {
                a.rent.unwrap_or(0.0).total_cmp(&b.rent.unwrap_or(0.0))
            }
            SortKey::SizeDesc | SortKey::SizeAsc => a.size.unwrap_or(0).cmp(&b.size.unwrap_or(0)),
        };
        if self.is_descending() {
            ascending.reverse()
        } else {
            ascending
        }
    }

    /// Comparator form of [`SortKey::compare`]
    pub fn comparator(self) -> impl Fn(&Property, &Property) -> Ordering {
        move |a, b| self.compare(a, b)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.token() == s)
            .ok_or_else(|| format!("unknown sort key: {s}"))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
