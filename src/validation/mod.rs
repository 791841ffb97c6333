//! Field-level validation of property drafts.
//!
//! Each form field maps to an ordered list of rules in [`FORM_RULES`]. The
//! first rule that objects supplies the field's message; every field is
//! checked, so one pass reports all invalid fields at once.

pub mod rules;

use crate::models::{PropertyDraft, PropertySubmission};
use rules::{NumberIssue, Rule};
use std::collections::BTreeMap;
use std::fmt;

pub use rules::NUMBER_FORMAT_ERROR;

/// Field-name to message mapping; empty means valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<K: Ord> {
    errors: BTreeMap<K, String>,
}

impl<K: Ord> FieldErrors<K> {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Record a message, replacing any earlier one for the same field
    pub fn insert(&mut self, field: K, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn remove(&mut self, field: &K) -> Option<String> {
        self.errors.remove(field)
    }

    pub fn get(&self, field: &K) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &K) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &str)> {
        self.errors.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl<K: Ord> Default for FieldErrors<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Display> fmt::Display for FieldErrors<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Editable fields of a property form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Address,
    Floor,
    Suite,
    Size,
    Rent,
    AnnualRent,
    Status,
    BrokerName,
    BrokerEmail,
    BrokerPhone,
    LandlordName,
    LandlordEmail,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Address,
        Field::Floor,
        Field::Suite,
        Field::Size,
        Field::Rent,
        Field::AnnualRent,
        Field::Status,
        Field::BrokerName,
        Field::BrokerEmail,
        Field::BrokerPhone,
        Field::LandlordName,
        Field::LandlordEmail,
    ];

    /// Key used on the wire and in error maps
    pub fn name(&self) -> &'static str {
        match self {
            Field::Address => "address",
            Field::Floor => "floor",
            Field::Suite => "suite",
            Field::Size => "size",
            Field::Rent => "rent",
            Field::AnnualRent => "annual_rent",
            Field::Status => "status",
            Field::BrokerName => "broker_name",
            Field::BrokerEmail => "broker_email",
            Field::BrokerPhone => "broker_phone",
            Field::LandlordName => "landlord_name",
            Field::LandlordEmail => "landlord_email",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Address => "Address",
            Field::Floor => "Floor",
            Field::Suite => "Suite",
            Field::Size => "Size",
            Field::Rent => "Monthly rent",
            Field::AnnualRent => "Annual rent",
            Field::Status => "Status",
            Field::BrokerName => "Broker name",
            Field::BrokerEmail => "Broker email",
            Field::BrokerPhone => "Broker phone",
            Field::LandlordName => "Landlord name",
            Field::LandlordEmail => "Landlord email",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Fields whose input must stay numeric while typing
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::Floor | Field::Size | Field::Rent | Field::AnnualRent
        )
    }

    pub fn value<'a>(&self, draft: &'a PropertyDraft) -> &'a str {
        match self {
            Field::Address => &draft.address,
            Field::Floor => &draft.floor,
            Field::Suite => &draft.suite,
            Field::Size => &draft.size,
            Field::Rent => &draft.rent,
            Field::AnnualRent => &draft.annual_rent,
            Field::Status => &draft.status,
            Field::BrokerName => &draft.broker_name,
            Field::BrokerEmail => &draft.broker_email,
            Field::BrokerPhone => &draft.broker_phone,
            Field::LandlordName => &draft.landlord_name,
            Field::LandlordEmail => &draft.landlord_email,
        }
    }

    pub fn value_mut<'a>(&self, draft: &'a mut PropertyDraft) -> &'a mut String {
        match self {
            Field::Address => &mut draft.address,
            Field::Floor => &mut draft.floor,
            Field::Suite => &mut draft.suite,
            Field::Size => &mut draft.size,
            Field::Rent => &mut draft.rent,
            Field::AnnualRent => &mut draft.annual_rent,
            Field::Status => &mut draft.status,
            Field::BrokerName => &mut draft.broker_name,
            Field::BrokerEmail => &mut draft.broker_email,
            Field::BrokerPhone => &mut draft.broker_phone,
            Field::LandlordName => &mut draft.landlord_name,
            Field::LandlordEmail => &mut draft.landlord_email,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rules checked on submit, in the order they are tried per field.
/// `floor` and `suite` are free text and carry no submit-time rules.
pub const FORM_RULES: &[(Field, &[Rule])] = &[
    (Field::Address, &[rules::required]),
    (Field::Size, &[rules::required, rules::positive_number, rules::whole_number, rules::size_range]),
    (Field::Rent, &[rules::required, rules::positive_number]),
    (Field::AnnualRent, &[rules::required, rules::positive_number]),
    (Field::Status, &[rules::status]),
    (Field::BrokerName, &[rules::required]),
    (Field::BrokerEmail, &[rules::required, rules::email]),
    (Field::BrokerPhone, &[rules::phone]),
    (Field::LandlordName, &[rules::required]),
    (Field::LandlordEmail, &[rules::required, rules::email]),
];

fn first_error(rules: &[Rule], value: &str, label: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule(value, label))
}

/// Validate a whole draft; an empty result means it may be submitted
pub fn validate(draft: &PropertyDraft) -> FieldErrors<Field> {
    let mut errors = FieldErrors::new();
    for (field, rules) in FORM_RULES {
        if let Some(message) = first_error(rules, field.value(draft), field.label()) {
            errors.insert(*field, message);
        }
    }
    errors
}

/// Check a single value as it is being typed.
///
/// Numeric fields (including `floor`) get the positive-number check here even
/// though `floor` is free text at submit time.
pub fn validate_field(field: Field, value: &str) -> Option<String> {
    if field.is_numeric() {
        if let Some(message) = rules::positive_number(value, field.label()) {
            return Some(message);
        }
    }
    FORM_RULES
        .iter()
        .find(|(f, _)| *f == field)
        .and_then(|(_, rules)| first_error(rules, value, field.label()))
}

/// True when a live edit of `field` must be refused outright
pub fn rejects_input(field: Field, value: &str) -> bool {
    field.is_numeric() && rules::parse_positive(value) == Err(NumberIssue::Format)
}

/// Validate and convert a draft into its typed submission
pub fn into_submission(draft: &PropertyDraft) -> Result<PropertySubmission, FieldErrors<Field>> {
    let errors = validate(draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    let number = |field: Field| -> Result<f64, FieldErrors<Field>> {
        match rules::parse_positive(field.value(draft)) {
            Ok(Some(n)) => Ok(n),
            _ => {
                let mut errors = FieldErrors::new();
                errors.insert(field, format!("{} must be a positive number", field.label()));
                Err(errors)
            }
        }
    };
    let text = |value: &str| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    let size = rules::parse_size(&draft.size).ok_or_else(|| {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Size, format!("{} is too large", Field::Size.label()));
        errors
    })?;
    let status = draft.status.parse().map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Status, rules::STATUS_ERROR);
        errors
    })?;

    Ok(PropertySubmission {
        listing_no: draft.listing_no,
        address: draft.address.trim().to_string(),
        floor: text(&draft.floor),
        suite: text(&draft.suite),
        size,
        rent: number(Field::Rent)?,
        annual_rent: number(Field::AnnualRent)?,
        status,
        broker_name: draft.broker_name.trim().to_string(),
        broker_email: draft.broker_email.clone(),
        broker_phone: text(&draft.broker_phone),
        landlord_name: draft.landlord_name.trim().to_string(),
        landlord_email: draft.landlord_email.clone(),
    })
}
