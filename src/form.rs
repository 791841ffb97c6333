use crate::models::{Property, PropertyDraft, PropertySubmission};
use crate::validation::{self, Field, FieldErrors};
use tracing::debug;

/// Result of a single keystroke-level edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    /// The value was refused and the draft kept its previous value
    Rejected,
}

/// One add/edit session over a property draft.
///
/// Holds the draft, the inline errors currently shown, and whether the user
/// has typed into annual rent themselves (which turns off auto-fill).
#[derive(Debug, Clone)]
pub struct PropertyForm {
    draft: PropertyDraft,
    errors: FieldErrors<Field>,
    annual_rent_overridden: bool,
}

impl PropertyForm {
    /// Empty form for a new listing
    pub fn new() -> Self {
        Self::from_draft(PropertyDraft::default())
    }

    /// Form seeded from an existing listing
    pub fn edit(property: &Property) -> Self {
        Self::from_draft(PropertyDraft::from(property))
    }

    pub fn from_draft(draft: PropertyDraft) -> Self {
        Self {
            draft,
            errors: FieldErrors::new(),
            annual_rent_overridden: false,
        }
    }

    pub fn draft(&self) -> &PropertyDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors<Field> {
        &self.errors
    }

    pub fn is_edit(&self) -> bool {
        self.draft.id.is_some()
    }

    /// Apply a user edit to one field
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> EditOutcome {
        let value = value.into();

        if validation::rejects_input(field, &value) {
            if let Some(message) = validation::validate_field(field, &value) {
                self.errors.insert(field, message);
            }
            debug!(field = field.name(), "refused non-numeric input");
            return EditOutcome::Rejected;
        }

        *field.value_mut(&mut self.draft) = value;
        self.errors.remove(&field);

        match field {
            Field::AnnualRent => self.annual_rent_overridden = true,
            Field::Rent if !self.annual_rent_overridden => self.fill_annual_rent(),
            _ => {}
        }

        EditOutcome::Accepted
    }

    /// Set annual rent to twelve months of rent when rent is a positive number
    fn fill_annual_rent(&mut self) {
        if let Ok(Some(monthly)) = validation::rules::parse_positive(&self.draft.rent) {
            self.draft.annual_rent = (monthly * 12.0).to_string();
            self.errors.remove(&Field::AnnualRent);
        }
    }

    /// Validate the whole draft. On failure the errors stay on the form.
    pub fn submit(&mut self) -> Result<PropertySubmission, FieldErrors<Field>> {
        match validation::into_submission(&self.draft) {
            Ok(submission) => {
                self.errors = FieldErrors::new();
                Ok(submission)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}

impl Default for PropertyForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyId, Status};

    fn filled_form() -> PropertyForm {
        let mut form = PropertyForm::new();
        form.set_field(Field::Address, "1 Main St");
        form.set_field(Field::Size, "1000");
        form.set_field(Field::BrokerName, "A");
        form.set_field(Field::BrokerEmail, "a@b.com");
        form.set_field(Field::LandlordName, "L");
        form.set_field(Field::LandlordEmail, "l@b.com");
        form
    }

    #[test]
    fn rent_fills_annual_rent() {
        let mut form = filled_form();
        form.set_field(Field::Rent, "2000");
        assert_eq!(form.draft().annual_rent, "24000");

        form.set_field(Field::Rent, "1250.5");
        assert_eq!(form.draft().annual_rent, "15006");
    }

    #[test]
    fn zero_rent_leaves_annual_rent_alone() {
        let mut form = filled_form();
        form.set_field(Field::Rent, "2000");
        form.set_field(Field::Rent, "0");
        assert_eq!(form.draft().annual_rent, "24000");
    }

    #[test]
    fn manual_annual_rent_is_kept() {
        let mut form = filled_form();
        form.set_field(Field::Rent, "2000");
        form.set_field(Field::AnnualRent, "20000");
        form.set_field(Field::Rent, "2100");
        assert_eq!(form.draft().annual_rent, "20000");
        assert!(form.submit().is_ok());
    }

    #[test]
    fn letters_in_numeric_fields_are_refused() {
        let mut form = filled_form();
        form.set_field(Field::Rent, "2000");
        assert_eq!(form.set_field(Field::Rent, "2000x"), EditOutcome::Rejected);
        assert_eq!(form.draft().rent, "2000");
        assert_eq!(
            form.errors().get(&Field::Rent),
            Some(validation::NUMBER_FORMAT_ERROR)
        );

        assert_eq!(form.set_field(Field::Rent, "2001"), EditOutcome::Accepted);
        assert!(!form.errors().contains(&Field::Rent));
    }

    #[test]
    fn floor_rejects_letters_while_typing() {
        let mut form = PropertyForm::new();
        assert_eq!(form.set_field(Field::Floor, "B2"), EditOutcome::Rejected);
        assert_eq!(form.draft().floor, "");
        assert_eq!(form.set_field(Field::Floor, "2"), EditOutcome::Accepted);
    }

    #[test]
    fn failed_submit_keeps_errors_on_the_form() {
        let mut form = filled_form();
        form.set_field(Field::Rent, "2000");
        form.set_field(Field::AnnualRent, "");

        let errors = form.submit().unwrap_err();
        assert_eq!(errors.get(&Field::AnnualRent), Some("Annual rent is required"));
        assert_eq!(form.errors(), &errors);

        form.set_field(Field::AnnualRent, "24000");
        assert!(form.errors().is_empty());
        let submission = form.submit().unwrap();
        assert_eq!(submission.annual_rent, 24000.0);
        assert_eq!(submission.status, Status::Available);
    }

    #[test]
    fn edit_form_starts_from_the_record() {
        let property = Property {
            id: PropertyId::new("65f0"),
            listing_no: Some(7),
            address: "9 Elm".to_string(),
            floor: None,
            suite: Some("B".to_string()),
            size: Some(800),
            rent: Some(1500.0),
            annual_rent: Some(17000.0),
            status: Status::Leased,
            broker_name: "B".to_string(),
            broker_email: "b@c.com".to_string(),
            broker_phone: Some("5551234567".to_string()),
            landlord_name: "M".to_string(),
            landlord_email: "m@c.com".to_string(),
        };

        let mut form = PropertyForm::edit(&property);
        assert!(form.is_edit());
        assert_eq!(form.draft().annual_rent, "17000");

        let submission = form.submit().unwrap();
        assert_eq!(submission.listing_no, Some(7));
        assert_eq!(submission.status, Status::Leased);
        assert_eq!(submission.broker_phone.as_deref(), Some("5551234567"));
    }
}
