use regex::Regex;
use std::sync::OnceLock;

/// A single check over a raw field value. `label` is the human name of the
/// field, used in the message.
pub type Rule = fn(value: &str, label: &str) -> Option<String>;

pub const NUMBER_FORMAT_ERROR: &str = "Only numbers 0-9 allowed";
pub const EMAIL_FORMAT_ERROR: &str = "Invalid email format";
pub const PHONE_FORMAT_ERROR: &str = "Phone must be exactly 10 digits (no spaces or dashes)";
pub const STATUS_ERROR: &str = "Status must be either available or leased";

/// Why a numeric input was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberIssue {
    /// Something other than digits and a single decimal point
    Format,
    /// Well-formed but zero, or not a number at all (e.g. a lone ".")
    NotPositive,
    /// Too many digits to hold as a finite number
    TooLarge,
}

/// Parse a positive decimal as typed into a form.
///
/// Empty input is `Ok(None)`; whether the field may be empty is a separate rule.
pub fn parse_positive(value: &str) -> Result<Option<f64>, NumberIssue> {
    if value.is_empty() {
        return Ok(None);
    }

    let well_formed = value.chars().all(|c| c.is_ascii_digit() || c == '.')
        && value.matches('.').count() <= 1;
    if !well_formed {
        return Err(NumberIssue::Format);
    }

    match value.parse::<f64>() {
        Ok(n) if n.is_infinite() => Err(NumberIssue::TooLarge),
        Ok(n) if n > 0.0 => Ok(Some(n)),
        _ => Err(NumberIssue::NotPositive),
    }
}

pub fn required(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{label} is required"))
    } else {
        None
    }
}

pub fn positive_number(value: &str, label: &str) -> Option<String> {
    match parse_positive(value) {
        Ok(_) => None,
        Err(NumberIssue::Format) => Some(NUMBER_FORMAT_ERROR.to_string()),
        Err(NumberIssue::NotPositive) => Some(format!("{label} must be a positive number")),
        Err(NumberIssue::TooLarge) => Some(format!("{label} is too large")),
    }
}

pub fn whole_number(value: &str, label: &str) -> Option<String> {
    match parse_positive(value) {
        Ok(Some(n)) if n.fract() != 0.0 => Some(format!("{label} must be a whole number")),
        _ => None,
    }
}

/// Whole square footage that fits the record's `u32`
pub fn parse_size(value: &str) -> Option<u32> {
    match parse_positive(value) {
        Ok(Some(n)) if n.fract() == 0.0 && n <= f64::from(u32::MAX) => Some(n as u32),
        _ => None,
    }
}

pub fn size_range(value: &str, label: &str) -> Option<String> {
    match parse_positive(value) {
        Ok(Some(n)) if n > f64::from(u32::MAX) => Some(format!("{label} is too large")),
        _ => None,
    }
}

pub fn email(value: &str, _label: &str) -> Option<String> {
    static EMAIL: OnceLock<Regex> = OnceLock::new();

    if value.is_empty() {
        return None;
    }
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    });
    if re.is_match(value) {
        None
    } else {
        Some(EMAIL_FORMAT_ERROR.to_string())
    }
}

/// Optional field: blank passes, anything else must be ten digits
pub fn phone(value: &str, _label: &str) -> Option<String> {
    static PHONE: OnceLock<Regex> = OnceLock::new();

    if value.trim().is_empty() {
        return None;
    }
    let re = PHONE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"));
    if re.is_match(value) {
        None
    } else {
        Some(PHONE_FORMAT_ERROR.to_string())
    }
}

pub fn status(value: &str, _label: &str) -> Option<String> {
    match value {
        "available" | "leased" => None,
        _ => Some(STATUS_ERROR.to_string()),
    }
}
