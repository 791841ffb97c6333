use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Opaque identifier the remote store assigns to a listing
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Leasing status of a listing
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Available,
    Leased,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::Leased => "leased",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Available => "Available",
            Status::Leased => "Leased",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Status::Available),
            "leased" => Ok(Status::Leased),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A listing as held in the local cache.
///
/// `size`, `rent` and `annual_rent` are optional because documents written
/// before those fields were required can still come back from the list
/// endpoint. Filters and sorts decide how a missing value behaves.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    /// Numeric key the backend keeps alongside its own document id
    pub listing_no: Option<i64>,
    pub address: String,
    pub floor: Option<String>,
    pub suite: Option<String>,
    /// Square feet
    pub size: Option<u32>,
    /// Monthly rent
    pub rent: Option<f64>,
    pub annual_rent: Option<f64>,
    pub status: Status,
    pub broker_name: String,
    pub broker_email: String,
    pub broker_phone: Option<String>,
    pub landlord_name: String,
    pub landlord_email: String,
}

impl Property {
    /// Build a cache record from a server-confirmed submission
    pub fn from_submission(id: PropertyId, submission: PropertySubmission) -> Self {
        Self {
            id,
            listing_no: submission.listing_no,
            address: submission.address,
            floor: submission.floor,
            suite: submission.suite,
            size: Some(submission.size),
            rent: Some(submission.rent),
            annual_rent: Some(submission.annual_rent),
            status: submission.status,
            broker_name: submission.broker_name,
            broker_email: submission.broker_email,
            broker_phone: submission.broker_phone,
            landlord_name: submission.landlord_name,
            landlord_email: submission.landlord_email,
        }
    }
}

/// Form-side view of a listing: every field exactly as typed.
///
/// An empty string stands for an absent value.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDraft {
    /// Set when the draft was loaded from an existing record
    pub id: Option<PropertyId>,
    pub listing_no: Option<i64>,
    pub address: String,
    pub floor: String,
    pub suite: String,
    pub size: String,
    pub rent: String,
    pub annual_rent: String,
    pub status: String,
    pub broker_name: String,
    pub broker_email: String,
    pub broker_phone: String,
    pub landlord_name: String,
    pub landlord_email: String,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            id: None,
            listing_no: None,
            address: String::new(),
            floor: String::new(),
            suite: String::new(),
            size: String::new(),
            rent: String::new(),
            annual_rent: String::new(),
            status: Status::default().as_str().to_string(),
            broker_name: String::new(),
            broker_email: String::new(),
            broker_phone: String::new(),
            landlord_name: String::new(),
            landlord_email: String::new(),
        }
    }
}

impl From<&Property> for PropertyDraft {
    fn from(property: &Property) -> Self {
        let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();

        Self {
            id: Some(property.id.clone()),
            listing_no: property.listing_no,
            address: property.address.clone(),
            floor: property.floor.clone().unwrap_or_default(),
            suite: property.suite.clone().unwrap_or_default(),
            size: property.size.map(|s| s.to_string()).unwrap_or_default(),
            rent: number(property.rent),
            annual_rent: number(property.annual_rent),
            status: property.status.as_str().to_string(),
            broker_name: property.broker_name.clone(),
            broker_email: property.broker_email.clone(),
            broker_phone: property.broker_phone.clone().unwrap_or_default(),
            landlord_name: property.landlord_name.clone(),
            landlord_email: property.landlord_email.clone(),
        }
    }
}

/// A validated draft, typed and ready for the remote client
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySubmission {
    pub listing_no: Option<i64>,
    pub address: String,
    pub floor: Option<String>,
    pub suite: Option<String>,
    pub size: u32,
    pub rent: f64,
    pub annual_rent: f64,
    pub status: Status,
    pub broker_name: String,
    pub broker_email: String,
    pub broker_phone: Option<String>,
    pub landlord_name: String,
    pub landlord_email: String,
}
