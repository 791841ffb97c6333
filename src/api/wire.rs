//! JSON shapes of the property service and their mapping to core records.
//!
//! The service keys documents by `_id` and also insists on a numeric `id`
//! and a non-empty `broker_phone`. Those quirks stay in this module.

use crate::errors::{ApiError, ApiResult};
use crate::models::{Property, PropertyId, PropertySubmission, Status};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Placeholder the service stores when no broker phone was given
pub const NO_PHONE: &str = "N/A";

/// A property document as returned by the service
#[derive(Debug, Clone, Deserialize)]
pub struct WireProperty {
    #[serde(rename = "_id", default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub floor: Option<Value>,
    #[serde(default)]
    pub suite: Option<Value>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub rent: Option<f64>,
    #[serde(default)]
    pub annual_rent: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub broker_name: String,
    #[serde(default)]
    pub broker_email: String,
    #[serde(default)]
    pub broker_phone: Option<String>,
    #[serde(default)]
    pub landlord_name: String,
    #[serde(default)]
    pub landlord_email: String,
}

/// Strings pass through, numbers are rendered, anything else is absent
fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl WireProperty {
    pub fn into_property(self) -> ApiResult<Property> {
        let listing_no = self.id.as_ref().and_then(Value::as_i64);
        let id = self
            .object_id
            .or_else(|| text(self.id.clone()))
            .map(PropertyId::new)
            .ok_or_else(|| ApiError::Decode {
                message: format!("property at {:?} has no identifier", self.address),
            })?;

        let status = match self.status.as_deref() {
            None => Status::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(%id, status = raw, "unknown status, treating as available");
                Status::default()
            }),
        };

        Ok(Property {
            id,
            listing_no,
            address: self.address,
            floor: text(self.floor),
            suite: text(self.suite),
            size: self.size.filter(|s| *s > 0.0).map(|s| s as u32),
            rent: self.rent,
            annual_rent: self.annual_rent,
            status,
            broker_name: self.broker_name,
            broker_email: self.broker_email,
            broker_phone: self
                .broker_phone
                .filter(|p| !p.trim().is_empty() && p != NO_PHONE),
            landlord_name: self.landlord_name,
            landlord_email: self.landlord_email,
        })
    }
}

/// Decode a list response, skipping documents that cannot be keyed
pub fn decode_list(documents: Vec<WireProperty>) -> Vec<Property> {
    documents
        .into_iter()
        .filter_map(|doc| match doc.into_property() {
            Ok(property) => Some(property),
            Err(err) => {
                warn!(error = %err, "skipping property document");
                None
            }
        })
        .collect()
}

/// Request body for create and update
#[derive(Debug, Clone, Serialize)]
pub struct WireSubmission<'a> {
    pub id: i64,
    pub address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite: Option<&'a str>,
    pub size: u32,
    pub rent: f64,
    pub annual_rent: f64,
    pub status: Status,
    pub broker_name: &'a str,
    pub broker_email: &'a str,
    pub broker_phone: &'a str,
    pub landlord_name: &'a str,
    pub landlord_email: &'a str,
}

impl<'a> WireSubmission<'a> {
    pub fn new(submission: &'a PropertySubmission) -> Self {
        Self {
            id: submission.listing_no.unwrap_or_else(new_listing_no),
            address: &submission.address,
            floor: submission.floor.as_deref(),
            suite: submission.suite.as_deref(),
            size: submission.size,
            rent: submission.rent,
            annual_rent: submission.annual_rent,
            status: submission.status,
            broker_name: &submission.broker_name,
            broker_email: &submission.broker_email,
            broker_phone: submission.broker_phone.as_deref().unwrap_or(NO_PHONE),
            landlord_name: &submission.landlord_name,
            landlord_email: &submission.landlord_email,
        }
    }
}

/// Listing number for a record that has never had one
fn new_listing_no() -> i64 {
    Utc::now().timestamp_millis().rem_euclid(1_000_000)
}

/// Pull the service's own message out of an error body.
///
/// `detail` is either a string or a list of `{ "msg": .. }` entries.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
