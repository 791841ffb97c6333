//! In-memory stand-in for the property service.

#![allow(dead_code)]

use async_trait::async_trait;
use property_desk::notify::Notifier;
use property_desk::{ApiError, ApiResult, Property, PropertyApi, PropertyId, PropertyStore, PropertySubmission, Status};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// What the fake saw in the client cache when a call arrived
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List { cached: Vec<String> },
    Create { cached: Vec<String> },
    /// `cached_rent` is the rent the cache showed for `id` at call time
    Update {
        id: String,
        cached: Vec<String>,
        cached_rent: Option<f64>,
    },
    Delete { id: String, cached: Vec<String> },
}

#[derive(Default)]
pub struct FakePropertyApi {
    records: Mutex<Vec<Property>>,
    write_error: Mutex<Option<ApiError>>,
    list_error: Mutex<Option<ApiError>>,
    calls: Mutex<Vec<Call>>,
    observed: Mutex<Option<PropertyStore>>,
    concurrent_upsert: Mutex<Option<Property>>,
    next_id: AtomicU64,
}

impl FakePropertyApi {
    pub fn with_records(records: Vec<Property>) -> Self {
        Self {
            records: Mutex::new(records),
            next_id: AtomicU64::new(100),
            ..Self::default()
        }
    }

    /// Record the contents of `store` whenever a call arrives
    pub fn observe(&self, store: &PropertyStore) {
        *self.observed.lock().unwrap() = Some(store.clone());
    }

    pub fn fail_writes_with(&self, err: ApiError) {
        *self.write_error.lock().unwrap() = Some(err);
    }

    /// Have `property` land in the observed cache while the next create is
    /// in flight, as another refresh would
    pub fn upsert_during_create(&self, property: Property) {
        *self.concurrent_upsert.lock().unwrap() = Some(property);
    }

    pub fn fail_lists_with(&self, err: ApiError) {
        *self.list_error.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn record_ids(&self) -> Vec<String> {
        self.records.lock().unwrap().iter().map(|p| p.id.to_string()).collect()
    }

    fn cached(&self) -> Vec<String> {
        self.observed
            .lock()
            .unwrap()
            .as_ref()
            .map(cached_ids)
            .unwrap_or_default()
    }

    fn cached_rent(&self, id: &PropertyId) -> Option<f64> {
        let observed = self.observed.lock().unwrap();
        let store = observed.as_ref()?;
        store.with_properties(|ps| ps.iter().find(|p| &p.id == id).and_then(|p| p.rent))
    }

    fn write_error(&self) -> Option<ApiError> {
        self.write_error.lock().unwrap().clone()
    }
}

#[async_trait]
impl PropertyApi for FakePropertyApi {
    async fn list(&self) -> ApiResult<Vec<Property>> {
        let cached = self.cached();
        self.calls.lock().unwrap().push(Call::List { cached });
        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, submission: &PropertySubmission) -> ApiResult<Property> {
        let cached = self.cached();
        self.calls.lock().unwrap().push(Call::Create { cached });
        if let Some(property) = self.concurrent_upsert.lock().unwrap().take() {
            if let Some(store) = self.observed.lock().unwrap().as_ref() {
                store.upsert(property);
            }
        }
        if let Some(err) = self.write_error() {
            return Err(err);
        }
        let id = PropertyId::new(format!("p{}", self.next_id.fetch_add(1, Ordering::SeqCst)));
        let created = Property::from_submission(id, submission.clone());
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &PropertyId, submission: &PropertySubmission) -> ApiResult<Property> {
        let cached = self.cached();
        let cached_rent = self.cached_rent(id);
        self.calls.lock().unwrap().push(Call::Update {
            id: id.to_string(),
            cached,
            cached_rent,
        });
        if let Some(err) = self.write_error() {
            return Err(err);
        }
        let updated = Property::from_submission(id.clone(), submission.clone());
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|p| &p.id == id) {
            Some(slot) => *slot = updated.clone(),
            None => return Err(ApiError::rejected("Property not found")),
        }
        Ok(updated)
    }

    async fn delete(&self, id: &PropertyId) -> ApiResult<()> {
        let cached = self.cached();
        self.calls.lock().unwrap().push(Call::Delete {
            id: id.to_string(),
            cached,
        });
        if let Some(err) = self.write_error() {
            return Err(err);
        }
        self.records.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }

    fn endpoint(&self) -> &str {
        "memory://properties"
    }
}

pub fn cached_ids(store: &PropertyStore) -> Vec<String> {
    store.with_properties(|ps| ps.iter().map(|p| p.id.to_string()).collect())
}

pub fn listing(id: &str, rent: f64, size: u32) -> Property {
    Property {
        id: PropertyId::new(id),
        listing_no: None,
        address: format!("{id} Market St"),
        floor: None,
        suite: None,
        size: Some(size),
        rent: Some(rent),
        annual_rent: Some(rent * 12.0),
        status: Status::Available,
        broker_name: "Broker".to_string(),
        broker_email: "broker@example.com".to_string(),
        broker_phone: None,
        landlord_name: "Landlord".to_string(),
        landlord_email: "landlord@example.com".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Keeps every notification in memory, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices.lock().unwrap().push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices.lock().unwrap().push(Notice::Error(message.to_string()));
    }
}
