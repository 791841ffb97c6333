//! Property listing management: validation of listing drafts, derivation of
//! the filtered and sorted list view, and optimistic writes against a cached
//! copy of the remote collection.

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod form;
pub mod format;
pub mod listing;
pub mod models;
pub mod notify;
pub mod validation;

pub use api::{HttpPropertyApi, PropertyApi};
pub use cache::{MutationCoordinator, MutationPhase, PropertyStore};
pub use config::{ApiConfig, AppConfig};
pub use errors::{ApiError, ApiResult, MutationError};
pub use form::{EditOutcome, PropertyForm};
pub use listing::{derive, FilterCriteria, FilterInput, ListView, SortKey};
pub use models::{Property, PropertyDraft, PropertyId, PropertySubmission, Status};
pub use notify::{Notifier, TracingNotifier};
pub use validation::{validate, validate_field, Field, FieldErrors};
