//! Local-first writes against the property cache.
//!
//! Deletes and updates walk these phases:
//!
//! ```text
//! (idle) --begin--> Pending --service ok--> Committed
//!                          \--service err-> RolledBack
//! ```
//!
//! `begin` snapshots the cache, cancels in-flight list fetches and applies the
//! projected change before the request goes out. Settling either drops the
//! snapshot or writes it back. Holding a [`PendingMutation`] is the Pending
//! phase; `commit` and `roll_back` consume it and return the terminal phase.
//!
//! A create has no projected change until the service assigns an id, so it
//! only cancels in-flight fetches and touches the cache once the service
//! answers.
//!
//! After any outcome the list is fetched again so the cache converges on what
//! the service actually holds.
//!
//! Attempts are not serialized. Two mutations in flight for the same listing
//! race, and whichever settles last decides the cache contents.

use crate::api::PropertyApi;
use crate::cache::store::{PropertyStore, Snapshot};
use crate::errors::MutationError;
use crate::models::{Property, PropertyDraft, PropertyId, PropertySubmission};
use crate::notify::Notifier;
use crate::validation;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        })
    }
}

/// Phase of a mutation attempt once it has left idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPhase {
    /// Cache patched, service call outstanding
    Pending,
    /// Service confirmed; snapshot discarded
    Committed,
    /// Service refused; cache restored from the snapshot
    RolledBack,
}

impl MutationPhase {
    pub fn is_settled(&self) -> bool {
        !matches!(self, MutationPhase::Pending)
    }
}

/// A mutation whose local effect is applied but not yet confirmed.
///
/// Settling consumes it, so an attempt settles exactly once.
#[derive(Debug)]
#[must_use = "a pending mutation must be committed or rolled back"]
pub struct PendingMutation {
    kind: MutationKind,
    snapshot: Snapshot,
}

impl PendingMutation {
    /// Leave idle: snapshot the cache, then apply `patch` to it
    pub fn begin(kind: MutationKind, store: &PropertyStore, patch: impl FnOnce(&PropertyStore)) -> Self {
        store.cancel_fetches();
        let snapshot = store.snapshot();
        patch(store);
        debug!(%kind, "mutation pending");
        Self { kind, snapshot }
    }

    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// State of the cache when the attempt began
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn commit(self) -> MutationPhase {
        debug!(kind = %self.kind, "mutation committed");
        MutationPhase::Committed
    }

    pub fn roll_back(self, store: &PropertyStore) -> MutationPhase {
        warn!(kind = %self.kind, "rolling back mutation");
        store.restore(self.snapshot);
        MutationPhase::RolledBack
    }
}

/// Runs creates, updates and deletes against the service and the cache
pub struct MutationCoordinator<A, N> {
    api: Arc<A>,
    store: PropertyStore,
    notifier: N,
}

impl<A, N> MutationCoordinator<A, N>
where
    A: PropertyApi,
    N: Notifier,
{
    pub fn new(api: Arc<A>, store: PropertyStore, notifier: N) -> Self {
        Self {
            api,
            store,
            notifier,
        }
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Load the collection from the service
    pub async fn refresh(&self) -> Result<(), MutationError> {
        self.store.refresh(self.api.as_ref()).await?;
        Ok(())
    }

    /// Refetch after a mutation settles. A failure here is left on the store
    /// for the list view to offer a retry; it does not change the mutation's
    /// own outcome.
    async fn reconcile(&self) {
        self.store.invalidate();
        if let Err(err) = self.store.refresh(self.api.as_ref()).await {
            warn!(error = %err, "reconciling fetch failed");
        }
    }

    /// Remove a listing, hiding it from the cache before the service answers
    pub async fn delete(&self, id: &PropertyId) -> Result<(), MutationError> {
        let pending = PendingMutation::begin(MutationKind::Delete, &self.store, |store| {
            if !store.remove(id) {
                debug!(%id, "deleting a listing that is not cached");
            }
        });

        let outcome = match self.api.delete(id).await {
            Ok(()) => {
                pending.commit();
                info!(%id, "property deleted");
                self.notifier.success("Property deleted successfully");
                Ok(())
            }
            Err(err) => {
                pending.roll_back(&self.store);
                warn!(%id, error = %err, "delete failed");
                self.notifier.error("Failed to delete property");
                Err(err.into())
            }
        };

        self.reconcile().await;
        outcome
    }

    /// Validate and store a new listing.
    ///
    /// The cache only learns about the listing once the service has assigned
    /// its id, so there is nothing to show optimistically and nothing to roll
    /// back.
    pub async fn create(&self, draft: &PropertyDraft) -> Result<Property, MutationError> {
        let submission = validation::into_submission(draft).map_err(MutationError::Invalid)?;
        self.store.cancel_fetches();

        let outcome = match self.api.create(&submission).await {
            Ok(created) => {
                self.store.upsert(created.clone());
                info!(id = %created.id, "property created");
                self.notifier.success("Property created successfully");
                Ok(created)
            }
            Err(err) => {
                warn!(error = %err, "create failed");
                self.notifier.error(&err.to_string());
                Err(err.into())
            }
        };

        self.reconcile().await;
        outcome
    }

    /// Validate and save changes to an existing listing, showing them in the
    /// cache before the service confirms
    pub async fn update(&self, id: &PropertyId, draft: &PropertyDraft) -> Result<Property, MutationError> {
        let submission = validation::into_submission(draft).map_err(MutationError::Invalid)?;
        self.update_submission(id, submission).await
    }

    async fn update_submission(
        &self,
        id: &PropertyId,
        submission: PropertySubmission,
    ) -> Result<Property, MutationError> {
        let projected = Property::from_submission(id.clone(), submission.clone());
        let pending = PendingMutation::begin(MutationKind::Update, &self.store, |store| {
            store.replace(projected);
        });

        let outcome = match self.api.update(id, &submission).await {
            Ok(updated) => {
                pending.commit();
                self.store.replace(updated.clone());
                info!(%id, "property updated");
                self.notifier.success("Property updated successfully");
                Ok(updated)
            }
            Err(err) => {
                pending.roll_back(&self.store);
                self.notifier.error(&err.to_string());
                Err(err.into())
            }
        };

        self.reconcile().await;
        outcome
    }
}
