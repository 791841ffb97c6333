pub mod mutation;
pub mod store;

pub use mutation::{MutationCoordinator, MutationKind, MutationPhase, PendingMutation};
pub use store::{FetchTicket, PropertyStore, Snapshot};
