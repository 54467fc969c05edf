//! Status-change observers
//!
//! Observers are notified after a user's status actually changes, in
//! registration order. A failing observer is logged and skipped; it never
//! changes the outcome of the status update.

use thiserror::Error;
use types::user::User;

/// Failure reported by an observer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("observer failed: {0}")]
pub struct ObserverError(pub String);

/// Receives users whose status has changed
pub trait StatusObserver: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn on_status_changed(&self, user: &User) -> Result<(), ObserverError>;
}
