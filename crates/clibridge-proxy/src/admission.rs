//! Bounded admission of backend invocations.

use std::sync::Arc;

use clibridge_core::ProxyError;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Limits how many backend processes run at once.
///
/// A limit of zero admits everything. Otherwise callers wait for a free
/// slot; nobody is rejected.
#[derive(Debug, Clone)]
pub struct Admission {
    slots: Option<Arc<Semaphore>>,
}

impl Admission {
    pub fn new(max_concurrent: usize) -> Self {
        let slots = (max_concurrent > 0).then(|| Arc::new(Semaphore::new(max_concurrent)));
        Self { slots }
    }

    /// Wait for a slot. The slot is released when the permit is dropped.
    pub async fn acquire(&self) -> Result<Option<OwnedSemaphorePermit>, ProxyError> {
        match &self.slots {
            None => Ok(None),
            Some(slots) => Arc::clone(slots)
                .acquire_owned()
                .await
                .map(Some)
                .map_err(|e| ProxyError::internal(format!("Admission closed: {e}"))),
        }
    }

    /// Free slots, or `None` when unlimited.
    pub fn available(&self) -> Option<usize> {
        self.slots.as_ref().map(|s| s.available_permits())
    }
}
