//! The cancellation/deadline context threaded through every blocking call.
//!
//! Folders and the cluster client never construct their own context; the
//! command layer builds one derived from the app's cancellation root before
//! handing it to a background thunk, per the "No ambient singletons" design
//! note.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::errors::ClusterError;

/// Shared cancellation flag. Cloning shares the same underlying flag so the
/// app-wide root and every derived per-request context observe the same
/// cancellation signal.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Context passed to every folder/cluster-client call that may block.
#[derive(Clone, Debug)]
pub struct FolderCtx {
    pub cancel: CancelToken,
    pub deadline: Instant,
}

impl FolderCtx {
    /// Derive a per-request context from the app's cancellation root with
    /// the standard 10-second timeout.
    pub fn derive(root: &CancelToken) -> Self {
        Self::derive_with_timeout(root, Duration::from_secs(10))
    }

    pub fn derive_with_timeout(root: &CancelToken, timeout: Duration) -> Self {
        FolderCtx {
            cancel: root.clone(),
            deadline: Instant::now() + timeout,
        }
    }

    /// Context with no deadline, used only for edit-in-external-editor which
    /// is open-ended and replaces the terminal until the child exits.
    pub fn open_ended(root: &CancelToken) -> Self {
        FolderCtx {
            cancel: root.clone(),
            deadline: Instant::now() + Duration::from_secs(3600 * 24),
        }
    }

    /// Check cancellation and deadline, surfacing the appropriate error.
    pub fn check(&self) -> Result<(), ClusterError> {
        if self.cancel.is_cancelled() {
            return Err(ClusterError::Cancelled);
        }
        if Instant::now() > self.deadline {
            return Err(ClusterError::Timeout);
        }
        Ok(())
    }
}
