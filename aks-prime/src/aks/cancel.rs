use crate::errors::AksError;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag for stopping a long-running decision from another thread.
///
/// Clones observe the same flag. A decision checks it before every
/// order-search step and before every polynomial witness.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

pub(crate) fn checkpoint(token: Option<&CancelToken>) -> Result<(), AksError> {
    match token {
        Some(token) if token.is_cancelled() => Err(AksError::Cancelled),
        _ => Ok(()),
    }
}
