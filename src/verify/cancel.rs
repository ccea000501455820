//! Cooperative cancellation for verification requests.

use crate::error::{CertError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag the caller flips to abort an in-flight verification.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`CertError::Cancelled`] once cancelled.
    pub fn check(&self, stage: &str) -> Result<()> {
        if self.is_cancelled() {
            tracing::info!("Verification cancelled {stage}");
            Err(CertError::Cancelled(stage.to_string()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(token.check("before OCR").is_ok());
        clone.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(token.check("after OCR"), Err(CertError::Cancelled(_))));
    }
}
