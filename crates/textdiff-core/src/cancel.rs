//! Cooperative cancellation for long comparisons.
//!
//! The aligners poll an [`Interrupt`] once per table row or per Myers
//! callback. Plain comparisons use [`Uninterruptible`], whose error type is
//! uninhabited, so they cannot fail.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::DiffError;

/// A source of interruption checked between units of work.
pub trait Interrupt {
    type Error;

    /// Returns an error once the work should stop.
    fn check(&self) -> Result<(), Self::Error>;
}

/// Never interrupts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uninterruptible;

impl Interrupt for Uninterruptible {
    type Error = Infallible;

    fn check(&self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// A cloneable handle that aborts a running comparison.
///
/// All clones share one flag. Once cancelled, a token stays cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every comparison observing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Interrupt for CancellationToken {
    type Error = DiffError;

    fn check(&self) -> Result<(), DiffError> {
        if self.is_cancelled() {
            Err(DiffError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_live() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.check(), Err(DiffError::Cancelled));
    }

    #[test]
    fn uninterruptible_never_fires() {
        assert!(Uninterruptible.check().is_ok());
    }
}
