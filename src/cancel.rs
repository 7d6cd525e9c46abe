// -*- mode: rust; -*-
//
// This file is part of pbpdp.
// See LICENSE for licensing information.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::Error;

/// Cooperative cancellation handle for the chunk-iterating operations.
///
/// Authenticator generation and proof generation poll their token at every
/// loop boundary. Cancellation makes the operation return
/// [`Error::Cancelled`]; everything allocated so far is dropped before the
/// error surfaces, so no partial artifact escapes.
///
/// Cloning yields a handle to the same flag, so one side can hold on to the
/// token while another thread runs the operation.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the operation holding a clone of this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> Result<(), Error> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
