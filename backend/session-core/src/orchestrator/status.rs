//! In-flight flags and the last login error, for presentation layers that
//! show spinners or error banners.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub(crate) struct RequestStatus {
    pub(crate) logging_in: AtomicBool,
    pub(crate) logging_out: AtomicBool,
    login_error: Mutex<Option<String>>,
}

impl RequestStatus {
    pub(crate) fn login_error(&self) -> Option<String> {
        self.login_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_login_error(&self, error: Option<String>) {
        *self
            .login_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = error;
    }
}

/// Raises a flag for its lifetime.
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    pub(crate) fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
