//! git::last_error
//!
//! The engine's last-error slot.
//!
//! # Lifecycle
//!
//! Every engine call that fails records its error class and message here
//! before returning [`EngineFailure`](super::engine::EngineFailure). The
//! record lives until it is consumed by [`GitError::last`](super::GitError::last)
//! (or cleared explicitly).
//!
//! The slot is thread-local, so no locking is needed, but it holds a single
//! record: a second failing call on the same thread overwrites the first.
//! Read the error immediately after the failing call, before any other
//! fallible engine call on that thread.
//!
//! # Example
//!
//! ```
//! use gitwalk::git::last_error::{clear_last_error, last_error, set_last_error};
//!
//! set_last_error(6, "could not find repository");
//! assert_eq!(last_error().unwrap().class, 6);
//!
//! clear_last_error();
//! assert!(last_error().is_none());
//! ```

use std::cell::RefCell;

/// A raw error record as the engine left it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawError {
    /// Numeric error class (0..=30 for the known categories)
    pub class: i32,
    /// Engine-supplied message
    pub message: String,
}

thread_local! {
    static LAST_ERROR: RefCell<Option<RawError>> = const { RefCell::new(None) };
}

/// Record an error for the calling thread, replacing any previous record.
pub fn set_last_error(class: i32, message: impl Into<String>) {
    let message = message.into();
    tracing::trace!(class, %message, "recording last error");
    LAST_ERROR.with(|slot| {
        *slot.borrow_mut() = Some(RawError { class, message });
    });
}

/// Peek at the calling thread's last error without clearing it.
pub fn last_error() -> Option<RawError> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}

/// Clear the calling thread's last error.
pub fn clear_last_error() {
    LAST_ERROR.with(|slot| {
        slot.borrow_mut().take();
    });
}

/// Read and clear the calling thread's last error in one step.
pub fn take_last_error() -> Option<RawError> {
    LAST_ERROR.with(|slot| slot.borrow_mut().take())
}
