//! Session cache for backend responses
//!
//! Responses are memoized in memory by request signature for the lifetime
//! of the process. Entries never expire; they are dropped only by an
//! explicit clear.

pub mod client;
pub mod key;
pub mod storage;

use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-export main types
pub use client::RequestCache;
pub use key::{Endpoint, RequestSignature};

/// Lock a std mutex, recovering the data if a holder panicked.
///
/// Guards are never held across an `.await`.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
