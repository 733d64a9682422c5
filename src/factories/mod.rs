//! # Data factories
//!
//! Build resource payloads with collision-resistant identifiers so scenarios
//! running side by side never step on each other's data. Factories never touch
//! the network.
//!
//! Each resource has a `*Patch` type. `build(patch)` starts from generated
//! defaults and lets every `Some` field in the patch win; `update(&original, patch)`
//! returns a changed copy and leaves the original alone.

pub mod order;
pub mod pet;
pub mod user;

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub use order::OrderPatch;
pub use pet::PetPatch;
pub use user::UserPatch;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

/// Millisecond timestamp scaled by 1000, bumped past the last value handed out
/// so ids are strictly increasing within the process.
pub fn unique_id() -> i64 {
    let candidate = now_ms().saturating_mul(1000);
    let previous = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(candidate.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    candidate.max(previous + 1)
}

pub fn unique_suffix() -> String {
    unique_id().to_string()
}
