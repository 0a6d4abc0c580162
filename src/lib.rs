//! Client-side rate limiting for AI course generation.
//!
//! Guards how often a client may request course generation. Attempts
//! accumulate toward a budget inside a fixed window; exhausting the budget
//! starts a cooldown lockout. Expiry is evaluated lazily from wall-clock
//! deltas at call time, so no timers are ever scheduled.
//!
//! State lives behind the pluggable [`RateLimitStore`] trait:
//! - [`FileStore`]: one JSON record in a per-user file, survives restarts
//! - [`InMemoryStore`]: ephemeral, for tests and embedded callers
//!
//! The limiter is advisory and fail-open: a missing, corrupt, or unwritable
//! store never blocks the caller.

mod config;
mod file;
mod limiter;
mod memory;
mod policy;
mod store;

pub use config::RateLimitConfig;
pub use file::{FileStore, STATE_FILE};
pub use limiter::RateLimiter;
pub use memory::InMemoryStore;
pub use policy::{evaluate, format_wait_time, record_attempt, RateLimitRecord, RateLimitStatus};
pub use store::{BoxedStore, RateLimitStore, StoreError, StoreResult};
