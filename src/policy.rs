//! Fixed-window rate limit decisions.
//!
//! Pure functions over a stored [`RateLimitRecord`], the caller's clock, and a
//! [`RateLimitConfig`]. Attempts accumulate toward `max_attempts` inside a
//! window; exhausting the budget starts a cooldown lockout. Expiry is derived
//! from wall-clock deltas at call time, never from scheduled timers.

use serde::{Deserialize, Serialize};

use crate::config::RateLimitConfig;

/// Persisted limiter state. One record per profile.
///
/// Timestamps are Unix epoch milliseconds. `cooldown_start` is stamped only
/// when an attempt exhausts the window's budget and is dropped whenever a new
/// window begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRecord {
    /// Attempts recorded in the current window.
    pub attempts: u32,
    /// When the current window began.
    pub window_start: i64,
    /// Start of the lockout, set once the window's budget is exhausted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_start: Option<i64>,
}

impl RateLimitRecord {
    /// First attempt of a fresh window.
    pub fn new(now: i64) -> Self {
        Self {
            attempts: 1,
            window_start: now,
            cooldown_start: None,
        }
    }
}

/// Outcome of an [`evaluate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Whether a new attempt may proceed.
    pub allowed: bool,
    /// Attempts left *after* the attempt the caller is about to make.
    pub remaining_attempts: u32,
    /// When the current window or cooldown ends.
    pub reset_time: Option<i64>,
    /// End of the active cooldown, if one is in effect.
    pub cooldown_ends_at: Option<i64>,
    /// Human-readable wait message when blocked.
    pub message: Option<String>,
}

impl RateLimitStatus {
    /// Status for a caller with no live state: allowed, full budget minus the
    /// attempt about to happen.
    fn fresh(now: i64, config: &RateLimitConfig) -> Self {
        Self {
            allowed: true,
            remaining_attempts: config.max_attempts.saturating_sub(1),
            reset_time: Some(now + config.window_ms()),
            cooldown_ends_at: None,
            message: None,
        }
    }
}

/// Decide whether a new attempt is allowed at `now`.
///
/// A missing record, an expired cooldown, and an expired window all evaluate
/// as a fresh start. Within a live window the reported remaining count is
/// pre-decremented for the attempt the caller is about to make.
pub fn evaluate(
    now: i64,
    record: Option<&RateLimitRecord>,
    config: &RateLimitConfig,
) -> RateLimitStatus {
    let Some(data) = record else {
        return RateLimitStatus::fresh(now, config);
    };

    if let Some(cooldown_start) = data.cooldown_start {
        if config.cooldown_ms() > 0 {
            let cooldown_end = cooldown_start + config.cooldown_ms();
            if now < cooldown_end {
                return RateLimitStatus {
                    allowed: false,
                    remaining_attempts: 0,
                    reset_time: Some(cooldown_end),
                    cooldown_ends_at: Some(cooldown_end),
                    message: Some(format!(
                        "Please wait {} before generating another course.",
                        format_wait_time(seconds_until(now, cooldown_end))
                    )),
                };
            }
            // Cooldown has expired; next attempt starts a fresh window.
            return RateLimitStatus::fresh(now, config);
        }
    }

    let window_end = data.window_start + config.window_ms();
    if now >= window_end {
        return RateLimitStatus::fresh(now, config);
    }

    let remaining = config.max_attempts.saturating_sub(data.attempts);
    if remaining > 0 {
        return RateLimitStatus {
            allowed: true,
            remaining_attempts: remaining - 1,
            reset_time: Some(window_end),
            cooldown_ends_at: None,
            message: None,
        };
    }

    // Budget exhausted but no cooldown stamped yet: that only happens via
    // record_attempt, so the block lasts until the window ends.
    RateLimitStatus {
        allowed: false,
        remaining_attempts: 0,
        reset_time: Some(window_end),
        cooldown_ends_at: None,
        message: Some(format!(
            "Rate limit exceeded. You can generate more courses in {}.",
            format_wait_time(seconds_until(now, window_end))
        )),
    }
}

/// Count one attempt at `now`, returning the record to persist.
///
/// Restarts the window at one attempt when the previous window has expired,
/// otherwise increments in place. Reaching `max_attempts` stamps the cooldown.
pub fn record_attempt(
    now: i64,
    record: Option<&RateLimitRecord>,
    config: &RateLimitConfig,
) -> RateLimitRecord {
    let Some(data) = record else {
        return RateLimitRecord::new(now);
    };

    let window_end = data.window_start + config.window_ms();
    if now >= window_end {
        return RateLimitRecord::new(now);
    }

    let attempts = data.attempts + 1;
    let cooldown_start =
        (attempts >= config.max_attempts && config.cooldown_ms() > 0).then_some(now);

    RateLimitRecord {
        attempts,
        window_start: data.window_start,
        cooldown_start,
    }
}

/// Whole seconds from `now` until `end`, rounded up.
fn seconds_until(now: i64, end: i64) -> i64 {
    (end.saturating_sub(now).max(0) + 999) / 1000
}

/// Format a wait in seconds for display to users.
pub fn format_wait_time(seconds: i64) -> String {
    if seconds < 60 {
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;

    if remaining_seconds == 0 {
        return format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" });
    }

    format!(
        "{} minute{} and {} second{}",
        minutes,
        if minutes == 1 { "" } else { "s" },
        remaining_seconds,
        if remaining_seconds == 1 { "" } else { "s" }
    )
}
