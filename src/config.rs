//! Limiter configuration.

use std::time::Duration;

/// Configuration for the course-generation limiter.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Attempts allowed per window.
    pub max_attempts: u32,
    /// Length of the counting window.
    pub window: Duration,
    /// Lockout applied once the window's budget is exhausted. Zero disables
    /// the cooldown; blocking then lasts until the window itself expires.
    pub cooldown: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            window: Duration::from_secs(60 * 60),
            cooldown: Duration::from_secs(5 * 60),
        }
    }
}

impl RateLimitConfig {
    /// Defaults overridden by `COURSELIMIT_MAX_ATTEMPTS`,
    /// `COURSELIMIT_WINDOW_MS`, and `COURSELIMIT_COOLDOWN_MS` where set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: env_parse("COURSELIMIT_MAX_ATTEMPTS")
                .unwrap_or(defaults.max_attempts),
            window: env_parse("COURSELIMIT_WINDOW_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.window),
            cooldown: env_parse("COURSELIMIT_COOLDOWN_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.cooldown),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }

    pub fn cooldown_ms(&self) -> i64 {
        self.cooldown.as_millis() as i64
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_production_limits() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.window_ms(), 3_600_000);
        assert_eq!(config.cooldown_ms(), 300_000);
    }
}
