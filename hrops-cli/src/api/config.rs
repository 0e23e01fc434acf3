//! Request-level API configuration
//!
//! The dashboard pages mostly fired unbounded fetches; the one page that
//! bounded them used a 15 second abort. That bound is applied uniformly here.

use std::time::Duration;

/// Configuration applied to every request made by [`super::SheetsClient`]
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Per-request timeout (connect + read)
    pub timeout: Duration,
    /// Attempts per request; 1 means no retry
    pub max_attempts: u32,
    /// Delay between attempts
    pub retry_delay: Duration,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            max_attempts: 2,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl RequestConfig {
    /// No retries, short timeout -- for tests and dry runs.
    pub fn disabled() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_attempts: 1,
            retry_delay: Duration::from_millis(0),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RequestConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.max_attempts, 2);
    }

    #[test]
    fn test_max_attempts_floor() {
        let config = RequestConfig::default().with_max_attempts(0);
        assert_eq!(config.max_attempts, 1);
    }
}
