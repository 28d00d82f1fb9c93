use std::time::Duration;

/// Bounded retry budget with linear backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Total attempts allowed, counting the first one.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Wait before the next attempt, after `failed_attempts` failures so far.
    pub fn backoff_delay(&self, failed_attempts: u32) -> Duration {
        self.base_delay * failed_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_linearly() {
        let policy = RetryPolicy::new(3, Duration::from_millis(5000));
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(5000));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(10_000));
        assert_eq!(policy.backoff_delay(3), Duration::from_millis(15_000));
    }

    #[test]
    fn test_zero_base_delay() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        assert_eq!(policy.backoff_delay(2), Duration::ZERO);
    }
}
