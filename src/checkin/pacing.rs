use rand::Rng;
use std::time::Duration;

/// Delay inserted between tokens to throttle the request rate against the
/// remote service.
pub trait PacingStrategy: Send + Sync {
    fn next_delay(&self) -> Duration;
}

/// Uniform random delay drawn from a window on every call.
pub struct JitteredPacing {
    min: Duration,
    max: Duration,
}

impl JitteredPacing {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }
}

impl PacingStrategy for JitteredPacing {
    fn next_delay(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }
}

/// Zero-delay pacing.
pub struct NoPacing;

impl PacingStrategy for NoPacing {
    fn next_delay(&self) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jittered_delay_stays_in_window() {
        let pacing = JitteredPacing::new(Duration::from_millis(2000), Duration::from_millis(3000));
        for _ in 0..100 {
            let delay = pacing.next_delay();
            assert!(delay >= Duration::from_millis(2000));
            assert!(delay < Duration::from_millis(3000));
        }
    }

    #[test]
    fn test_degenerate_window_returns_min() {
        let pacing = JitteredPacing::new(Duration::from_millis(500), Duration::from_millis(500));
        assert_eq!(pacing.next_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_no_pacing_is_zero() {
        assert_eq!(NoPacing.next_delay(), Duration::ZERO);
    }
}
