use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

use crate::checkin::retry::RetryPolicy;
use crate::error::CheckinError;
use crate::hipin::{AccountInfo, CheckinApi};
use crate::utils::{display_name, token_prefix};

/// All check-in attempts for one account were used up.
#[derive(Error, Debug)]
#[error("check-in failed after {attempts} attempts: {last_error}")]
pub struct CheckInFailure {
    pub attempts: u32,
    pub last_error: CheckinError,
}

/// Performs the check-in action for a validated account, retrying transient
/// failures with the same backoff as validation.
pub struct CheckinExecutor {
    api: Arc<dyn CheckinApi>,
    policy: RetryPolicy,
}

impl CheckinExecutor {
    pub fn new(api: Arc<dyn CheckinApi>, policy: RetryPolicy) -> Self {
        Self { api, policy }
    }

    pub async fn check_in(
        &self,
        token: &str,
        account: &AccountInfo,
    ) -> Result<(), CheckInFailure> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.api.check_in(token).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    if attempts >= self.policy.max_retries() {
                        error!(
                            token = %token_prefix(token),
                            user = %display_name(account.name.as_deref()),
                            attempts,
                            error = %e,
                            "check-in failed"
                        );
                        return Err(CheckInFailure {
                            attempts,
                            last_error: e,
                        });
                    }

                    let delay = self.policy.backoff_delay(attempts);
                    debug!(
                        token = %token_prefix(token),
                        attempt = attempts,
                        delay_ms = delay.as_millis() as u64,
                        "check-in attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hipin::client::MockCheckinApi;
    use std::time::Duration;

    fn account() -> AccountInfo {
        AccountInfo {
            id: "u-1".to_string(),
            name: None,
            is_checked_in: false,
        }
    }

    fn transient() -> CheckinError {
        CheckinError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let mut api = MockCheckinApi::new();
        api.expect_check_in().times(1).returning(|_| Ok(()));

        let executor = CheckinExecutor::new(
            Arc::new(api),
            RetryPolicy::new(3, Duration::from_millis(5000)),
        );
        assert!(executor.check_in("tok-abc", &account()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_one_failure() {
        let mut api = MockCheckinApi::new();
        let mut calls = 0u32;
        api.expect_check_in().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(transient())
            } else {
                Ok(())
            }
        });

        let executor = CheckinExecutor::new(
            Arc::new(api),
            RetryPolicy::new(3, Duration::from_millis(5000)),
        );
        let started = tokio::time::Instant::now();
        assert!(executor.check_in("tok-abc", &account()).await.is_ok());
        assert_eq!(started.elapsed(), Duration::from_millis(5000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_retry_budget() {
        let mut api = MockCheckinApi::new();
        api.expect_check_in().times(3).returning(|_| Err(transient()));

        let executor = CheckinExecutor::new(
            Arc::new(api),
            RetryPolicy::new(3, Duration::from_millis(5000)),
        );
        let failure = executor.check_in("tok-abc", &account()).await.unwrap_err();
        assert_eq!(failure.attempts, 3);
    }
}
