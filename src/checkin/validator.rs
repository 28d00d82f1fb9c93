use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

use crate::checkin::retry::RetryPolicy;
use crate::error::CheckinError;
use crate::hipin::{AccountInfo, CheckinApi};
use crate::utils::token_prefix;

/// Why a token failed validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The service answered but returned no account for the token.
    #[error("token not recognized by the service")]
    Rejected,

    /// Every attempt failed with a transport or server error.
    #[error("validation failed after {attempts} attempts: {last_error}")]
    Exhausted {
        attempts: u32,
        last_error: CheckinError,
    },
}

/// Resolves a bearer token to its account via the profile endpoint,
/// retrying transient failures with linear backoff.
pub struct TokenValidator {
    api: Arc<dyn CheckinApi>,
    policy: RetryPolicy,
}

impl TokenValidator {
    pub fn new(api: Arc<dyn CheckinApi>, policy: RetryPolicy) -> Self {
        Self { api, policy }
    }

    pub async fn validate(&self, token: &str) -> Result<AccountInfo, ValidationError> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.api.fetch_profile(token).await {
                Ok(Some(account)) => return Ok(account),
                // A definitive answer from the service, not a transient fault
                Ok(None) => return Err(ValidationError::Rejected),
                Err(e) => {
                    if attempts >= self.policy.max_retries() {
                        error!(
                            token = %token_prefix(token),
                            attempts,
                            error = %e,
                            "token validation failed"
                        );
                        return Err(ValidationError::Exhausted {
                            attempts,
                            last_error: e,
                        });
                    }

                    let delay = self.policy.backoff_delay(attempts);
                    debug!(
                        token = %token_prefix(token),
                        attempt = attempts,
                        delay_ms = delay.as_millis() as u64,
                        "profile fetch failed, retrying"
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

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(5000))
    }

    fn account(id: &str) -> AccountInfo {
        AccountInfo {
            id: id.to_string(),
            name: Some("alice".to_string()),
            is_checked_in: false,
        }
    }

    fn transient() -> CheckinError {
        CheckinError::Api {
            status: 500,
            message: "server error".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_two_failures_with_linear_backoff() {
        let mut api = MockCheckinApi::new();
        let mut calls = 0u32;
        api.expect_fetch_profile().times(3).returning(move |_| {
            calls += 1;
            if calls < 3 {
                Err(transient())
            } else {
                Ok(Some(account("u-1")))
            }
        });

        let validator = TokenValidator::new(Arc::new(api), policy());
        let started = tokio::time::Instant::now();
        let result = validator.validate("tok-abc").await.unwrap();

        assert_eq!(result.id, "u-1");
        // 5s backoff after the first failure, 10s after the second
        assert_eq!(started.elapsed(), Duration::from_millis(15_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_after_max_retries() {
        let mut api = MockCheckinApi::new();
        api.expect_fetch_profile()
            .times(3)
            .returning(|_| Err(transient()));

        let validator = TokenValidator::new(Arc::new(api), policy());
        match validator.validate("tok-abc").await {
            Err(ValidationError::Exhausted { attempts, .. }) => assert_eq!(attempts, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_token_does_not_retry() {
        let mut api = MockCheckinApi::new();
        api.expect_fetch_profile().times(1).returning(|_| Ok(None));

        let validator = TokenValidator::new(Arc::new(api), policy());
        let result = validator.validate("tok-abc").await;
        assert!(matches!(result, Err(ValidationError::Rejected)));
    }
}
