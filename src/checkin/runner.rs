use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::checkin::executor::CheckinExecutor;
use crate::checkin::pacing::PacingStrategy;
use crate::checkin::retry::RetryPolicy;
use crate::checkin::summary::{RunSummary, TokenOutcome};
use crate::checkin::validator::{TokenValidator, ValidationError};
use crate::hipin::CheckinApi;
use crate::utils::{display_name, token_prefix};

/// Drives one sequential pass over the configured tokens: validate,
/// short-circuit duplicates and already-done accounts, check in, pace.
pub struct CheckinRunner {
    validator: TokenValidator,
    executor: CheckinExecutor,
    pacing: Box<dyn PacingStrategy>,
    dry_run: bool,
    quiet: bool,
}

impl CheckinRunner {
    pub fn new(
        api: Arc<dyn CheckinApi>,
        policy: RetryPolicy,
        pacing: Box<dyn PacingStrategy>,
    ) -> Self {
        Self {
            validator: TokenValidator::new(api.clone(), policy),
            executor: CheckinExecutor::new(api, policy),
            pacing,
            dry_run: false,
            quiet: false,
        }
    }

    /// Validate and report without performing the check-in action.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Suppress per-token console output.
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Process every token in order and return the aggregate counts.
    pub async fn run(&self, tokens: &[String]) -> RunSummary {
        info!("Processing {} tokens...", tokens.len());

        let mut processed = HashSet::new();
        let mut summary = RunSummary::new(tokens.len());

        for token in tokens {
            let outcome = self.process_token(token, &mut processed).await;
            summary.record(&outcome);

            // Pacing applies after every token, regardless of outcome
            self.pace().await;
        }

        info!(
            success = summary.success,
            failed = summary.failed,
            duplicates = summary.duplicates(),
            "check-in run completed"
        );

        summary
    }

    async fn process_token(&self, token: &str, processed: &mut HashSet<String>) -> TokenOutcome {
        let spinner = self.spinner(format!("Processing token: {}...", token_prefix(token)));

        let account = match self.validator.validate(token).await {
            Ok(account) => account,
            Err(reason) => {
                if matches!(reason, ValidationError::Rejected) {
                    warn!(token = %token_prefix(token), "token rejected by the service");
                }
                spinner.finish_with_message(
                    format!("✗ Invalid token: {}", token_prefix(token))
                        .red()
                        .to_string(),
                );
                return TokenOutcome::Invalid;
            }
        };

        let user = display_name(account.name.as_deref()).to_string();

        // Duplicate check comes before the already-checked-in check, so a
        // duplicate that also already checked in is reported as a duplicate
        if processed.contains(&account.id) {
            spinner.finish_with_message(
                format!("⚠ Duplicate account: {}", user).yellow().to_string(),
            );
            return TokenOutcome::Duplicate;
        }

        if account.is_checked_in {
            processed.insert(account.id.clone());
            spinner.finish_with_message(
                format!("✓ Already checked in: {}", user).green().to_string(),
            );
            return TokenOutcome::AlreadyCheckedIn;
        }

        if self.dry_run {
            processed.insert(account.id.clone());
            spinner.finish_with_message(
                format!("✓ DRY RUN: would check in: {}", user)
                    .yellow()
                    .to_string(),
            );
            return TokenOutcome::Success;
        }

        match self.executor.check_in(token, &account).await {
            Ok(()) => {
                processed.insert(account.id.clone());
                spinner.finish_with_message(format!("✓ Success: {}", user).green().to_string());
                TokenOutcome::Success
            }
            // Not added to the processed set: a later run may retry it
            Err(_) => {
                spinner.finish_with_message(format!("✗ Failed: {}", user).red().to_string());
                TokenOutcome::Failed
            }
        }
    }

    async fn pace(&self) {
        let delay = self.pacing.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn spinner(&self, message: String) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner());
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
