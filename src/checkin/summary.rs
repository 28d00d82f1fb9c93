use colored::Colorize;
use serde::Serialize;

/// Terminal state of one token's processing. Every token lands in exactly
/// one of these; only `Success` and the failure states touch the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOutcome {
    /// Token could not be validated.
    Invalid,
    /// Token resolved to an account already handled this run.
    Duplicate,
    /// Account had already checked in.
    AlreadyCheckedIn,
    /// Check-in performed.
    Success,
    /// Check-in attempts exhausted.
    Failed,
}

/// Aggregate result of one pass over the configured tokens.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            success: 0,
            failed: 0,
        }
    }

    pub fn record(&mut self, outcome: &TokenOutcome) {
        match outcome {
            TokenOutcome::Success => self.success += 1,
            TokenOutcome::Invalid | TokenOutcome::Failed => self.failed += 1,
            TokenOutcome::Duplicate | TokenOutcome::AlreadyCheckedIn => {}
        }
    }

    /// Tokens that resolved to an account already handled this run,
    /// including accounts that were already checked in.
    pub fn duplicates(&self) -> usize {
        self.total - self.success - self.failed
    }

    /// Print the final console summary line.
    pub fn print_summary(&self) {
        println!(
            "\n{}",
            format!(
                "✅ Success: {} | ❌ Failed: {} | 🚫 Duplicates: {}",
                self.success,
                self.failed,
                self.duplicates()
            )
            .bright_green()
        );
    }
}
