use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hipin-checkin")]
#[command(about = "Automated daily check-in bot for Hi-Pin accounts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one check-in pass over all configured tokens
    Run {
        /// Validate and report without performing check-ins
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate tokens and show account status without checking in
    Validate,

    /// Run check-in passes on a fixed interval
    Auto {
        /// Interval between passes in seconds
        #[arg(short, long, default_value = "86400")]
        interval: u64,

        /// Validate and report without performing check-ins
        #[arg(long)]
        dry_run: bool,
    },

    /// Load and display the effective configuration
    Init,
}
