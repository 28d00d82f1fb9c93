use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing::{error, info};

use hipin_checkin_bot::checkin::pacing::{JitteredPacing, PacingStrategy};
use hipin_checkin_bot::checkin::validator::TokenValidator;
use hipin_checkin_bot::checkin::CheckinRunner;
use hipin_checkin_bot::cli::{Cli, Commands};
use hipin_checkin_bot::hipin::{CheckinApi, HipinClient};
use hipin_checkin_bot::{logging, utils, Config};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", format!("❌ Failed to load configuration: {}", e).red());
            std::process::exit(1);
        }
    };

    let _guard = logging::init(&config.log_dir);

    utils::print_banner();

    if config.proxy_url.is_some() {
        println!("{}", "ℹ Using proxy for requests".yellow());
    }

    let result = match cli.command {
        Commands::Run { dry_run } => run_checkin(&config, dry_run).await,

        Commands::Validate => validate_tokens(&config).await,

        Commands::Auto { interval, dry_run } => {
            info!("Starting automated check-in service (interval: {}s)", interval);
            run_auto_service(&config, interval, dry_run).await
        }

        Commands::Init => initialize(&config),
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

async fn run_checkin(config: &Config, dry_run: bool) -> hipin_checkin_bot::Result<()> {
    // An empty token list is fatal before any network call
    let tokens = config.require_tokens()?;

    let client = Arc::new(HipinClient::new(config)?);
    let (min, max) = config.pacing_window();
    let pacing: Box<dyn PacingStrategy> = Box::new(JitteredPacing::new(min, max));

    let runner = CheckinRunner::new(client, config.retry_policy(), pacing).dry_run(dry_run);
    let summary = runner.run(&tokens).await;

    summary.print_summary();
    Ok(())
}

async fn validate_tokens(config: &Config) -> hipin_checkin_bot::Result<()> {
    let tokens = config.require_tokens()?;
    let client: Arc<dyn CheckinApi> = Arc::new(HipinClient::new(config)?);
    let validator = TokenValidator::new(client, config.retry_policy());

    println!("{}", format!("Validating {} tokens...", tokens.len()).cyan());

    let widths = [8, 24, 20, 10];
    utils::print_table_border(70);
    utils::print_table_row(&["Token", "Account", "Name", "Checked in"], &widths);
    utils::print_table_border(70);

    let mut valid = 0usize;
    for token in &tokens {
        let prefix = utils::token_prefix(token);
        match validator.validate(token).await {
            Ok(account) => {
                valid += 1;
                utils::print_table_row(
                    &[
                        prefix.as_str(),
                        account.id.as_str(),
                        utils::display_name(account.name.as_deref()),
                        if account.is_checked_in { "yes" } else { "no" },
                    ],
                    &widths,
                );
            }
            Err(_) => {
                utils::print_table_row(&[prefix.as_str(), "-", "-", "-"], &widths);
            }
        }
    }
    utils::print_table_border(70);

    println!(
        "Valid: {} / {}",
        valid.to_string().green(),
        tokens.len()
    );
    Ok(())
}

async fn run_auto_service(
    config: &Config,
    interval: u64,
    dry_run: bool,
) -> hipin_checkin_bot::Result<()> {
    println!("{}", "Starting automated check-in service...".green());
    println!("Interval: {} seconds", interval);

    loop {
        run_checkin(config, dry_run).await?;
        info!("Next check-in pass in {} seconds", interval);
        tokio::time::sleep(Duration::from_secs(interval)).await;
    }
}

fn initialize(config: &Config) -> hipin_checkin_bot::Result<()> {
    let tokens = config.tokens();

    println!("{}", "✓ Configuration loaded".green());
    println!("\n{}", "Configuration:".cyan());
    println!("  Tokens:          {}", tokens.len());
    println!("  Max Retries:     {}", config.max_retries);
    println!("  Retry Base:      {} ms", config.retry_base_delay);
    println!("  Request Timeout: {} ms", config.request_timeout);
    println!(
        "  Pacing Window:   {} to {} ms",
        config.pacing_min_ms, config.pacing_max_ms
    );
    println!(
        "  Proxy:           {}",
        if config.proxy_url.is_some() {
            "configured"
        } else {
            "none"
        }
    );
    println!("  Log Dir:         {}", config.log_dir);

    Ok(())
}
