pub mod checkin;
pub mod cli;
pub mod config;
pub mod error;
pub mod hipin;
pub mod logging;
pub mod utils;

pub use config::Config;
pub use error::{CheckinError, Result};
