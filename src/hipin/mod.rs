pub mod client;
pub mod types;

pub use client::{CheckinApi, HipinClient};
pub use types::AccountInfo;
