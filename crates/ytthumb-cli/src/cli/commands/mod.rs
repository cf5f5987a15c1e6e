//! CLI command handlers, one per file.

mod config;
mod download;
mod extract;
mod fetch;

pub use config::run_config;
pub use download::run_download;
pub use extract::run_extract;
pub use fetch::run_fetch;
