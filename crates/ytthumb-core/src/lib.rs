pub mod config;
pub mod logging;

pub mod archive;
pub mod batch;
pub mod extract;
pub mod fetch;
pub mod notice;
pub mod preview;
pub mod sink;
pub mod thumbnail;
