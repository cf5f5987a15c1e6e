//! CLI for ytthumb.

mod commands;
mod console;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ytthumb_core::config;

use commands::{run_config, run_download, run_extract, run_fetch};

/// Top-level CLI for ytthumb.
#[derive(Debug, Parser)]
#[command(name = "ytthumb")]
#[command(about = "ytthumb: fetch the best available YouTube thumbnails", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve thumbnails for a batch of URLs; more than one is saved as a zip.
    Fetch {
        /// YouTube URLs. If none are given, reads --input or stdin, one per line.
        urls: Vec<String>,

        /// File with one URL per line ("-" for stdin).
        #[arg(long, short = 'i', value_name = "FILE")]
        input: Option<PathBuf>,

        /// Directory for the archive and images (default: config output_dir, else cwd).
        #[arg(long, short = 'o', value_name = "DIR")]
        out: Option<PathBuf>,

        /// Also save every previewed thumbnail as its own <id>.jpg.
        #[arg(long)]
        save_each: bool,
    },

    /// Show how each URL would be routed, without any network access.
    Extract {
        /// YouTube URLs. If none are given, reads --input or stdin.
        urls: Vec<String>,

        /// File with one URL per line ("-" for stdin).
        #[arg(long, short = 'i', value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Resolve one video and save its thumbnail as <id>.jpg.
    Download {
        /// YouTube video URL.
        url: String,

        /// Output directory (default: config output_dir, else cwd).
        #[arg(long, short = 'o', value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Print the config file location and effective settings.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                urls,
                input,
                out,
                save_each,
            } => {
                let text = input::read_input(&urls, input.as_deref())?;
                run_fetch(&cfg, &text, out, save_each).await?;
            }
            CliCommand::Extract { urls, input } => {
                let text = input::read_input(&urls, input.as_deref())?;
                run_extract(&text);
            }
            CliCommand::Download { url, out } => run_download(&cfg, &url, out).await?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
