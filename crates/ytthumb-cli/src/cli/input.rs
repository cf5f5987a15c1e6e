//! Where a batch's URL text comes from: arguments, a file, or stdin.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Joins `urls` into one block; falls back to `input` ("-" = stdin), then stdin.
pub fn read_input(urls: &[String], input: Option<&Path>) -> Result<String> {
    if !urls.is_empty() {
        return Ok(urls.join("\n"));
    }
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read stdin")?;
            Ok(text)
        }
    }
}
