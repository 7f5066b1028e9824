#![cfg(feature = "cli")]

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use url::Url;

/// Parses an HTML file (or stdin) for Microformats2 data and prints the canonical JSON.
#[derive(Parser, Debug)]
struct Options {
    /// Path to an HTML file to parse, or `-` to read from stdin
    #[arg(default_value = "-")]
    input: String,
    /// Base URL to resolve relative links against
    #[arg(short, long)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Options::parse();

    let html = if opts.input == "-" {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf).with_context(|| "failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(&opts.input)
            .with_context(|| format!("failed to read {}", opts.input))?
    };

    let base_url = opts
        .base_url
        .map(|raw| Url::parse(&raw).with_context(|| format!("invalid base URL: {raw}")))
        .transpose()?;

    let document = microformats2::parse(&html, base_url);
    println!("{}", document.as_json());

    Ok(())
}
