//! Print the OpenAPI document.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use fitlog::doc::ApiDoc;
use utoipa::OpenApi;

/// Serialisation used for the printed document.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the fitlog OpenAPI document",
    version
)]
struct CliArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn render(format: Format) -> Result<String> {
    let doc = ApiDoc::openapi();
    match format {
        Format::Json => doc.to_pretty_json().wrap_err("serialising OpenAPI as JSON"),
        Format::Yaml => doc.to_yaml().wrap_err("serialising OpenAPI as YAML"),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    println!("{}", render(args.format)?);
    Ok(())
}
