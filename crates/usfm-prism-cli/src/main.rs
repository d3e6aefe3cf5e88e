mod config;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use usfm_prism_engine::{Format, io};

use config::Config;

/// Convert scripture documents between USFM, USX and USJ.
#[derive(Debug, Parser)]
#[command(name = "usfm-prism", version, about)]
struct Cli {
    /// Input file (.usfm, .usx, .usj/.json)
    input: PathBuf,

    /// Source format; inferred from the input extension when omitted
    #[arg(long)]
    from: Option<String>,

    /// Target format; inferred from the output extension when omitted
    #[arg(long)]
    to: Option<String>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print USJ output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()
        .context("loading configuration")?
        .unwrap_or_default();

    let from = match &cli.from {
        Some(name) => Format::from_str(name)?,
        None => io::detect_format(&cli.input)?,
    };
    let to = match &cli.to {
        Some(name) => Format::from_str(name)?,
        None => match &cli.output {
            Some(path) => io::detect_format(path)?,
            None => config.default_output()?,
        },
    };
    let pretty = cli.pretty || config.pretty;

    debug!(%from, %to, "converting {}", cli.input.display());

    let input = io::read_file(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let doc = usfm_prism_engine::parse(&input, from)
        .with_context(|| format!("parsing {} as {from}", cli.input.display()))?;
    let output = usfm_prism_engine::render(&doc, to, pretty)?;

    match &cli.output {
        Some(path) => {
            io::write_file(path, &output).with_context(|| format!("writing {}", path.display()))?
        }
        None => print!("{output}"),
    }
    Ok(())
}
