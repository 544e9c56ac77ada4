//! Binary entrypoint: read one JSON object from stdin, write one report to stdout.
//!
//! With `--lines`, each non-blank input line is an Input and each output line
//! is either an Output or an ErrorOutput; a bad line does not stop the batch.

use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use sentinel_engine::types::ErrorOutput;
use sentinel_engine::{run, EngineError, HourOfDay, Input, ProfileDirectory, RiskEngine};

#[derive(Debug, Parser)]
#[command(name = "sentinel-engine", version, about = "Heuristic pre-release risk scoring for commits")]
struct Cli {
  /// JSON profile directory (author -> profile). Defaults to the built-in profiles.
  #[arg(long)]
  profiles: Option<PathBuf>,

  /// Hour of day (0-23) to assess every input at, overriding the input's own hour.
  #[arg(long, value_parser = clap::value_parser!(u8).range(0..24))]
  hour: Option<u8>,

  /// Read JSON lines and emit one JSON line per input.
  #[arg(long)]
  lines: bool,
}

fn main() {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
    )
    .init();

  let cli = Cli::parse();
  if let Err(e) = run_binary(&cli) {
    let _ = writeln!(io::stderr(), "sentinel-engine error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
  let profiles = match &cli.profiles {
    Some(path) => ProfileDirectory::from_path(path)?,
    None => ProfileDirectory::builtin(),
  };
  let engine = RiskEngine::new(profiles, Default::default());
  tracing::debug!(authors = ?engine.profiles().authors(), "profiles loaded");
  let hour = cli.hour.map(HourOfDay::new).transpose()?;

  if cli.lines {
    return run_lines(&engine, hour);
  }

  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let input: Input = serde_json::from_str(&raw)?;

  let out = run(&engine, &input, hour)?;
  let json = serde_json::to_vec(&out)?;
  io::stdout().write_all(&json)?;
  Ok(())
}

fn run_lines(engine: &RiskEngine, hour: Option<HourOfDay>) -> Result<(), Box<dyn std::error::Error>> {
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());

  for line in stdin.lock().lines() {
    let line = line?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let input: Input = match serde_json::from_str(trimmed) {
      Ok(v) => v,
      Err(e) => {
        serde_json::to_writer(&mut out, &ErrorOutput::new(format!("json parse: {}", e)))?;
        writeln!(out)?;
        continue;
      }
    };

    match run(engine, &input, hour) {
      Ok(report) => serde_json::to_writer(&mut out, &report)?,
      Err(EngineError::Validation { field, reason }) => {
        serde_json::to_writer(&mut out, &ErrorOutput::new(reason).with_field(field))?
      }
      Err(e) => serde_json::to_writer(&mut out, &ErrorOutput::new(e.to_string()))?,
    }
    writeln!(out)?;
  }

  out.flush()?;
  Ok(())
}
