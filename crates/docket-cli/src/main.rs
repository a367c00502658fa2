//! `docket` — line-oriented shell for the Docket document staging screen.
//!
//! # Usage
//!
//! ```text
//! docket
//! docket --layout split-view --save-delay-ms 0
//! docket --config ~/.config/docket/docket.toml
//! ```
//!
//! Type `help` at the prompt for the list of commands.

mod app;
mod command;
mod ui;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use docket_core::admission::{AdmissionPolicy, DEFAULT_MAX_BYTES};
use docket_store_memory::MemoryBackend;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use ui::LayoutKind;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "docket", version, about = "Stage and commit subject documents")]
struct Args {
  /// Path to a TOML config file (layout, save_delay_ms, max_upload_bytes).
  #[arg(short, long, value_name = "FILE", default_value = "docket.toml")]
  config: PathBuf,

  /// Screen layout; overrides the config file.
  #[arg(long, value_enum)]
  layout: Option<LayoutKind>,

  /// Simulated save latency in milliseconds; overrides the config file.
  #[arg(long, value_name = "MS")]
  save_delay_ms: Option<u64>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Settings read from the config file and `DOCKET_*` environment variables.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Settings {
  layout:           LayoutKind,
  save_delay_ms:    u64,
  max_upload_bytes: u64,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      layout:           LayoutKind::CardList,
      save_delay_ms:    1500,
      max_upload_bytes: DEFAULT_MAX_BYTES,
    }
  }
}

fn load_settings(args: &Args) -> Result<Settings> {
  let settings = config::Config::builder()
    .add_source(config::File::from(args.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("DOCKET").try_parsing(true))
    .build()
    .with_context(|| format!("reading config file {}", args.config.display()))?;

  settings
    .try_deserialize()
    .context("failed to deserialise settings")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let settings = load_settings(&args)?;

  // CLI flags override config file, which overrides defaults.
  let layout = args.layout.unwrap_or(settings.layout);
  let delay = Duration::from_millis(args.save_delay_ms.unwrap_or(settings.save_delay_ms));
  let policy = AdmissionPolicy::default().with_max_bytes(settings.max_upload_bytes);

  let backend = MemoryBackend::demo().with_delay(delay);
  let mut app = App::new(backend, policy, layout);
  app.load_subjects().await?;

  tracing::debug!(?layout, ?delay, "starting shell");
  run_loop(&mut app).await
}

// ─── Input loop ───────────────────────────────────────────────────────────────

async fn run_loop(app: &mut App) -> Result<()> {
  let mut stdout = tokio::io::stdout();
  let mut lines = BufReader::new(tokio::io::stdin()).lines();

  stdout.write_all(app.render().as_bytes()).await?;
  loop {
    stdout.write_all(b"docket> ").await?;
    stdout.flush().await?;

    let Some(line) = lines.next_line().await.context("reading stdin")? else {
      break;
    };

    let command = match command::parse(&line) {
      Ok(Some(command)) => command,
      Ok(None) => continue,
      Err(e) => {
        stdout.write_all(format!("{e}\n").as_bytes()).await?;
        continue;
      }
    };

    let output = app.handle(command).await?;
    stdout.write_all(output.as_bytes()).await?;
    if app.should_quit {
      break;
    }
  }

  stdout.flush().await?;
  Ok(())
}
