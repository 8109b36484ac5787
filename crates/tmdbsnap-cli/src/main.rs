//! tmdbsnap - capture TMDB movie and TV metadata as local JSON snapshots.

/// Application configuration (TOML).
mod config;
/// Capture outcome reporting.
mod report;
/// Interactive prompt loop.
mod session;

use std::num::NonZeroU64;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tmdbsnap_api::tmdb::TmdbClient;
use tmdbsnap_snapshot::{MediaKind, MediaReference, SnapshotOrchestrator};
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_KEY_ENV, AppConfig, resolve_config_path};
use crate::report::report_outcome;
use crate::session::Session;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Config file (default: ~/.config/tmdbsnap/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot root directory, overriding `output_dir` from the config.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Subcommand to run (default: interactive).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Prompt for titles to capture until quit.
    Interactive,
    /// Capture a single title and exit.
    Capture(CaptureArgs),
}

/// Arguments for the `capture` subcommand.
#[derive(clap::Args)]
struct CaptureArgs {
    /// Media kind: `movie` or `tv`.
    kind: MediaKind,

    /// TMDB ID (positive integer).
    id: NonZeroU64,
}

/// Installs the global tracing subscriber.
fn init_tracing() {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Loads the config and builds the orchestrator for it.
///
/// # Errors
///
/// Returns an error if the config file is missing or invalid, or the TMDB
/// client cannot be built from it.
fn build_orchestrator(cli: &Cli) -> Result<SnapshotOrchestrator<TmdbClient>> {
    let config_path = resolve_config_path(cli.config.as_ref())?;
    let mut config = AppConfig::load(&config_path)?;
    config.apply_api_key_override(std::env::var(API_KEY_ENV).ok());

    let client = config
        .tmdb_client()
        .with_context(|| format!("invalid TMDB settings in {}", config_path.display()))?;
    let root = config.output_root(cli.output_dir.as_deref());
    tracing::debug!(root = %root.display(), "Snapshot root resolved");

    Ok(SnapshotOrchestrator::new(client, root))
}

/// Runs the `capture` subcommand.
///
/// # Errors
///
/// Returns an error if the capture fails.
#[instrument(skip_all)]
async fn run_capture(
    orchestrator: &SnapshotOrchestrator<TmdbClient>,
    args: &CaptureArgs,
) -> Result<()> {
    let reference = MediaReference::new(args.kind, args.id);
    let outcome = orchestrator
        .capture(&reference)
        .await
        .with_context(|| format!("capture of {reference} failed"))?;
    report_outcome(&outcome);
    Ok(())
}

/// Runs the interactive prompt loop on stdin/stdout.
///
/// Ctrl-C ends the process with exit code 0.
///
/// # Errors
///
/// Returns an error if stdin or stdout fail.
#[instrument(skip_all)]
async fn run_interactive(orchestrator: &SnapshotOrchestrator<TmdbClient>) -> Result<()> {
    let mut session = Session::new(
        orchestrator,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );

    tokio::select! {
        result = session.run() => result,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            tracing::info!("Interrupted, exiting");
            let _ = tokio::io::stdout().flush().await;
            // The runtime would otherwise wait on the blocking stdin read.
            #[allow(clippy::exit)]
            std::process::exit(0);
        }
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a capture fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let orchestrator = build_orchestrator(&cli)?;
    match &cli.command {
        None | Some(Commands::Interactive) => run_interactive(&orchestrator).await,
        Some(Commands::Capture(args)) => run_capture(&orchestrator, args).await,
    }
}
