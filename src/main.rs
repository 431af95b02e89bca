#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use emberwatch::channels;
use emberwatch::config::Config;
use emberwatch::detector::{Detector, ReplaySource};
use emberwatch::gateway;

#[derive(Parser)]
#[command(
    name = "emberwatch",
    version,
    about = "Temporal fire/smoke confirmation and multi-channel emergency alerting"
)]
struct Cli {
    /// Path to config.toml
    #[arg(long, global = true, default_value = "emberwatch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the detector loop against the configured frame source
    Detect {
        /// Replay per-frame detections from a JSONL file instead of the
        /// source named in config
        #[arg(long)]
        replay: Option<PathBuf>,
    },
    /// Run the alert dispatcher gateway
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,
        /// Override the configured bind port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Notification channel utilities
    Channels {
        #[command(subcommand)]
        command: ChannelCommands,
    },
}

#[derive(Subcommand)]
enum ChannelCommands {
    /// Validate channel configuration without sending anything
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Command::Detect { replay } => {
            let path = replay.unwrap_or_else(|| PathBuf::from(&config.detector.source));
            // Failing to open the source is the one fatal error class.
            let source = ReplaySource::open(&path).map_err(emberwatch::WatchError::from)?;
            tracing::info!(
                source = %path.display(),
                model = %config.detector.model_path,
                threshold = config.detector.frame_threshold,
                "starting detection loop"
            );
            let report = Detector::from_config(&config.detector, source)?
                .run()
                .await?;
            println!(
                "Detection stopped: {} frames, {} confirmations, {} failed submissions.",
                report.frames, report.confirmations, report.submit_failures
            );
            Ok(())
        }
        Command::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            gateway::run_gateway(config).await
        }
        Command::Channels { command } => match command {
            ChannelCommands::Doctor => {
                channels::doctor_channels(&config.channels);
                Ok(())
            }
        },
    }
}
