use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use snapscan_config::CaptureConfig;
use snapscan_engine::{Command, WorkflowRunner};
use snapscan_host::PermissionStatus;
use snapscan_host_camera::FileCamera;
use snapscan_host_location::{Coordinates, FixedLocator};
use snapscan_host_storage::{FsGallery, FsStorage};
use snapscan_workflow::{Capabilities, CaptureWorkflow, ChannelNotifier, WorkflowEvent};

/// Snapscan - Product photo, barcode and location capture
#[derive(Parser)]
#[command(name = "snapscan")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory (default: ~/.snapscan)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Path to a JSON capture configuration
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a capture workflow, reading commands from stdin
  Run(RunArgs),

  /// Print the effective configuration
  Config,
}

#[derive(Args)]
struct RunArgs {
  /// Image files the camera serves, in order
  #[arg(long = "frame", required = true)]
  frames: Vec<PathBuf>,

  /// Latitude reported by the locator
  #[arg(long, requires = "longitude", allow_negative_numbers = true)]
  latitude: Option<f64>,

  /// Longitude reported by the locator
  #[arg(long, requires = "latitude", allow_negative_numbers = true)]
  longitude: Option<f64>,

  /// Deny camera permission
  #[arg(long)]
  deny_camera: bool,

  /// Deny location permission
  #[arg(long)]
  deny_location: bool,

  /// Do not copy kept photos into the gallery
  #[arg(long)]
  no_gallery: bool,

  /// Print workflow events to stderr as JSON lines
  #[arg(long)]
  events: bool,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .with_target(true)
    .with_level(true)
    .init();

  let cli = Cli::parse();

  let data_dir = match cli.data_dir {
    Some(dir) => dir,
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".snapscan"),
  };

  let config = load_config(cli.config.as_deref(), &data_dir)?;

  match cli.command {
    Some(Commands::Run(args)) => {
      let rt = tokio::runtime::Runtime::new()?;
      let result = rt.block_on(async { run_workflow(args, config, data_dir).await });
      // A pending stdin read would otherwise hold the runtime open
      rt.shutdown_background();
      result?;
    }
    Some(Commands::Config) => {
      println!("{}", serde_json::to_string_pretty(&config)?);
    }
    None => {
      println!("snapscan - use --help to see available commands");
    }
  }

  Ok(())
}

fn load_config(path: Option<&Path>, data_dir: &Path) -> Result<CaptureConfig> {
  let mut config = match path {
    Some(path) => {
      let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
      serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?
    }
    None => CaptureConfig::default(),
  };
  config.resolve_documents_dir(data_dir);
  Ok(config)
}

async fn run_workflow(args: RunArgs, mut config: CaptureConfig, data_dir: PathBuf) -> Result<()> {
  if args.no_gallery {
    config.save_to_gallery = false;
  }

  let camera = FileCamera::new(args.frames, data_dir.join("cache"))
    .with_permission(PermissionStatus::from(!args.deny_camera));

  let position = args
    .latitude
    .zip(args.longitude)
    .map(|(latitude, longitude)| Coordinates::new(latitude, longitude));
  let locator =
    FixedLocator::new(position).with_permission(PermissionStatus::from(!args.deny_location));

  let capabilities = Capabilities::new(camera, locator, FsStorage::new())
    .with_gallery(FsGallery::new(data_dir.join("gallery")));

  let (event_tx, mut event_rx) = mpsc::unbounded_channel::<WorkflowEvent>();
  let print_events = args.events;
  let events = tokio::spawn(async move {
    while let Some(event) = event_rx.recv().await {
      if print_events {
        match serde_json::to_string(&event) {
          Ok(line) => eprintln!("{}", line),
          Err(e) => warn!(error = %e, "failed to serialize event"),
        }
      }
    }
  });

  let workflow = CaptureWorkflow::with_notifier(config, capabilities, ChannelNotifier::new(event_tx));
  let runner = WorkflowRunner::new(workflow);
  let sender = runner.sender();

  let cancel = CancellationToken::new();
  let ctrl_c_cancel = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      ctrl_c_cancel.cancel();
    }
  });

  // The stdin task owns the last external sender; EOF closes the channel
  tokio::spawn(async move {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
      let line = match lines.next_line().await {
        Ok(Some(line)) => line,
        Ok(None) => break,
        Err(e) => {
          warn!(error = %e, "failed to read command from stdin");
          break;
        }
      };

      let line = line.trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }

      match line.parse::<Command>() {
        Ok(command) => {
          if sender.send(command).await.is_err() {
            break;
          }
        }
        Err(e) => eprintln!("Ignoring '{}': {}", line, e),
      }
    }
  });

  let state = runner.start(cancel).await;
  events.await.context("event printer task failed")?;

  info!(display = ?state.display(), "workflow finished");
  eprintln!("Workflow finished: {:?}", state.display());

  println!("{}", serde_json::to_string_pretty(&state)?);

  Ok(())
}
