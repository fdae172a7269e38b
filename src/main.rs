//! muser main entry point
//!
//! This binary handles CLI parsing, logging setup, and starts either the
//! HTTP service in the foreground or a detached copy of it.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use muser::{
    config::Config,
    control::{index_document, AppState, ControlHandler, HttpServer},
    launcher,
    player::PlayerBackend,
    APP_NAME, VERSION,
};

/// Now-playing companion serving playerctl state over local HTTP
#[derive(Parser, Debug)]
#[command(name = APP_NAME, version = VERSION, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service in the foreground
    Serve {
        /// Open the UI in the default browser once the server is up
        #[arg(long)]
        open: bool,
    },

    /// Start the service detached from this terminal and open the UI
    Launch {
        /// Only start the service; do not open a browser
        #[arg(long)]
        no_open: bool,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute command
    if let Err(e) = run(cli).await {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize structured logging with tracing
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load the config file if one was given, else defaults
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => {
            info!("Loading config: {:?}", path);
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Run the CLI command
async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { open } => {
            info!("Starting {} v{}", APP_NAME, VERSION);
            let mut config = load_config(cli.config.as_deref())?;
            config.ui.open_browser |= open;
            serve(config).await
        }
        Commands::Launch { no_open } => {
            let config = load_config(cli.config.as_deref())?;
            let launched = launcher::launch_self(
                cli.config.as_deref(),
                cli.verbose,
                !no_open,
                &config.launcher.log_file,
            )?;
            println!(
                "{} launched (pid {}). Logs: {}",
                APP_NAME,
                launched.pid,
                launched.log_file.display()
            );
            Ok(())
        }
        Commands::Version => {
            println!("{} v{}", APP_NAME, VERSION);
            Ok(())
        }
    }
}

/// Serve the API and UI until a shutdown signal arrives
async fn serve(config: Config) -> anyhow::Result<()> {
    let backend = match PlayerBackend::from_config(&config.player) {
        Ok(backend) => Some(backend),
        Err(e) => {
            error!("Error initializing player: {}", e);
            warn!("Serving fixed no-player answers");
            None
        }
    };

    let index_html = index_document(&config.ui)?;
    let state = AppState::new(ControlHandler::new(backend), index_html);

    // Bound before the URL is handed out, so the page never races the server
    let server = HttpServer::bind(&config.server).await?;
    let url = server.url();
    let server_task = server.spawn(state);

    info!("UI available at {}", url);
    println!("{}", url);

    if config.ui.open_browser {
        launcher::open_in_browser(&url);
    }

    tokio::select! {
        result = server_task => {
            result??;
        }
        _ = shutdown_signal() => {}
    }

    info!("Shutting down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
