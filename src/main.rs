use clap::Parser;
use kinship_api::{ApiState, RestApi};
use kinship_core::Gallery;
use kinship_similarity::Settings;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Artwork kinship and similarity server
#[derive(Parser, Debug)]
#[command(name = "kinship")]
#[command(about = "Artwork similarity and kinship server", long_about = None)]
struct Args {
    /// HTTP API port
    #[arg(long, default_value_t = 6333)]
    http_port: u16,

    /// JSON file with weight, threshold and tier settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON array of artworks to load into the gallery at startup
    #[arg(short, long)]
    artworks: Option<PathBuf>,

    /// Log level; `RUST_LOG` directives take precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting kinship v{}", env!("CARGO_PKG_VERSION"));

    let settings = match &args.config {
        Some(path) => {
            info!("Loading settings from {:?}", path);
            Settings::from_file(path)?
        }
        None => Settings::default(),
    };
    info!(
        "Kinship threshold {}, tiers {}/{}/{}",
        settings.kinship.min_score,
        settings.ranking.high_cutoff,
        settings.ranking.moderate_cutoff,
        settings.ranking.distant_cutoff
    );

    let gallery = match &args.artworks {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let gallery = Gallery::from_json(&raw)?;
            info!("Loaded {} artworks from {:?}", gallery.len(), path);
            gallery
        }
        None => Gallery::new(),
    };

    let state = Arc::new(ApiState::new(Arc::new(gallery), settings)?);

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
