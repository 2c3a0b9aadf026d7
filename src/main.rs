use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use clap::Parser;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod shared;
mod domain;
mod ports;
mod infrastructure;
mod services;
mod presentation;

use shared::config::{Config, LogFormat, LoggingConfig};
use shared::error::FolioError;
use shared::result::Result;
use infrastructure::cache::MokaCache;
use infrastructure::github::GitHubClient;
use presentation::routes::AppContext;
use services::catalog::ProjectCatalog;


#[derive(Parser, Debug)]
#[clap(name = "Folio")]
#[clap(version)]
#[clap(about = "Personal portfolio site backed by GitHub repositories")]
pub struct Args {
    /// Configuration file (TOML)
    #[clap(short, long, value_parser, default_value = "config.toml")]
    config: PathBuf,

    /// Server bind address
    #[clap(short, long)]
    bind_address: Option<SocketAddr>,

    /// GitHub account whose repositories are listed
    #[clap(short, long)]
    username: Option<String>,
}

/// 初始化日志，RUST_LOG 优先于配置文件
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    match logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init(),
    }
}


#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置
    let config = Config::from_args_and_file(&args.config, args.bind_address, args.username.clone())?;
    let config = Arc::new(config);

    // 初始化日志
    init_logging(&config.logging);

    info!("Starting Folio server...");
    if !args.config.exists() {
        warn!("Config file {} not found, using defaults", args.config.display());
    }
    info!("Configuration loaded: {:?}", config);

    let cache = Arc::new(MokaCache::new(
        config.cache.max_capacity,
        Duration::from_secs(config.cache.ttl_secs),
    ));
    let github = Arc::new(GitHubClient::new(&config.github)?);
    let catalog = Arc::new(ProjectCatalog::new(github, cache));

    let app_context = Arc::new(AppContext {
        catalog,
        config: config.clone(),
    });

    let serve_dir_service = ServeDir::new("statics");

    // 创建应用路由
    let app = presentation::routes::create_app_router(app_context)
        .nest_service("/statics", serve_dir_service)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(FolioError::Io)?;

    info!("Server listening on {}", config.server.bind_address);
    info!("Web UI available at: http://{}/", config.server.bind_address);
    info!("API available at: http://{}/api/", config.server.bind_address);

    axum::serve(listener, app)
        .await
        .map_err(|e| FolioError::Internal(e.to_string()))?;

    Ok(())
}
