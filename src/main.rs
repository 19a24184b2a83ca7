// src/main.rs

use axum::serve;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::time::{self, Duration};
use tracing::{error, info, warn};
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

mod api;
mod banner;
mod config;
mod error;
mod layout;
mod logging;
mod mock_cms;
mod model;

use config::ConfigManager;
use error::{AppError, Result};
use logging::runtime_logger::RuntimeLogger;
use model::adapters::{CatalogSource, FileCatalogSource, HttpCatalogSource};

#[derive(Clone)]
pub struct AppState {
    pub runtime_logger: Arc<RuntimeLogger>,
    pub config: Arc<ConfigManager>,
}

#[derive(Parser, Debug)]
#[command(author = "whiteCcinn", version = "1.0", about = "A server-rendered catalog storefront")]
struct CliArgs {
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
    #[arg(long, default_value = "logs")]
    log_dir: String,
    /// 本地目录文件（未配置 feed_url 时使用）
    #[arg(long, default_value = "static/catalog.json")]
    catalog_file: String,
    /// CMS 数据源地址，例如 http://127.0.0.1:9001/feed
    #[arg(long)]
    feed_url: Option<String>,
    #[arg(long, default_value_t = 1500)]
    feed_timeout_ms: u64,
    /// 目录刷新间隔（秒），0 表示只在启动时加载
    #[arg(long, default_value_t = 60)]
    refresh_secs: u64,
    /// 启动 Mock CMS（使用 catalog_file 的内容）
    #[arg(long)]
    mock_cms_port: Option<u16>,
    #[arg(long, default_value_t = 72)]
    log_retention_hours: u64,
}

fn catalog_source(args: &CliArgs) -> Result<Arc<dyn CatalogSource>> {
    match args.feed_url.as_deref() {
        Some(url) if url.trim().is_empty() => Err(AppError::config("--feed-url must not be empty")),
        Some(url) => Ok(Arc::new(HttpCatalogSource::new(url, args.feed_timeout_ms))),
        None => Ok(Arc::new(FileCatalogSource::new(&args.catalog_file))),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // 初始化全局 tracing 日志
    let log_file = rolling::hourly(&args.log_dir, "storefront.json");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().with_writer(non_blocking));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::config(format!("unable to set global tracing subscriber: {}", e)))?;
    info!("Storefront starting on port {}", args.port);

    // 初始化运行日志记录器（用于记录服务运行状态、渲染日志、错误等）
    let runtime_logger = RuntimeLogger::new(&args.log_dir, "runtime", 1000, 100, 1000, args.log_retention_hours);
    runtime_logger.log("INFO", "Storefront is starting...").await;

    // Mock CMS 直接读取本地目录文件对外提供 feed 接口
    if let Some(port) = args.mock_cms_port {
        let catalog = FileCatalogSource::new(&args.catalog_file).load().await?;
        tokio::spawn(async move {
            if let Err(e) = mock_cms::start_mock_cms_server(port, catalog).await {
                error!("Mock CMS stopped: {}", e);
            }
        });
    }

    let config = Arc::new(ConfigManager::new(catalog_source(&args)?));

    // 首次加载失败不退出，页面显示加载中，等待后台刷新
    if let Err(e) = config.refresh().await {
        runtime_logger
            .log("ERROR", &format!("Initial catalog load from {} failed: {}", config.source_name(), e))
            .await;
    }

    if args.refresh_secs > 0 {
        let config = config.clone();
        let runtime_logger = runtime_logger.clone();
        let period = Duration::from_secs(args.refresh_secs);
        tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(e) = config.refresh().await {
                    runtime_logger.log("WARN", &format!("Catalog refresh failed: {}", e)).await;
                }
            }
        });
    } else if config.is_loading() {
        warn!("Catalog not loaded and periodic refresh is disabled");
    }

    let state = Arc::new(AppState {
        runtime_logger: runtime_logger.clone(),
        config: config.clone(),
    });

    let app = api::handlers::router(state);
    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;
    runtime_logger.log("INFO", &format!("Storefront running at http://{}", addr)).await;

    serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    runtime_logger.log("INFO", "Storefront shut down.").await;
    runtime_logger.shutdown().await;
    Ok(())
}
