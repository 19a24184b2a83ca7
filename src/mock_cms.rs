use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{serve, Json, Router};
use rand::Rng;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};
use tracing::info;

use crate::error::Result;
use crate::model::catalog::Catalog;

/// 模拟 CMS 接口延迟（50 ~ 200 毫秒）
async fn simulate_latency() {
    let delay_ms = rand::thread_rng().gen_range(50..200);
    sleep(Duration::from_millis(delay_ms)).await;
}

/// banners 未配置时返回 404，与真实 CMS 行为一致
async fn handle_banners(State(catalog): State<Arc<Catalog>>) -> Response {
    simulate_latency().await;
    match &catalog.banners {
        Some(banners) => Json(banners.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn handle_categories(State(catalog): State<Arc<Catalog>>) -> Response {
    simulate_latency().await;
    Json(catalog.categories.clone()).into_response()
}

async fn handle_products(State(catalog): State<Arc<Catalog>>) -> Response {
    simulate_latency().await;
    info!("Mock CMS serving {} products", catalog.products.len());
    Json(catalog.products.clone()).into_response()
}

pub fn mock_cms_router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/feed/banners", get(handle_banners))
        .route("/feed/categories", get(handle_categories))
        .route("/feed/products", get(handle_products))
        .with_state(catalog)
}

/// 启动 Mock CMS 服务
/// 服务监听指定端口，数据源 URL 配置为 http://127.0.0.1:{port}/feed
pub async fn start_mock_cms_server(port: u16, catalog: Catalog) -> Result<()> {
    let app = mock_cms_router(Arc::new(catalog));

    let addr = format!("0.0.0.0:{}", port);
    info!("Mock CMS running at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    serve(listener, app).await?;
    Ok(())
}
