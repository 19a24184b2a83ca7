use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::banner::select_banner_for_page;
use crate::config::RefreshSummary;
use crate::error::AppError;
use crate::layout::page::HOME_PAGE;
use crate::layout::PageLayout;
use crate::logging::render_log::PageRenderLog;
use crate::model::context::{RenderContext, Theme};
use crate::AppState;

#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
    pub category: Option<String>,
    pub theme: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handle_home_page))
        .route("/api/banners/{page}", get(handle_banner_for_page))
        .route("/api/catalog/refresh", post(handle_catalog_refresh))
        .route("/healthz", get(handle_health))
        .with_state(state)
}

/// **渲染首页**
/// 目录快照未加载时显示 spinner，Banner 固定按 Home 页面挑选
pub async fn handle_home_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let catalog = state.config.catalog();
    let ctx = RenderContext::new(
        HOME_PAGE,
        query.category,
        Theme::from_param(query.theme.as_deref()),
        catalog.is_none(),
    );

    let (html, render_log) = {
        let layout = PageLayout::compose(&ctx, catalog.as_deref());
        (layout.render(), PageRenderLog::new(&ctx, &layout))
    };

    info!(
        request_id = %render_log.request_id,
        banner_decision = %render_log.banner_decision,
        "Rendered {} page, category={}, products={}",
        render_log.page,
        render_log.active_category,
        render_log.product_count
    );
    state.runtime_logger.log("INFO", &render_log.to_json()).await;

    Html(html)
}

/// **按页面返回应展示的 Banner**
/// 没有 Banner 时返回 204
pub async fn handle_banner_for_page(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
) -> Response {
    let catalog = state.config.catalog();
    let banners = catalog.as_deref().map(|c| c.banners()).unwrap_or_default();

    match select_banner_for_page(&page, banners) {
        Some(banner) => (StatusCode::OK, Json(banner.clone())).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// **手动触发目录刷新**
pub async fn handle_catalog_refresh(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshSummary>, AppError> {
    match state.config.refresh().await {
        Ok(summary) => {
            state
                .runtime_logger
                .log("INFO", &json!({ "catalog_refresh": "success", "summary": summary }).to_string())
                .await;
            Ok(Json(summary))
        }
        Err(e) => {
            state
                .runtime_logger
                .log("ERROR", &json!({ "catalog_refresh": "failed", "reason": e.to_string() }).to_string())
                .await;
            Err(e)
        }
    }
}

pub async fn handle_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "catalog_loaded": !state.config.is_loading(),
        "source": state.config.source_name(),
    }))
}
