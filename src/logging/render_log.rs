use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::layout::{ContentState, PageLayout};
use crate::model::context::RenderContext;

/// **页面渲染日志**
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PageRenderLog {
    pub timestamp: String,         // 记录时间
    pub log_type: String,          // 日志类型，固定为 "page_render"
    pub request_id: String,        // 本次渲染的请求 ID
    pub page: String,              // 用于挑选 Banner 的页面标识
    pub active_category: String,
    pub banner_id: Option<String>, // 最终展示的 Banner
    pub banner_decision: String,   // 挑选结果，如 "page_specific" / "default_excluded"
    pub product_count: usize,
    pub loading: bool,
    pub elapsed_ms: u64,
}

impl PageRenderLog {
    /// **根据渲染上下文和布局生成日志**
    pub fn new(ctx: &RenderContext, layout: &PageLayout<'_>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            log_type: "page_render".to_string(),
            request_id: ctx.request_id.clone(),
            page: ctx.page.clone(),
            active_category: ctx.active_category.clone(),
            banner_id: layout.banner_id.clone(),
            banner_decision: layout.decision.to_string(),
            product_count: layout.product_count(),
            loading: matches!(layout.content, ContentState::Loading),
            elapsed_ms: ctx.elapsed_ms(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!(r#"{{"log_type":"page_render","error":"{}"}}"#, e))
    }
}
