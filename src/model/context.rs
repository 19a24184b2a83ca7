// src/model/context.rs

use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use crate::model::catalog::ALL_CATEGORY;

fn default_instant() -> Instant {
    Instant::now()
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// 查询参数里的主题，无法识别时使用浅色
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// 单次页面渲染的上下文
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RenderContext {
    pub request_id: String,
    /// 当前页面标识，用于挑选 Banner
    pub page: String,
    /// 当前选中的商品分类
    pub active_category: String,
    pub theme: Theme,
    /// 目录快照尚未加载时为 true
    pub loading: bool,
    /// 请求开始时间，用于计算总耗时（不参与序列化）
    #[serde(skip, default = "default_instant")]
    pub start_time: Instant,
}

impl RenderContext {
    pub fn new(page: &str, active_category: Option<String>, theme: Theme, loading: bool) -> Self {
        let active_category = active_category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| ALL_CATEGORY.to_string());
        Self {
            request_id: Uuid::new_v4().to_string(),
            page: page.to_string(),
            active_category,
            theme,
            loading,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}
