// src/layout/chrome.rs

use leptos::prelude::*;
use url::form_urlencoded;

use crate::model::catalog::{Category, ALL_CATEGORY};
use crate::model::context::Theme;

pub const STORE_TITLE: &str = "Storefront";

/// 生成保留当前状态的首页查询链接
pub fn page_href(category: &str, theme: Theme) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("category", category)
        .append_pair("theme", theme.as_str())
        .finish();
    format!("/?{}", query)
}

/// 页头：店铺标题 + 主题切换
#[component]
pub fn PageHeader(active_category: String, theme: Theme) -> impl IntoView {
    let next = theme.toggled();
    let href = page_href(&active_category, next);
    let label = format!("Switch to {} theme", next.as_str());
    view! {
        <header class="page-header">
            <h1>{STORE_TITLE}</h1>
            <a class="theme-toggle" href=href aria-label=label>{next.as_str()}</a>
        </header>
    }
}

/// 分类筛选：All + 数据源下发的分类，当前分类带 aria-current
#[component]
pub fn CategoryFilters(categories: Vec<Category>, active_category: String, theme: Theme) -> impl IntoView {
    let has_all = categories.iter().any(|c| c.label == ALL_CATEGORY);
    let all = Category {
        label: ALL_CATEGORY.to_string(),
        icon: None,
    };
    let entries: Vec<Category> = (!has_all).then_some(all).into_iter().chain(categories).collect();

    view! {
        <nav class="category-filters">
            {entries
                .into_iter()
                .map(|category| {
                    let current = (category.label == active_category).then_some("page");
                    let href = page_href(&category.label, theme);
                    view! {
                        <a class="category-filter" href=href aria-current=current>
                            {category.icon.map(|icon| view! { <span class="category-icon">{icon}</span> })}
                            {category.label}
                        </a>
                    }
                })
                .collect_view()}
        </nav>
    }
}
