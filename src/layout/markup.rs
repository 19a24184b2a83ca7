// src/layout/markup.rs

use leptos::prelude::{IntoView, Owner};
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use uuid::Uuid;

/// 放入 CSS `url("...")` 前需要编码的字符：引号、括号、反斜杠、空白和尖括号
const CSS_URL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'\\')
    .add(b'<')
    .add(b'>');

/// 运营配置的 CSS 值（高度、圆角等）只保留单个声明值
pub fn sanitize_css_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// 用作 DOM id / data 属性的片段
pub fn slug(raw: &str) -> String {
    let slug: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    slug.trim_matches('-').to_string()
}

/// 由任意标识生成 DOM id。slug 能无损表示原值时直接使用，
/// 否则追加原值的短哈希，保证 "Sale!" 与 "sale?" 不冲突、"!!!" 不为空
pub fn dom_id(prefix: &str, raw: &str) -> String {
    let slug = slug(raw);
    if !slug.is_empty() && slug == raw {
        return format!("{}-{}", prefix, slug);
    }
    let digest = Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes()).simple().to_string();
    let short = &digest[..8];
    if slug.is_empty() {
        format!("{}-{}", prefix, short)
    } else {
        format!("{}-{}-{}", prefix, slug, short)
    }
}

/// 图片地址写入 CSS 前做百分号编码，结果不含可闭合 `url()`、字符串或 `<style>` 的字符
pub fn css_url(raw: &str) -> String {
    utf8_percent_encode(raw.trim(), CSS_URL).to_string()
}

/// 在独立的 reactive owner 中把组件服务端渲染为 HTML 字符串
pub fn render_html<F, V>(view: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    Owner::new().with(|| view().to_html())
}

/// 全站共用的动画与布局样式，只构建一次
pub static BASE_STYLESHEET: Lazy<String> = Lazy::new(|| {
    let rules = [
        // 页面整体淡入 0.5s
        ".page-root { animation: page-fade-in 0.5s ease-in-out both; }",
        "@keyframes page-fade-in { from { opacity: 0; } to { opacity: 1; } }",
        // Banner 动画
        ".banner-wrap { margin-bottom: 2rem; padding: 0 2rem; margin-left: -2rem; margin-right: -2rem; }",
        ".banner { width: 100%; display: block; background-size: cover; background-position: center; background-repeat: no-repeat; }",
        ".banner-anim-none { animation: none; }",
        ".banner-anim-fade-in { animation: banner-fade-in 0.8s ease-in-out both; }",
        "@keyframes banner-fade-in { from { opacity: 0; } }",
        ".banner-anim-slide-in-top { animation: banner-slide-in-top 0.6s cubic-bezier(0.22, 1.2, 0.36, 1) both; }",
        "@keyframes banner-slide-in-top { from { opacity: 0; transform: translateY(-30px); } to { transform: translateY(0); } }",
        ".banner-anim-pulse { animation: banner-pulse 3s ease-in-out infinite; }",
        "@keyframes banner-pulse { 0%, 100% { transform: scale(1); } 50% { transform: scale(1.01); } }",
        // 商品网格错峰入场
        ".product-grid { display: grid; grid-template-columns: 1fr; gap: 1.5rem; margin-top: 2rem; }",
        "@media (min-width: 768px) { .product-grid { grid-template-columns: repeat(2, 1fr); } }",
        "@media (min-width: 1280px) { .product-grid { grid-template-columns: repeat(3, 1fr); gap: 2rem; } }",
        ".product-card { animation: card-enter 0.4s ease-out both; }",
        "@keyframes card-enter { from { opacity: 0; transform: translateY(30px) scale(0.98); } to { opacity: 1; transform: translateY(0) scale(1); } }",
        // 加载中
        ".spinner-box { display: flex; justify-content: center; align-items: center; height: 16rem; }",
        ".spinner { width: 4rem; height: 4rem; border-radius: 9999px; border-top: 2px solid #8b5cf6; border-bottom: 2px solid #8b5cf6; animation: spin 1s linear infinite; }",
        "@keyframes spin { to { transform: rotate(360deg); } }",
        ".category-filters a[aria-current=\"page\"] { font-weight: 700; }",
        "body.theme-dark { background: #111827; color: #f9fafb; }",
    ];
    rules.join("\n")
});
