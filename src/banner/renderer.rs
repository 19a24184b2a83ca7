// src/banner/renderer.rs

use leptos::prelude::*;
use url::Url;

use crate::layout::markup::{css_url, dom_id, render_html, sanitize_css_value};
use crate::model::banner::{AnimationType, BannerRecord};

const TABLET_MIN_WIDTH: u32 = 768;
const DESKTOP_MIN_WIDTH: u32 = 1024;

/// 链接打开方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// 绝对地址（带 scheme）在新窗口打开
    NewContext,
    SameContext,
}

impl LinkTarget {
    pub fn for_href(href: &str) -> Self {
        // 相对地址解析会失败（RelativeUrlWithoutBase）
        match Url::parse(href) {
            Ok(_) => LinkTarget::NewContext,
            Err(_) => LinkTarget::SameContext,
        }
    }

    pub fn as_attr(&self) -> &'static str {
        match self {
            LinkTarget::NewContext => "_blank",
            LinkTarget::SameContext => "_self",
        }
    }
}

/// Banner 容器的展示参数（已填充默认值）
#[derive(Debug, Clone, PartialEq)]
pub struct BannerFrame {
    pub dom_id: String,
    /// 已百分号编码，可直接放入 `url("...")`
    pub background_url: String,
    pub height_mobile: String,
    pub height_tablet: String,
    pub height_desktop: String,
    pub border_radius: String,
    pub opacity: f64,
    pub animation: AnimationType,
}

fn css_or(value: Option<&String>, fallback: &str) -> String {
    value
        .map(|v| sanitize_css_value(v))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

impl BannerFrame {
    pub fn from_banner(banner: &BannerRecord) -> Self {
        Self {
            dom_id: dom_id("banner", &banner.id.to_string()),
            background_url: css_url(&banner.image_url),
            height_mobile: css_or(banner.height_mobile.as_ref(), "auto"),
            height_tablet: css_or(banner.height_tablet.as_ref(), "auto"),
            height_desktop: css_or(banner.height_desktop.as_ref(), "auto"),
            border_radius: css_or(banner.border_radius.as_ref(), "0px"),
            opacity: banner.opacity.filter(|o| o.is_finite()).unwrap_or(1.0).clamp(0.0, 1.0),
            animation: banner.animation_type,
        }
    }

    /// 按断点输出高度的 scoped 样式，背景图也放在这里而不是行内 style
    pub fn scoped_styles(&self) -> String {
        format!(
            "#{id} {{ height: {m}; background-image: url(\"{img}\"); }} @media (min-width: {tw}px) {{ #{id} {{ height: {t}; }} }} @media (min-width: {dw}px) {{ #{id} {{ height: {d}; }} }}",
            id = self.dom_id,
            m = self.height_mobile,
            img = self.background_url,
            t = self.height_tablet,
            d = self.height_desktop,
            tw = TABLET_MIN_WIDTH,
            dw = DESKTOP_MIN_WIDTH,
        )
    }
}

#[component]
fn BannerImage(frame: BannerFrame) -> impl IntoView {
    let css = frame.scoped_styles();
    let class = format!("banner banner-anim-{}", frame.animation.as_str());
    let style = format!("border-radius: {}; opacity: {}", frame.border_radius, frame.opacity);
    let id = frame.dom_id;
    view! {
        <style inner_html=css></style>
        <div id=id class=class style=style></div>
    }
}

/// Banner 区块；没有选中 Banner 时不输出任何内容
#[component]
pub fn BannerSection(banner: BannerView) -> impl IntoView {
    match banner {
        BannerView::Hidden => ().into_any(),
        BannerView::Bare(frame) => view! {
            <div class="banner-wrap">
                <BannerImage frame=frame />
            </div>
        }
        .into_any(),
        BannerView::Linked { href, target, frame } => view! {
            <div class="banner-wrap">
                <a href=href target=target.as_attr() rel="noopener noreferrer">
                    <BannerImage frame=frame />
                </a>
            </div>
        }
        .into_any(),
    }
}

/// Banner 的三种渲染形态
#[derive(Debug, Clone, PartialEq)]
pub enum BannerView {
    Hidden,
    Bare(BannerFrame),
    Linked {
        href: String,
        target: LinkTarget,
        frame: BannerFrame,
    },
}

impl BannerView {
    pub fn from_banner(banner: Option<&BannerRecord>) -> Self {
        let Some(banner) = banner else {
            return BannerView::Hidden;
        };
        let frame = BannerFrame::from_banner(banner);
        match banner.redirect_url.as_deref().map(str::trim) {
            Some(href) if !href.is_empty() => BannerView::Linked {
                href: href.to_string(),
                target: LinkTarget::for_href(href),
                frame,
            },
            _ => BannerView::Bare(frame),
        }
    }

    pub fn render(&self) -> String {
        if *self == BannerView::Hidden {
            return String::new();
        }
        let banner = self.clone();
        render_html(move || view! { <BannerSection banner=banner /> })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner() -> BannerRecord {
        let mut b = BannerRecord::new(42, "/img/sale.png");
        b.is_active = true;
        b
    }

    #[test]
    fn absent_banner_renders_nothing() {
        let view = BannerView::from_banner(None);
        assert_eq!(view, BannerView::Hidden);
        assert_eq!(view.render(), "");
    }

    #[test]
    fn defaults_fill_missing_presentation_fields() {
        let frame = BannerFrame::from_banner(&banner());
        assert_eq!(frame.dom_id, "banner-42");
        assert_eq!(frame.height_mobile, "auto");
        assert_eq!(frame.height_tablet, "auto");
        assert_eq!(frame.height_desktop, "auto");
        assert_eq!(frame.border_radius, "0px");
        assert_eq!(frame.opacity, 1.0);
        assert_eq!(frame.animation, AnimationType::FadeIn);
    }

    #[test]
    fn heights_are_scoped_per_breakpoint() {
        let mut b = banner();
        b.height_mobile = Some("120px".to_string());
        b.height_desktop = Some("320px".to_string());
        let css = BannerFrame::from_banner(&b).scoped_styles();
        assert!(css.contains("#banner-42 { height: 120px; background-image: url(\"/img/sale.png\"); }"));
        assert!(css.contains("@media (min-width: 768px) { #banner-42 { height: auto; } }"));
        assert!(css.contains("@media (min-width: 1024px) { #banner-42 { height: 320px; } }"));
    }

    #[test]
    fn opacity_is_clamped() {
        let mut b = banner();
        b.opacity = Some(3.5);
        assert_eq!(BannerFrame::from_banner(&b).opacity, 1.0);
        b.opacity = Some(0.4);
        assert_eq!(BannerFrame::from_banner(&b).opacity, 0.4);
    }

    #[test]
    fn empty_redirect_renders_bare_banner() {
        let mut b = banner();
        b.redirect_url = Some(String::new());
        let view = BannerView::from_banner(Some(&b));
        assert!(matches!(view, BannerView::Bare(_)));
        assert!(!view.render().contains("<a "));
    }

    #[test]
    fn absolute_links_open_in_new_context() {
        let mut b = banner();
        b.redirect_url = Some("https://shop.example.com/sale".to_string());
        let html = BannerView::from_banner(Some(&b)).render();
        assert!(html.contains(r#"href="https://shop.example.com/sale" target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn relative_links_stay_in_same_context() {
        let mut b = banner();
        b.redirect_url = Some("/collections/summer".to_string());
        match BannerView::from_banner(Some(&b)) {
            BannerView::Linked { target, .. } => assert_eq!(target, LinkTarget::SameContext),
            other => panic!("expected linked banner, got {:?}", other),
        }
    }

    #[test]
    fn animation_class_follows_type() {
        let mut b = banner();
        b.animation_type = AnimationType::Pulse;
        assert!(BannerView::from_banner(Some(&b)).render().contains("banner-anim-pulse"));
        b.animation_type = AnimationType::None;
        assert!(BannerView::from_banner(Some(&b)).render().contains("banner-anim-none"));
    }

    #[test]
    fn image_url_is_escaped() {
        let mut b = banner();
        b.image_url = r#"/img/a.png"><script>"#.to_string();
        let html = BannerView::from_banner(Some(&b)).render();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn image_url_cannot_inject_css() {
        let mut b = banner();
        b.image_url = r#"/img/a.png'); } body { display: none; } .x { background: url('"#.to_string();
        let html = BannerView::from_banner(Some(&b)).render();
        assert!(!html.contains("body {"));
        assert!(!html.contains("');"));
        assert!(html.contains(r#"url("/img/a.png%27%29;%20}%20body%20{%20display:%20none;%20}%20.x%20{%20background:%20url%28%27")"#));
        // 行内 style 只保留圆角和透明度
        assert!(html.contains(r#"style="border-radius: 0px; opacity: 1"#));
        assert!(!html.contains("style=\"background"));
    }

    #[test]
    fn symbol_only_ids_still_get_a_usable_dom_id() {
        let a = BannerFrame::from_banner(&BannerRecord::new("!!!", "/a.png"));
        let b = BannerFrame::from_banner(&BannerRecord::new("Sale!", "/a.png"));
        let c = BannerFrame::from_banner(&BannerRecord::new("sale?", "/a.png"));
        assert_ne!(a.dom_id, "banner-");
        assert_ne!(b.dom_id, c.dom_id);

        let html = BannerView::Bare(b.clone()).render();
        assert!(html.contains(&format!(r#"id="{}""#, b.dom_id)));
        assert!(html.contains(&format!("#{} {{ height: auto;", b.dom_id)));
    }
}
