// src/layout/page.rs

use leptos::prelude::*;

use crate::banner::renderer::BannerSection;
use crate::banner::{resolve_banner, BannerDecision, BannerView};
use crate::layout::chrome::{CategoryFilters, PageHeader, STORE_TITLE};
use crate::layout::grid::{ProductGrid, Spinner};
use crate::layout::markup::{render_html, BASE_STYLESHEET};
use crate::model::catalog::{Catalog, Category, Product};
use crate::model::context::{RenderContext, Theme};

/// 首页挑选 Banner 使用的固定页面标识
pub const HOME_PAGE: &str = "Home";

/// 主内容区：加载中显示 spinner，否则显示商品网格
#[derive(Debug)]
pub enum ContentState<'a> {
    Loading,
    Grid { products: Vec<&'a Product>, stagger_key: &'a str },
}

impl ContentState<'_> {
    fn to_view(&self) -> AnyView {
        match self {
            ContentState::Loading => view! { <Spinner /> }.into_any(),
            ContentState::Grid { products, stagger_key } => {
                let products: Vec<Product> = products.iter().map(|p| (*p).clone()).collect();
                let stagger_key = stagger_key.to_string();
                view! { <ProductGrid products=products stagger_key=stagger_key /> }.into_any()
            }
        }
    }
}

/// 首页布局：页头 -> Banner -> 分类筛选 -> 内容区
#[derive(Debug)]
pub struct PageLayout<'a> {
    pub theme: Theme,
    pub active_category: &'a str,
    pub categories: &'a [Category],
    pub banner: BannerView,
    pub banner_id: Option<String>,
    pub decision: &'static str,
    pub content: ContentState<'a>,
}

impl<'a> PageLayout<'a> {
    /// 根据渲染上下文和目录快照组装页面；catalog 为空代表仍在加载
    pub fn compose(ctx: &'a RenderContext, catalog: Option<&'a Catalog>) -> Self {
        let banners = catalog.map(|c| c.banners()).unwrap_or_default();
        let decision: BannerDecision<'_> = resolve_banner(&ctx.page, banners);
        let banner = BannerView::from_banner(decision.banner());

        let content = match catalog {
            Some(catalog) if !ctx.loading => ContentState::Grid {
                products: catalog.products_in(&ctx.active_category),
                stagger_key: &ctx.active_category,
            },
            _ => ContentState::Loading,
        };

        Self {
            theme: ctx.theme,
            active_category: &ctx.active_category,
            categories: catalog.map(|c| c.categories.as_slice()).unwrap_or_default(),
            banner,
            banner_id: decision.banner().map(|b| b.id.to_string()),
            decision: decision.as_str(),
            content,
        }
    }

    pub fn product_count(&self) -> usize {
        match &self.content {
            ContentState::Loading => 0,
            ContentState::Grid { products, .. } => products.len(),
        }
    }

    pub fn render(&self) -> String {
        let title = format!("{} - {}", STORE_TITLE, self.active_category);
        let body_class = format!("theme-{}", self.theme.as_str());
        let theme = self.theme;
        let active_category = self.active_category.to_string();
        let categories = self.categories.to_vec();
        let banner = self.banner.clone();
        let content = &self.content;

        render_html(move || {
            view! {
                <!DOCTYPE html>
                <html lang="en">
                    <head>
                        <meta charset="utf-8" />
                        <meta name="viewport" content="width=device-width, initial-scale=1" />
                        <title>{title}</title>
                        <style inner_html=BASE_STYLESHEET.to_string()></style>
                    </head>
                    <body class=body_class>
                        <main class="page-root">
                            <PageHeader active_category=active_category.clone() theme=theme />
                            <BannerSection banner=banner />
                            <CategoryFilters categories=categories active_category=active_category theme=theme />
                            {content.to_view()}
                        </main>
                    </body>
                </html>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::banner::BannerRecord;

    fn catalog() -> Catalog {
        let mut home = BannerRecord::new(1, "/img/home.png");
        home.is_active = true;
        home.display_pages = vec![HOME_PAGE.to_string()];
        Catalog {
            banners: Some(vec![home]),
            categories: vec![
                Category { label: "Shoes".to_string(), icon: None },
                Category { label: "Bags".to_string(), icon: None },
            ],
            products: vec![
                Product {
                    id: 10,
                    name: "Runner".to_string(),
                    price: 80.0,
                    image_url: "/img/runner.png".to_string(),
                    category: "Shoes".to_string(),
                    description: None,
                },
                Product {
                    id: 11,
                    name: "Tote".to_string(),
                    price: 35.0,
                    image_url: "/img/tote.png".to_string(),
                    category: "Bags".to_string(),
                    description: Some("Canvas".to_string()),
                },
            ],
        }
    }

    #[test]
    fn loading_shows_spinner_without_grid() {
        let ctx = RenderContext::new(HOME_PAGE, None, Theme::Light, true);
        let layout = PageLayout::compose(&ctx, None);
        let html = layout.render();
        assert!(matches!(layout.content, ContentState::Loading));
        assert!(html.contains(r#"class="spinner""#));
        assert!(!html.contains("data-stagger-key"));
        assert_eq!(layout.decision, "no_banners");
    }

    #[test]
    fn sections_render_in_order() {
        let catalog = catalog();
        let ctx = RenderContext::new(HOME_PAGE, None, Theme::Light, false);
        let html = PageLayout::compose(&ctx, Some(&catalog)).render();
        let header = html.find("page-header").unwrap();
        let banner = html.find(r#"class="banner-wrap""#).unwrap();
        let filters = html.find("category-filters\">").unwrap();
        let grid = html.find("data-stagger-key").unwrap();
        assert!(header < banner && banner < filters && filters < grid);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Storefront - All</title>"));
    }

    #[test]
    fn grid_is_filtered_and_keyed_by_active_category() {
        let catalog = catalog();
        let ctx = RenderContext::new(HOME_PAGE, Some("Bags".to_string()), Theme::Dark, false);
        let layout = PageLayout::compose(&ctx, Some(&catalog));
        assert_eq!(layout.product_count(), 1);
        let html = layout.render();
        assert!(html.contains(r#"data-stagger-key="Bags""#));
        assert!(html.contains("Tote"));
        assert!(!html.contains("Runner"));
        assert!(html.contains(r#"<body class="theme-dark">"#));
    }

    #[test]
    fn banner_is_omitted_when_none_selected() {
        let mut catalog = catalog();
        catalog.banners = None;
        let ctx = RenderContext::new(HOME_PAGE, None, Theme::Light, false);
        let layout = PageLayout::compose(&ctx, Some(&catalog));
        assert_eq!(layout.banner, BannerView::Hidden);
        assert_eq!(layout.banner_id, None);
        assert!(!layout.render().contains("banner-wrap\">"));
    }
}
