// src/layout/grid.rs

use leptos::prelude::*;

use crate::layout::markup::dom_id;
use crate::model::catalog::Product;

/// 相邻商品卡片入场的间隔（秒）
pub const STAGGER_STEP_SECS: f64 = 0.08;

pub fn stagger_delay(index: usize) -> f64 {
    // 保留两位小数，避免 0.24000000000000002 这类输出
    ((index as f64) * STAGGER_STEP_SECS * 100.0).round() / 100.0
}

#[component]
fn ProductCard(product: Product, index: usize) -> impl IntoView {
    let Product {
        id,
        name,
        price,
        image_url,
        description,
        ..
    } = product;
    let style = format!("animation-delay: {}s", stagger_delay(index));
    let alt = name.clone();
    view! {
        <article class="product-card" data-product-id=id.to_string() style=style>
            <img src=image_url alt=alt />
            <h3>{name}</h3>
            {description.map(|d| view! { <p class="product-description">{d}</p> })}
            <span class="product-price">{format!("${:.2}", price)}</span>
        </article>
    }
}

/// 商品网格；以当前分类作为 key，分类变化时整个网格重新入场
#[component]
pub fn ProductGrid(products: Vec<Product>, stagger_key: String) -> impl IntoView {
    let id = dom_id("grid", &stagger_key);
    view! {
        <section id=id class="product-grid" data-stagger-key=stagger_key>
            {products
                .into_iter()
                .enumerate()
                .map(|(index, product)| view! { <ProductCard product=product index=index /> })
                .collect_view()}
        </section>
    }
}

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="spinner-box" role="status" aria-live="polite">
            <div class="spinner"></div>
        </div>
    }
}
