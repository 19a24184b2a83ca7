// src/model/catalog.rs

use serde::{Deserialize, Serialize};

use crate::model::banner::BannerRecord;

/// 全部分类的标签，选中时不做过滤
pub const ALL_CATEGORY: &str = "All";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// 数据源下发的一份完整商品目录快照
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// banners 允许缺省，缺省时视为空列表
    #[serde(default)]
    pub banners: Option<Vec<BannerRecord>>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn banners(&self) -> &[BannerRecord] {
        self.banners.as_deref().unwrap_or_default()
    }

    /// 按当前选中的分类过滤商品
    pub fn products_in(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| category == ALL_CATEGORY || p.category == category)
            .collect()
    }
}
