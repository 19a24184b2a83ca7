// src/config/config_manager.rs

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::error::Result;
use crate::model::adapters::CatalogSource;
use crate::model::catalog::Catalog;

/// 刷新结果摘要
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RefreshSummary {
    pub source: String,
    pub banners: usize,
    pub categories: usize,
    pub products: usize,
}

/// 持有当前目录快照；快照为空表示首次加载尚未完成
pub struct ConfigManager {
    source: Arc<dyn CatalogSource>,
    catalog: RwLock<Option<Arc<Catalog>>>,
}

impl ConfigManager {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        ConfigManager {
            source,
            catalog: RwLock::new(None),
        }
    }

    pub fn source_name(&self) -> String {
        self.source.describe()
    }

    /// 当前快照（克隆 Arc，渲染期间不持锁）
    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.catalog
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_loading(&self) -> bool {
        self.catalog().is_none()
    }

    pub fn update_catalog(&self, catalog: Catalog) -> RefreshSummary {
        let summary = RefreshSummary {
            source: self.source.describe(),
            banners: catalog.banners().len(),
            categories: catalog.categories.len(),
            products: catalog.products.len(),
        };
        *self
            .catalog
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::new(catalog));
        summary
    }

    /// 从数据源重新加载；失败时保留旧快照
    pub async fn refresh(&self) -> Result<RefreshSummary> {
        match self.source.load().await {
            Ok(catalog) => {
                let summary = self.update_catalog(catalog);
                info!(
                    "Catalog refreshed from {}: {} banners, {} categories, {} products",
                    summary.source, summary.banners, summary.categories, summary.products
                );
                Ok(summary)
            }
            Err(e) => {
                warn!("Catalog refresh from {} failed, keeping previous snapshot: {}", self.source.describe(), e);
                Err(e)
            }
        }
    }
}
