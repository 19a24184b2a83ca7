// src/model/adapters.rs

use futures::future::{join_all, BoxFuture};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::model::catalog::Catalog;

/// 目录数据源（文件 / CMS 接口）
pub trait CatalogSource: Send + Sync {
    fn describe(&self) -> String;
    fn load(&self) -> BoxFuture<'_, Result<Catalog>>;
}

/// simd-json 需要可变缓冲区，原地解析
fn parse_json<T: DeserializeOwned>(mut bytes: Vec<u8>) -> Result<T> {
    Ok(simd_json::serde::from_slice::<T>(&mut bytes)?)
}

/// 从本地 JSON 文件读取整份目录
pub struct FileCatalogSource {
    pub path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }

    fn load(&self) -> BoxFuture<'_, Result<Catalog>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(&self.path).await?;
            let catalog: Catalog = parse_json(bytes)?;
            debug!(
                "Loaded catalog from {}: {} banners, {} products",
                self.path.display(),
                catalog.banners().len(),
                catalog.products.len()
            );
            Ok(catalog)
        })
    }
}

/// 从 CMS 接口拉取目录：/banners、/categories、/products 三个接口并发请求
pub struct HttpCatalogSource {
    client: Client,
    base_url: String,
    timeout: Duration,
}

const BANNERS_PATH: &str = "banners";
const CATEGORIES_PATH: &str = "categories";
const PRODUCTS_PATH: &str = "products";

impl HttpCatalogSource {
    pub fn new(base_url: &str, timeout_ms: u64) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// 返回 None 表示接口 404（该资源未配置）
    async fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let url = self.endpoint(path);
        let response = timeout(self.timeout, self.client.get(&url).send())
            .await
            .map_err(|_| AppError::feed(&url, format!("timed out after {:?}", self.timeout)))??;

        if response.status() == StatusCode::NOT_FOUND {
            warn!("Feed endpoint {} returned 404", url);
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::feed(&url, format!("status {}", response.status())));
        }
        Ok(Some(response.bytes().await?.to_vec()))
    }
}

impl CatalogSource for HttpCatalogSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    fn load(&self) -> BoxFuture<'_, Result<Catalog>> {
        Box::pin(async move {
            let paths = [BANNERS_PATH, CATEGORIES_PATH, PRODUCTS_PATH];
            let mut results = join_all(paths.iter().map(|p| self.fetch(p))).await.into_iter();

            // join_all 保证结果顺序与请求顺序一致
            let banners = match results.next().transpose()?.flatten() {
                Some(bytes) => Some(parse_json(bytes)?),
                None => None,
            };
            let categories = match results.next().transpose()?.flatten() {
                Some(bytes) => parse_json(bytes)?,
                None => Vec::new(),
            };
            let products = match results.next().transpose()?.flatten() {
                Some(bytes) => parse_json(bytes)?,
                None => return Err(AppError::feed(self.endpoint(PRODUCTS_PATH), "products not found")),
            };

            Ok(Catalog {
                banners,
                categories,
                products,
            })
        })
    }
}
