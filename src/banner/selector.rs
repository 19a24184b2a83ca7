// src/banner/selector.rs

use crate::model::banner::BannerRecord;

/// Banner 挑选结果，同时记录命中的原因（用于渲染日志）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerDecision<'a> {
    /// 没有任何 Banner 配置
    NoBanners,
    /// 命中页面专属 Banner
    PageSpecific(&'a BannerRecord),
    /// 回落到默认 Banner
    Default(&'a BannerRecord),
    /// 默认 Banner 在当前页面被排除
    DefaultExcluded(&'a BannerRecord),
    /// 既没有专属 Banner，也没有启用的默认 Banner
    NoDefault,
}

impl<'a> BannerDecision<'a> {
    /// 最终需要展示的 Banner
    pub fn banner(&self) -> Option<&'a BannerRecord> {
        match *self {
            BannerDecision::PageSpecific(b) | BannerDecision::Default(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BannerDecision::NoBanners => "no_banners",
            BannerDecision::PageSpecific(_) => "page_specific",
            BannerDecision::Default(_) => "default",
            BannerDecision::DefaultExcluded(_) => "default_excluded",
            BannerDecision::NoDefault => "no_default",
        }
    }
}

/// 按优先级为页面挑选 Banner：
/// 1. 第一个启用且 display_pages 包含当前页面的 Banner；
/// 2. 否则取第一个启用的默认 Banner；
/// 3. 默认 Banner 排除了当前页面时不再继续回落。
pub fn resolve_banner<'a>(page_name: &str, banners: &'a [BannerRecord]) -> BannerDecision<'a> {
    if banners.is_empty() {
        return BannerDecision::NoBanners;
    }

    if let Some(specific) = banners.iter().find(|b| b.is_active && b.shows_on(page_name)) {
        return BannerDecision::PageSpecific(specific);
    }

    // 多个默认 Banner 时只看第一个，后面的即使没排除当前页面也不会被考虑
    match banners.iter().find(|b| b.is_active && b.is_default) {
        None => BannerDecision::NoDefault,
        Some(default) if default.excludes(page_name) => BannerDecision::DefaultExcluded(default),
        Some(default) => BannerDecision::Default(default),
    }
}

pub fn select_banner_for_page<'a>(page_name: &str, banners: &'a [BannerRecord]) -> Option<&'a BannerRecord> {
    resolve_banner(page_name, banners).banner()
}
