// src/model/banner.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Banner 的唯一标识，运营后台可能下发整数或字符串
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum BannerId {
    Int(u64),
    Text(String),
}

impl fmt::Display for BannerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BannerId::Int(id) => write!(f, "{}", id),
            BannerId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for BannerId {
    fn from(id: u64) -> Self {
        BannerId::Int(id)
    }
}

impl From<&str> for BannerId {
    fn from(id: &str) -> Self {
        BannerId::Text(id.to_string())
    }
}

/// 入场动画类型，未知值或未设置时回落到 fade-in
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "Option<String>", into = "String")]
pub enum AnimationType {
    None,
    #[default]
    FadeIn,
    SlideInTop,
    Pulse,
}

impl AnimationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationType::None => "none",
            AnimationType::FadeIn => "fade-in",
            AnimationType::SlideInTop => "slide-in-top",
            AnimationType::Pulse => "pulse",
        }
    }
}

impl From<Option<String>> for AnimationType {
    /// CMS 可能下发 `null`，与缺省一样按 fade-in 处理
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("none") => AnimationType::None,
            Some("fade-in") => AnimationType::FadeIn,
            Some("slide-in-top") => AnimationType::SlideInTop,
            Some("pulse") => AnimationType::Pulse,
            _ => AnimationType::FadeIn,
        }
    }
}

impl From<AnimationType> for String {
    fn from(animation: AnimationType) -> Self {
        animation.as_str().to_string()
    }
}

/// 运营配置的一条推广 Banner
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BannerRecord {
    pub id: BannerId,
    #[serde(default)]
    pub is_active: bool,              // 未启用的 Banner 永远不会展示
    #[serde(default)]
    pub is_default: bool,             // 默认 Banner（没有页面专属 Banner 时展示）
    #[serde(default)]
    pub display_pages: Vec<String>,   // 专属展示的页面
    #[serde(default)]
    pub excluded_pages: Vec<String>,  // 默认 Banner 不允许出现的页面
    pub image_url: String,
    #[serde(default)]
    pub redirect_url: Option<String>, // 非空时整个 Banner 包裹为链接
    #[serde(default)]
    pub height_mobile: Option<String>,
    #[serde(default)]
    pub height_tablet: Option<String>,
    #[serde(default)]
    pub height_desktop: Option<String>,
    #[serde(default)]
    pub border_radius: Option<String>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub animation_type: AnimationType,
}

impl BannerRecord {
    /// 构造一个只含展示规则的 Banner，其余展示参数取默认值
    pub fn new(id: impl Into<BannerId>, image_url: &str) -> Self {
        Self {
            id: id.into(),
            is_active: false,
            is_default: false,
            display_pages: Vec::new(),
            excluded_pages: Vec::new(),
            image_url: image_url.to_string(),
            redirect_url: None,
            height_mobile: None,
            height_tablet: None,
            height_desktop: None,
            border_radius: None,
            opacity: None,
            animation_type: AnimationType::default(),
        }
    }

    pub fn shows_on(&self, page: &str) -> bool {
        self.display_pages.iter().any(|p| p == page)
    }

    pub fn excludes(&self, page: &str) -> bool {
        self.excluded_pages.iter().any(|p| p == page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_integer_and_string_ids() {
        let json = r#"[
            {"id": 7, "image_url": "/a.png"},
            {"id": "spring-sale", "image_url": "/b.png"}
        ]"#;
        let banners: Vec<BannerRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(banners[0].id, BannerId::Int(7));
        assert_eq!(banners[1].id, BannerId::Text("spring-sale".to_string()));
        assert_eq!(banners[1].id.to_string(), "spring-sale");
    }

    #[test]
    fn missing_rule_fields_default_to_inactive_and_empty() {
        let banner: BannerRecord =
            serde_json::from_str(r#"{"id": 1, "image_url": "/a.png"}"#).unwrap();
        assert!(!banner.is_active);
        assert!(!banner.is_default);
        assert!(banner.display_pages.is_empty());
        assert!(banner.excluded_pages.is_empty());
        assert_eq!(banner.redirect_url, None);
        assert_eq!(banner.animation_type, AnimationType::FadeIn);
    }

    #[test]
    fn unknown_animation_falls_back_to_fade_in() {
        let banner: BannerRecord = serde_json::from_str(
            r#"{"id": 1, "image_url": "/a.png", "animation_type": "spin-wildly"}"#,
        )
        .unwrap();
        assert_eq!(banner.animation_type, AnimationType::FadeIn);

        let banner: BannerRecord = serde_json::from_str(
            r#"{"id": 1, "image_url": "/a.png", "animation_type": "slide-in-top"}"#,
        )
        .unwrap();
        assert_eq!(banner.animation_type, AnimationType::SlideInTop);
    }

    #[test]
    fn null_animation_falls_back_to_fade_in() {
        let banners: Vec<BannerRecord> = serde_json::from_str(
            r#"[
                {"id": 1, "image_url": "/a.png", "animation_type": null},
                {"id": 2, "image_url": "/b.png", "animation_type": "pulse"}
            ]"#,
        )
        .unwrap();
        assert_eq!(banners[0].animation_type, AnimationType::FadeIn);
        assert_eq!(banners[1].animation_type, AnimationType::Pulse);

        let json = serde_json::to_value(&banners[0]).unwrap();
        assert_eq!(json["animation_type"], "fade-in");
    }

    #[test]
    fn page_membership_is_exact() {
        let mut banner = BannerRecord::new(1, "/a.png");
        banner.display_pages = vec!["Home".to_string()];
        banner.excluded_pages = vec!["Checkout".to_string()];
        assert!(banner.shows_on("Home"));
        assert!(!banner.shows_on("home"));
        assert!(banner.excludes("Checkout"));
        assert!(!banner.excludes("Home"));
    }
}
