pub mod renderer;
pub mod selector;

pub use renderer::BannerView;
pub use selector::{resolve_banner, select_banner_for_page, BannerDecision};
