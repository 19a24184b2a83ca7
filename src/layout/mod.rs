pub mod chrome;
pub mod grid;
pub mod markup;
pub mod page;

pub use page::{ContentState, PageLayout};
