pub mod adapters;
pub mod banner;
pub mod catalog;
pub mod context;
