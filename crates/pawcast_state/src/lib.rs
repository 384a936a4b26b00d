//! pawcast_state - 播放状态
//!
//! 播放队列与开关状态的唯一事实来源。

mod catalog;
mod episode;
mod store;

pub use catalog::{load_catalog, CatalogError};
pub use episode::Episode;
pub use store::{PlayerStore, StoreChange};
