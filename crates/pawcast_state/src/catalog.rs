//! 单集目录加载
//!
//! 目录是一个 JSON 数组文件，由外部列表功能生成。

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::Episode;

/// 目录加载错误
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// 从 JSON 文件加载单集目录
pub fn load_catalog(path: &Path) -> Result<Vec<Episode>, CatalogError> {
    let file = File::open(path)?;
    let episodes = serde_json::from_reader(BufReader::new(file))?;
    Ok(episodes)
}
