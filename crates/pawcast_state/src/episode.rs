//! 单集定义

use serde::{Deserialize, Serialize};

/// 播客单集（不可变值，由目录提供方创建）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// 标题
    pub title: String,
    /// 参与成员
    pub members: String,
    /// 封面图 URI
    pub thumbnail: String,
    /// 时长（整秒）
    pub duration: u32,
    /// 音频源 URL
    pub url: String,
}
