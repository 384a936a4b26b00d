//! 音频原语的能力面

use std::time::Duration;

/// 音频源错误
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("Unknown media: {0}")]
    UnknownMedia(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// 引擎依赖的音频播放原语
///
/// 引擎只依赖这组能力，不依赖任何具体实现。重复下发同一播放状态
/// 必须无害（幂等）。
pub trait AudioSource: Send + 'static {
    /// 绑定媒体源；元数据可能稍后才可用
    fn load(&mut self, url: &str) -> Result<(), SourceError>;

    /// 解除绑定并复位进度
    fn unload(&mut self);

    fn set_playing(&mut self, playing: bool);

    /// 原语自身的循环开关；开启时播放到尾部直接回绕，不报告结束
    fn set_looping(&mut self, looping: bool);

    fn seek(&mut self, position: Duration);

    fn position(&self) -> Duration;

    /// 元数据就绪前返回 None
    fn duration(&self) -> Option<Duration>;

    fn ended(&self) -> bool;

    /// 推进内部时钟；由真实硬件驱动的后端可忽略
    fn tick(&mut self, _elapsed: Duration) {}
}
