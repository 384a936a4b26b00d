//! 播放命令和事件定义

use std::time::Duration;

/// 播放器命令（界面 -> 引擎）
#[derive(Debug, Clone)]
pub enum PlayerCommand {
    /// 绑定媒体源 URL
    Load(String),
    /// 播放
    Play,
    /// 暂停
    Pause,
    /// 停止并解除绑定
    Stop,
    /// 跳转到指定位置
    Seek(Duration),
    /// 设置原语自身的循环开关
    SetLooping(bool),
    /// 关闭引擎
    Shutdown,
}

/// 播放器事件（引擎 -> 界面）
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// 状态变更
    StateChanged(PlaybackState),
    /// 媒体元数据就绪，附带总时长
    MetadataLoaded(Duration),
    /// 播放进度更新
    Position(Duration),
    /// 当前媒体播放结束（循环开启时不会触发）
    TrackEnded,
    /// 开始播放
    Started,
    /// 暂停播放
    Paused,
    /// 错误
    Error(String),
}

/// 播放状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
}
