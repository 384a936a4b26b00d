//! pawcast_transport - 播放面板逻辑
//!
//! 把状态存储和播放引擎绑在一起：用户意图进存储并转成引擎命令，
//! 引擎事件折回存储和本地进度。不含任何绘制代码。

mod time;
mod transport;

pub use time::format_timestamp;
pub use transport::Transport;
