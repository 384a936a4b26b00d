//! pawcast_player - 播放引擎
//!
//! 在独立线程里驱动一个音频原语，对外只暴露命令/事件两个通道。

mod command;
mod engine;
mod sim;
mod source;

pub use command::*;
pub use engine::*;
pub use sim::*;
pub use source::*;
