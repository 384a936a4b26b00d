//! 应用状态

use pawcast_state::Episode;
use pawcast_transport::Transport;

/// 应用状态：播放面板 + 已加载的单集目录
pub struct AppState {
    pub transport: Transport,
    pub catalog: Vec<Episode>,
}

impl AppState {
    pub fn new(transport: Transport, catalog: Vec<Episode>) -> Self {
        Self { transport, catalog }
    }

    /// 处理播放引擎事件
    pub fn poll_events(&mut self) {
        self.transport.poll_events();
    }

    /// 从目录的某一行开始播放整个目录
    pub fn play_from_catalog(&mut self, index: usize) {
        self.transport.play_list(self.catalog.clone(), index);
    }
}
