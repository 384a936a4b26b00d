//! 播放状态存储
//!
//! 持有播放队列、当前下标和三个开关，所有操作都不会失败。
//! 每次变更会广播给所有订阅者。

use crossbeam_channel::{unbounded, Receiver, Sender};
use rand::Rng;

use crate::Episode;

/// 状态变更通知（存储 -> 订阅者）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// 队列被整体替换
    QueueReplaced,
    /// 当前下标变化
    IndexChanged,
    /// 播放开关变化
    PlayingChanged(bool),
    /// 循环开关变化
    LoopingChanged(bool),
    /// 乱序开关变化
    ShufflingChanged(bool),
    /// 队列被清空
    Cleared,
}

/// 播放状态存储
///
/// 单写多读：只有持有者执行变更，渲染层通过订阅获知变更。
pub struct PlayerStore {
    queue: Vec<Episode>,
    current_index: usize,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    subscribers: Vec<Sender<StoreChange>>,
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStore {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            current_index: 0,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
            subscribers: Vec::new(),
        }
    }

    /// 订阅状态变更
    pub fn subscribe(&mut self) -> Receiver<StoreChange> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, change: StoreChange) {
        // 断开的订阅者直接移除
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }

    pub fn queue(&self) -> &[Episode] {
        &self.queue
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 当前单集；队列为空或下标越界时为 None
    pub fn current_episode(&self) -> Option<&Episode> {
        self.queue.get(self.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn has_next(&self) -> bool {
        // 下标不做校验，usize::MAX 也不能溢出
        self.is_shuffling
            || self
                .current_index
                .checked_add(1)
                .map_or(false, |next| next < self.queue.len())
    }

    /// 用单个单集替换队列并开始播放
    pub fn play_single(&mut self, episode: Episode) {
        self.queue = vec![episode];
        self.current_index = 0;
        self.is_playing = true;
        self.notify(StoreChange::QueueReplaced);
    }

    /// 用整个列表替换队列并从 index 开始播放
    ///
    /// index 不做校验，越界时下游解析为“无当前单集”。
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) {
        self.queue = list;
        self.current_index = index;
        self.is_playing = true;
        self.notify(StoreChange::QueueReplaced);
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
        let playing = self.is_playing;
        self.notify(StoreChange::PlayingChanged(playing));
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
        let looping = self.is_looping;
        self.notify(StoreChange::LoopingChanged(looping));
    }

    pub fn toggle_shuffle(&mut self) {
        self.is_shuffling = !self.is_shuffling;
        let shuffling = self.is_shuffling;
        self.notify(StoreChange::ShufflingChanged(shuffling));
    }

    /// 与外部播放原语对账时直接写入播放开关
    pub fn set_playing_state(&mut self, playing: bool) {
        self.is_playing = playing;
        self.notify(StoreChange::PlayingChanged(playing));
    }

    /// 切到下一集
    ///
    /// 乱序开启时在 [0, len) 均匀随机取下标（允许重复当前下标）；
    /// 否则有下一集就前进一位，没有则不做任何事。
    pub fn play_next(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        if self.is_shuffling {
            self.current_index = rand::thread_rng().gen_range(0..self.queue.len());
        } else if self.has_next() {
            self.current_index += 1;
        } else {
            return;
        }

        self.notify(StoreChange::IndexChanged);
    }

    /// 切到上一集；已在队首则不做任何事
    pub fn play_previous(&mut self) {
        if self.has_previous() {
            self.current_index -= 1;
            self.notify(StoreChange::IndexChanged);
        }
    }

    /// 清空队列并将下标归零
    ///
    /// 循环/乱序/播放开关保持原样（它们是用户偏好，跨单集保留）。
    pub fn clear(&mut self) {
        self.queue.clear();
        self.current_index = 0;
        self.notify(StoreChange::Cleared);
    }
}
