//! 存储与引擎之间的运输层
//!
//! 规则：
//! - 播放开关只在用户意图路径上转成引擎命令；来自引擎的
//!   Started/Paused 事件只对账存储，不再回发命令，避免回环。
//! - 换集（绑定的媒体变化）时进度归零、等待元数据，再自动播放。
//! - 进度是瞬态的本地状态，取整秒，不进存储。

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use pawcast_player::{PlaybackState, PlayerCommand, PlayerEvent};
use pawcast_state::{Episode, PlayerStore, StoreChange};

/// 播放面板
pub struct Transport {
    store: PlayerStore,
    cmd_tx: Sender<PlayerCommand>,
    evt_rx: Receiver<PlayerEvent>,
    /// 当前绑定到引擎的媒体 URL
    bound_url: Option<String>,
    /// 本地进度（整秒）
    progress: u32,
    /// 引擎上报的总时长（整秒），元数据就绪前为 None
    duration: Option<u32>,
    metadata_loaded: bool,
    playback_state: PlaybackState,
}

impl Transport {
    pub fn new(cmd_tx: Sender<PlayerCommand>, evt_rx: Receiver<PlayerEvent>) -> Self {
        Self {
            store: PlayerStore::new(),
            cmd_tx,
            evt_rx,
            bound_url: None,
            progress: 0,
            duration: None,
            metadata_loaded: false,
            playback_state: PlaybackState::Idle,
        }
    }

    pub fn store(&self) -> &PlayerStore {
        &self.store
    }

    /// 订阅存储变更
    pub fn subscribe(&mut self) -> Receiver<StoreChange> {
        self.store.subscribe()
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback_state
    }

    /// 发送命令到播放引擎
    fn send(&self, cmd: PlayerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// 让引擎的播放状态追上存储的播放开关
    fn sync_playback(&self) {
        if self.bound_url.is_some() {
            if self.store.is_playing() {
                self.send(PlayerCommand::Play);
            } else {
                self.send(PlayerCommand::Pause);
            }
        }
    }

    /// 当前单集变化后重新绑定引擎；返回绑定是否发生了变化
    ///
    /// 同一媒体不重新加载（乱序重抽到同一下标时播放不被打断）。
    fn rebind(&mut self) -> bool {
        let target = self.store.current_episode().map(|e| e.url.clone());

        match target {
            Some(url) => {
                if self.bound_url.as_deref() == Some(url.as_str()) {
                    return false;
                }
                self.bound_url = Some(url.clone());
                self.progress = 0;
                self.duration = None;
                self.metadata_loaded = false;
                self.send(PlayerCommand::Load(url));
                self.send(PlayerCommand::SetLooping(self.store.is_looping()));
                // 新媒体绑定后自动开始播放
                self.send(PlayerCommand::Play);
                true
            }
            None => {
                if self.bound_url.is_none() {
                    return false;
                }
                self.bound_url = None;
                self.progress = 0;
                self.duration = None;
                self.metadata_loaded = false;
                self.send(PlayerCommand::Stop);
                true
            }
        }
    }

    pub fn play_single(&mut self, episode: Episode) {
        self.store.play_single(episode);
        if !self.rebind() {
            self.sync_playback();
        }
    }

    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) {
        self.store.play_list(list, index);
        if !self.rebind() {
            self.sync_playback();
        }
    }

    pub fn play_next(&mut self) {
        self.store.play_next();
        self.rebind();
    }

    pub fn play_previous(&mut self) {
        self.store.play_previous();
        self.rebind();
    }

    pub fn toggle_play(&mut self) {
        self.store.toggle_play();
        self.sync_playback();
    }

    pub fn toggle_loop(&mut self) {
        self.store.toggle_loop();
        if self.bound_url.is_some() {
            self.send(PlayerCommand::SetLooping(self.store.is_looping()));
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.store.toggle_shuffle();
    }

    /// 用户拖动进度条：本地进度立即更新，不等下一次进度事件
    pub fn seek(&mut self, amount: u32) {
        let Some(limit) = self.store.current_episode().map(|e| e.duration) else {
            return;
        };

        let amount = amount.min(limit);
        self.progress = amount;
        self.send(PlayerCommand::Seek(Duration::from_secs(u64::from(amount))));
    }

    /// 把积压的引擎事件折进存储和本地进度
    pub fn poll_events(&mut self) {
        let events: Vec<_> = self.evt_rx.try_iter().collect();

        for event in events {
            match event {
                PlayerEvent::StateChanged(state) => {
                    self.playback_state = state;
                }
                PlayerEvent::MetadataLoaded(duration) => {
                    self.metadata_loaded = true;
                    self.duration = Some(duration.as_secs() as u32);
                }
                PlayerEvent::Position(position) => {
                    // 元数据就绪前忽略进度
                    if self.metadata_loaded {
                        self.progress = position.as_secs() as u32;
                    }
                }
                PlayerEvent::Started => {
                    self.store.set_playing_state(true);
                }
                PlayerEvent::Paused => {
                    self.store.set_playing_state(false);
                }
                PlayerEvent::TrackEnded => {
                    if self.store.has_next() {
                        self.store.play_next();
                    } else {
                        self.store.clear();
                    }
                    self.rebind();
                }
                PlayerEvent::Error(message) => {
                    eprintln!("Player error: {}", message);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn episode(title: &str, duration: u32) -> Episode {
        Episode {
            title: title.to_string(),
            members: format!("{} crew", title),
            thumbnail: format!("https://example.com/{}.jpg", title),
            duration,
            url: format!("https://example.com/{}.mp3", title),
        }
    }

    fn three() -> Vec<Episode> {
        vec![episode("a", 100), episode("b", 200), episode("c", 300)]
    }

    fn transport() -> (
        Transport,
        Receiver<PlayerCommand>,
        Sender<PlayerEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(32);
        let (evt_tx, evt_rx) = bounded(64);
        (Transport::new(cmd_tx, evt_rx), cmd_rx, evt_tx)
    }

    fn loads(cmds: &[PlayerCommand]) -> Vec<String> {
        cmds.iter()
            .filter_map(|c| match c {
                PlayerCommand::Load(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_play_list_binds_and_autoplays() {
        let (mut transport, cmd_rx, _evt_tx) = transport();
        transport.play_list(three(), 1);

        let cmds: Vec<_> = cmd_rx.try_iter().collect();
        assert_eq!(loads(&cmds), vec!["https://example.com/b.mp3".to_string()]);
        assert!(cmds.iter().any(|c| matches!(c, PlayerCommand::Play)));
        assert_eq!(transport.progress(), 0);
    }

    #[test]
    fn test_play_list_same_media_only_syncs_playback() {
        let (mut transport, cmd_rx, evt_tx) = transport();
        transport.play_list(three(), 0);
        let _ = cmd_rx.try_iter().count();

        // 引擎侧暂停，再次 play_list 同一单集
        evt_tx.send(PlayerEvent::Paused).unwrap();
        transport.poll_events();
        transport.play_list(three(), 0);

        let cmds: Vec<_> = cmd_rx.try_iter().collect();
        assert!(loads(&cmds).is_empty());
        assert!(cmds.iter().any(|c| matches!(c, PlayerCommand::Play)));
    }

    #[test]
    fn test_seek_updates_progress_immediately() {
        let (mut transport, cmd_rx, _evt_tx) = transport();
        transport.play_single(episode("a", 200));
        let _ = cmd_rx.try_iter().count();

        transport.seek(50);
        assert_eq!(transport.progress(), 50);

        let cmds: Vec<_> = cmd_rx.try_iter().collect();
        assert!(cmds
            .iter()
            .any(|c| matches!(c, PlayerCommand::Seek(d) if *d == Duration::from_secs(50))));
    }

    #[test]
    fn test_seek_clamps_to_episode_duration() {
        let (mut transport, cmd_rx, _evt_tx) = transport();
        transport.play_single(episode("a", 200));
        let _ = cmd_rx.try_iter().count();

        transport.seek(999);
        assert_eq!(transport.progress(), 200);
    }

    #[test]
    fn test_seek_without_episode_is_noop() {
        let (mut transport, cmd_rx, _evt_tx) = transport();
        transport.seek(10);

        assert_eq!(transport.progress(), 0);
        assert_eq!(cmd_rx.try_iter().count(), 0);
    }

    #[test]
    fn test_position_is_floored_and_gated_on_metadata() {
        let (mut transport, cmd_rx, evt_tx) = transport();
        transport.play_single(episode("a", 200));
        let _ = cmd_rx.try_iter().count();

        // 元数据就绪前的进度被忽略
        evt_tx
            .send(PlayerEvent::Position(Duration::from_millis(42_900)))
            .unwrap();
        transport.poll_events();
        assert_eq!(transport.progress(), 0);

        evt_tx
            .send(PlayerEvent::MetadataLoaded(Duration::from_secs(200)))
            .unwrap();
        evt_tx
            .send(PlayerEvent::Position(Duration::from_millis(42_900)))
            .unwrap();
        transport.poll_events();

        assert_eq!(transport.duration(), Some(200));
        assert_eq!(transport.progress(), 42);
    }

    #[test]
    fn test_reconciliation_events_do_not_echo_commands() {
        let (mut transport, cmd_rx, evt_tx) = transport();
        transport.play_list(three(), 0);
        let _ = cmd_rx.try_iter().count();

        evt_tx.send(PlayerEvent::Started).unwrap();
        evt_tx.send(PlayerEvent::Paused).unwrap();
        transport.poll_events();

        assert!(!transport.store().is_playing());
        assert_eq!(cmd_rx.try_iter().count(), 0);
    }

    #[test]
    fn test_track_ended_advances_queue() {
        let (mut transport, cmd_rx, evt_tx) = transport();
        transport.play_list(three(), 0);
        let _ = cmd_rx.try_iter().count();

        evt_tx.send(PlayerEvent::TrackEnded).unwrap();
        transport.poll_events();

        assert_eq!(transport.store().current_index(), 1);
        let cmds: Vec<_> = cmd_rx.try_iter().collect();
        assert_eq!(loads(&cmds), vec!["https://example.com/b.mp3".to_string()]);
        assert!(cmds.iter().any(|c| matches!(c, PlayerCommand::Play)));
    }

    #[test]
    fn test_track_ended_on_last_episode_clears_queue() {
        let (mut transport, cmd_rx, evt_tx) = transport();
        transport.play_list(three(), 2);
        let _ = cmd_rx.try_iter().count();

        evt_tx.send(PlayerEvent::TrackEnded).unwrap();
        transport.poll_events();

        assert!(transport.store().queue().is_empty());
        assert_eq!(transport.store().current_index(), 0);
        assert_eq!(transport.progress(), 0);
        let cmds: Vec<_> = cmd_rx.try_iter().collect();
        assert!(cmds.iter().any(|c| matches!(c, PlayerCommand::Stop)));
    }

    #[test]
    fn test_toggle_play_commands_engine() {
        let (mut transport, cmd_rx, _evt_tx) = transport();
        transport.play_list(three(), 0);
        let _ = cmd_rx.try_iter().count();

        transport.toggle_play();
        let cmds: Vec<_> = cmd_rx.try_iter().collect();
        assert!(cmds.iter().any(|c| matches!(c, PlayerCommand::Pause)));

        transport.toggle_play();
        let cmds: Vec<_> = cmd_rx.try_iter().collect();
        assert!(cmds.iter().any(|c| matches!(c, PlayerCommand::Play)));
    }

    #[test]
    fn test_toggle_loop_forwards_flag_to_engine() {
        let (mut transport, cmd_rx, _evt_tx) = transport();
        transport.play_list(three(), 0);
        let _ = cmd_rx.try_iter().count();

        transport.toggle_loop();
        assert!(transport.store().is_looping());
        let cmds: Vec<_> = cmd_rx.try_iter().collect();
        assert!(cmds
            .iter()
            .any(|c| matches!(c, PlayerCommand::SetLooping(true))));
    }

    #[test]
    fn test_toggle_shuffle_is_store_only() {
        let (mut transport, cmd_rx, _evt_tx) = transport();
        transport.play_list(three(), 0);
        let _ = cmd_rx.try_iter().count();

        transport.toggle_shuffle();
        assert!(transport.store().is_shuffling());
        assert_eq!(cmd_rx.try_iter().count(), 0);
    }

    #[test]
    fn test_previous_at_start_sends_nothing() {
        let (mut transport, cmd_rx, _evt_tx) = transport();
        transport.play_list(three(), 0);
        let _ = cmd_rx.try_iter().count();

        transport.play_previous();
        assert_eq!(transport.store().current_index(), 0);
        assert_eq!(cmd_rx.try_iter().count(), 0);
    }
}
