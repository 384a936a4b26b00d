//! 播放引擎

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::{AudioSource, PlaybackState, PlayerCommand, PlayerEvent};

/// 进度上报间隔
const POSITION_INTERVAL: Duration = Duration::from_millis(100);

/// 播放引擎句柄
pub struct PlayerHandle {
    pub cmd_tx: Sender<PlayerCommand>,
    pub evt_rx: Receiver<PlayerEvent>,
}

/// 启动播放引擎
pub fn spawn_player<S: AudioSource>(source: S) -> PlayerHandle {
    let (cmd_tx, cmd_rx) = bounded(32);
    let (evt_tx, evt_rx) = bounded(64);

    thread::spawn(move || {
        run_engine(source, cmd_rx, evt_tx);
    });

    PlayerHandle { cmd_tx, evt_rx }
}

fn run_engine<S: AudioSource>(
    source: S,
    cmd_rx: Receiver<PlayerCommand>,
    evt_tx: Sender<PlayerEvent>,
) {
    let mut engine = Engine::new(source, evt_tx);

    let _ = engine
        .evt_tx
        .send(PlayerEvent::StateChanged(PlaybackState::Idle));

    let mut last_tick = Instant::now();

    loop {
        // 非阻塞检查命令
        match cmd_rx.try_recv() {
            Ok(cmd) => {
                if !engine.handle_command(cmd) {
                    break;
                }
            }
            Err(crossbeam_channel::TryRecvError::Empty) => {}
            Err(crossbeam_channel::TryRecvError::Disconnected) => break,
        }

        let now = Instant::now();
        engine.advance(now - last_tick);
        last_tick = now;

        // 避免 CPU 空转
        thread::sleep(Duration::from_millis(5));
    }
}

struct Engine<S: AudioSource> {
    source: S,
    evt_tx: Sender<PlayerEvent>,
    state: PlaybackState,
    // 元数据就绪前收到 Play 时挂起，就绪后再真正开始
    want_playing: bool,
    metadata_loaded: bool,
    since_position: Duration,
}

impl<S: AudioSource> Engine<S> {
    fn new(source: S, evt_tx: Sender<PlayerEvent>) -> Self {
        Self {
            source,
            evt_tx,
            state: PlaybackState::Idle,
            want_playing: false,
            metadata_loaded: false,
            since_position: Duration::ZERO,
        }
    }

    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        match cmd {
            PlayerCommand::Load(url) => {
                self.load(&url);
            }
            PlayerCommand::Play => {
                if self.state != PlaybackState::Idle {
                    self.want_playing = true;
                    if self.metadata_loaded {
                        self.start();
                    }
                }
            }
            PlayerCommand::Pause => {
                self.want_playing = false;
                if self.state == PlaybackState::Playing {
                    self.source.set_playing(false);
                    self.set_state(PlaybackState::Paused);
                    let _ = self.evt_tx.send(PlayerEvent::Paused);
                }
            }
            PlayerCommand::Stop => {
                self.source.unload();
                self.want_playing = false;
                self.metadata_loaded = false;
                self.set_state(PlaybackState::Idle);
            }
            PlayerCommand::Seek(position) => {
                if self.state != PlaybackState::Idle {
                    self.source.seek(position);
                    let _ = self.evt_tx.send(PlayerEvent::Position(self.source.position()));
                }
            }
            PlayerCommand::SetLooping(looping) => {
                self.source.set_looping(looping);
            }
            PlayerCommand::Shutdown => {
                return false;
            }
        }
        true
    }

    fn load(&mut self, url: &str) {
        self.want_playing = false;
        self.metadata_loaded = false;
        self.since_position = Duration::ZERO;
        self.set_state(PlaybackState::Loading);

        if let Err(e) = self.source.load(url) {
            let _ = self
                .evt_tx
                .send(PlayerEvent::Error(format!("Failed to load media: {}", e)));
            self.set_state(PlaybackState::Idle);
        }
        // 成功后停在 Loading，等 advance 轮询到元数据
    }

    fn start(&mut self) {
        if self.state != PlaybackState::Playing {
            self.source.set_playing(true);
            self.set_state(PlaybackState::Playing);
            let _ = self.evt_tx.send(PlayerEvent::Started);
        }
    }

    fn advance(&mut self, elapsed: Duration) {
        self.source.tick(elapsed);

        if self.state == PlaybackState::Idle {
            return;
        }

        if !self.metadata_loaded {
            if let Some(duration) = self.source.duration() {
                self.metadata_loaded = true;
                let _ = self.evt_tx.send(PlayerEvent::MetadataLoaded(duration));
                if self.want_playing {
                    self.start();
                } else if self.state == PlaybackState::Loading {
                    self.set_state(PlaybackState::Ready);
                }
            }
            return;
        }

        if self.state == PlaybackState::Playing {
            if self.source.ended() {
                // 循环开启时源自己回绕，永远不会走到这里
                self.source.set_playing(false);
                self.want_playing = false;
                self.set_state(PlaybackState::Ended);
                let _ = self.evt_tx.send(PlayerEvent::TrackEnded);
                return;
            }

            self.since_position += elapsed;
            if self.since_position >= POSITION_INTERVAL {
                let _ = self.evt_tx.send(PlayerEvent::Position(self.source.position()));
                self.since_position = Duration::ZERO;
            }
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            let _ = self.evt_tx.send(PlayerEvent::StateChanged(state));
        }
    }
}
