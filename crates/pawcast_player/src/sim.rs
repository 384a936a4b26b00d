//! 模拟音频源
//!
//! 不解码任何音频，只按时钟推进位置。媒体需要事先注册
//! （URL -> 时长），加载未注册的 URL 会失败。

use std::collections::HashMap;
use std::time::Duration;

use crate::{AudioSource, SourceError};

/// 模拟音频源
pub struct SimulatedSource {
    media: HashMap<String, Duration>,
    metadata_delay: Duration,
    rate: f64,
    current: Option<Loaded>,
}

struct Loaded {
    duration: Duration,
    since_load: Duration,
    position: Duration,
    playing: bool,
    looping: bool,
    ended: bool,
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self {
            media: HashMap::new(),
            metadata_delay: Duration::ZERO,
            rate: 1.0,
            current: None,
        }
    }

    /// 模拟元数据到达前的延迟（比如网络加载）
    pub fn with_metadata_delay(mut self, delay: Duration) -> Self {
        self.metadata_delay = delay;
        self
    }

    /// 时钟倍率；演示时可以加速播放
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// 注册一条可加载的媒体
    pub fn register(&mut self, url: &str, duration: Duration) {
        self.media.insert(url.to_string(), duration);
    }

    fn metadata_ready(loaded: &Loaded, delay: Duration) -> bool {
        loaded.since_load >= delay
    }
}

impl AudioSource for SimulatedSource {
    fn load(&mut self, url: &str) -> Result<(), SourceError> {
        let duration = *self
            .media
            .get(url)
            .ok_or_else(|| SourceError::UnknownMedia(url.to_string()))?;

        self.current = Some(Loaded {
            duration,
            since_load: Duration::ZERO,
            position: Duration::ZERO,
            playing: false,
            looping: false,
            ended: false,
        });
        Ok(())
    }

    fn unload(&mut self) {
        self.current = None;
    }

    fn set_playing(&mut self, playing: bool) {
        if let Some(current) = &mut self.current {
            current.playing = playing;
        }
    }

    fn set_looping(&mut self, looping: bool) {
        if let Some(current) = &mut self.current {
            current.looping = looping;
        }
    }

    fn seek(&mut self, position: Duration) {
        if let Some(current) = &mut self.current {
            current.position = position.min(current.duration);
            if current.position < current.duration {
                current.ended = false;
            }
        }
    }

    fn position(&self) -> Duration {
        self.current
            .as_ref()
            .map(|current| current.position)
            .unwrap_or(Duration::ZERO)
    }

    fn duration(&self) -> Option<Duration> {
        let current = self.current.as_ref()?;
        Self::metadata_ready(current, self.metadata_delay).then_some(current.duration)
    }

    fn ended(&self) -> bool {
        self.current
            .as_ref()
            .map(|current| current.ended)
            .unwrap_or(false)
    }

    fn tick(&mut self, elapsed: Duration) {
        let scaled = elapsed.mul_f64(self.rate);
        let delay = self.metadata_delay;

        if let Some(current) = &mut self.current {
            current.since_load += scaled;

            if !current.playing || !Self::metadata_ready(current, delay) {
                return;
            }

            let next = current.position + scaled;
            if next < current.duration {
                current.position = next;
            } else if current.looping {
                // 回绕，不报告结束
                let span = current.duration.as_nanos().max(1);
                current.position = Duration::from_nanos((next.as_nanos() % span) as u64);
            } else {
                current.position = current.duration;
                current.playing = false;
                current.ended = true;
            }
        }
    }
}
