//! 界面组件

use egui::{Button, Color32, Context, RichText, ScrollArea, Slider, Ui, Visuals};
use pawcast_player::PlaybackState;
use pawcast_transport::format_timestamp;

use crate::state::AppState;

/// 主题
pub struct PawTheme;

impl PawTheme {
    pub const ACCENT: Color32 = Color32::from_rgb(4, 211, 97);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(235, 235, 245);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(150, 148, 170);

    pub fn apply(ctx: &Context) {
        let mut style = (*ctx.style()).clone();
        style.visuals = Visuals::dark();
        style.visuals.panel_fill = Color32::from_rgb(24, 22, 34);
        ctx.set_style(style);
    }
}

fn toggle_button(icon: &str, active: bool) -> Button<'static> {
    let text = if active {
        RichText::new(icon).color(PawTheme::ACCENT)
    } else {
        RichText::new(icon)
    };
    Button::new(text)
}

/// 底部播放控制栏
pub struct PlayerDeck;

impl PlayerDeck {
    pub fn show(ui: &mut Ui, state: &mut AppState) {
        let episode = state.transport.store().current_episode().cloned();

        ui.add_space(8.0);

        // 正在播放
        match &episode {
            Some(episode) => {
                ui.label(
                    RichText::new(&episode.title)
                        .size(16.0)
                        .color(PawTheme::TEXT_PRIMARY)
                        .strong(),
                );
                ui.label(
                    RichText::new(&episode.members)
                        .size(12.0)
                        .color(PawTheme::TEXT_MUTED),
                );
            }
            None => {
                ui.label(
                    RichText::new("选择一个播客开始收听")
                        .size(14.0)
                        .color(PawTheme::TEXT_MUTED),
                );
            }
        }

        ui.add_space(6.0);

        // 进度条：拖动立即生效
        ui.horizontal(|ui| {
            ui.monospace(format_timestamp(state.transport.progress()));

            match &episode {
                Some(episode) => {
                    let mut position = state.transport.progress();
                    let slider =
                        Slider::new(&mut position, 0..=episode.duration).show_value(false);
                    if ui.add(slider).changed() {
                        state.transport.seek(position);
                    }
                }
                None => {
                    let mut unused = 0u32;
                    ui.add_enabled(
                        false,
                        Slider::new(&mut unused, 0..=1).show_value(false),
                    );
                }
            }

            ui.monospace(format_timestamp(
                episode.as_ref().map(|e| e.duration).unwrap_or(0),
            ));
        });

        ui.add_space(6.0);

        // 控制按钮
        ui.horizontal(|ui| {
            let store = state.transport.store();
            let has_episode = episode.is_some();
            let queue_len = store.queue().len();
            let shuffling = store.is_shuffling();
            let looping = store.is_looping();
            let playing = store.is_playing();
            let has_previous = store.has_previous();
            let has_next = store.has_next();

            // 单集队列里乱序没有意义
            let shuffle_enabled = has_episode && queue_len > 1;

            if ui
                .add_enabled(shuffle_enabled, toggle_button("🔀", shuffling))
                .clicked()
            {
                state.transport.toggle_shuffle();
            }

            if ui
                .add_enabled(has_episode && has_previous, Button::new("⏮"))
                .clicked()
            {
                state.transport.play_previous();
            }

            let play_icon = if playing { "⏸" } else { "▶" };
            if ui
                .add_enabled(
                    has_episode,
                    Button::new(RichText::new(play_icon).size(18.0)),
                )
                .clicked()
            {
                state.transport.toggle_play();
            }

            if ui
                .add_enabled(has_episode && has_next, Button::new("⏭"))
                .clicked()
            {
                state.transport.play_next();
            }

            if ui
                .add_enabled(has_episode, toggle_button("🔁", looping))
                .clicked()
            {
                state.transport.toggle_loop();
            }

            if state.transport.playback_state() == PlaybackState::Loading {
                ui.label(RichText::new("加载中…").color(PawTheme::TEXT_MUTED));
            }
        });

        ui.add_space(8.0);
    }
}

/// 单集目录列表
pub struct EpisodeList;

impl EpisodeList {
    pub fn show(ui: &mut Ui, state: &mut AppState) {
        ui.heading("最新发布");
        ui.add_space(8.0);

        if state.catalog.is_empty() {
            ui.label(
                RichText::new("目录是空的，检查启动参数里的 catalog 路径")
                    .color(PawTheme::TEXT_MUTED),
            );
            return;
        }

        let current_url = state
            .transport
            .store()
            .current_episode()
            .map(|e| e.url.clone());

        ScrollArea::vertical().show(ui, |ui| {
            let mut clicked = None;

            for (index, episode) in state.catalog.iter().enumerate() {
                let is_current = current_url.as_deref() == Some(episode.url.as_str());

                ui.horizontal(|ui| {
                    if ui.button("▶").clicked() {
                        clicked = Some(index);
                    }

                    let title_color = if is_current {
                        PawTheme::ACCENT
                    } else {
                        PawTheme::TEXT_PRIMARY
                    };
                    ui.label(RichText::new(&episode.title).color(title_color));
                    ui.label(RichText::new(&episode.members).color(PawTheme::TEXT_MUTED));
                    ui.label(
                        RichText::new(format_timestamp(episode.duration))
                            .color(PawTheme::TEXT_MUTED)
                            .monospace(),
                    );
                });
                ui.separator();
            }

            if let Some(index) = clicked {
                state.play_from_catalog(index);
            }
        });
    }
}
