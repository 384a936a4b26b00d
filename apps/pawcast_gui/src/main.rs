//! Pawcast GUI

mod state;
mod ui;

use std::path::Path;
use std::time::Duration;

use eframe::egui;
use pawcast_player::{spawn_player, SimulatedSource};
use pawcast_state::load_catalog;
use pawcast_transport::Transport;

use state::AppState;
use ui::{EpisodeList, PawTheme, PlayerDeck};

fn main() -> eframe::Result<()> {
    let catalog_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/catalog.json".to_string());

    let catalog = match load_catalog(Path::new(&catalog_path)) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Failed to load catalog {}: {}", catalog_path, e);
            Vec::new()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Pawcast"),
        ..Default::default()
    };

    eframe::run_native(
        "Pawcast",
        options,
        Box::new(move |cc| {
            // 应用主题
            PawTheme::apply(&cc.egui_ctx);

            // 启动播放引擎（模拟音频源，注册目录里的全部媒体）
            let mut source =
                SimulatedSource::new().with_metadata_delay(Duration::from_millis(300));
            for episode in &catalog {
                source.register(&episode.url, Duration::from_secs(u64::from(episode.duration)));
            }
            let handle = spawn_player(source);
            let transport = Transport::new(handle.cmd_tx, handle.evt_rx);

            Ok(Box::new(PawcastApp::new(AppState::new(transport, catalog))))
        }),
    )
}

struct PawcastApp {
    state: AppState,
}

impl PawcastApp {
    fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PawcastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 处理播放引擎事件
        self.state.poll_events();

        // 底部播放控制栏
        egui::TopBottomPanel::bottom("player_deck")
            .resizable(false)
            .show(ctx, |ui| {
                PlayerDeck::show(ui, &mut self.state);
            });

        // 主内容区：单集目录
        egui::CentralPanel::default().show(ctx, |ui| {
            EpisodeList::show(ui, &mut self.state);
        });

        // 播放中定期重绘以刷新进度
        if self.state.transport.store().is_playing() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
