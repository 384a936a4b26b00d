//! pawcast-cli - 无界面演示
//!
//! 用模拟音频源把目录从头播到尾，时钟可以加速，方便验证换集逻辑。

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use pawcast_player::{spawn_player, PlayerCommand, SimulatedSource};
use pawcast_state::{load_catalog, StoreChange};
use pawcast_transport::{format_timestamp, Transport};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage:");
        eprintln!("  {} <catalog.json> [rate]", args[0]);
        eprintln!();
        eprintln!("rate 是模拟时钟倍率，默认 60（真实 1 秒播 1 分钟）");
        std::process::exit(1);
    }

    let catalog = load_catalog(Path::new(&args[1])).expect("Failed to load catalog");
    if catalog.is_empty() {
        eprintln!("Catalog is empty");
        std::process::exit(1);
    }

    let rate: f64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(60.0);

    let mut source = SimulatedSource::new().with_rate(rate);
    for episode in &catalog {
        source.register(&episode.url, Duration::from_secs(u64::from(episode.duration)));
    }

    let handle = spawn_player(source);
    let cmd_tx = handle.cmd_tx.clone();
    let mut transport = Transport::new(handle.cmd_tx, handle.evt_rx);
    let changes = transport.subscribe();

    transport.play_list(catalog, 0);

    loop {
        transport.poll_events();

        for change in changes.try_iter() {
            if matches!(
                change,
                StoreChange::QueueReplaced | StoreChange::IndexChanged
            ) {
                if let Some(episode) = transport.store().current_episode() {
                    println!();
                    println!("Now playing: {} ({})", episode.title, episode.members);
                }
            }
        }

        // 队列播空即结束
        if transport.store().current_episode().is_none() {
            break;
        }

        let total = transport
            .store()
            .current_episode()
            .map(|e| e.duration)
            .unwrap_or(0);
        print!(
            "\r  {} / {}",
            format_timestamp(transport.progress()),
            format_timestamp(total)
        );
        let _ = std::io::stdout().flush();

        std::thread::sleep(Duration::from_millis(50));
    }

    println!();
    println!("Queue finished");
    let _ = cmd_tx.send(PlayerCommand::Shutdown);
}
