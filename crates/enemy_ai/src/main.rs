//! Headless симуляция enemy AI
//!
//! Запускает Bevy App без рендера: демо арена, seed из CLI.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use enemy_ai::logger::{self, LogLevel};
use enemy_ai::{create_headless_app, simulation_snapshot, spawn_demo_scene, EnemyBehavior, EnemyConfig, Health};

#[derive(Parser, Debug)]
#[command(name = "enemy_ai", about = "Headless enemy AI simulation")]
struct Args {
    /// JSON конфиг врага (по умолчанию - встроенные значения)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Количество simulation tick'ов (1 update = 1 fixed tick, 64Hz)
    #[arg(long, default_value_t = 1000)]
    ticks: usize,

    /// Подробные логи (vision verdicts, выстрелы)
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_logger();
    logger::set_log_level(if args.verbose { LogLevel::Debug } else { LogLevel::Info });

    let config = match &args.config {
        Some(path) => EnemyConfig::load(path).with_context(|| format!("loading enemy config {}", path.display()))?,
        None => EnemyConfig::default(),
    };

    logger::log_info(&format!("Starting enemy AI headless simulation (seed: {})", args.seed));

    let mut app = create_headless_app(args.seed);
    let scene = spawn_demo_scene(app.world_mut(), &config);

    for tick in 0..args.ticks {
        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let mut enemies = world.query::<&EnemyBehavior>();
            let mut by_state: BTreeMap<&'static str, usize> = BTreeMap::new();
            for behavior in enemies.iter(world) {
                *by_state.entry(behavior.state().name()).or_default() += 1;
            }

            let player_health = world.get::<Health>(scene.player).map_or(0, |h| h.current);
            logger::log_info(&format!("Tick {}: enemies {:?}, player hp {}", tick, by_state, player_health));
        }
    }

    let snapshot = simulation_snapshot(app.world_mut());
    logger::log_info(&format!("Simulation complete! snapshot {} bytes", snapshot.len()));

    Ok(())
}
