//! Enemy AI Simulation Core
//!
//! Headless ECS-симуляция на Bevy 0.16: патрульные враги с vision / chase / attack.
//!
//! Слои:
//! - ai: behavior core (FSM, vision, patrol) + ECS systems
//! - physics: raycast по коллайдерам сцены, steering NavAgent'ов
//! - shooting / player: hitscan стрельба, first-person look
//! - sim: детерминированный сценарий (seeded RNG) для бинарника и тестов

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

// Публичные модули
pub mod ai;
pub mod components;
pub mod logger;
pub mod physics;
pub mod player;
pub mod shooting;
pub mod sim;

// Re-export базовых типов для удобства
pub use ai::{
    AnimationFlag, AnimationTrigger, ConfigError, EnemyAIPlugin, EnemyBehavior, EnemyConfig, EnemyDamaged, EnemyKilled,
    EnemyState, EnemyStateChanged, Locomotion, Perception, Presentation,
};
pub use components::*;
pub use logger::init_logger;
pub use physics::NavigationPlugin;
pub use player::{LookController, LookInput, PlayerPlugin};
pub use shooting::{FireIntent, HitEffect, HitEffectKind, ShootingPlugin, Weapon};
pub use sim::{simulation_snapshot, spawn_demo_scene, DeterministicRng, ScenarioPlugin};

/// Частота simulation tick (Hz)
pub const SIMULATION_HZ: f64 = 64.0;

/// Порядок фаз внутри FixedUpdate
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Input игрока / сценария (look, wander, fire intents)
    Input,
    /// Hitscan + урон
    Combat,
    /// Damage/death signals + FSM tick
    Ai,
    /// Steering NavAgent'ов
    Movement,
    /// Lifetime эффектов
    Effects,
}

/// Регистрирует порядок SimulationSet (idempotent, вызывается каждым plugin'ом)
pub fn configure_simulation_sets(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            SimulationSet::Input,
            SimulationSet::Combat,
            SimulationSet::Ai,
            SimulationSet::Movement,
            SimulationSet::Effects,
        )
            .chain(),
    );
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct EnemySimulationPlugin {
    pub seed: u64,
}

impl Default for EnemySimulationPlugin {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl Plugin for EnemySimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 64Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            // Детерминистичный RNG
            .insert_resource(DeterministicRng::new(self.seed))
            .add_plugins((PlayerPlugin, ShootingPlugin, EnemyAIPlugin, NavigationPlugin, ScenarioPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время не зависит от wall-clock: каждый `app.update()` = ровно один fixed tick.
pub fn create_headless_app(seed: u64) -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(EnemySimulationPlugin { seed })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / SIMULATION_HZ)));

    app
}
