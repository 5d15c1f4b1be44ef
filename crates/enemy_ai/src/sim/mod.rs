//! Headless сценарий: детерминированная сцена для бинарника и тестов
//!
//! - rng: DeterministicRng (ChaCha8, seeded)
//! - scenario: игрок бродит по арене (Wanderer) и стреляет (AutoFire)
//! - scene: spawn helpers (игрок, враги, стены) + snapshot состояния

use bevy::prelude::*;

pub mod rng;
pub mod scenario;
pub mod scene;

pub use rng::DeterministicRng;
pub use scenario::*;
pub use scene::*;

/// Scenario Plugin - "игрок" без input'а
pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_simulation_sets(app);

        app.add_systems(
            FixedUpdate,
            (scenario::wander_players, scenario::auto_fire)
                .chain()
                .in_set(crate::SimulationSet::Input),
        );
    }
}
