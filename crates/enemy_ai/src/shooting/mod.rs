//! Shooting domain - hitscan стрельба и hit effects
//!
//! Flow:
//! 1. FireIntent (origin + direction) от игрока/сценария
//! 2. process_fire_intents: raycast по SceneColliders до weapon.range
//! 3. Hit → muzzle + impact HitEffect (живут 1s), урон врагу → EnemyDamaged / EnemyKilled
//! 4. expire_hit_effects удаляет отжившие эффекты

use bevy::prelude::*;

pub mod effects;
pub mod weapon;

// Re-export all components and systems
pub use effects::*;
pub use weapon::*;

/// Shooting Plugin
pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_simulation_sets(app);

        app.add_event::<FireIntent>()
            .add_systems(FixedUpdate, process_fire_intents.in_set(crate::SimulationSet::Combat))
            .add_systems(FixedUpdate, expire_hit_effects.in_set(crate::SimulationSet::Effects));
    }
}
