//! Enemy AI module
//!
//! Core (без ECS зависимостей, кроме math типов):
//! - patrol: циклический обход waypoints
//! - vision: FOV cone + occlusion raycast
//! - heading: yaw математика
//! - behavior: FSM врага (Patrolling / Turning / Pausing / Chasing / LosingTarget / Attacking / Dead)
//!
//! ECS host: systems (tick, damage, death) + events.

use bevy::prelude::*;

pub mod behavior;
pub mod components;
pub mod events;
pub mod heading;
pub mod patrol;
pub mod systems;
pub mod vision;


// Re-export основных типов
pub use behavior::{AnimationFlag, AnimationTrigger, EnemyBehavior, Locomotion, Perception, Presentation};
pub use components::{ConfigError, EnemyConfig, EnemyState};
pub use events::{EnemyDamaged, EnemyKilled, EnemyStateChanged};
pub use patrol::PatrolCursor;
pub use vision::{HitTag, NoOcclusion, OcclusionQuery, RayHit, VisibilityProbe, FULL_FIELD_OF_VIEW};

/// Enemy AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. react_to_damage - damage signal в EnemyBehavior
/// 2. handle_enemy_death - death signal (сбрасывает damage signal)
/// 3. tick_enemy_behaviors - FSM tick, команды в NavAgent / AnimationState
pub struct EnemyAIPlugin;

impl Plugin for EnemyAIPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_simulation_sets(app);

        app.add_event::<EnemyDamaged>()
            .add_event::<EnemyKilled>()
            .add_event::<EnemyStateChanged>()
            .add_systems(
                FixedUpdate,
                (
                    systems::react_to_damage,
                    systems::handle_enemy_death,
                    systems::tick_enemy_behaviors,
                )
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(crate::SimulationSet::Ai),
            );
    }
}
