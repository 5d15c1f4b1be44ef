//! Player domain - управление игроком (first-person look)
//!
//! AI systems используют `Without<Player>`, input systems - `With<Player>`.

use bevy::prelude::*;

pub mod look;

pub use crate::components::Player;
pub use look::*;

/// Player Plugin
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_simulation_sets(app);

        app.add_event::<LookInput>()
            .add_systems(FixedUpdate, apply_look_input.in_set(crate::SimulationSet::Input));
    }
}
