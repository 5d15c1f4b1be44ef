//! Headless steering для NavAgent
//!
//! Архитектура:
//! - Прямая линия к destination по XZ (геометрия сцены не обходится)
//! - Высота агента не меняется (как агент на navmesh)
//! - Никакой velocity integration через Rapier - двигаем Transform напрямую
//! - path_pending снимается первым же шагом steering (путь = прямая)
//!
//! Детерминизм: fixed timestep (64Hz), без случайности

use bevy::prelude::*;

use crate::ai::heading::flatten;
use crate::components::NavAgent;

/// Двигает агентов к destination со скоростью `speed`, без overshoot
///
/// Работает в FixedUpdate после AI tick.
pub fn steer_nav_agents(mut agents: Query<(&mut Transform, &mut NavAgent)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (mut transform, mut agent) in agents.iter_mut() {
        let Some(destination) = agent.destination else {
            agent.remaining_distance = 0.0;
            continue;
        };

        let mut to_destination = destination - transform.translation;
        to_destination.y = 0.0;
        let distance = to_destination.length();

        // Путь "рассчитан" - arrival check увидит его в следующем AI tick
        agent.path_pending = false;

        if agent.stopped {
            agent.remaining_distance = distance;
            continue;
        }

        let step = agent.speed * delta;
        if distance <= step {
            transform.translation.x = destination.x;
            transform.translation.z = destination.z;
            agent.remaining_distance = 0.0;
        } else {
            transform.translation += to_destination / distance * step;
            agent.remaining_distance = distance - step;
        }

        if agent.update_rotation {
            if let Some(heading) = flatten(to_destination) {
                transform.look_to(heading, Vec3::Y);
            }
        }
    }
}

/// Plugin для headless навигации
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_simulation_sets(app);
        app.add_systems(FixedUpdate, steer_nav_agents.in_set(crate::SimulationSet::Movement));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn world_with_agent(agent: NavAgent, position: Vec3) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(Time::<Fixed>::from_seconds(0.5));
        let entity = world.spawn((Transform::from_translation(position), agent)).id();
        (world, entity)
    }

    /// Один шаг steering с фиксированным dt = 0.5s
    fn step(world: &mut World) {
        world
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_millis(500));
        world.run_system_once(steer_nav_agents).unwrap();
    }

    fn moving_agent(destination: Vec3, speed: f32) -> NavAgent {
        let mut agent = NavAgent {
            speed,
            ..default()
        };
        agent.set_destination(destination);
        agent
    }

    #[test]
    fn test_step_resolves_pending_path() {
        let (mut world, entity) = world_with_agent(moving_agent(Vec3::new(0.0, 0.0, 10.0), 2.0), Vec3::ZERO);
        assert!(world.get::<NavAgent>(entity).unwrap().path_pending);
        step(&mut world);

        let agent = world.get::<NavAgent>(entity).unwrap();
        assert!(!agent.path_pending);
        assert_relative_eq!(agent.remaining_distance, 9.0, epsilon = 1e-5);
    }

    #[test]
    fn test_moves_at_speed_and_faces_destination() {
        let (mut world, entity) = world_with_agent(moving_agent(Vec3::new(10.0, 0.0, 0.0), 2.0), Vec3::ZERO);
        step(&mut world); // 0.5s * 2 m/s = 1m

        let transform = world.get::<Transform>(entity).unwrap();
        assert_relative_eq!(transform.translation.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(transform.forward().as_vec3().x, 1.0, epsilon = 1e-5);

        let agent = world.get::<NavAgent>(entity).unwrap();
        assert_relative_eq!(agent.remaining_distance, 9.0, epsilon = 1e-5);
    }

    #[test]
    fn test_no_overshoot() {
        let (mut world, entity) = world_with_agent(moving_agent(Vec3::new(0.0, 0.0, 0.5), 10.0), Vec3::ZERO);
        step(&mut world);

        assert_eq!(world.get::<Transform>(entity).unwrap().translation, Vec3::new(0.0, 0.0, 0.5));
        assert_eq!(world.get::<NavAgent>(entity).unwrap().remaining_distance, 0.0);
    }

    #[test]
    fn test_agent_stays_on_ground_plane() {
        // Destination выше агента (центр игрока) - двигаемся только по XZ
        let (mut world, entity) = world_with_agent(moving_agent(Vec3::new(0.0, 1.0, 10.0), 2.0), Vec3::ZERO);
        step(&mut world);

        let translation = world.get::<Transform>(entity).unwrap().translation;
        assert_eq!(translation.y, 0.0);
        assert_relative_eq!(translation.z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(world.get::<NavAgent>(entity).unwrap().remaining_distance, 9.0, epsilon = 1e-5);

        let (mut world, entity) = world_with_agent(moving_agent(Vec3::new(0.0, 1.0, 0.5), 10.0), Vec3::ZERO);
        step(&mut world);
        assert_eq!(world.get::<Transform>(entity).unwrap().translation, Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_manual_rotation_is_not_overridden() {
        let mut agent = moving_agent(Vec3::new(10.0, 0.0, 0.0), 2.0);
        agent.update_rotation = false;
        let (mut world, entity) = world_with_agent(agent, Vec3::ZERO);
        step(&mut world);

        // Default Transform смотрит на -Z и остаётся так
        let forward = world.get::<Transform>(entity).unwrap().forward().as_vec3();
        assert_relative_eq!(forward.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_stopped_agent_holds_position() {
        let mut agent = moving_agent(Vec3::new(0.0, 0.0, 10.0), 2.0);
        agent.stop();
        let (mut world, entity) = world_with_agent(agent, Vec3::ZERO);
        step(&mut world);
        step(&mut world);

        assert_eq!(world.get::<Transform>(entity).unwrap().translation, Vec3::ZERO);
        assert_relative_eq!(
            world.get::<NavAgent>(entity).unwrap().remaining_distance,
            10.0,
            epsilon = 1e-5
        );
    }
}
