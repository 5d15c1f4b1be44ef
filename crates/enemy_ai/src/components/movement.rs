//! Movement компоненты: навигационный агент (headless замена navmesh agent)

use bevy::prelude::*;

/// Навигационный агент актора
///
/// Архитектура:
/// - AI core пишет intent через `Locomotion` (destination / stop / speed)
/// - `steer_nav_agents` двигает Transform к destination и обновляет
///   remaining_distance / path_pending (как navmesh agent)
///
/// `path_pending` выставляется при новом destination и снимается на
/// следующем шаге steering - до этого arrival check не срабатывает.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    pub destination: Option<Vec3>,
    /// Скорость движения (м/с)
    pub speed: f32,
    /// Агент остановлен (`stop_movement`), destination сохраняется
    pub stopped: bool,
    pub path_pending: bool,
    pub remaining_distance: f32,
    /// Поворачивать Transform по направлению движения
    pub update_rotation: bool,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            speed: 2.0, // 2 m/s - базовая скорость ходьбы
            stopped: true,
            path_pending: false,
            remaining_distance: 0.0,
            update_rotation: true,
        }
    }
}

impl NavAgent {
    pub fn set_destination(&mut self, position: Vec3) {
        if self.destination != Some(position) {
            self.path_pending = true;
        }
        self.destination = Some(position);
        self.stopped = false;
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_moving(&self) -> bool {
        !self.stopped && self.destination.is_some()
    }
}
