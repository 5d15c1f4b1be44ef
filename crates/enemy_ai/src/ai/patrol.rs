//! Patrol cursor - циклический обход waypoints
//!
//! Пустой список - валидная конфигурация: агент стоит на месте,
//! все методы возвращают `None` ("нет destination").

use bevy::prelude::*;

/// Упорядоченный список patrol точек + текущий индекс
///
/// Инвариант: `index < waypoints.len()` (или 0 при пустом списке).
#[derive(Debug, Clone, PartialEq, Default, Reflect)]
pub struct PatrolCursor {
    waypoints: Vec<Vec3>,
    index: usize,
}

impl PatrolCursor {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self {
            waypoints,
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Текущая patrol точка
    pub fn current(&self) -> Option<Vec3> {
        self.waypoints.get(self.index).copied()
    }

    /// Следующая точка без сдвига курсора (нужна для Turning фазы)
    pub fn peek_next(&self) -> Option<Vec3> {
        if self.waypoints.is_empty() {
            return None;
        }
        self.waypoints.get((self.index + 1) % self.waypoints.len()).copied()
    }

    /// Сдвигает курсор: `index = (index + 1) mod len`
    pub fn advance(&mut self) -> Option<Vec3> {
        if self.waypoints.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.waypoints.len();
        self.current()
    }
}
