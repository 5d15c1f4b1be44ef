//! Enemy FSM состояния

use bevy::prelude::*;

/// Состояние enemy behavior (ровно одно в каждый момент)
///
/// Переходы - единственный способ изменить состояние (см. `EnemyBehavior::tick`).
/// Все таймеры живут внутри вариантов: countdown уменьшается на `dt` каждый тик.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum EnemyState {
    /// Patrolling - идём к текущей patrol точке, цели не видим
    Patrolling,

    /// Turning - поворот к следующей patrol точке (курсор ещё НЕ сдвинут)
    Turning {
        /// Целевой горизонтальный heading (unit vector)
        heading: Vec3,
    },

    /// Pausing - стоим на месте перед следующим отрезком патруля
    Pausing {
        /// Оставшееся время паузы (секунды)
        remaining: f32,
    },

    /// Chasing - видим цель в detection range, бежим к ней
    Chasing,

    /// LosingTarget - под-состояние Chasing: цель пропала из виду,
    /// ждём grace delay без новых chase команд
    LosingTarget {
        /// Оставшееся время до возврата в патруль (секунды)
        remaining: f32,
    },

    /// Attacking - цель в attack range и видима, стоим и бьём
    Attacking,

    /// Dead - терминальное состояние, тики игнорируются
    Dead,
}

impl Default for EnemyState {
    fn default() -> Self {
        Self::Patrolling
    }
}

impl EnemyState {
    /// Chasing или его под-состояние LosingTarget
    pub fn is_chasing(&self) -> bool {
        matches!(self, EnemyState::Chasing | EnemyState::LosingTarget { .. })
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, EnemyState::Dead)
    }

    /// Patrol-цикл: Patrolling / Turning / Pausing
    pub fn is_patrol_cycle(&self) -> bool {
        matches!(
            self,
            EnemyState::Patrolling | EnemyState::Turning { .. } | EnemyState::Pausing { .. }
        )
    }

    /// Короткое имя для логов и snapshot'ов
    pub fn name(&self) -> &'static str {
        match self {
            EnemyState::Patrolling => "Patrolling",
            EnemyState::Turning { .. } => "Turning",
            EnemyState::Pausing { .. } => "Pausing",
            EnemyState::Chasing => "Chasing",
            EnemyState::LosingTarget { .. } => "LosingTarget",
            EnemyState::Attacking => "Attacking",
            EnemyState::Dead => "Dead",
        }
    }
}
