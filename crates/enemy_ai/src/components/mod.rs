//! ECS Components для host слоя
//!
//! Организация по доменам:
//! - actor: Player marker, Health
//! - movement: NavAgent (destination, speed, arrival данные)
//! - animation: AnimationState (isWalking / isRunning / isAttacking + триггеры)

pub mod actor;
pub mod animation;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use animation::*;
pub use movement::*;
