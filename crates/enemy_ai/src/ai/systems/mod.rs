//! AI systems (ECS host для EnemyBehavior)

pub mod behavior;
pub mod reactions;

// Re-export all systems
pub use behavior::*;
pub use reactions::*;
