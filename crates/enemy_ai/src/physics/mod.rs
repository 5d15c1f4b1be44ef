//! Physics module (headless)
//!
//! - raycast: аналитический raycast по rapier коллайдерам (ball / cuboid)
//! - movement: steering NavAgent'ов к destination

pub mod movement;
pub mod raycast;

// Re-export основных типов
pub use movement::{steer_nav_agents, NavigationPlugin};
pub use raycast::{ColliderShape, SceneCollider, SceneColliders, TargetOcclusion};
