//! Enemy AI components

pub mod config;
pub mod fsm;


// Re-export all components
pub use config::*;
pub use fsm::*;
