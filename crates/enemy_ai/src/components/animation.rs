//! Animation компоненты: состояние animator параметров

use bevy::prelude::*;

use crate::ai::{AnimationFlag, AnimationTrigger};

/// Animator параметры актора (пишет AI core, читает визуальный слой)
///
/// `pending_triggers` - one-shot триггеры, визуальный слой их забирает
/// через `drain_triggers`.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationState {
    pub is_walking: bool,
    pub is_running: bool,
    pub is_attacking: bool,
    pub pending_triggers: Vec<AnimationTrigger>,
}

impl AnimationState {
    pub fn set_flag(&mut self, flag: AnimationFlag, value: bool) {
        match flag {
            AnimationFlag::Walking => self.is_walking = value,
            AnimationFlag::Running => self.is_running = value,
            AnimationFlag::Attacking => self.is_attacking = value,
        }
    }

    pub fn flag(&self, flag: AnimationFlag) -> bool {
        match flag {
            AnimationFlag::Walking => self.is_walking,
            AnimationFlag::Running => self.is_running,
            AnimationFlag::Attacking => self.is_attacking,
        }
    }

    pub fn trigger(&mut self, trigger: AnimationTrigger) {
        self.pending_triggers.push(trigger);
    }

    pub fn drain_triggers(&mut self) -> Vec<AnimationTrigger> {
        std::mem::take(&mut self.pending_triggers)
    }
}
