//! EnemyBehavior - tick-driven FSM врага
//!
//! Patrolling → Turning → Pausing → Patrolling (патрульный цикл)
//! Chasing ⇄ Attacking (цель видима), Chasing → LosingTarget → Patrolling
//! Dead - терминальное, только через `die()`
//!
//! Архитектура:
//! - Core не владеет ни движением, ни анимацией, ни физикой
//! - Host каждый тик передаёт `Perception` (позиции + occlusion query)
//!   и реализацию `Locomotion` + `Presentation`
//! - Все ожидания (поворот, пауза, grace delay) - countdown в `EnemyState`
//!
//! Приоритет: attack проверяется раньше chase (даже если обе дистанции подходят).

use bevy::prelude::*;

use crate::ai::components::{EnemyConfig, EnemyState};
use crate::ai::heading::{flatten, heading_between, rotate_towards, signed_yaw_delta};
use crate::ai::patrol::PatrolCursor;
use crate::ai::vision::{OcclusionQuery, VisibilityProbe, FULL_FIELD_OF_VIEW};

/// Анимационные флаги (bool параметры animator'а)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationFlag {
    Walking,
    Running,
    Attacking,
}

impl AnimationFlag {
    /// Имя параметра в animator'е
    pub fn name(&self) -> &'static str {
        match self {
            AnimationFlag::Walking => "isWalking",
            AnimationFlag::Running => "isRunning",
            AnimationFlag::Attacking => "isAttacking",
        }
    }
}

/// One-shot триггеры анимации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationTrigger {
    Die,
}

impl AnimationTrigger {
    pub fn name(&self) -> &'static str {
        match self {
            AnimationTrigger::Die => "Die",
        }
    }
}

/// Навигационный агент host'а (navmesh agent или его headless замена)
///
/// `set_destination` также снимает агента с паузы после `stop_movement`.
pub trait Locomotion {
    fn set_destination(&mut self, position: Vec3);
    fn stop_movement(&mut self);
    fn set_speed(&mut self, speed: f32);
    /// Горизонтальный unit vector, куда смотрит агент
    fn set_facing(&mut self, direction: Vec3);
    /// Оставшаяся дистанция до destination
    fn remaining_distance(&self) -> f32;
    /// Путь ещё пересчитывается (arrival check пропускается)
    fn path_pending(&self) -> bool;
    /// Агент сам поворачивается по ходу движения. Выключается пока core
    /// сам доворачивает facing к цели (chase / attack).
    fn set_auto_rotation(&mut self, _enabled: bool) {}
}

/// Animator host'а
pub trait Presentation {
    fn set_animation_flag(&mut self, flag: AnimationFlag, value: bool);
    fn trigger_animation(&mut self, trigger: AnimationTrigger);
}

/// Perception snapshot - пересобирается host'ом каждый тик
pub struct Perception<'a> {
    pub self_position: Vec3,
    pub self_forward: Vec3,
    /// `None` - цели нет (враг работает как чистый патрульный)
    pub target_position: Option<Vec3>,
    pub occlusion: &'a dyn OcclusionQuery,
}

/// Что враг знает о цели в этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
enum Sighting {
    /// Не видим / вне дистанций / цели нет
    None,
    /// Видим и в attack range
    Attack(Vec3),
    /// Видим и в detection range (но не в attack range)
    Chase(Vec3),
}

/// Enemy behavior core (один на агента, живёт всю жизнь агента)
#[derive(Component, Debug, Clone)]
pub struct EnemyBehavior {
    config: EnemyConfig,
    cursor: PatrolCursor,
    state: EnemyState,
    /// Начальная patrol команда уже выдана
    started: bool,
    /// Damage signal, обрабатывается в следующем тике
    pending_damage: bool,
}

impl EnemyBehavior {
    pub fn new(config: EnemyConfig, waypoints: Vec<Vec3>) -> Self {
        Self {
            config,
            cursor: PatrolCursor::new(waypoints),
            state: EnemyState::Patrolling,
            started: false,
            pending_damage: false,
        }
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    pub fn cursor(&self) -> &PatrolCursor {
        &self.cursor
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_dead()
    }

    /// Выдаёт первую patrol команду (идём к waypoint 0)
    ///
    /// Вызывается автоматически первым `tick`, повторные вызовы - no-op.
    pub fn start<H: Locomotion + Presentation>(&mut self, host: &mut H) {
        if self.started || self.is_dead() {
            return;
        }
        self.started = true;
        self.resume_patrol(host);
    }

    /// Damage signal: в следующем тике враг переходит в Chasing
    pub fn notify_damaged(&mut self) {
        if self.is_dead() {
            return;
        }
        self.pending_damage = true;
    }

    /// Death signal: немедленно Dead, все таймеры сброшены
    pub fn die<H: Locomotion + Presentation>(&mut self, host: &mut H) {
        if self.is_dead() {
            return;
        }
        self.pending_damage = false;
        self.transition(EnemyState::Dead);
        host.stop_movement();
        host.trigger_animation(AnimationTrigger::Die);
    }

    /// Один тик симуляции
    pub fn tick<H: Locomotion + Presentation>(&mut self, dt: f32, perception: &Perception, host: &mut H) {
        if self.is_dead() {
            return;
        }
        let dt = dt.max(0.0);

        self.start(host);

        if std::mem::take(&mut self.pending_damage) {
            match perception.target_position {
                Some(target) => {
                    crate::logger::log_info("enemy: took damage → chasing attacker");
                    self.chase(target, dt, perception, host);
                    return;
                }
                None => {
                    crate::logger::log_warning("enemy: took damage but there is no target to chase");
                }
            }
        }

        match self.sight_target(perception) {
            Sighting::Attack(target) => self.attack(target, dt, perception, host),
            Sighting::Chase(target) => self.chase(target, dt, perception, host),
            Sighting::None => self.update_without_target(dt, perception, host),
        }
    }

    /// Range check, потом FOV + raycast (raycast только если цель достаточно близко)
    fn sight_target(&self, perception: &Perception) -> Sighting {
        let Some(target) = perception.target_position else {
            return Sighting::None;
        };

        let distance = perception.self_position.distance(target);
        let in_attack_range = distance <= self.config.attack_range;
        let in_detection_range = distance <= self.config.detection_range;
        if !in_attack_range && !in_detection_range {
            return Sighting::None;
        }

        let fov = if self.state.is_chasing() && self.config.full_vision_while_chasing {
            FULL_FIELD_OF_VIEW
        } else {
            self.config.field_of_view_degrees
        };

        let probe = VisibilityProbe::new(perception.occlusion, self.config.eye_height);
        let visible = probe.can_see(
            perception.self_position,
            perception.self_forward,
            target,
            fov,
            self.config.vision_distance,
        );

        match (visible, in_attack_range) {
            (false, _) => Sighting::None,
            (true, true) => Sighting::Attack(target),
            (true, false) => Sighting::Chase(target),
        }
    }

    fn attack<H: Locomotion + Presentation>(&mut self, target: Vec3, dt: f32, perception: &Perception, host: &mut H) {
        if self.state != EnemyState::Attacking {
            self.transition(EnemyState::Attacking);
            host.stop_movement();
            host.set_auto_rotation(false);
            host.set_animation_flag(AnimationFlag::Walking, false);
            host.set_animation_flag(AnimationFlag::Running, false);
            host.set_animation_flag(AnimationFlag::Attacking, true);
        }
        self.face_towards(target, dt, perception, host);
    }

    fn chase<H: Locomotion + Presentation>(&mut self, target: Vec3, dt: f32, perception: &Perception, host: &mut H) {
        if self.state != EnemyState::Chasing {
            self.transition(EnemyState::Chasing);
            host.set_speed(self.config.chase_speed);
            host.set_auto_rotation(false);
            host.set_animation_flag(AnimationFlag::Attacking, false);
            host.set_animation_flag(AnimationFlag::Walking, false);
            host.set_animation_flag(AnimationFlag::Running, true);
        }
        host.set_destination(target);
        self.face_towards(target, dt, perception, host);
    }

    fn update_without_target<H: Locomotion + Presentation>(&mut self, dt: f32, perception: &Perception, host: &mut H) {
        match self.state {
            EnemyState::Attacking => self.resume_patrol(host),

            EnemyState::Chasing => {
                if self.config.lose_target_grace_seconds > 0.0 {
                    // Продолжаем к последней известной позиции, новых chase команд нет
                    self.transition(EnemyState::LosingTarget {
                        remaining: self.config.lose_target_grace_seconds,
                    });
                } else {
                    self.resume_patrol(host);
                }
            }

            EnemyState::LosingTarget { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.resume_patrol(host);
                } else {
                    self.state = EnemyState::LosingTarget { remaining };
                }
            }

            EnemyState::Patrolling => self.patrol(perception, host),

            EnemyState::Turning { heading } => self.turn(heading, dt, perception, host),

            EnemyState::Pausing { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.cursor.advance();
                    self.resume_patrol(host);
                } else {
                    self.state = EnemyState::Pausing { remaining };
                }
            }

            EnemyState::Dead => {}
        }
    }

    /// Arrival check: дошли до текущей точки → стоп, поворот к следующей
    fn patrol<H: Locomotion + Presentation>(&mut self, perception: &Perception, host: &mut H) {
        if self.cursor.is_empty() {
            return;
        }
        if host.path_pending() || host.remaining_distance() >= self.config.arrival_threshold {
            return;
        }

        host.stop_movement();
        host.set_animation_flag(AnimationFlag::Walking, false);

        let next_heading = self
            .cursor
            .peek_next()
            .and_then(|next| heading_between(perception.self_position, next));

        match next_heading {
            Some(heading) => self.transition(EnemyState::Turning { heading }),
            // Следующая точка совпадает с текущей позицией - поворачиваться некуда
            None => self.transition(EnemyState::Pausing {
                remaining: self.config.patrol_pause_seconds,
            }),
        }
    }

    /// Поворот с turn_rate, snap при ошибке ≤ heading_tolerance
    ///
    /// Нулевой turn rate: мгновенный поворот. Нулевой dt: поворот стоит на месте.
    fn turn<H: Locomotion + Presentation>(&mut self, heading: Vec3, dt: f32, perception: &Perception, host: &mut H) {
        let turn_rate = self.config.turn_rate_degrees_per_second;
        if turn_rate > 0.0 && dt <= 0.0 {
            return;
        }
        let max_step = turn_rate.to_radians() * dt;

        let snapped = match flatten(perception.self_forward) {
            Some(current) if max_step > 0.0 => {
                let next = rotate_towards(current, heading, max_step);
                let error = signed_yaw_delta(next, heading).abs().to_degrees();
                if error <= self.config.heading_tolerance_degrees {
                    true
                } else {
                    host.set_facing(next);
                    false
                }
            }
            // Нулевой turn rate или вертикальный forward - поворачиваем мгновенно
            _ => true,
        };

        if snapped {
            host.set_facing(heading);
            self.transition(EnemyState::Pausing {
                remaining: self.config.patrol_pause_seconds,
            });
        }
    }

    /// Возврат в патруль: speed, destination = текущая точка, walking
    fn resume_patrol<H: Locomotion + Presentation>(&mut self, host: &mut H) {
        if self.state != EnemyState::Patrolling {
            self.transition(EnemyState::Patrolling);
        }

        host.set_animation_flag(AnimationFlag::Attacking, false);
        host.set_animation_flag(AnimationFlag::Running, false);
        host.set_auto_rotation(true);

        match self.cursor.current() {
            Some(waypoint) => {
                host.set_speed(self.config.patrol_speed);
                host.set_destination(waypoint);
                host.set_animation_flag(AnimationFlag::Walking, true);
            }
            None => {
                host.stop_movement();
                host.set_animation_flag(AnimationFlag::Walking, false);
            }
        }
    }

    /// Плавный доворот к цели (доля ошибки face_target_rate * dt, не snap)
    fn face_towards<H: Locomotion>(&self, target: Vec3, dt: f32, perception: &Perception, host: &mut H) {
        let Some(desired) = heading_between(perception.self_position, target) else {
            return;
        };
        let Some(current) = flatten(perception.self_forward) else {
            host.set_facing(desired);
            return;
        };

        let fraction = (self.config.face_target_rate * dt).clamp(0.0, 1.0);
        if fraction <= 0.0 {
            return;
        }
        let error = signed_yaw_delta(current, desired).abs();
        host.set_facing(rotate_towards(current, desired, error * fraction));
    }

    fn transition(&mut self, next: EnemyState) {
        crate::logger::log_info(&format!("enemy: {} → {}", self.state.name(), next.name()));
        self.state = next;
    }
}
