//! Enemy AI config: тюнинг параметры + загрузка/валидация

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::ai::vision::FULL_FIELD_OF_VIEW;

/// Ошибки загрузки конфига
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("`{field}` must be a finite non-negative number, got {value}")]
    InvalidValue { field: &'static str, value: f32 },

    #[error("`field_of_view_degrees` must be in (0, 360], got {0}")]
    InvalidFieldOfView(f32),
}

/// Параметры enemy AI (неизменяемы после создания behavior)
///
/// Значения по умолчанию: обычный патрульный (10м обнаружение, 3м атака, FOV 90°).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bevy::prelude::Reflect)]
#[serde(default)]
pub struct EnemyConfig {
    /// Радиус обнаружения (chase), метры
    pub detection_range: f32,
    /// Радиус атаки, метры (по конвенции ≤ detection_range)
    pub attack_range: f32,
    /// Ширина конуса зрения, градусы
    pub field_of_view_degrees: f32,
    /// Дальность луча зрения, метры
    pub vision_distance: f32,
    /// Пауза на patrol точке, секунды
    pub patrol_pause_seconds: f32,
    /// Скорость поворота между patrol точками, градусы/сек
    pub turn_rate_degrees_per_second: f32,
    /// Скорость преследования, м/с
    pub chase_speed: f32,
    /// Скорость патруля, м/с
    pub patrol_speed: f32,
    /// Grace delay после потери цели (0 = сразу в патруль), секунды
    pub lose_target_grace_seconds: f32,
    /// Зрение 360° пока преследуем
    pub full_vision_while_chasing: bool,
    /// Высота глаз над позицией агента, метры
    pub eye_height: f32,
    /// Порог "дошли до точки" для remaining distance, метры
    pub arrival_threshold: f32,
    /// Скорость доводки facing к цели при chase/attack (доля ошибки в секунду)
    pub face_target_rate: f32,
    /// Допуск завершения Turning, градусы
    pub heading_tolerance_degrees: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            detection_range: 10.0,
            attack_range: 3.0,
            field_of_view_degrees: 90.0,
            vision_distance: 15.0,
            patrol_pause_seconds: 2.0,
            turn_rate_degrees_per_second: 120.0,
            chase_speed: 4.5,
            patrol_speed: 2.0,
            lose_target_grace_seconds: 3.0,
            full_vision_while_chasing: true,
            eye_height: 1.5,
            arrival_threshold: 0.5,
            face_target_rate: 5.0,
            heading_tolerance_degrees: 1.0,
        }
    }
}

impl EnemyConfig {
    /// Парсит JSON (отсутствующие поля → default) и валидирует
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EnemyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Проверяет что все числа конечны и неотрицательны, FOV в (0, 360]
    ///
    /// attack_range > detection_range не ошибка (attack проверяется первым),
    /// только warning в лог.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("detection_range", self.detection_range),
            ("attack_range", self.attack_range),
            ("vision_distance", self.vision_distance),
            ("patrol_pause_seconds", self.patrol_pause_seconds),
            ("turn_rate_degrees_per_second", self.turn_rate_degrees_per_second),
            ("chase_speed", self.chase_speed),
            ("patrol_speed", self.patrol_speed),
            ("lose_target_grace_seconds", self.lose_target_grace_seconds),
            ("eye_height", self.eye_height),
            ("arrival_threshold", self.arrival_threshold),
            ("face_target_rate", self.face_target_rate),
            ("heading_tolerance_degrees", self.heading_tolerance_degrees),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        let fov = self.field_of_view_degrees;
        if !fov.is_finite() || fov <= 0.0 || fov > FULL_FIELD_OF_VIEW {
            return Err(ConfigError::InvalidFieldOfView(fov));
        }

        if self.attack_range > self.detection_range {
            crate::logger::log_warning(&format!(
                "EnemyConfig: attack_range ({}) > detection_range ({}), attack wins the tie-break",
                self.attack_range, self.detection_range
            ));
        }

        Ok(())
    }
}
