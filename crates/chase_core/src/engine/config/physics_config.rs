//! Actor physics configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{adversary, motion, player};

/// Player motion parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerPhysicsConfig {
    /// 중력 (기본: 0.65)
    pub gravity: f32,
    /// 점프 초기 속도, 음수 = 위 (기본: -15.0)
    pub jump_force: f32,
    /// 가속 기준 속도 (기본: 4.5)
    pub speed: f32,
    /// 최대 수평 속도 (기본: 7.0)
    pub max_speed: f32,
    /// 입력 없을 때 유지 비율 (기본: 0.87)
    pub friction: f32,
    pub max_fall_speed: f32,
}

impl Default for PlayerPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: player::GRAVITY,
            jump_force: player::JUMP_FORCE,
            speed: player::SPEED,
            max_speed: player::MAX_SPEED,
            friction: player::FRICTION,
            max_fall_speed: motion::MAX_FALL_SPEED,
        }
    }
}

/// Adversary motion parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdversaryPhysicsConfig {
    /// 중력 (기본: 0.2)
    pub gravity: f32,
    /// 점프 초기 속도 (기본: -14.0)
    pub jump_force: f32,
    /// 기본 추격 속도 (기본: 3.2)
    pub base_speed: f32,
    /// Persistent multiplier (difficulty); the slowdown modifier stacks on top
    pub speed_multiplier: f32,
    /// 레벨 위(y < 0)에서 하강 속도 (기본: 2)
    pub descend_rate: i32,
    /// 이 거리 이하면 정지 (기본: 10.0)
    pub arrive_deadzone: f32,
    /// 감속 효과 배율 (기본: 0.5)
    pub slowdown_multiplier: f32,
    pub max_fall_speed: f32,
}

impl Default for AdversaryPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: adversary::GRAVITY,
            jump_force: adversary::JUMP_FORCE,
            base_speed: adversary::BASE_SPEED,
            speed_multiplier: 1.0,
            descend_rate: adversary::DESCEND_RATE,
            arrive_deadzone: adversary::ARRIVE_DEADZONE,
            slowdown_multiplier: adversary::SLOWDOWN_MULTIPLIER,
            max_fall_speed: motion::MAX_FALL_SPEED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PhysicsConfig {
    pub player: PlayerPhysicsConfig,
    pub adversary: AdversaryPhysicsConfig,
}
