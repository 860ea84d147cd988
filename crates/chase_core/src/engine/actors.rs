//! Player and adversary
//!
//! Both share [`ActorBody`] and the physics step in
//! [`crate::engine::actor_physics`]. They differ only in where control comes
//! from: the player reads a [`PlayerInput`], the adversary asks its brain.

use serde::{Deserialize, Serialize};

use crate::engine::actor_physics::{is_supported, step_body, ActorBody, Facing};
use crate::engine::config::{AdversaryPhysicsConfig, PlayerPhysicsConfig, PursuitConfig};
use crate::engine::decision_state::{DecisionState, SlowdownModifier};
use crate::engine::items::ItemCounts;
use crate::engine::physics_constants::{adversary, player};
use crate::engine::pursuit::{decide, AdversaryBrain, PursuitIntent};
use crate::engine::types::Rect;
use crate::engine::zone_bias::ZoneBias;

/// Player intent for one tick, already translated from raw devices upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: ActorBody,
    pub score: u32,
    /// 0..=100, drains every tick
    pub energy: f32,
    pub items: ItemCounts,
    /// Ticks of coffee speed boost left
    pub coffee_timer: u32,
    /// Set on the tick a jump starts
    pub just_jumped: bool,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            body: ActorBody::new(x, y, player::SIZE, player::SIZE),
            score: 0,
            energy: player::INITIAL_ENERGY,
            items: ItemCounts::default(),
            coffee_timer: 0,
            just_jumped: false,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.body.vx, self.body.vy)
    }

    pub fn boost_coffee(&mut self, ticks: u32) {
        self.coffee_timer = ticks;
    }

    /// Apply input, then the shared physics step.
    pub fn update(
        &mut self,
        input: PlayerInput,
        platforms: &[Rect],
        cfg: &PlayerPhysicsConfig,
        coffee_speed_mult: f32,
        level_width: i32,
    ) {
        self.just_jumped = false;

        let speed_mult = if self.coffee_timer > 0 { coffee_speed_mult } else { 1.0 };
        self.coffee_timer = self.coffee_timer.saturating_sub(1);
        let accel = cfg.speed * speed_mult * 0.5;
        let max_speed = cfg.max_speed * speed_mult;

        let body = &mut self.body;
        if input.left {
            body.vx = (body.vx - accel).max(-max_speed);
            body.facing = Facing::Left;
        } else if input.right {
            body.vx = (body.vx + accel).min(max_speed);
            body.facing = Facing::Right;
        } else {
            body.vx *= cfg.friction;
        }

        if input.jump && body.grounded {
            body.vy = cfg.jump_force;
            body.grounded = false;
            self.just_jumped = true;
        }

        step_body(body, platforms, cfg.gravity, cfg.max_fall_speed, level_width);

        self.energy = (self.energy - player::ENERGY_DRAIN_PER_TICK).clamp(0.0, 100.0);
    }

    /// Back to spawn; score and items are kept across lives.
    pub fn respawn(&mut self, spawn: (i32, i32)) {
        self.body.reset_to(spawn.0, spawn.1);
        self.coffee_timer = 0;
        self.energy = player::INITIAL_ENERGY;
    }
}

/// The pursuer.
#[derive(Debug, Clone)]
pub struct Adversary {
    pub body: ActorBody,
    pub brain: AdversaryBrain,
    pub state: DecisionState,
    pub slowdown: SlowdownModifier,
    /// Speed multiplier used on the most recent tick (bonus and slowdown included)
    pub effective_multiplier: f32,
    pub last_intent: Option<PursuitIntent>,
}

impl Adversary {
    pub fn new(x: i32, y: i32, cfg: PursuitConfig, zone_bias: ZoneBias) -> Self {
        Self {
            body: ActorBody::new(x, y, adversary::SIZE, adversary::SIZE),
            brain: AdversaryBrain::new(cfg, zone_bias),
            state: DecisionState::for_position(y),
            slowdown: SlowdownModifier::default(),
            effective_multiplier: 1.0,
            last_intent: None,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    /// Record the player's post-update kinematics. Runs in every state.
    pub fn observe(&mut self, player: &Player) {
        self.brain.observe(player.rect(), player.velocity());
    }

    pub fn slow_down(&mut self, ticks: u32) {
        self.slowdown.trigger(ticks);
    }

    /// Decide and move for one tick.
    ///
    /// Returns the intent, or `None` while descending into the level.
    pub fn update(
        &mut self,
        player: &Player,
        platforms: &[Rect],
        cfg: &AdversaryPhysicsConfig,
        level_width: i32,
    ) -> Option<PursuitIntent> {
        let slow = self.slowdown.multiplier(cfg.slowdown_multiplier);
        let intent = if self.body.rect.y < 0 {
            self.state = DecisionState::Descend;
            self.body.vx = 0.0;
            self.body.rect.y += cfg.descend_rate;
            self.effective_multiplier = cfg.speed_multiplier * slow;
            None
        } else {
            self.state = DecisionState::Chase;
            Some(self.chase(player, platforms, cfg, slow, level_width))
        };
        self.slowdown.tick();
        self.last_intent = intent;
        intent
    }

    fn chase(
        &mut self,
        player: &Player,
        platforms: &[Rect],
        cfg: &AdversaryPhysicsConfig,
        slow: f32,
        level_width: i32,
    ) -> PursuitIntent {
        let intent = decide(&mut self.brain, &self.body.rect, player.rect(), player.velocity(), platforms);

        self.effective_multiplier = (cfg.speed_multiplier + intent.speed_bonus) * slow;
        let speed = cfg.base_speed * self.effective_multiplier;

        let body = &mut self.body;
        if intent.horizontal_delta.abs() > cfg.arrive_deadzone {
            if intent.horizontal_delta > 0.0 {
                body.vx = speed;
                body.facing = Facing::Right;
            } else {
                body.vx = -speed;
                body.facing = Facing::Left;
            }
        } else {
            body.vx = 0.0;
        }

        if intent.should_jump && is_supported(&body.rect, platforms) {
            body.vy = cfg.jump_force;
        }

        step_body(body, platforms, cfg.gravity, cfg.max_fall_speed, level_width);
        intent
    }

    /// Back to spawn with a fresh brain history; slowdown is cleared.
    pub fn respawn(&mut self, spawn: (i32, i32)) {
        self.body.reset_to(spawn.0, spawn.1);
        self.brain.reset();
        self.slowdown.clear();
        self.state = DecisionState::for_position(spawn.1);
        self.effective_multiplier = 1.0;
        self.last_intent = None;
    }
}
