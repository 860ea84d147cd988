//! ChaseSim: one level of the chase, advanced one tick at a time.
//!
//! ## Tick order
//! Fixed, and load-bearing: the adversary decides tick N from the player's
//! post-update state of tick N, not N-1.
//!
//! 1. round timer check (timeout costs a life)
//! 2. player physics
//! 3. adversary observes the player
//! 4. adversary decides
//! 5. adversary physics
//! 6. collectible pickups
//! 7. player vs adversary
//! 8. player vs exit
//! 9. telemetry (sampled on the positions checked in 7/8, before any respawn)

use serde::{Deserialize, Serialize};

use crate::engine::actors::{Adversary, Player, PlayerInput};
use crate::engine::config::EngineConfig;
use crate::engine::items::{ItemEffect, ItemKind};
use crate::engine::level::Level;
use crate::engine::telemetry::{TelemetryRecorder, TelemetrySnapshot};
use crate::engine::threat_model::{evaluate, ThreatReport};
use crate::engine::timestep::{secs_to_ticks, ticks_to_secs};
use crate::engine::types::Rect;
use crate::engine::zone_bias::ZoneBias;
use crate::error::{CoreError, Result};
use crate::models::{EventKind, Outcome, SessionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Playing,
    /// Exit reached on a non-final level
    LevelComplete,
    /// Exit reached on the final level
    Victory,
    /// Out of lives, or quit
    GameOver,
}

/// Why a life was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeLoss {
    Caught,
    Timeout,
}

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Ticks since level start
    pub tick: u64,
    pub state: RunState,
    pub threat: ThreatReport,
    pub collected: Vec<ItemKind>,
    pub life_lost: Option<LifeLoss>,
    /// Set on the tick the run (or level) ends
    pub outcome: Option<Outcome>,
}

impl TickReport {
    pub fn is_terminal(&self) -> bool {
        self.state != RunState::Playing
    }
}

pub struct ChaseSim {
    cfg: EngineConfig,
    level: Level,
    platforms: Vec<Rect>,
    player: Player,
    adversary: Adversary,
    telemetry: TelemetryRecorder,
    session: SessionRecord,
    lives: u32,
    /// Ticks since level start (session timestamps)
    tick: u64,
    /// Ticks since the current round started
    round_ticks: u64,
    round_limit: u64,
    state: RunState,
    last_threat: ThreatReport,
}

impl ChaseSim {
    pub fn new(level: Level, cfg: EngineConfig, zone_bias: ZoneBias) -> Self {
        let player = Player::new(level.player_spawn.0, level.player_spawn.1);
        let adversary = Adversary::new(
            level.adversary_spawn.0,
            level.adversary_spawn.1,
            cfg.pursuit.clone(),
            zone_bias,
        );
        let last_threat = evaluate(adversary.rect(), player.rect());

        tracing::info!(
            level = level.number,
            platforms = level.platforms.len(),
            collectibles = level.collectibles.len(),
            adaptive = adversary.brain.zone_bias().has_statistics(),
            "level loaded"
        );

        Self {
            platforms: level.platform_rects(),
            telemetry: TelemetryRecorder::new(cfg.session.sample_every_ticks),
            session: SessionRecord::new(cfg.session.player_name.clone(), level.number),
            lives: cfg.session.lives,
            tick: 0,
            round_ticks: 0,
            round_limit: secs_to_ticks(cfg.session.round_seconds),
            state: RunState::Playing,
            last_threat,
            level,
            player,
            adversary,
            cfg,
        }
    }

    /// Validated config + campus level `n`.
    pub fn for_level(number: u32, cfg: EngineConfig, zone_bias: ZoneBias) -> Result<Self> {
        cfg.validate()?;
        let level = Level::campus(number)?;
        Ok(Self::new(level, cfg, zone_bias))
    }

    /// Advance one tick. After a terminal transition this is a no-op.
    pub fn tick(&mut self, input: PlayerInput) -> TickReport {
        let mut report = TickReport {
            tick: self.tick,
            state: self.state,
            threat: self.last_threat.clone(),
            collected: Vec::new(),
            life_lost: None,
            outcome: None,
        };
        if self.state != RunState::Playing {
            return report;
        }

        if self.round_ticks >= self.round_limit {
            self.lose_life(LifeLoss::Timeout, &mut report);
            report.state = self.state;
            return report;
        }

        self.tick += 1;
        self.round_ticks += 1;
        report.tick = self.tick;
        let now = self.elapsed_secs();
        let width = self.level.width;

        self.player.update(
            input,
            &self.platforms,
            &self.cfg.physics.player,
            self.cfg.session.coffee_speed_mult,
            width,
        );
        self.adversary.observe(&self.player);
        self.adversary.update(&self.player, &self.platforms, &self.cfg.physics.adversary, width);

        self.collect_items(now, &mut report);

        let caught = self.player.rect().intersects(self.adversary.rect());
        let reached_exit = !caught && self.player.rect().intersects(&self.level.exit);

        self.last_threat = evaluate(self.adversary.rect(), self.player.rect());
        self.telemetry.record(
            now,
            self.adversary.state,
            &self.last_threat,
            self.player.rect().center(),
            &mut self.session,
        );
        report.threat = self.last_threat.clone();

        if caught {
            self.lose_life(LifeLoss::Caught, &mut report);
        } else if reached_exit {
            self.finish_level(&mut report);
        }

        report.state = self.state;
        report
    }

    fn collect_items(&mut self, now: f32, report: &mut TickReport) {
        let player_rect = self.player.body.rect;
        for item in self.level.collectibles.iter_mut() {
            if item.collected || !player_rect.intersects(&item.rect) {
                continue;
            }
            item.collected = true;
            self.player.score += item.kind.score_value();
            self.player.items.add(item.kind);
            match item.kind.effect() {
                ItemEffect::CoffeeEnergy => self.player.boost_coffee(self.cfg.session.coffee_ticks),
                ItemEffect::SlowAdversary => self.adversary.slow_down(self.cfg.session.slowdown_ticks),
                ItemEffect::Concentration | ItemEffect::Knowledge => {}
            }
            self.session.log_collect(now, item.kind);
            report.collected.push(item.kind);
            log::debug!("collected {:?} at {:.2}s, score {}", item.kind, now, self.player.score);
        }
    }

    fn lose_life(&mut self, cause: LifeLoss, report: &mut TickReport) {
        self.lives = self.lives.saturating_sub(1);
        report.life_lost = Some(cause);
        let now = self.elapsed_secs();

        tracing::info!(?cause, lives = self.lives, time = now, "life lost");

        if self.lives == 0 {
            let outcome = match cause {
                LifeLoss::Caught => Outcome::Caught,
                LifeLoss::Timeout => Outcome::Timeout,
            };
            let kind = match cause {
                LifeLoss::Caught => EventKind::Caught,
                LifeLoss::Timeout => EventKind::Timeout,
            };
            self.session.log_event(now, kind);
            self.end_run(RunState::GameOver, outcome, report);
            return;
        }

        self.player.respawn(self.level.player_spawn);
        self.adversary.respawn(self.level.adversary_spawn);
        // The clock only restarts after running out; a catch keeps it running.
        if cause == LifeLoss::Timeout {
            self.round_ticks = 0;
        }
    }

    fn finish_level(&mut self, report: &mut TickReport) {
        if self.level.is_final() {
            self.end_run(RunState::Victory, Outcome::Escaped, report);
        } else {
            let n = self.level.number;
            self.end_run(RunState::LevelComplete, Outcome::LevelComplete(n), report);
        }
    }

    fn end_run(&mut self, state: RunState, outcome: Outcome, report: &mut TickReport) {
        tracing::info!(
            level = self.level.number,
            outcome = %outcome.label(),
            score = self.player.score,
            time = self.elapsed_secs(),
            "run finished"
        );
        self.session.finalize(outcome.clone(), self.player.score, self.level.number);
        self.state = state;
        report.outcome = Some(outcome);
    }

    /// Abandon the run.
    pub fn quit(&mut self) {
        if self.state != RunState::Playing {
            return;
        }
        self.session.finalize(Outcome::Quit, self.player.score, self.level.number);
        self.state = RunState::GameOver;
    }

    /// Continue on the next campus level after [`RunState::LevelComplete`].
    ///
    /// Score, items and lives carry over; the finished level's session record
    /// is returned and a fresh one starts.
    pub fn advance_level(&mut self) -> Result<SessionRecord> {
        if self.state != RunState::LevelComplete {
            return Err(CoreError::InvalidState(format!("cannot advance from {:?}", self.state)));
        }
        let level = Level::campus(self.level.number + 1)?;

        self.player.respawn(level.player_spawn);
        self.adversary.respawn(level.adversary_spawn);
        self.platforms = level.platform_rects();
        self.telemetry.reset();
        self.tick = 0;
        self.round_ticks = 0;
        self.state = RunState::Playing;
        self.last_threat = evaluate(self.adversary.rect(), self.player.rect());

        let next = SessionRecord::new(self.cfg.session.player_name.clone(), level.number);
        self.level = level;

        tracing::info!(level = self.level.number, "advanced to next level");
        Ok(std::mem::replace(&mut self.session, next))
    }

    pub fn session(&self) -> &SessionRecord {
        &self.session
    }

    pub fn into_session(self) -> SessionRecord {
        self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn adversary(&self) -> &Adversary {
        &self.adversary
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn elapsed_secs(&self) -> f32 {
        ticks_to_secs(self.tick)
    }

    pub fn time_remaining_secs(&self) -> f32 {
        ticks_to_secs(self.round_limit.saturating_sub(self.round_ticks))
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::capture(&self.adversary, &self.player)
    }
}
