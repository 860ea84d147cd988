//! Session Statistics / Zone Bias
//!
//! Historical player positions are bucketed into fixed-width horizontal
//! zones. The adversary gets a small speed bonus near the center of the
//! most-visited zone. No data means no bonus anywhere.

use std::collections::BTreeMap;

use crate::engine::config::ZoneConfig;
use crate::models::{parse_player_positions, SessionRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneBias {
    top_zone: Option<i64>,
    zone_counts: BTreeMap<i64, u32>,
    zone_width: f32,
    radius: f32,
    bonus: f32,
}

impl Default for ZoneBias {
    /// Empty bias: zero bonus everywhere.
    fn default() -> Self {
        Self::empty(&ZoneConfig::default(), crate::engine::physics_constants::level::WIDTH as f32)
    }
}

impl ZoneBias {
    pub fn empty(cfg: &ZoneConfig, level_width: f32) -> Self {
        Self {
            top_zone: None,
            zone_counts: BTreeMap::new(),
            zone_width: cfg.zone_width(level_width),
            radius: cfg.radius,
            bonus: cfg.bonus,
        }
    }

    /// Histogram `positions` by `floor(x / zone_width)`.
    pub fn from_positions<I>(positions: I, cfg: &ZoneConfig, level_width: f32) -> Self
    where
        I: IntoIterator<Item = [f32; 2]>,
    {
        let mut bias = Self::empty(cfg, level_width);
        if bias.zone_width <= 0.0 {
            return bias;
        }

        for [x, _] in positions {
            if !x.is_finite() {
                continue;
            }
            let zone = (x / bias.zone_width).floor() as i64;
            *bias.zone_counts.entry(zone).or_insert(0) += 1;
        }

        // Ties resolve to the lowest zone index (ascending iteration, strict >)
        let mut best: Option<(i64, u32)> = None;
        for (&zone, &count) in &bias.zone_counts {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((zone, count));
            }
        }
        bias.top_zone = best.map(|(zone, _)| zone);
        bias
    }

    /// Most-visited zone, if any positions were recorded.
    pub fn top_zone(&self) -> Option<i64> {
        self.top_zone
    }

    pub fn zone_counts(&self) -> &BTreeMap<i64, u32> {
        &self.zone_counts
    }

    pub fn has_statistics(&self) -> bool {
        self.top_zone.is_some()
    }

    pub fn zone_width(&self) -> f32 {
        self.zone_width
    }

    pub fn zone_center(&self) -> Option<f32> {
        self.top_zone.map(|z| z as f32 * self.zone_width + self.zone_width / 2.0)
    }

    /// Speed bonus at `actor_x`: the configured bonus within `radius` of the
    /// favourite zone's center, else 0.
    pub fn bonus(&self, actor_x: f32) -> f32 {
        match self.zone_center() {
            Some(center) if (actor_x - center).abs() < self.radius => self.bonus,
            _ => 0.0,
        }
    }
}

/// Aggregate every record's `player_positions` into a zone bias.
pub fn load_zone_bias(records: &[SessionRecord], cfg: &ZoneConfig, level_width: f32) -> ZoneBias {
    ZoneBias::from_positions(
        records.iter().flat_map(|r| r.player_positions.iter().copied()),
        cfg,
        level_width,
    )
}

/// Lenient loader for a raw sessions document.
///
/// Missing or malformed statistics are not an error for the core: they
/// degrade to an empty bias.
pub fn load_zone_bias_from_json(json: &str, cfg: &ZoneConfig, level_width: f32) -> ZoneBias {
    match parse_player_positions(json) {
        Ok(per_record) => {
            let bias = ZoneBias::from_positions(per_record.into_iter().flatten(), cfg, level_width);
            tracing::debug!(
                top_zone = ?bias.top_zone(),
                zones = bias.zone_counts().len(),
                "zone bias loaded"
            );
            bias
        }
        Err(err) => {
            tracing::warn!(error = %err, "session statistics unavailable, zone bias disabled");
            ZoneBias::empty(cfg, level_width)
        }
    }
}
