//! Level geometry
//!
//! Static platforms, collectibles, the exit and spawn points. Written once
//! at construction and read-only during simulation.

use serde::{Deserialize, Serialize};

use crate::engine::items::{Collectible, ItemKind, COLLECTIBLE_SIZE};
use crate::engine::physics_constants::{adversary, level, player};
use crate::engine::types::Rect;
use crate::error::{CoreError, Result};

pub const EXIT_RECT: Rect = Rect::new(2950, 590, 140, 160);

/// Render hint only; physics treats every platform the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Ground,
    Stone,
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub surface: SurfaceKind,
}

impl Platform {
    pub fn new(x: i32, y: i32, w: i32, h: i32, surface: SurfaceKind) -> Self {
        Self { rect: Rect::new(x, y, w, h), surface }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    pub width: i32,
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    pub exit: Rect,
    pub player_spawn: (i32, i32),
    pub adversary_spawn: (i32, i32),
}

impl Level {
    /// Bare level: just the given platforms, default spawns and exit.
    pub fn from_platforms(number: u32, width: i32, platforms: Vec<Platform>) -> Self {
        Self {
            number,
            width,
            platforms,
            collectibles: Vec::new(),
            exit: EXIT_RECT,
            player_spawn: player::SPAWN,
            adversary_spawn: adversary::SPAWN,
        }
    }

    /// Campus levels 1..=4. Level 2 (classroom) has its own easier layout.
    pub fn campus(number: u32) -> Result<Self> {
        if number == 0 || number > level::LEVEL_COUNT {
            return Err(CoreError::UnknownLevel { level: number });
        }

        let mut platforms =
            vec![Platform::new(0, level::GROUND_Y, level::WIDTH, level::GROUND_H, SurfaceKind::Ground)];

        let spawns: [(i32, i32, ItemKind); 9] = if number == 2 {
            for i in 0..4 {
                platforms.push(Platform::new(200 + i * 220, 620 - i * 55, 200, 28, SurfaceKind::Stone));
            }
            for i in 0..5 {
                let y = 540 - (i % 2) * 70;
                platforms.push(Platform::new(1000 + i * 250, y, 200, 26, SurfaceKind::Stone));
            }
            for i in 0..3 {
                platforms.push(Platform::new(1900 + i * 180, 530 - i * 60, 200, 28, SurfaceKind::Window));
            }
            platforms.push(Platform::new(2500, 530, 400, 30, SurfaceKind::Stone));
            platforms.push(Platform::new(2600, 460, 300, 26, SurfaceKind::Stone));
            [
                (280, 620, ItemKind::Idea),
                (520, 565, ItemKind::Coffee),
                (1100, 540, ItemKind::Book),
                (1350, 470, ItemKind::Mind),
                (1550, 540, ItemKind::Idea),
                (2050, 530, ItemKind::Coffee),
                (2250, 470, ItemKind::Book),
                (2650, 460, ItemKind::Mind),
                (2780, 460, ItemKind::Coffee),
            ]
        } else {
            for i in 0..4 {
                platforms.push(Platform::new(180 + i * 200, 620 - i * 70, 180, 28, SurfaceKind::Stone));
            }
            for i in 0..6 {
                let y = 540 - (i % 3) * 80;
                platforms.push(Platform::new(900 + i * 220, y, 160, 26, SurfaceKind::Stone));
            }
            for i in 0..4 {
                let x_offset = (i % 2) * 140;
                platforms.push(Platform::new(1800 + x_offset, 580 - i * 75, 180, 28, SurfaceKind::Window));
            }
            platforms.push(Platform::new(2300, 540, 350, 30, SurfaceKind::Stone));
            platforms.push(Platform::new(2380, 450, 260, 26, SurfaceKind::Stone));
            [
                (250, 620, ItemKind::Idea),
                (480, 550, ItemKind::Coffee),
                (950, 540, ItemKind::Book),
                (1200, 460, ItemKind::Mind),
                (1420, 540, ItemKind::Idea),
                (1920, 505, ItemKind::Coffee),
                (2100, 505, ItemKind::Book),
                (2480, 450, ItemKind::Mind),
                (2580, 450, ItemKind::Coffee),
            ]
        };

        let mut lvl = Self::from_platforms(number, level::WIDTH, platforms);
        // Spawn y is the surface the item rests on
        lvl.collectibles = spawns
            .iter()
            .map(|&(x, surface_y, kind)| Collectible::new(x, surface_y - COLLECTIBLE_SIZE, kind))
            .collect();
        Ok(lvl)
    }

    pub fn platform_rects(&self) -> Vec<Rect> {
        self.platforms.iter().map(|p| p.rect).collect()
    }

    pub fn is_final(&self) -> bool {
        self.number >= level::LEVEL_COUNT
    }
}
