//! Collectibles
//!
//! Closed set of pickup kinds with fixed score values and effects, plus a
//! fixed-size per-kind counter.

use serde::{Deserialize, Serialize};

use crate::engine::types::Rect;

pub const COLLECTIBLE_SIZE: i32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Lamp
    Idea,
    Coffee,
    Book,
    /// Brain
    Mind,
}

/// What picking an item up does beyond scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    Concentration,
    /// Player speed boost for a short window
    CoffeeEnergy,
    Knowledge,
    /// Adversary slowdown
    SlowAdversary,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [ItemKind::Idea, ItemKind::Coffee, ItemKind::Book, ItemKind::Mind];
    pub const COUNT: usize = Self::ALL.len();

    pub fn score_value(self) -> u32 {
        match self {
            ItemKind::Idea => 15,
            ItemKind::Coffee => 20,
            ItemKind::Book => 25,
            ItemKind::Mind => 30,
        }
    }

    pub fn effect(self) -> ItemEffect {
        match self {
            ItemKind::Idea => ItemEffect::Concentration,
            ItemKind::Coffee => ItemEffect::CoffeeEnergy,
            ItemKind::Book => ItemEffect::Knowledge,
            ItemKind::Mind => ItemEffect::SlowAdversary,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ItemKind::Idea => "Lamp",
            ItemKind::Coffee => "Coffee",
            ItemKind::Book => "Book",
            ItemKind::Mind => "Brain",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Collected-item counts, one slot per [`ItemKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemCounts {
    counts: [u32; ItemKind::COUNT],
}

impl ItemCounts {
    pub fn add(&mut self, kind: ItemKind) {
        self.counts[kind.index()] += 1;
    }

    pub fn get(&self, kind: ItemKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        ItemKind::ALL.iter().map(move |&k| (k, self.get(k)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub rect: Rect,
    pub kind: ItemKind,
    pub collected: bool,
}

impl Collectible {
    /// `(x, y)` is the top-left corner.
    pub fn new(x: i32, y: i32, kind: ItemKind) -> Self {
        Self { rect: Rect::new(x, y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE), kind, collected: false }
    }
}
