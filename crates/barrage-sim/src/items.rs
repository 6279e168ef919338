//! Item field — power, big power, full power, and point items.
//!
//! Items fall under gravity until magnetized (auto-collect line crossed,
//! bomb, or full-power sweep), then home hard toward the player. Motion
//! and collection run in `systems::items`; this module owns the pool.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::constants::ITEM_CAP;
use barrage_core::enums::ItemKind;
use barrage_core::types::{vec2, Vec2};

use crate::pool::Pool;

/// One pooled item.
#[derive(Debug, Clone, Default)]
pub struct Item {
    pub alive: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ItemKind,
    /// Once set, the item homes toward the player until collected.
    pub magnetized: bool,
}

pub struct ItemField {
    pub(crate) pool: Pool<Item>,
}

impl Default for ItemField {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemField {
    pub fn new() -> Self {
        Self {
            pool: Pool::with_capacity(ITEM_CAP),
        }
    }

    /// Spawn with a small upward toss. Dropped silently when full.
    pub fn spawn(&mut self, pos: Vec2, kind: ItemKind, rng: &mut ChaCha8Rng) {
        let Some(item) = self.pool.acquire() else {
            return;
        };
        let vx = rng.gen_range(-40.0..=40.0);
        let vy = rng.gen_range(-140.0..=-80.0);
        *item = Item {
            alive: true,
            pos,
            vel: vec2(vx, vy),
            kind,
            magnetized: false,
        };
    }

    /// Magnetize every live item (bomb effect).
    pub fn magnetize_all(&mut self) {
        for item in self.pool.iter_mut() {
            item.magnetized = true;
        }
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.pool.iter()
    }
}
