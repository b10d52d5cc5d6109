//! Platforms, the slot pool that recycles them, and the procedural track
//!
//! Platforms live in an arena of fixed records addressed by [`SlotId`].
//! Retiring a platform marks its slot free and pushes it onto a free list;
//! reissuing pops it back and fully resets it, so no session-visible state
//! survives reuse.
//!
//! The track is the ordered sequence of active platforms in generation order.
//! Travel indices are generation sequence numbers: recycling pops from the
//! front without renumbering, so an index held by the player stays valid.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::random_in;

/// Index of a record in the platform arena
pub type SlotId = usize;

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Wider platform granting a one-time bonus
    Special,
}

/// A platform record (top-left anchored; `pos.y` is the walkable top)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub slot: SlotId,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Visual only
    pub depth: f32,
    pub kind: PlatformKind,
    pub active: bool,
    /// Special bonus already granted
    pub triggered: bool,
}

impl Platform {
    fn blank(slot: SlotId) -> Self {
        Self {
            slot,
            pos: Vec2::ZERO,
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            kind: PlatformKind::Normal,
            active: false,
            triggered: false,
        }
    }

    /// Horizontal center of the walkable top
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn is_special(&self) -> bool {
        self.kind == PlatformKind::Special
    }
}

/// Arena of platform records with a free list
#[derive(Debug, Clone, Default)]
pub struct PlatformPool {
    slots: Vec<Platform>,
    free: Vec<SlotId>,
}

impl PlatformPool {
    /// Create a pool with `prealloc` free records
    pub fn with_capacity(prealloc: usize) -> Self {
        let slots: Vec<Platform> = (0..prealloc).map(Platform::blank).collect();
        // Reverse so slot 0 is handed out first
        let free = (0..prealloc).rev().collect();
        Self { slots, free }
    }

    /// Take a free record (or grow the arena) and reset it for the given geometry
    pub fn acquire(&mut self, pos: Vec2, config: &SimulationConfig) -> SlotId {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                let slot = self.slots.len();
                self.slots.push(Platform::blank(slot));
                log::trace!("Platform pool grew to {} slots", self.slots.len());
                slot
            }
        };

        let platform = &mut self.slots[slot];
        *platform = Platform {
            slot,
            pos,
            width: config.platform_width,
            height: config.platform_height,
            depth: config.platform_depth,
            kind: PlatformKind::Normal,
            active: true,
            triggered: false,
        };
        slot
    }

    /// Return a record to the free list. Releasing a free slot is ignored.
    pub fn release(&mut self, slot: SlotId) -> bool {
        match self.slots.get_mut(slot) {
            Some(platform) if platform.active => {
                *platform = Platform::blank(slot);
                self.free.push(slot);
                true
            }
            _ => {
                log::warn!("Ignoring release of inactive platform slot {}", slot);
                false
            }
        }
    }

    pub fn get(&self, slot: SlotId) -> Option<&Platform> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut Platform> {
        self.slots.get_mut(slot)
    }

    /// Total records ever allocated (active + free)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[cfg(test)]
    fn free_slots(&self) -> &[SlotId] {
        &self.free
    }
}

/// Procedurally generated platform sequence backed by a [`PlatformPool`]
#[derive(Debug, Clone)]
pub struct PlatformTrack {
    pool: PlatformPool,
    /// Active slots in travel order
    active: VecDeque<SlotId>,
    /// Travel index of `active[0]`
    first_index: usize,
    /// Spacing factor in [0, 1]
    difficulty: f32,
    /// +1 right, -1 left
    direction: f32,
    rng: Pcg32,
}

impl PlatformTrack {
    pub fn new(config: &SimulationConfig, rng: Pcg32) -> Self {
        Self {
            pool: PlatformPool::with_capacity(config.pool_prealloc),
            active: VecDeque::new(),
            first_index: 0,
            difficulty: 0.0,
            direction: 1.0,
            rng,
        }
    }

    /// Track seeded from a bare `u64`
    pub fn from_seed(config: &SimulationConfig, seed: u64) -> Self {
        Self::new(config, Pcg32::seed_from_u64(seed))
    }

    /// Clear the track and lay out the opening platforms from `start`
    pub fn reset(&mut self, start: Vec2, rng: Pcg32, config: &SimulationConfig) {
        while let Some(slot) = self.active.pop_front() {
            self.pool.release(slot);
        }
        self.first_index = 0;
        self.difficulty = 0.0;
        self.direction = 1.0;
        self.rng = rng;

        let slot = self.pool.acquire(start, config);
        self.active.push_back(slot);
        for _ in 1..config.initial_platforms {
            self.generate_next(config);
        }
    }

    /// Map score onto the spacing factor
    pub fn difficulty_for(score: u64, config: &SimulationConfig) -> f32 {
        (score as f32 / config.difficulty_max_score).min(1.0)
    }

    pub fn update_difficulty(&mut self, score: u64, config: &SimulationConfig) {
        self.difficulty = Self::difficulty_for(score, config);
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    /// Append one platform after the last. Returns its travel index, or `None`
    /// if the track has never been seeded.
    pub fn generate_next(&mut self, config: &SimulationConfig) -> Option<usize> {
        let last = *self.active.back()?;
        let last_pos = self.pool.get(last)?.pos;

        let range = config.max_distance - config.min_distance;
        let jitter = random_in(&mut self.rng, config.distance_jitter.0, config.distance_jitter.1);
        let distance = config.min_distance + range * self.difficulty * 0.5 + jitter;

        if self.rng.random::<f32>() < config.direction_flip_chance {
            self.direction = -self.direction;
        }

        let dy = random_in(&mut self.rng, config.vertical_jitter.0, config.vertical_jitter.1);
        let pos = Vec2::new(last_pos.x + distance * self.direction, last_pos.y + dy);

        let roll = self.rng.random::<f32>();
        // Counted over the whole session, not just what is still active
        let special = roll < config.special_platform_chance
            && self.end_index() >= config.special_min_platforms;

        let slot = self.pool.acquire(pos, config);
        if special {
            if let Some(platform) = self.pool.get_mut(slot) {
                platform.kind = PlatformKind::Special;
                platform.width = config.platform_width * config.special_width_scale;
            }
        }

        self.active.push_back(slot);
        let index = self.end_index() - 1;
        log::debug!(
            "Generated platform #{} at ({:.0}, {:.0}){}",
            index,
            pos.x,
            pos.y,
            if special { " [special]" } else { "" }
        );
        Some(index)
    }

    /// Generate until at least `ahead_buffer` platforms exist from `current` on.
    ///
    /// # Panics
    /// If the track is empty: an unseeded lookahead is a programming error.
    pub fn ensure_ahead(&mut self, current: usize, config: &SimulationConfig) {
        let needed = current + config.ahead_buffer;
        while self.end_index() < needed {
            assert!(
                self.generate_next(config).is_some(),
                "platform track must be seeded before ensure_ahead"
            );
        }
    }

    /// Retire platforms that are more than `recycle_margin` outside the view
    /// span `[view_left, view_right]` on either side, oldest first. Platforms
    /// at or after `keep_from` are never retired.
    pub fn recycle(
        &mut self,
        view_left: f32,
        view_right: f32,
        keep_from: usize,
        config: &SimulationConfig,
    ) -> usize {
        let left_cutoff = view_left - config.recycle_margin;
        let right_cutoff = view_right + config.recycle_margin;
        let mut retired = 0;
        while self.first_index < keep_from {
            let Some(&slot) = self.active.front() else {
                break;
            };
            let off_screen = self
                .pool
                .get(slot)
                .is_some_and(|p| p.right() < left_cutoff || p.left() > right_cutoff);
            if !off_screen {
                break;
            }
            self.active.pop_front();
            self.pool.release(slot);
            log::trace!("Recycled platform #{} (slot {})", self.first_index, slot);
            self.first_index += 1;
            retired += 1;
        }
        retired
    }

    /// Platform at travel index `index`, if still active
    pub fn get(&self, index: usize) -> Option<&Platform> {
        let offset = index.checked_sub(self.first_index)?;
        let slot = *self.active.get(offset)?;
        self.pool.get(slot)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Platform> {
        let offset = index.checked_sub(self.first_index)?;
        let slot = *self.active.get(offset)?;
        self.pool.get_mut(slot)
    }

    /// Direction from platform `index` toward the next one (+1 if unknown or equal)
    pub fn direction_from(&self, index: usize) -> f32 {
        match (self.get(index), self.get(index + 1)) {
            (Some(current), Some(next)) if next.pos.x < current.pos.x => -1.0,
            _ => 1.0,
        }
    }

    /// Travel index of the oldest active platform
    pub fn first_index(&self) -> usize {
        self.first_index
    }

    /// One past the travel index of the newest platform
    pub fn end_index(&self) -> usize {
        self.first_index + self.active.len()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Active platforms in travel order, paired with their travel index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Platform)> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter_map(move |(i, &slot)| Some((self.first_index + i, self.pool.get(slot)?)))
    }

    pub fn pool(&self) -> &PlatformPool {
        &self.pool
    }
}
