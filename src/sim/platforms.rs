//! Procedural platform generation and recycling
//!
//! Platforms live in an id-keyed arena. Ids come from a creation counter, so
//! iterating the arena visits platforms in creation order and "last platform
//! touched" comparisons stay meaningful for the whole session.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;

use super::difficulty::Difficulty;
use super::state::Platform;
use crate::Viewport;
use crate::tuning::Tuning;

/// The active platform window
#[derive(Debug, Clone, Default)]
pub struct PlatformField {
    platforms: BTreeMap<u32, Platform>,
    next_id: u32,
}

impl PlatformField {
    /// Platforms in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.values()
    }

    pub fn get(&self, id: u32) -> Option<&Platform> {
        self.platforms.get(&id)
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Insert a platform with explicit geometry, returning its id
    pub fn insert(&mut self, pos: Vec2, size: Vec2, special: bool) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.platforms.insert(
            id,
            Platform {
                id,
                pos,
                size,
                special,
            },
        );
        id
    }

    /// Spawn a platform at height `y` with a random x and type
    pub fn spawn<R: Rng>(
        &mut self,
        y: f32,
        viewport: Viewport,
        difficulty: &Difficulty,
        tuning: &Tuning,
        rng: &mut R,
    ) -> u32 {
        let max_x = (viewport.width - tuning.platform_width).max(0.0);
        let x = rng.random::<f32>() * max_x;
        let special = difficulty.roll_special(rng);
        self.insert(Vec2::new(x, y), tuning.platform_size(), special)
    }

    /// Lay out the opening platforms from the bottom of the view upward
    pub fn seed<R: Rng>(
        &mut self,
        viewport: Viewport,
        difficulty: &Difficulty,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        let mut y = viewport.height;
        for _ in 0..tuning.seed_platform_count {
            self.spawn(y, viewport, difficulty, tuning, rng);
            y -= difficulty.random_gap(rng);
        }
        log::debug!("Seeded {} platforms up to y={:.0}", self.len(), y);
    }

    /// Drop platforms that scrolled far enough below the view.
    ///
    /// Returns how many were removed.
    pub fn recycle(&mut self, camera_y: f32, viewport: Viewport, tuning: &Tuning) -> usize {
        let cutoff = camera_y + viewport.height + tuning.recycle_margin;
        let before = self.platforms.len();
        self.platforms.retain(|_, p| p.pos.y <= cutoff);
        before - self.platforms.len()
    }

    /// Topmost (smallest y) platform height, if any
    pub fn frontier(&self) -> Option<f32> {
        self.platforms.values().map(|p| p.pos.y).reduce(f32::min)
    }

    /// Chain new platforms upward once the frontier nears the camera.
    ///
    /// Returns how many were added.
    pub fn extend<R: Rng>(
        &mut self,
        camera_y: f32,
        viewport: Viewport,
        difficulty: &Difficulty,
        tuning: &Tuning,
        rng: &mut R,
    ) -> usize {
        let mut y = self.frontier().unwrap_or(camera_y);
        if y <= camera_y - tuning.frontier_trigger {
            return 0;
        }

        let mut added = 0;
        while y > camera_y - tuning.frontier_lookahead {
            y -= difficulty.random_gap(rng);
            self.spawn(y, viewport, difficulty, tuning, rng);
            added += 1;
        }
        log::debug!("Generated {added} platforms, frontier now y={y:.0}");
        added
    }

    /// Recycle then extend; one generator pass per tick
    pub fn maintain<R: Rng>(
        &mut self,
        camera_y: f32,
        viewport: Viewport,
        difficulty: &Difficulty,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        self.recycle(camera_y, viewport, tuning);
        self.extend(camera_y, viewport, difficulty, tuning, rng);
    }
}
