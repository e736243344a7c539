//! Progressive difficulty
//!
//! Each time the score reaches the next multiple of the difficulty interval
//! the factor steps up. Gravity grows with it while platform gaps shrink
//! toward fixed floors and special platforms become more common up to a cap.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current difficulty and the parameters derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Starts at 1.0, never decreases
    pub factor: f32,
    pub gravity: f32,
    pub min_platform_distance: f32,
    pub max_platform_distance: f32,
    pub special_platform_chance: f32,
    /// Score at which the next step happens
    pub next_threshold: u32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            factor: 1.0,
            gravity: tuning.base_gravity,
            min_platform_distance: tuning.min_platform_distance,
            max_platform_distance: tuning.max_platform_distance,
            special_platform_chance: tuning.special_platform_chance,
            next_threshold: tuning.difficulty_interval,
        }
    }

    /// Step up once for every threshold `score` has reached.
    ///
    /// Returns the number of steps taken.
    pub fn update(&mut self, score: u32, tuning: &Tuning) -> u32 {
        if tuning.difficulty_interval == 0 {
            return 0;
        }

        let mut steps = 0;
        while score >= self.next_threshold {
            self.increase(tuning);
            self.next_threshold += tuning.difficulty_interval;
            steps += 1;
        }
        steps
    }

    fn increase(&mut self, tuning: &Tuning) {
        self.factor += tuning.difficulty_step;
        self.gravity = tuning.base_gravity * self.factor;
        self.min_platform_distance =
            (tuning.min_platform_distance / self.factor).max(tuning.min_distance_floor);
        self.max_platform_distance =
            (tuning.max_platform_distance / self.factor).max(tuning.max_distance_floor);
        self.special_platform_chance =
            (tuning.special_platform_chance * self.factor).min(tuning.special_chance_cap);

        log::info!(
            "Difficulty {:.1}: gravity={:.2} gaps={:.0}..{:.0} special={:.2}",
            self.factor,
            self.gravity,
            self.min_platform_distance,
            self.max_platform_distance,
            self.special_platform_chance
        );
    }

    /// Random vertical gap to the next platform, in `[min, max)`
    pub fn random_gap<R: Rng>(&self, rng: &mut R) -> f32 {
        let span = self.max_platform_distance - self.min_platform_distance;
        rng.random::<f32>() * span + self.min_platform_distance
    }

    /// Roll whether a new platform is special
    pub fn roll_special<R: Rng>(&self, rng: &mut R) -> bool {
        rng.random::<f32>() < self.special_platform_chance
    }
}
