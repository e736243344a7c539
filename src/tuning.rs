//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON settings file can rebalance
//! the game without touching the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gameplay constants (world units are surface pixels, y grows downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Gravity at difficulty 1.0 (added to vy every tick)
    pub base_gravity: f32,
    /// Vertical velocity after a normal bounce (negative = up)
    pub jump_force: f32,
    /// Bounce multiplier for special platforms
    pub special_jump_multiplier: f32,
    /// Horizontal velocity multiplier applied every tick
    pub friction: f32,
    /// Drag distance to horizontal velocity
    pub move_acceleration: f32,
    pub max_move_speed: f32,

    // === Platforms ===
    pub platform_width: f32,
    pub platform_height: f32,
    /// Extra landing band below a platform's underside (one tick of fall)
    pub landing_tolerance: f32,
    pub min_platform_distance: f32,
    pub max_platform_distance: f32,
    pub special_platform_chance: f32,
    /// Platforms placed when a session starts
    pub seed_platform_count: usize,
    /// Platforms this far below the bottom of the view are recycled
    pub recycle_margin: f32,
    /// Generation starts once the frontier is within this distance of the camera
    pub frontier_trigger: f32,
    /// Generation continues until the frontier is this far above the camera
    pub frontier_lookahead: f32,

    // === Scoring ===
    pub normal_score: u32,
    pub special_score: u32,

    // === Difficulty ===
    pub difficulty_interval: u32,
    pub difficulty_step: f32,
    /// Floor for the minimum gap as difficulty grows
    pub min_distance_floor: f32,
    /// Floor for the maximum gap as difficulty grows
    pub max_distance_floor: f32,
    /// Ceiling for the special platform chance
    pub special_chance_cap: f32,

    // === Camera ===
    /// Camera sits this fraction of the view height above the player
    pub camera_lead: f32,
    /// The same-platform bounce latch re-arms above this fraction of the view
    pub rearm_fraction: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: 150.0,
            player_height: 190.0,
            base_gravity: 0.5,
            jump_force: -22.0,
            special_jump_multiplier: 1.5,
            friction: 0.9,
            move_acceleration: 0.2,
            max_move_speed: 12.0,

            platform_width: 170.0,
            platform_height: 43.0,
            landing_tolerance: 10.0,
            min_platform_distance: 100.0,
            max_platform_distance: 200.0,
            special_platform_chance: 0.1,
            seed_platform_count: 15,
            recycle_margin: 100.0,
            frontier_trigger: 100.0,
            frontier_lookahead: 1000.0,

            normal_score: 5,
            special_score: 15,

            difficulty_interval: 500,
            difficulty_step: 0.1,
            min_distance_floor: 70.0,
            max_distance_floor: 150.0,
            special_chance_cap: 0.3,

            camera_lead: 0.6,
            rearm_fraction: 1.0 / 3.0,
        }
    }
}

impl Tuning {
    #[inline]
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    #[inline]
    pub fn platform_size(&self) -> Vec2 {
        Vec2::new(self.platform_width, self.platform_height)
    }

    /// Bounce velocity for a platform type
    #[inline]
    pub fn bounce_velocity(&self, special: bool) -> f32 {
        if special {
            self.jump_force * self.special_jump_multiplier
        } else {
            self.jump_force
        }
    }

    /// Reject balances the generator cannot make progress with.
    ///
    /// Every gap the difficulty controller can produce must move the
    /// frontier upward, or platform generation never finishes.
    pub fn validate(&self) -> Result<(), String> {
        let gaps = [
            ("min_platform_distance", self.min_platform_distance),
            ("max_platform_distance", self.max_platform_distance),
            ("min_distance_floor", self.min_distance_floor),
            ("max_distance_floor", self.max_distance_floor),
            ("frontier_lookahead", self.frontier_lookahead),
        ];
        for (name, value) in gaps {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        if self.max_platform_distance < self.min_platform_distance {
            return Err(format!(
                "max_platform_distance {} is below min_platform_distance {}",
                self.max_platform_distance, self.min_platform_distance
            ));
        }
        if self.max_distance_floor < self.min_distance_floor {
            return Err(format!(
                "max_distance_floor {} is below min_distance_floor {}",
                self.max_distance_floor, self.min_distance_floor
            ));
        }
        if self.difficulty_interval == 0 {
            return Err("difficulty_interval must be non-zero".into());
        }
        Ok(())
    }

    /// Score awarded for a first landing on a platform type
    #[inline]
    pub fn landing_score(&self, special: bool) -> u32 {
        if special { self.special_score } else { self.normal_score }
    }
}
