//! Game state and core simulation types
//!
//! Everything one session needs lives in `GameState`; a reset rebuilds it
//! from scratch.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::platforms::PlatformField;
use crate::tuning::Tuning;
use crate::{Rect, Viewport};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay, the only phase that simulates
    Running,
    /// Frozen by the player
    Paused,
    /// Player fell off the bottom of the view; terminal until reset
    GameOver,
}

/// The bouncing player sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Player {
    /// Player standing in the lower quarter of the view, centered horizontally
    pub fn spawn(viewport: Viewport, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width / 2.0 - tuning.player_width / 2.0,
                viewport.height * 0.75,
            ),
            vel: Vec2::ZERO,
            size: tuning.player_size(),
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A platform the player can bounce on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Creation-ordered id, never reused within a session
    pub id: u32,
    /// Top-left corner in world space
    pub pos: Vec2,
    pub size: Vec2,
    /// Special platforms bounce harder and score more
    pub special: bool,
}

impl Platform {
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Things that happened during one tick, for sound and UI feedback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvents {
    pub landed_normal: bool,
    pub landed_special: bool,
    pub died: bool,
}

impl TickEvents {
    pub fn any(&self) -> bool {
        self.landed_normal || self.landed_special || self.died
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this session's layout was generated from
    pub seed: u64,
    /// Layout RNG
    pub rng: Pcg32,
    /// Surface size the layout was generated for
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub player: Player,
    pub platforms: PlatformField,
    pub score: u32,
    /// World y shown at the top of the view; only ever decreases
    pub camera_y: f32,
    pub difficulty: Difficulty,
    /// Platform most recently bounced on
    pub last_platform_id: Option<u32>,
    /// Allows a second bounce on `last_platform_id` once the player has climbed
    pub can_jump_again: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh running session with seeded platforms
    pub fn new(seed: u64, viewport: Viewport, tuning: &Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            phase: GamePhase::Running,
            player: Player::spawn(viewport, tuning),
            platforms: PlatformField::default(),
            score: 0,
            camera_y: 0.0,
            difficulty: Difficulty::new(tuning),
            last_platform_id: None,
            can_jump_again: true,
            time_ticks: 0,
        };

        state
            .platforms
            .seed(viewport, &state.difficulty, tuning, &mut state.rng);

        state
    }

    /// Whether the player currently sits in the upper half of the view
    #[inline]
    pub fn player_above_midpoint(&self) -> bool {
        self.player.pos.y < self.camera_y + self.viewport.height / 2.0
    }
}
