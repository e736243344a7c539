//! Sky Hop - A vertical bouncing platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, camera, platforms, difficulty)
//! - `session`: Game state machine and command surface for the host
//! - `input`: Pointer events to velocity impulses and pause taps
//! - `runner`: Fixed-cadence loop thread driving a `Frontend`
//! - `tuning`: Data-driven game balance
//! - `settings`: Host preferences (pause button, audio, seed)
//! - `audio`: Sound cues derived from simulation events

pub mod audio;
pub mod input;
pub mod runner;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use runner::{Command, Frontend, LoopHandle};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep (~60 Hz). Tuning values are per tick.
    pub const TICK_PERIOD: Duration = Duration::from_millis(16);
    /// Default delay before a paused game resumes from the pause menu
    pub const DEFAULT_RESUME_DELAY_MS: u64 = 2000;
}

/// Pixel dimensions of the hosting surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle (screen or world space, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Inclusive point test (touch targets include their border)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Strict overlap on the x axis only
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }
}

/// Wrap an x coordinate around a horizontal cylinder of the given width.
///
/// An object fully past the left edge reappears at the right edge and vice
/// versa; anything else is returned unchanged.
#[inline]
pub fn wrap_horizontal(x: f32, object_width: f32, world_width: f32) -> f32 {
    if x < -object_width {
        world_width
    } else if x > world_width {
        -object_width
    } else {
        x
    }
}
