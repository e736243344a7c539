//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by platform ID)
//! - No rendering or platform dependencies

pub mod camera;
pub mod difficulty;
pub mod physics;
pub mod platforms;
pub mod state;
pub mod tick;

pub use difficulty::Difficulty;
pub use physics::{find_landing, integrate, lands_on};
pub use platforms::PlatformField;
pub use state::{GamePhase, GameState, Platform, Player, TickEvents};
pub use tick::tick;
