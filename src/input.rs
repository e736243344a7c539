//! Pointer input mapping
//!
//! Dragging a finger sideways steers the player; tapping the pause button
//! toggles pause. The mapper never touches game state directly: it returns
//! what should happen and the session applies it between ticks.

use glam::Vec2;

use crate::Rect;
use crate::sim::GamePhase;
use crate::tuning::Tuning;

/// What a pointer event asks the session to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Pause,
    Resume,
    /// New horizontal velocity for the player
    Steer(f32),
}

/// Turns raw pointer samples into session actions
#[derive(Debug, Clone)]
pub struct InputMapper {
    pause_button: Rect,
    /// Last x sample of the current drag
    last_x: f32,
}

impl InputMapper {
    pub fn new(pause_button: Rect) -> Self {
        Self {
            pause_button,
            last_x: 0.0,
        }
    }

    /// Pointer pressed at screen position (x, y)
    pub fn pointer_down(&mut self, x: f32, y: f32, phase: GamePhase) -> Option<InputAction> {
        if phase == GamePhase::GameOver {
            return None;
        }

        if self.pause_button.contains(Vec2::new(x, y)) {
            return match phase {
                GamePhase::Running => Some(InputAction::Pause),
                GamePhase::Paused => Some(InputAction::Resume),
                GamePhase::GameOver => None,
            };
        }

        self.last_x = x;
        None
    }

    /// Pointer dragged to screen position x while the player moves at `vx`
    pub fn pointer_move(
        &mut self,
        x: f32,
        phase: GamePhase,
        vx: f32,
        tuning: &Tuning,
    ) -> Option<InputAction> {
        if phase != GamePhase::Running {
            return None;
        }

        let dx = x - self.last_x;
        self.last_x = x;
        let vx = (vx + dx * tuning.move_acceleration)
            .clamp(-tuning.max_move_speed, tuning.max_move_speed);
        Some(InputAction::Steer(vx))
    }
}
