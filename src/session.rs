//! Game session state machine
//!
//! `Session` is the single owner of the simulation. Hosts talk to it through
//! a handful of commands (pause, resume, reset, pointer events) and read back
//! a `TickResult` per frame.
//!
//! ```text
//!            pause               fall off screen
//!   Running -------> Paused     Running ---------> GameOver
//!      ^               |                              |
//!      +---- resume ---+          +----- reset -------+
//!                                 v
//!                              Running
//! ```

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::Viewport;
use crate::input::{InputAction, InputMapper};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Platform, Player, TickEvents, tick};
use crate::tuning::Tuning;

/// Everything a frontend needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickResult {
    pub player: Player,
    /// Active platforms in creation order
    pub platforms: Vec<Platform>,
    pub camera_y: f32,
    pub score: u32,
    pub phase: GamePhase,
    pub difficulty_factor: f32,
    pub viewport: Viewport,
    /// Layout seed of the current game; changes on every reset
    pub game_seed: u64,
    pub events: TickEvents,
}

impl TickResult {
    fn capture(state: &GameState, events: TickEvents) -> Self {
        Self {
            player: state.player,
            platforms: state.platforms.iter().copied().collect(),
            camera_y: state.camera_y,
            score: state.score,
            phase: state.phase,
            difficulty_factor: state.difficulty.factor,
            viewport: state.viewport,
            game_seed: state.seed,
            events,
        }
    }

    /// Platforms overlapping the view, with a one-platform margin
    pub fn visible_platforms(&self) -> impl Iterator<Item = &Platform> {
        let top = self.camera_y;
        let bottom = self.camera_y + self.viewport.height;
        self.platforms
            .iter()
            .filter(move |p| p.pos.y > top - p.size.y && p.pos.y < bottom + p.size.y)
    }

    /// Convert a world y into screen space
    #[inline]
    pub fn to_screen_y(&self, world_y: f32) -> f32 {
        world_y - self.camera_y
    }
}

/// One player's game, across any number of resets
#[derive(Debug)]
pub struct Session {
    tuning: Tuning,
    input: InputMapper,
    /// Source of per-game layout seeds
    seeds: Pcg32,
    viewport: Option<Viewport>,
    state: Option<GameState>,
}

impl Session {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            tuning: settings.tuning.clone(),
            input: InputMapper::new(settings.pause_button),
            seeds: Pcg32::seed_from_u64(seed),
            viewport: None,
            state: None,
        }
    }

    /// Current game, if the surface has been sized
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Mutable access for hosts and tests that stage scenarios
    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    /// Phase of the current game; `None` until the surface is sized
    pub fn phase(&self) -> Option<GamePhase> {
        self.state.as_ref().map(|s| s.phase)
    }

    /// Report the hosting surface size.
    ///
    /// The layout depends on it, so any change starts a new game.
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        match viewport {
            Some(v) => {
                log::info!("Surface sized {}x{}", v.width, v.height);
                self.reset();
            }
            None => {
                log::info!("Surface lost; simulation suspended");
                self.state = None;
            }
        }
    }

    /// Start a fresh game. No-op until the surface is sized.
    pub fn reset(&mut self) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let seed = self.seeds.random::<u64>();
        self.state = Some(GameState::new(seed, viewport, &self.tuning));
        log::info!("New game with seed {seed}");
    }

    /// Advance one fixed step.
    ///
    /// Returns `None` while the surface size is unknown. Outside `Running`
    /// the state is untouched and the result simply reflects it.
    pub fn tick(&mut self) -> Option<TickResult> {
        let state = self.state.as_mut()?;
        let events = tick(state, &self.tuning);
        Some(TickResult::capture(state, events))
    }

    /// Current frame without advancing
    pub fn snapshot(&self) -> Option<TickResult> {
        self.state
            .as_ref()
            .map(|s| TickResult::capture(s, TickEvents::default()))
    }

    /// Running → Paused
    pub fn pause(&mut self) -> bool {
        self.transition(GamePhase::Running, GamePhase::Paused)
    }

    /// Paused → Running, immediately
    pub fn resume(&mut self) -> bool {
        self.transition(GamePhase::Paused, GamePhase::Running)
    }

    fn transition(&mut self, from: GamePhase, to: GamePhase) -> bool {
        match self.state.as_mut() {
            Some(state) if state.phase == from => {
                log::info!("{from:?} -> {to:?} (score {})", state.score);
                state.phase = to;
                true
            }
            _ => false,
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        let Some(phase) = self.phase() else {
            return;
        };
        match self.input.pointer_down(x, y, phase) {
            Some(InputAction::Pause) => {
                self.pause();
            }
            Some(InputAction::Resume) => {
                self.resume();
            }
            Some(InputAction::Steer(vx)) => self.steer(vx),
            None => {}
        }
    }

    pub fn pointer_move(&mut self, x: f32, _y: f32) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let action = self
            .input
            .pointer_move(x, state.phase, state.player.vel.x, &self.tuning);
        if let Some(InputAction::Steer(vx)) = action {
            self.steer(vx);
        }
    }

    fn steer(&mut self, vx: f32) {
        if let Some(state) = self.state.as_mut() {
            state.player.vel.x = vx;
        }
    }
}
