//! Sound cues
//!
//! The simulation never plays audio itself. Frontends turn each frame's
//! events and phase changes into cues with this module and feed them to
//! whatever audio backend they own.

use crate::session::TickResult;
use crate::settings::Settings;
use crate::sim::{GamePhase, TickEvents};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bounce off a normal platform
    Jump,
    /// Bounce off a special platform (same sample, pitched up)
    SpecialJump,
    /// Player fell off the screen
    Lose,
}

impl SoundEffect {
    /// Playback rate for the underlying sample
    pub fn playback_rate(&self) -> f32 {
        match self {
            SoundEffect::Jump | SoundEffect::Lose => 1.0,
            SoundEffect::SpecialJump => 1.5,
        }
    }

    /// Effects triggered by one tick
    pub fn from_events(events: &TickEvents) -> Vec<SoundEffect> {
        let mut effects = Vec::new();
        if events.landed_normal {
            effects.push(SoundEffect::Jump);
        }
        if events.landed_special {
            effects.push(SoundEffect::SpecialJump);
        }
        if events.died {
            effects.push(SoundEffect::Lose);
        }
        effects
    }
}

/// Background music instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    /// Start from the beginning (new game)
    Restart,
    /// Continue where it stopped
    Resume,
    Pause,
}

/// Tracks what the music should be doing across frames
#[derive(Debug, Clone, Default)]
pub struct MusicDirector {
    last_phase: Option<GamePhase>,
    /// Game of the previous frame, to spot a reset while already running
    last_game: Option<u64>,
}

impl MusicDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Music plays only while the game is running
    pub fn should_play(phase: GamePhase) -> bool {
        phase == GamePhase::Running
    }

    /// Cue needed to bring the music in line with this frame, if any
    pub fn update(&mut self, frame: &TickResult) -> Option<MusicCue> {
        let previous = self.last_phase.replace(frame.phase);
        let was_reset = self
            .last_game
            .replace(frame.game_seed)
            .is_some_and(|game| game != frame.game_seed);

        match (previous, frame.phase) {
            (None, GamePhase::Running) => Some(MusicCue::Restart),
            (Some(_), GamePhase::Running) if was_reset => Some(MusicCue::Restart),
            (Some(GamePhase::GameOver), GamePhase::Running) => Some(MusicCue::Restart),
            (Some(GamePhase::Paused), GamePhase::Running) => Some(MusicCue::Resume),
            (Some(GamePhase::Running), GamePhase::Paused | GamePhase::GameOver) => {
                Some(MusicCue::Pause)
            }
            _ => None,
        }
    }
}

/// Volume for an effect under the given settings
pub fn effect_volume(settings: &Settings) -> f32 {
    settings.effective_sfx_volume()
}

/// Volume for background music under the given settings
pub fn music_volume(settings: &Settings) -> f32 {
    settings.effective_music_volume()
}
