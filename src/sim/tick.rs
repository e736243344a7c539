//! Fixed timestep simulation tick
//!
//! Core game loop step that advances a running session deterministically.

use super::camera;
use super::physics::{find_landing, integrate};
use super::state::{GamePhase, GameState, TickEvents};
use crate::tuning::Tuning;

/// Advance a running session by one fixed step.
///
/// Does nothing outside `GamePhase::Running`. Once the player falls below the
/// view the session ends and the rest of the step is skipped.
pub fn tick(state: &mut GameState, tuning: &Tuning) -> TickEvents {
    let mut events = TickEvents::default();

    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;
    let view = state.viewport;

    integrate(
        &mut state.player,
        state.difficulty.gravity,
        tuning,
        view.width,
    );

    let above_midpoint = state.player_above_midpoint();

    // Only the first platform under the player is considered, accepted or not
    if let Some(platform) =
        find_landing(&state.player, &state.platforms, tuning.landing_tolerance).copied()
    {
        let is_new = state.last_platform_id != Some(platform.id);
        if is_new || (above_midpoint && state.can_jump_again) {
            state.player.vel.y = tuning.bounce_velocity(platform.special);
            if is_new {
                state.score += tuning.landing_score(platform.special);
            }
            if platform.special {
                events.landed_special = true;
            } else {
                events.landed_normal = true;
            }
            state.last_platform_id = Some(platform.id);
            state.can_jump_again = false;
        }
    }

    let rearm = camera::rearm_line(state.camera_y, view.height, tuning.rearm_fraction);
    if state.player.pos.y < rearm {
        state.can_jump_again = true;
    }

    if state.player.pos.y > camera::death_line(state.camera_y, view.height) {
        log::info!(
            "Player fell at y={:.0} (camera {:.0}), final score {}",
            state.player.pos.y,
            state.camera_y,
            state.score
        );
        state.phase = GamePhase::GameOver;
        events.died = true;
        return events;
    }

    state.camera_y = camera::follow(
        state.camera_y,
        state.player.pos.y,
        view.height,
        tuning.camera_lead,
    );

    state.difficulty.update(state.score, tuning);

    state.platforms.maintain(
        state.camera_y,
        view,
        &state.difficulty,
        tuning,
        &mut state.rng,
    );

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::PlatformField;
    use glam::Vec2;

    const VIEW: Viewport = Viewport {
        width: 1080.0,
        height: 1920.0,
    };

    /// Session with a single platform under a falling player
    fn landing_setup(special: bool) -> (GameState, Tuning, u32) {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, VIEW, &tuning);
        state.platforms = PlatformField::default();
        let id = state
            .platforms
            .insert(Vec2::new(400.0, 1500.0), tuning.platform_size(), special);
        // Feet one unit above the platform top, falling
        state.player.pos = Vec2::new(420.0, 1500.0 - tuning.player_height - 1.0);
        state.player.vel = Vec2::new(0.0, 5.0);
        (state, tuning, id)
    }

    #[test]
    fn normal_landing_bounces_and_scores() {
        let (mut state, tuning, id) = landing_setup(false);
        let events = tick(&mut state, &tuning);

        assert!(events.landed_normal);
        assert!(!events.landed_special);
        assert_eq!(state.player.vel.y, -22.0);
        assert_eq!(state.score, 5);
        assert_eq!(state.last_platform_id, Some(id));
        assert!(!state.can_jump_again);
    }

    #[test]
    fn special_landing_bounces_higher() {
        let (mut state, tuning, _) = landing_setup(true);
        let events = tick(&mut state, &tuning);

        assert!(events.landed_special);
        assert_eq!(state.player.vel.y, -33.0);
        assert_eq!(state.score, 15);
    }

    #[test]
    fn repeat_landing_below_midpoint_is_ignored() {
        let (mut state, tuning, id) = landing_setup(false);
        state.last_platform_id = Some(id);
        state.can_jump_again = true;

        let events = tick(&mut state, &tuning);
        assert!(!events.landed_normal);
        assert!(state.player.vel.y > 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn repeat_landing_above_midpoint_bounces_without_score() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, VIEW, &tuning);
        state.platforms = PlatformField::default();
        // Between the rearm line (640) and the midpoint (960)
        let id = state
            .platforms
            .insert(Vec2::new(400.0, 900.0), tuning.platform_size(), false);
        state.player.pos = Vec2::new(420.0, 900.0 - tuning.player_height - 1.0);
        state.player.vel = Vec2::new(0.0, 5.0);
        state.last_platform_id = Some(id);
        state.can_jump_again = true;
        state.score = 40;

        let events = tick(&mut state, &tuning);
        assert!(events.landed_normal);
        assert_eq!(state.player.vel.y, -22.0);
        assert_eq!(state.score, 40);
        assert!(!state.can_jump_again);
    }

    #[test]
    fn repeat_landing_needs_latch() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, VIEW, &tuning);
        state.platforms = PlatformField::default();
        // Between the rearm line (640) and the midpoint (960)
        let id = state
            .platforms
            .insert(Vec2::new(400.0, 900.0), tuning.platform_size(), false);
        state.player.pos = Vec2::new(420.0, 900.0 - tuning.player_height - 1.0);
        state.player.vel = Vec2::new(0.0, 5.0);
        state.last_platform_id = Some(id);
        state.can_jump_again = false;

        let events = tick(&mut state, &tuning);
        assert!(!events.landed_normal);
        assert!(!state.can_jump_again);
    }

    #[test]
    fn latch_rearms_in_upper_third() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, VIEW, &tuning);
        state.platforms = PlatformField::default();
        state.player.pos = Vec2::new(420.0, 300.0);
        state.player.vel = Vec2::new(0.0, -10.0);
        state.can_jump_again = false;

        tick(&mut state, &tuning);
        assert!(state.can_jump_again);
    }

    #[test]
    fn falling_off_ends_session() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, VIEW, &tuning);
        state.platforms = PlatformField::default();
        state.player.pos = Vec2::new(420.0, 1920.0);
        state.player.vel = Vec2::new(0.0, 1.0);

        let events = tick(&mut state, &tuning);
        assert!(events.died);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Frozen afterwards
        let snapshot = (state.score, state.camera_y, state.platforms.len(), state.player);
        for _ in 0..10 {
            let events = tick(&mut state, &tuning);
            assert!(!events.any());
        }
        assert_eq!(
            snapshot,
            (state.score, state.camera_y, state.platforms.len(), state.player)
        );
    }

    #[test]
    fn paused_session_does_not_advance() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, VIEW, &tuning);
        state.phase = GamePhase::Paused;
        let before = state.player;
        tick(&mut state, &tuning);
        assert_eq!(state.player, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn camera_follows_rising_player() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, VIEW, &tuning);
        state.platforms = PlatformField::default();
        state.player.pos = Vec2::new(420.0, 800.0);
        state.player.vel = Vec2::new(0.0, -20.0);

        tick(&mut state, &tuning);
        let expected = state.player.pos.y - 1920.0 * 0.6;
        assert!((state.camera_y - expected).abs() < 1e-3);
        assert!(state.camera_y < 0.0);
    }

    #[test]
    fn difficulty_steps_when_score_reaches_threshold() {
        let (mut state, tuning, _) = landing_setup(false);
        state.score = 495;
        tick(&mut state, &tuning);
        assert_eq!(state.score, 500);
        assert!((state.difficulty.factor - 1.1).abs() < 1e-5);
        assert_eq!(state.difficulty.next_threshold, 1000);
    }

    #[test]
    fn generator_keeps_platforms_ahead_of_camera() {
        let tuning = Tuning::default();
        let mut state = GameState::new(9, VIEW, &tuning);
        state.player.pos.y = 100.0;
        state.player.vel.y = -30.0;

        tick(&mut state, &tuning);
        let frontier = state.platforms.frontier().unwrap();
        assert!(frontier <= state.camera_y - tuning.frontier_lookahead);
    }

    #[test]
    fn determinism() {
        let tuning = Tuning::default();
        let mut a = GameState::new(99_999, VIEW, &tuning);
        let mut b = GameState::new(99_999, VIEW, &tuning);

        for i in 0..600 {
            let nudge = ((i % 40) as f32 - 20.0) * 0.1;
            a.player.vel.x += nudge;
            b.player.vel.x += nudge;
            tick(&mut a, &tuning);
            tick(&mut b, &tuning);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player, b.player);
        assert_eq!(a.platforms.len(), b.platforms.len());
    }
}
