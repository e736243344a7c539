//! Player integration and platform landing detection
//!
//! Landings are one-way: the player passes up through platforms and only
//! lands while falling with its feet inside a thin band at the platform top.

use super::platforms::PlatformField;
use super::state::{Platform, Player};
use crate::tuning::Tuning;
use crate::wrap_horizontal;

/// Advance the player by one fixed step.
///
/// Horizontal velocity decays by friction before moving; vertical velocity
/// picks up gravity before moving. The world wraps horizontally.
pub fn integrate(player: &mut Player, gravity: f32, tuning: &Tuning, world_width: f32) {
    player.vel.x *= tuning.friction;
    player.pos.x += player.vel.x;

    player.vel.y += gravity;
    player.pos.y += player.vel.y;

    player.pos.x = wrap_horizontal(player.pos.x, player.size.x, world_width);
}

/// Check whether a falling player is standing on a platform this tick
///
/// The feet must lie strictly between the platform top and
/// `platform height + tolerance` below it, which catches one tick of fall.
pub fn lands_on(player: &Player, platform: &Platform, tolerance: f32) -> bool {
    let feet = player.bottom();
    player.vel.y > 0.0
        && feet > platform.pos.y
        && feet < platform.pos.y + platform.size.y + tolerance
        && player.bounds().overlaps_x(&platform.bounds())
}

/// First platform in creation order the player lands on, if any
pub fn find_landing<'a>(
    player: &Player,
    platforms: &'a PlatformField,
    tolerance: f32,
) -> Option<&'a Platform> {
    platforms.iter().find(|p| lands_on(player, p, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player_at(x: f32, y: f32, vy: f32) -> Player {
        let tuning = Tuning::default();
        Player {
            pos: Vec2::new(x, y),
            vel: Vec2::new(0.0, vy),
            size: tuning.player_size(),
        }
    }

    fn platform_at(id: u32, x: f32, y: f32) -> Platform {
        Platform {
            id,
            pos: Vec2::new(x, y),
            size: Tuning::default().platform_size(),
            special: false,
        }
    }

    #[test]
    fn integrate_applies_friction_then_moves() {
        let tuning = Tuning::default();
        let mut p = player_at(100.0, 100.0, 0.0);
        p.vel.x = 10.0;
        integrate(&mut p, 0.5, &tuning, 1080.0);
        assert!((p.vel.x - 9.0).abs() < 1e-5);
        assert!((p.pos.x - 109.0).abs() < 1e-4);
    }

    #[test]
    fn integrate_adds_gravity_then_moves() {
        let tuning = Tuning::default();
        let mut p = player_at(100.0, 100.0, 5.0);
        integrate(&mut p, 0.5, &tuning, 1080.0);
        assert_eq!(p.vel.y, 5.5);
        assert_eq!(p.pos.y, 105.5);
    }

    #[test]
    fn integrate_wraps_both_edges() {
        let tuning = Tuning::default();
        let mut p = player_at(-151.0, 100.0, 0.0);
        integrate(&mut p, 0.0, &tuning, 1080.0);
        assert_eq!(p.pos.x, 1080.0);

        let mut p = player_at(1081.0, 100.0, 0.0);
        integrate(&mut p, 0.0, &tuning, 1080.0);
        assert_eq!(p.pos.x, -150.0);
    }

    #[test]
    fn lands_only_while_falling() {
        let platform = platform_at(0, 100.0, 500.0);
        let falling = player_at(100.0, 500.0 - 190.0 + 5.0, 3.0);
        let rising = player_at(100.0, 500.0 - 190.0 + 5.0, -3.0);
        assert!(lands_on(&falling, &platform, 10.0));
        assert!(!lands_on(&rising, &platform, 10.0));
    }

    #[test]
    fn landing_band_edges() {
        let platform = platform_at(0, 100.0, 500.0);
        // Feet exactly at the top: not yet landed
        assert!(!lands_on(&player_at(100.0, 310.0, 3.0), &platform, 10.0));
        // Feet just inside the bottom of the band
        assert!(lands_on(&player_at(100.0, 310.0 + 52.9, 3.0), &platform, 10.0));
        // Feet past the band
        assert!(!lands_on(&player_at(100.0, 310.0 + 53.0, 3.0), &platform, 10.0));
    }

    #[test]
    fn landing_needs_horizontal_overlap() {
        let platform = platform_at(0, 100.0, 500.0);
        // Right edge touching platform left edge is not an overlap
        assert!(!lands_on(&player_at(-50.0, 320.0, 3.0), &platform, 10.0));
        assert!(lands_on(&player_at(-49.0, 320.0, 3.0), &platform, 10.0));
        assert!(!lands_on(&player_at(270.0, 320.0, 3.0), &platform, 10.0));
    }

    #[test]
    fn first_match_in_creation_order_wins() {
        let tuning = Tuning::default();
        let mut field = PlatformField::default();
        let first = field.insert(Vec2::new(100.0, 510.0), tuning.platform_size(), false);
        let _second = field.insert(Vec2::new(100.0, 500.0), tuning.platform_size(), true);

        let player = player_at(100.0, 325.0, 3.0);
        let hit = find_landing(&player, &field, 10.0).map(|p| p.id);
        assert_eq!(hit, Some(first));
    }
}
