//! Scroll tracking
//!
//! The camera follows the player up and never back down. All lines below are
//! world-space y values measured from the camera.

/// Camera position after following the player this tick
#[inline]
pub fn follow(camera_y: f32, player_y: f32, view_height: f32, lead: f32) -> f32 {
    camera_y.min(player_y - view_height * lead)
}

/// Above this line the same-platform bounce latch re-arms
#[inline]
pub fn rearm_line(camera_y: f32, view_height: f32, fraction: f32) -> f32 {
    camera_y + view_height * fraction
}

/// Below this line the player is lost
#[inline]
pub fn death_line(camera_y: f32, view_height: f32) -> f32 {
    camera_y + view_height
}
