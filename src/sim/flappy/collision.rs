//! Collision tests for the 2D bird
//!
//! Landing is swept: the bird's bottom edge must cross the platform top
//! during the tick, so a fast fall cannot skip over a thin platform.

use super::state::{Bird, Platform};

/// Did the bird land on `platform` this tick?
///
/// `prev_bottom` is the bottom edge before integration; `bird` is the
/// integrated state. The bird must be falling and overlap the platform's
/// horizontal span.
pub fn lands_on(prev_bottom: f32, bird: &Bird, platform: &Platform) -> bool {
    let top = platform.top();
    bird.vel.y > 0.0
        && prev_bottom <= top
        && bird.bottom() >= top
        && bird.right() > platform.left()
        && bird.left() < platform.right()
}

/// Keep the bird on the canvas floor. Returns true on contact.
pub fn resolve_floor(bird: &mut Bird, floor_y: f32) -> bool {
    if bird.bottom() > floor_y {
        bird.pos.y = floor_y - bird.half().y;
        bird.vel.y = 0.0;
        return true;
    }
    false
}

/// Clamp the bird between the side walls, reflecting horizontal velocity
/// with energy loss. Returns true on contact.
pub fn resolve_walls(bird: &mut Bird, width: f32, restitution: f32) -> bool {
    let half = bird.half().x;
    if bird.left() < 0.0 {
        bird.pos.x = half;
        if bird.vel.x < 0.0 {
            bird.vel.x = -bird.vel.x * restitution;
        }
        return true;
    }
    if bird.right() > width {
        bird.pos.x = width - half;
        if bird.vel.x > 0.0 {
            bird.vel.x = -bird.vel.x * restitution;
        }
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn bird_at(x: f32, bottom: f32, vy: f32) -> Bird {
        Bird {
            pos: Vec2::new(x, bottom - 15.0),
            vel: Vec2::new(0.0, vy),
            size: Vec2::new(40.0, 30.0),
        }
    }

    fn platform() -> Platform {
        Platform::new(Vec2::new(100.0, 300.0), Vec2::new(100.0, 20.0))
    }

    #[test]
    fn test_lands_when_crossing_inside_span() {
        let bird = bird_at(150.0, 305.0, 120.0);
        assert!(lands_on(298.0, &bird, &platform()));
    }

    #[test]
    fn test_fast_fall_is_still_caught() {
        // Bottom jumps from well above to well below in one tick
        let bird = bird_at(150.0, 340.0, 3000.0);
        assert!(lands_on(260.0, &bird, &platform()));
    }

    #[test]
    fn test_no_landing_while_rising() {
        let bird = bird_at(150.0, 301.0, -200.0);
        assert!(!lands_on(299.0, &bird, &platform()));
    }

    #[test]
    fn test_no_landing_outside_span() {
        let bird = bird_at(60.0, 305.0, 120.0);
        assert!(!lands_on(298.0, &bird, &platform()));
        let bird = bird_at(230.0, 305.0, 120.0);
        assert!(!lands_on(298.0, &bird, &platform()));
    }

    #[test]
    fn test_no_landing_from_below() {
        let bird = bird_at(150.0, 312.0, 60.0);
        assert!(!lands_on(310.0, &bird, &platform()));
    }

    #[test]
    fn test_wall_reflects_with_loss() {
        let mut bird = bird_at(790.0, 300.0, 0.0);
        bird.vel.x = 100.0;
        assert!(resolve_walls(&mut bird, 800.0, 0.8));
        assert_eq!(bird.right(), 800.0);
        assert!((bird.vel.x + 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_floor_clamps_and_stops() {
        let mut bird = bird_at(100.0, 610.0, 300.0);
        assert!(resolve_floor(&mut bird, 600.0));
        assert_eq!(bird.bottom(), 600.0);
        assert_eq!(bird.vel.y, 0.0);
    }
}
