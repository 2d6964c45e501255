//! Fixed timestep tick for the 2D bird

use glam::Vec2;

use super::collision::{lands_on, resolve_floor, resolve_walls};
use super::state::FlappyState;
use crate::consts::PARTICLE_GRAVITY;
use crate::sim::common::GamePhase;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct FlappyInput {
    /// Start (or restart) the run
    pub start: bool,
    /// Flap (keyboard action)
    pub flap: bool,
    /// Pointer pressed at this canvas position
    pub pointer_down: Option<Vec2>,
    /// Pointer dragged to this canvas position
    pub pointer_move: Option<Vec2>,
    /// Pointer released: launches when the slingshot is armed, flaps otherwise
    pub pointer_up: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut FlappyState, input: &FlappyInput, dt: f32) {
    if input.start && state.phase != GamePhase::Playing {
        state.reset();
        state.phase = GamePhase::Playing;
        log::info!("flappy: run started");
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let tuning = state.tuning;

    // Slingshot aim
    if let Some(point) = input.pointer_down {
        if state.slingshot.contains(point) {
            state.slingshot.pull = Some(point);
        }
    }
    if let Some(point) = input.pointer_move {
        if state.slingshot.is_armed() {
            state.slingshot.pull = Some(point);
        }
    }
    let mut flap = input.flap;
    let mut launch = None;
    if input.pointer_up {
        match state.slingshot.pull.take() {
            Some(pull) => {
                launch = Some(state.slingshot.launch_velocity(pull, tuning.slingshot_power));
            }
            None => flap = true,
        }
    }

    // Entity update: impulses override gravity for this tick
    let bird = &mut state.bird;
    if let Some(vel) = launch {
        bird.pos = state.slingshot.pos;
        bird.vel = vel;
        log::debug!("flappy: slingshot launch {:?}", vel);
    } else if flap {
        bird.vel.y = tuning.lift;
    } else {
        bird.vel.y += tuning.gravity * dt;
    }
    let prev_bottom = bird.bottom();
    bird.pos += bird.vel * dt;

    // Collision & scoring: at most one landing per tick. Swept against the
    // unclamped motion so a platform just above the floor still counts.
    let landed = state
        .platforms
        .iter()
        .any(|platform| lands_on(prev_bottom, &state.bird, platform));

    let on_floor = resolve_floor(&mut state.bird, tuning.canvas_height);
    resolve_walls(&mut state.bird, tuning.canvas_width, tuning.wall_restitution);

    if landed {
        state.bird.vel.y = tuning.bounce;
        state.score.add(1);
        let origin = state.bird.pos;
        state.spawn_particles(origin);
        log::debug!("flappy: landed, score {}", state.score.value());
    }

    if on_floor && tuning.floor_is_lethal {
        state.phase = GamePhase::GameOver;
        log::info!("flappy: game over, score {}", state.score.value());
        return;
    }

    // Recycle platforms that scrolled off the bottom, then scroll
    for i in 0..state.platforms.len() {
        if state.platforms[i].top() > tuning.canvas_height {
            let fresh = state.random_platform(0.0);
            state.platforms[i] = fresh;
        }
        state.platforms[i].pos.y += tuning.platform_scroll_speed * dt;
    }

    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel.y += PARTICLE_GRAVITY * dt;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::settings::FlappyTuning;
    use crate::sim::flappy::state::{Platform, Slingshot};
    use proptest::prelude::*;

    fn started(seed: u64) -> FlappyState {
        let mut state = FlappyState::new(seed, FlappyTuning::default());
        let input = FlappyInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        state.platforms.clear();
        state
    }

    #[test]
    fn test_ready_until_start() {
        let mut state = FlappyState::new(1, FlappyTuning::default());
        let before = state.bird.pos;
        tick(&mut state, &FlappyInput::default(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.bird.pos, before);

        let input = FlappyInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_flap_overrides_gravity() {
        let mut state = started(2);
        state.bird.vel.y = 250.0;
        let y = state.bird.pos.y;
        let input = FlappyInput {
            flap: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert_eq!(state.bird.vel.y, state.tuning.lift);
        assert!((state.bird.pos.y - (y + state.tuning.lift * FRAME_DT)).abs() < 1e-3);
    }

    #[test]
    fn test_platform_landing_scores_once() {
        let mut state = started(3);
        state
            .platforms
            .push(Platform::new(Vec2::new(100.0, 300.0), Vec2::new(100.0, 20.0)));
        // Bird at rest just above the platform, inside [100, 200]
        state.bird.pos = Vec2::new(150.0, 300.0 - 15.0 - 0.2);
        state.bird.vel = Vec2::ZERO;

        let mut landed_tick = None;
        for i in 0..30 {
            tick(&mut state, &FlappyInput::default(), FRAME_DT);
            if state.score.value() > 0 {
                landed_tick = Some(i);
                break;
            }
        }
        assert!(landed_tick.is_some());
        assert_eq!(state.score.value(), 1);
        assert_eq!(state.bird.vel.y, state.tuning.bounce);
        assert_eq!(state.particles.len(), 10);
    }

    #[test]
    fn test_landing_on_the_same_tick_as_the_floor() {
        let mut state = started(3);
        state
            .platforms
            .push(Platform::new(Vec2::new(100.0, 592.0), Vec2::new(100.0, 20.0)));
        // Bottom edge at 590, falling fast enough to pass 600 in one tick
        state.bird.pos = Vec2::new(150.0, 590.0 - 15.0);
        state.bird.vel = Vec2::new(0.0, 600.0);

        tick(&mut state, &FlappyInput::default(), FRAME_DT);
        assert_eq!(state.score.value(), 1);
        assert_eq!(state.bird.vel.y, state.tuning.bounce);
        assert!(state.bird.bottom() <= state.tuning.canvas_height);
    }

    #[test]
    fn test_slingshot_release_launches() {
        let mut state = started(4);
        let sling = Slingshot::new(&state.tuning);
        let press = sling.pos + Vec2::new(10.0, 40.0);
        let input = FlappyInput {
            pointer_down: Some(press),
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert!(state.slingshot.is_armed());

        let drag = sling.pos + Vec2::new(100.0, -100.0);
        let input = FlappyInput {
            pointer_move: Some(drag),
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);

        let input = FlappyInput {
            pointer_up: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert!(!state.slingshot.is_armed());
        let expected = sling.launch_velocity(drag, state.tuning.slingshot_power);
        assert!((state.bird.vel - expected).length() < 1e-3);
        assert!((state.bird.pos - (sling.pos + expected * FRAME_DT)).length() < 1e-3);
    }

    #[test]
    fn test_release_without_aim_flaps() {
        let mut state = started(5);
        let input = FlappyInput {
            pointer_up: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert_eq!(state.bird.vel.y, state.tuning.lift);
    }

    #[test]
    fn test_platforms_recycle_to_top() {
        let mut state = FlappyState::new(6, FlappyTuning::default());
        let input = FlappyInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        state.platforms[0].pos.y = 601.0;
        state.bird.pos = Vec2::new(700.0, 100.0);
        tick(&mut state, &FlappyInput::default(), FRAME_DT);
        let scroll = state.tuning.platform_scroll_speed * FRAME_DT;
        assert!((state.platforms[0].top() - scroll).abs() < 1e-4);
        assert_eq!(state.platforms.len(), 5);
    }

    #[test]
    fn test_lethal_floor_ends_run() {
        let tuning = FlappyTuning {
            floor_is_lethal: true,
            ..Default::default()
        };
        let mut state = FlappyState::new(8, tuning);
        let input = FlappyInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        state.platforms.clear();
        for _ in 0..600 {
            tick(&mut state, &FlappyInput::default(), FRAME_DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);

        // Restart resets the score and position
        tick(&mut state, &input, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.value(), 0);
    }

    proptest! {
        #[test]
        fn free_flight_follows_kinematics(
            vx in -200.0f32..200.0,
            vy in -300.0f32..300.0,
            flap in any::<bool>(),
        ) {
            let mut state = started(9);
            state.bird.pos = Vec2::new(400.0, 300.0);
            state.bird.vel = Vec2::new(vx, vy);
            let before = state.bird.pos;
            let input = FlappyInput { flap, ..Default::default() };
            tick(&mut state, &input, FRAME_DT);

            let expected_vy = if flap { state.tuning.lift } else { vy + state.tuning.gravity * FRAME_DT };
            let expected = before + Vec2::new(vx, expected_vy) * FRAME_DT;
            prop_assert!((state.bird.pos - expected).length() < 1e-3);
        }
    }
}
