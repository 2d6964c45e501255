//! Fixed-step loop driver
//!
//! A [`Session`] owns one game. Each host frame it accumulates the elapsed
//! real time, runs as many whole fixed ticks as fit (capped to avoid a
//! spiral of death), then hands one frame description to the renderer.
//! Input is sampled once per tick, so one-shot edges land on the first tick
//! of a frame only.

use crate::consts::{FRAME_DT, MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::platform::InputState;
use crate::renderer::canvas::{flappy_canvas, pacsnake_canvas};
use crate::renderer::scene::{flappy3d_scene, voxel_scene};
use crate::renderer::{Frame, Renderer, Viewport};
use crate::sim::{
    self, Flappy3dInput, Flappy3dState, FlappyInput, FlappyState, GamePhase, PacSnakeInput,
    PacSnakeState, VoxelInput, VoxelState,
};

/// Number of frame timestamps in the FPS window
const FPS_WINDOW: usize = 60;

/// A game the session can drive
pub trait Game {
    type Input;

    fn name(&self) -> &'static str;
    /// Fixed simulation step in seconds
    fn step_dt(&self) -> f32;
    /// Turn raw input into this tick's commands, consuming one-shot edges
    fn sample(&self, input: &mut InputState) -> Self::Input;
    fn tick(&mut self, input: &Self::Input, dt: f32);
    fn phase(&self) -> GamePhase;
    fn score(&self) -> u64 {
        0
    }
    fn frame(&self, viewport: &Viewport) -> Frame;
}

impl Game for FlappyState {
    type Input = FlappyInput;

    fn name(&self) -> &'static str {
        "flappy"
    }

    fn step_dt(&self) -> f32 {
        FRAME_DT
    }

    fn sample(&self, input: &mut InputState) -> FlappyInput {
        input.sample_flappy()
    }

    fn tick(&mut self, input: &FlappyInput, dt: f32) {
        sim::flappy::tick(self, input, dt);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score.value()
    }

    fn frame(&self, _viewport: &Viewport) -> Frame {
        Frame::Canvas(flappy_canvas(self))
    }
}

impl Game for Flappy3dState {
    type Input = Flappy3dInput;

    fn name(&self) -> &'static str {
        "flappy3d"
    }

    fn step_dt(&self) -> f32 {
        FRAME_DT
    }

    fn sample(&self, input: &mut InputState) -> Flappy3dInput {
        input.sample_flappy3d()
    }

    fn tick(&mut self, input: &Flappy3dInput, dt: f32) {
        sim::flappy3d::tick(self, input, dt);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score.value()
    }

    fn frame(&self, viewport: &Viewport) -> Frame {
        Frame::Scene(flappy3d_scene(self, viewport))
    }
}

impl Game for VoxelState {
    type Input = VoxelInput;

    fn name(&self) -> &'static str {
        "voxel"
    }

    fn step_dt(&self) -> f32 {
        FRAME_DT
    }

    fn sample(&self, input: &mut InputState) -> VoxelInput {
        input.sample_voxel()
    }

    fn tick(&mut self, input: &VoxelInput, dt: f32) {
        sim::voxel::tick(self, input, dt);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn frame(&self, viewport: &Viewport) -> Frame {
        Frame::Scene(voxel_scene(self, viewport))
    }
}

impl Game for PacSnakeState {
    type Input = PacSnakeInput;

    fn name(&self) -> &'static str {
        "pacsnake"
    }

    fn step_dt(&self) -> f32 {
        self.tuning.tick_secs
    }

    fn sample(&self, input: &mut InputState) -> PacSnakeInput {
        input.sample_pacsnake(self.heading)
    }

    fn tick(&mut self, input: &PacSnakeInput, _dt: f32) {
        sim::pacsnake::tick(self, input);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score.value()
    }

    fn frame(&self, _viewport: &Viewport) -> Frame {
        Frame::Canvas(pacsnake_canvas(self))
    }
}

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame at `now` milliseconds
    pub fn record(&mut self, now: f64) {
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Runs one game at a fixed timestep
pub struct Session<G: Game> {
    pub game: G,
    accumulator: f32,
    running: bool,
    viewport: Viewport,
    fps: FpsCounter,
    last_phase: GamePhase,
    ticks: u64,
}

impl<G: Game> Session<G> {
    pub fn new(game: G, viewport: Viewport) -> Self {
        let last_phase = game.phase();
        Self {
            game,
            accumulator: 0.0,
            running: false,
            viewport,
            fps: FpsCounter::default(),
            last_phase,
            ticks: 0,
        }
    }

    /// Arm the loop and queue the start action for the next tick
    pub fn start(&mut self, input: &mut InputState) {
        input.request_start();
        self.accumulator = 0.0;
        self.running = true;
        log::info!("{}: session started", self.game.name());
    }

    /// Stop ticking. Frames are still produced.
    pub fn cancel(&mut self) {
        if self.running {
            log::info!("{}: session cancelled", self.game.name());
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Total fixed ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn resize(&mut self, width: u32, height: u32, renderer: &mut dyn Renderer) {
        self.viewport.resize(width, height);
        renderer.resize(width, height);
    }

    /// Run the ticks owed for `frame_dt` seconds, then render once.
    /// `now` is the host timestamp in milliseconds. Returns the ticks run.
    pub fn advance(
        &mut self,
        frame_dt: f32,
        now: f64,
        input: &mut InputState,
        renderer: &mut dyn Renderer,
    ) -> u32 {
        self.fps.record(now);

        let mut substeps = 0;
        if self.running {
            let step = self.game.step_dt();
            self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

            while self.accumulator >= step && substeps < MAX_SUBSTEPS {
                let sampled = self.game.sample(input);
                self.game.tick(&sampled, step);
                self.accumulator -= step;
                substeps += 1;
                self.ticks += 1;

                let phase = self.game.phase();
                if phase != self.last_phase {
                    log::debug!(
                        "{}: {:?} -> {:?}",
                        self.game.name(),
                        self.last_phase,
                        phase
                    );
                    self.last_phase = phase;
                }
                if phase == GamePhase::GameOver {
                    log::info!(
                        "{}: game over, score {}",
                        self.game.name(),
                        self.game.score()
                    );
                    self.running = false;
                    self.accumulator = 0.0;
                    break;
                }
            }
        }

        renderer.render(&self.game.frame(&self.viewport));
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Canvas, RecordingRenderer};
    use crate::settings::{FlappyTuning, PacSnakeTuning};
    use crate::sim::pacsnake::Direction;
    use glam::Vec2;

    /// Counts ticks and ends after a fixed number of them
    struct Countdown {
        ticks: u32,
        limit: u32,
        step: f32,
        phase: GamePhase,
    }

    impl Countdown {
        fn new(limit: u32, step: f32) -> Self {
            Self {
                ticks: 0,
                limit,
                step,
                phase: GamePhase::Ready,
            }
        }
    }

    impl Game for Countdown {
        type Input = bool;

        fn name(&self) -> &'static str {
            "countdown"
        }

        fn step_dt(&self) -> f32 {
            self.step
        }

        fn sample(&self, input: &mut InputState) -> bool {
            input.sample_flappy().start
        }

        fn tick(&mut self, start: &bool, _dt: f32) {
            if *start {
                self.phase = GamePhase::Playing;
            }
            self.ticks += 1;
            if self.ticks >= self.limit {
                self.phase = GamePhase::GameOver;
            }
        }

        fn phase(&self) -> GamePhase {
            self.phase
        }

        fn frame(&self, _viewport: &Viewport) -> Frame {
            Frame::Canvas(Canvas::new(Vec2::ONE))
        }
    }

    #[test]
    fn test_idle_until_started() {
        let mut session = Session::new(Countdown::new(100, 0.01), Viewport::default());
        let mut input = InputState::new();
        let mut renderer = RecordingRenderer::default();
        assert_eq!(session.advance(0.05, 16.0, &mut input, &mut renderer), 0);
        assert_eq!(renderer.frames, 1);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut session = Session::new(Countdown::new(1000, 0.001), Viewport::default());
        let mut input = InputState::new();
        let mut renderer = RecordingRenderer::default();
        session.start(&mut input);
        // A huge stall is clamped to 0.1s, and only 8 ticks run
        assert_eq!(session.advance(5.0, 16.0, &mut input, &mut renderer), MAX_SUBSTEPS);
        assert_eq!(session.game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_stops_after_game_over() {
        let mut session = Session::new(Countdown::new(3, 0.01), Viewport::default());
        let mut input = InputState::new();
        let mut renderer = RecordingRenderer::default();
        session.start(&mut input);
        assert_eq!(session.advance(0.05, 16.0, &mut input, &mut renderer), 3);
        assert!(!session.is_running());
        assert_eq!(session.advance(0.05, 32.0, &mut input, &mut renderer), 0);
        assert_eq!(session.game.ticks, 3);
        assert_eq!(renderer.frames, 2);
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut session = Session::new(Countdown::new(100, 0.01), Viewport::default());
        let mut input = InputState::new();
        let mut renderer = RecordingRenderer::default();
        session.start(&mut input);
        session.cancel();
        assert_eq!(session.advance(0.05, 16.0, &mut input, &mut renderer), 0);
    }

    #[test]
    fn test_start_edge_reaches_first_tick_only() {
        let mut session = Session::new(
            FlappyState::new(1, FlappyTuning::default()),
            Viewport::default(),
        );
        let mut input = InputState::new();
        let mut renderer = RecordingRenderer::default();
        session.start(&mut input);
        let ticks = session.advance(3.0 * FRAME_DT, 50.0, &mut input, &mut renderer);
        assert!(ticks >= 2);
        assert_eq!(session.game.phase, GamePhase::Playing);
        assert_eq!(session.game.time_ticks, ticks as u64);
    }

    #[test]
    fn test_snake_steps_at_grid_rate() {
        let mut session = Session::new(
            PacSnakeState::new(1, PacSnakeTuning::default()),
            Viewport::default(),
        );
        let mut input = InputState::new();
        let mut renderer = RecordingRenderer::default();
        session.start(&mut input);
        let mut total = 0;
        for frame in 1..=6 {
            total += session.advance(FRAME_DT, frame as f64 * 16.7, &mut input, &mut renderer);
        }
        assert!(total <= 1);
        assert!(matches!(renderer.last, Some(Frame::Canvas(_))));
    }

    #[test]
    fn test_snake_quick_turns_keep_the_valid_one() {
        let mut session = Session::new(
            PacSnakeState::new(1, PacSnakeTuning::default()),
            Viewport::default(),
        );
        let mut input = InputState::new();
        let mut renderer = RecordingRenderer::default();
        session.start(&mut input);
        assert_eq!(session.advance(0.1, 100.0, &mut input, &mut renderer), 1);
        assert_eq!(session.game.heading, Direction::Right);

        // Up then Left before the next step: Left would reverse, Up survives
        input.key_down("ArrowUp");
        input.key_up("ArrowUp");
        input.key_down("ArrowLeft");
        input.key_up("ArrowLeft");
        assert_eq!(session.advance(0.1, 200.0, &mut input, &mut renderer), 1);
        assert_eq!(session.game.heading, Direction::Up);
        assert_eq!(session.game.head(), glam::IVec2::new(11, 9));
    }

    #[test]
    fn test_snake_zero_step_does_not_spin() {
        let tuning = PacSnakeTuning {
            tick_secs: 0.0,
            ..Default::default()
        };
        let mut session = Session::new(PacSnakeState::new(1, tuning), Viewport::default());
        let mut input = InputState::new();
        let mut renderer = RecordingRenderer::default();
        session.start(&mut input);
        assert_eq!(session.advance(0.05, 50.0, &mut input, &mut renderer), 0);
        assert!(session.advance(0.05, 100.0, &mut input, &mut renderer) <= 1);
    }

    #[test]
    fn test_resize_updates_viewport_and_renderer() {
        let mut session = Session::new(Countdown::new(1, 0.01), Viewport::default());
        let mut renderer = RecordingRenderer::default();
        session.resize(1024, 512, &mut renderer);
        assert_eq!(session.viewport().aspect(), 2.0);
        assert_eq!(renderer.size, (1024, 512));
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::default();
        for i in 1..=120 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}
