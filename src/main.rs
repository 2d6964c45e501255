//! Arcade Loops headless runner
//!
//! Drives each game through a short scripted session at a simulated 60 Hz
//! host frame rate and prints a JSON summary of the outcome.

use glam::Vec2;
use serde::Serialize;

use arcade_loops::platform::{InputState, PointerButton};
use arcade_loops::renderer::{RecordingRenderer, Viewport};
use arcade_loops::sim::{Flappy3dState, FlappyState, PacSnakeState, VoxelState};
use arcade_loops::{Game, Session, Settings};

/// Host frame period in seconds
const HOST_DT: f32 = 1.0 / 60.0;
/// Ten seconds of play per game
const SCRIPT_FRAMES: u32 = 600;
const VOXEL_FRAMES: u32 = 240;

#[derive(Debug, Serialize)]
struct RunSummary {
    game: &'static str,
    ticks: u64,
    frames_rendered: u64,
    score: u64,
    finished: bool,
    fps: u32,
}

#[derive(Debug, Serialize)]
struct VoxelSummary {
    placed_blocks: usize,
    clock: String,
    snapshot: String,
    reloaded: usize,
    recent_events: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    runs: Vec<RunSummary>,
    voxel: VoxelSummary,
}

/// Walk forward, look down, stack three blocks, add a torch, set the clock
fn voxel_script(frame: u32, input: &mut InputState) {
    match frame {
        0 => {
            input.key_down("KeyW");
        }
        60 => {
            input.key_up("KeyW");
            input.mouse_moved(Vec2::new(0.0, 400.0));
        }
        90 | 100 | 110 => input.click(PointerButton::Secondary),
        120 => {
            input.key_down("Digit7");
            input.key_up("Digit7");
        }
        130 => input.click(PointerButton::Secondary),
        150 => input.select_time("20:30"),
        _ => {}
    }
}

/// Play `frames` host frames, calling `script` before each one
fn play<G: Game>(
    session: &mut Session<G>,
    frames: u32,
    show_fps: bool,
    mut script: impl FnMut(u32, &mut InputState),
) -> RunSummary {
    let mut input = InputState::new();
    let mut renderer = RecordingRenderer::default();
    session.resize(1280, 720, &mut renderer);
    session.start(&mut input);

    for frame in 0..frames {
        script(frame, &mut input);
        let now = f64::from(frame + 1) * f64::from(HOST_DT) * 1000.0;
        session.advance(HOST_DT, now, &mut input, &mut renderer);
        if show_fps && frame % 60 == 59 {
            log::info!("{}: {} fps", session.game.name(), session.fps());
        }
        if !session.is_running() {
            break;
        }
    }

    RunSummary {
        game: session.game.name(),
        ticks: session.ticks(),
        frames_rendered: renderer.frames,
        score: session.game.score(),
        finished: !session.is_running(),
        fps: session.fps(),
    }
}

fn main() {
    env_logger::init();
    log::info!("Arcade Loops (native) starting...");

    let settings = Settings::load();
    let seed = settings.run_seed();
    log::info!("Seed: {seed}");
    let viewport = Viewport::default();
    let mut runs = Vec::new();

    // 2D bird: flap on a steady beat, one slingshot shot at the start
    let mut flappy = Session::new(FlappyState::new(seed, settings.flappy), viewport);
    let sling = flappy.game.slingshot.pos + flappy.game.slingshot.size / 2.0;
    runs.push(play(&mut flappy, SCRIPT_FRAMES, settings.show_fps, |frame, input| {
        match frame {
            1 => input.pointer_pressed(sling),
            2 => input.pointer_moved(sling + Vec2::new(40.0, -60.0)),
            3 => input.pointer_released(),
            f if f % 24 == 0 => {
                input.key_down("Space");
                input.key_up("Space");
            }
            _ => {}
        }
    }));

    // 3D bird: click to flap
    let mut flappy3d = Session::new(Flappy3dState::new(seed, settings.flappy3d), viewport);
    runs.push(play(&mut flappy3d, SCRIPT_FRAMES, settings.show_fps, |frame, input| {
        if frame % 30 == 0 {
            input.click(PointerButton::Primary);
        }
    }));

    // Snake: zig-zag up the board
    let mut snake = Session::new(PacSnakeState::new(seed, settings.pacsnake), viewport);
    runs.push(play(&mut snake, SCRIPT_FRAMES, settings.show_fps, |frame, input| {
        let code = match frame % 40 {
            0 => "ArrowUp",
            20 => "ArrowRight",
            _ => return,
        };
        input.key_down(code);
        input.key_up(code);
    }));

    // Voxel: walk, look down, build a small stack, then set the clock
    let mut voxel = Session::new(VoxelState::new(seed, settings.voxel), viewport);
    runs.push(play(&mut voxel, VOXEL_FRAMES, settings.show_fps, voxel_script));

    let snapshot = voxel.game.save_text();
    let mut reloaded = VoxelState::new(seed, settings.voxel);
    let report = reloaded.load_text(&snapshot);
    let voxel_summary = VoxelSummary {
        placed_blocks: voxel.game.world.placed().count(),
        clock: voxel.game.clock.to_string(),
        snapshot,
        reloaded: report.loaded,
        recent_events: voxel
            .game
            .events
            .iter()
            .map(|e| format!("[{}] {}", e.tick, e.event))
            .collect(),
    };

    let summary = Summary {
        seed,
        runs,
        voxel: voxel_summary,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_loops::settings::VoxelTuning;

    #[test]
    fn test_voxel_script_builds_and_sets_clock() {
        let mut voxel = Session::new(VoxelState::new(5, VoxelTuning::default()), Viewport::default());
        let summary = play(&mut voxel, VOXEL_FRAMES, false, voxel_script);
        assert_eq!(summary.game, "voxel");
        assert!(!summary.finished);
        assert_eq!(summary.frames_rendered, u64::from(VOXEL_FRAMES));
        assert!(voxel.game.world.placed().count() >= 1);
        assert!(voxel.game.clock.to_string().starts_with("20:3"));
    }
}
