//! Canvas frames for the 2D games

use glam::Vec2;

use super::{Canvas, DrawCmd, hex, hsl};
use crate::consts::PARTICLE_LIFE_TICKS;
use crate::sim::pacsnake::PacSnakeState;
use crate::sim::{FlappyState, GamePhase};

/// Pixel size of one snake grid cell
pub const CELL_PX: f32 = 20.0;

const SKY: u32 = 0x87ceeb;
const BIRD_BODY: u32 = 0xff6b6b;
const PLATFORM_TOP: u32 = 0x4caf50;
const PLATFORM_EDGE: u32 = 0x45a049;
const WOOD: u32 = 0x8b4513;

pub fn flappy_canvas(state: &FlappyState) -> Canvas {
    let size = Vec2::new(state.tuning.canvas_width, state.tuning.canvas_height);
    let mut canvas = Canvas::new(size);
    canvas.clear = Some(hex(SKY));

    for platform in &state.platforms {
        canvas.push(DrawCmd::Rect {
            pos: platform.pos,
            size: platform.size,
            color: hex(PLATFORM_TOP),
        });
        canvas.push(DrawCmd::Rect {
            pos: platform.pos + Vec2::new(0.0, platform.size.y - 5.0),
            size: Vec2::new(platform.size.x, 5.0),
            color: hex(PLATFORM_EDGE),
        });
    }

    let sling = &state.slingshot;
    canvas.push(DrawCmd::Rect {
        pos: sling.pos,
        size: sling.size,
        color: hex(WOOD),
    });
    if let Some(pull) = sling.pull {
        canvas.push(DrawCmd::Line {
            from: sling.pos + Vec2::new(sling.size.x / 2.0, 0.0),
            to: pull,
            width: 3.0,
            color: hex(WOOD),
        });
    }

    let bird = &state.bird;
    canvas.push(DrawCmd::Ellipse {
        center: bird.pos,
        radii: bird.half(),
        color: hex(BIRD_BODY),
    });
    let eye = bird.pos + Vec2::new(bird.size.x * 0.2, -bird.size.y * 0.15);
    canvas.push(DrawCmd::Circle {
        center: eye,
        radius: 5.0,
        color: hex(0xffffff),
    });
    canvas.push(DrawCmd::Circle {
        center: eye + Vec2::new(1.0, 0.0),
        radius: 2.0,
        color: hex(0x000000),
    });
    canvas.push(DrawCmd::Line {
        from: bird.pos + Vec2::new(bird.size.x / 2.0, 0.0),
        to: bird.pos + Vec2::new(bird.size.x / 2.0 + 10.0, 3.0),
        width: 4.0,
        color: hex(0xffa500),
    });

    for p in &state.particles {
        let alpha = p.life as f32 / PARTICLE_LIFE_TICKS as f32;
        canvas.push(DrawCmd::Circle {
            center: p.pos,
            radius: p.radius,
            color: hsl(p.hue, 1.0, 0.5, alpha),
        });
    }

    canvas.push(DrawCmd::Text {
        pos: Vec2::new(10.0, 30.0),
        text: format!("Score: {}", state.score.value()),
        size: 24.0,
        color: hex(0xffffff),
    });
    if state.phase == GamePhase::GameOver {
        canvas.push(game_over_text(size));
    }
    canvas
}

pub fn pacsnake_canvas(state: &PacSnakeState) -> Canvas {
    let cells = state.tuning.grid_size as f32;
    let size = Vec2::splat(cells * CELL_PX);
    let mut canvas = Canvas::new(size);
    canvas.clear = Some(hex(0x000000));

    let center = |cell: glam::IVec2| cell.as_vec2() * CELL_PX + Vec2::splat(CELL_PX / 2.0);

    for (i, segment) in state.body.iter().enumerate() {
        let cmd = if i == 0 {
            DrawCmd::Circle {
                center: center(*segment),
                radius: CELL_PX / 2.0,
                color: hex(0xffff00),
            }
        } else {
            DrawCmd::Rect {
                pos: segment.as_vec2() * CELL_PX,
                size: Vec2::splat(CELL_PX),
                color: hex(0xffff00),
            }
        };
        canvas.push(cmd);
    }

    canvas.push(DrawCmd::Circle {
        center: center(state.food),
        radius: 5.0,
        color: hex(0x00ffff),
    });
    if let Some(pellet) = state.pellet {
        canvas.push(DrawCmd::Circle {
            center: center(pellet),
            radius: 8.0,
            color: hex(0xff0000),
        });
    }

    let powered = state.is_powered();
    for ghost in &state.ghosts {
        let mut color = hex(ghost.name.color());
        if powered {
            for channel in &mut color[..3] {
                *channel *= 0.5;
            }
        }
        canvas.push(DrawCmd::Rect {
            pos: ghost.pos.as_vec2() * CELL_PX,
            size: Vec2::splat(CELL_PX),
            color,
        });
    }

    canvas.push(DrawCmd::Text {
        pos: Vec2::new(10.0, 20.0),
        text: format!("Score: {}", state.score.value()),
        size: 16.0,
        color: hex(0xffffff),
    });
    if state.phase == GamePhase::GameOver {
        canvas.push(game_over_text(size));
    }
    canvas
}

fn game_over_text(size: Vec2) -> DrawCmd {
    DrawCmd::Text {
        pos: Vec2::new(size.x * 0.2, size.y * 0.5),
        text: "GAME OVER".to_string(),
        size: 40.0,
        color: hex(0xff0000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{FlappyTuning, PacSnakeTuning};

    #[test]
    fn test_flappy_canvas_contents() {
        let state = FlappyState::new(3, FlappyTuning::default());
        let canvas = flappy_canvas(&state);
        assert_eq!(canvas.size, Vec2::new(800.0, 600.0));
        let rects = canvas
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Rect { .. }))
            .count();
        // Two per platform plus the slingshot
        assert_eq!(rects, 11);
        assert!(canvas.commands.iter().any(|c| matches!(
            c,
            DrawCmd::Text { text, .. } if text == "Score: 0"
        )));
    }

    #[test]
    fn test_snake_canvas_marks_game_over() {
        let mut state = PacSnakeState::new(3, PacSnakeTuning::default());
        state.phase = GamePhase::GameOver;
        let canvas = pacsnake_canvas(&state);
        assert_eq!(canvas.size, Vec2::splat(600.0));
        assert!(canvas.commands.iter().any(|c| matches!(
            c,
            DrawCmd::Text { text, .. } if text == "GAME OVER"
        )));
    }

    #[test]
    fn test_powered_ghosts_are_dimmed() {
        let mut state = PacSnakeState::new(3, PacSnakeTuning::default());
        let normal = pacsnake_canvas(&state);
        state.power_until = Some(state.time_ticks + 10);
        let dimmed = pacsnake_canvas(&state);
        assert_ne!(normal.commands, dimmed.commands);
    }
}
