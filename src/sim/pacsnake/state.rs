//! Grid snake state: body, food, power pellet, and ghosts

use std::collections::VecDeque;

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::SNAKE_START;
use crate::settings::PacSnakeTuning;
use crate::sim::common::{GamePhase, Score, seeded_rng, wrap_cell};

/// Grid heading. Up decreases y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// One-cell step
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GhostName {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostName {
    pub const ALL: [GhostName; 4] = [
        GhostName::Blinky,
        GhostName::Pinky,
        GhostName::Inky,
        GhostName::Clyde,
    ];

    /// Spawn corner and starting heading on a grid of `size` cells
    pub fn spawn(self, size: i32) -> (IVec2, Direction) {
        let far = size - 1;
        match self {
            GhostName::Blinky => (IVec2::new(0, 0), Direction::Right),
            GhostName::Pinky => (IVec2::new(far, 0), Direction::Left),
            GhostName::Inky => (IVec2::new(0, far), Direction::Up),
            GhostName::Clyde => (IVec2::new(far, far), Direction::Down),
        }
    }

    pub fn color(self) -> u32 {
        match self {
            GhostName::Blinky => 0xff0000,
            GhostName::Pinky => 0xffb8ff,
            GhostName::Inky => 0x00ffff,
            GhostName::Clyde => 0xffb852,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ghost {
    pub name: GhostName,
    pub pos: IVec2,
    pub heading: Direction,
}

impl Ghost {
    pub fn new(name: GhostName, size: i32) -> Self {
        let (pos, heading) = name.spawn(size);
        Self { name, pos, heading }
    }

    /// Back to the spawn corner
    pub fn reset(&mut self, size: i32) {
        let (pos, heading) = self.name.spawn(size);
        self.pos = pos;
        self.heading = heading;
    }
}

/// Complete snake game state
#[derive(Debug, Clone, Serialize)]
pub struct PacSnakeState {
    pub tuning: PacSnakeTuning,
    pub phase: GamePhase,
    pub score: Score,
    pub time_ticks: u64,
    /// Head first
    pub body: VecDeque<IVec2>,
    /// Heading used on the most recent tick
    pub heading: Direction,
    pub food: IVec2,
    pub pellet: Option<IVec2>,
    /// Tick at which power ends; powered while `time_ticks` is below it
    pub power_until: Option<u64>,
    pub ghosts: Vec<Ghost>,
    #[serde(skip)]
    rng: Pcg32,
}

impl PacSnakeState {
    pub fn new(seed: u64, tuning: PacSnakeTuning) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            tuning,
            phase: GamePhase::Ready,
            score: Score::default(),
            time_ticks: 0,
            body: VecDeque::new(),
            heading: Direction::Right,
            food: IVec2::ZERO,
            pellet: None,
            power_until: None,
            ghosts: Vec::with_capacity(GhostName::ALL.len()),
            rng: seeded_rng(seed),
        };
        state.reset();
        state
    }

    pub fn reset(&mut self) {
        let size = self.tuning.grid_size;
        self.score.reset();
        self.time_ticks = 0;
        self.body.clear();
        self.body.push_back(IVec2::from_array(SNAKE_START));
        self.heading = Direction::Right;
        self.power_until = None;
        self.food = self.random_cell();
        self.pellet = Some(self.random_cell());
        self.ghosts = GhostName::ALL
            .iter()
            .map(|&name| Ghost::new(name, size))
            .collect();
    }

    pub fn head(&self) -> IVec2 {
        self.body.front().copied().unwrap_or(IVec2::from_array(SNAKE_START))
    }

    pub fn is_powered(&self) -> bool {
        self.power_until.is_some_and(|until| self.time_ticks < until)
    }

    /// Wrap a position onto the grid
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        let size = self.tuning.grid_size;
        IVec2::new(wrap_cell(pos.x, size), wrap_cell(pos.y, size))
    }

    /// Uniform random cell. Food may land on the body.
    pub fn random_cell(&mut self) -> IVec2 {
        let size = self.tuning.grid_size.max(1);
        IVec2::new(
            self.rng.random_range(0..size),
            self.rng.random_range(0..size),
        )
    }

    /// Ghost turn roll; a fresh heading is drawn uniformly when it hits
    pub(super) fn roll_turn(&mut self) -> Option<Direction> {
        if self.rng.random::<f64>() < self.tuning.ghost_turn_chance {
            Some(Direction::ALL[self.rng.random_range(0..Direction::ALL.len())])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
        assert_eq!(Direction::Up.delta(), IVec2::new(0, -1));
    }

    #[test]
    fn test_reset_layout() {
        let state = PacSnakeState::new(9, PacSnakeTuning::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.body.len(), 1);
        assert_eq!(state.head(), IVec2::new(10, 10));
        assert!(state.pellet.is_some());
        assert!(!state.is_powered());
        let corners: Vec<_> = state.ghosts.iter().map(|g| (g.pos, g.heading)).collect();
        assert_eq!(
            corners,
            vec![
                (IVec2::new(0, 0), Direction::Right),
                (IVec2::new(29, 0), Direction::Left),
                (IVec2::new(0, 29), Direction::Up),
                (IVec2::new(29, 29), Direction::Down),
            ]
        );
    }

    #[test]
    fn test_random_cells_on_grid() {
        let mut state = PacSnakeState::new(4, PacSnakeTuning::default());
        for _ in 0..200 {
            let cell = state.random_cell();
            assert!((0..30).contains(&cell.x) && (0..30).contains(&cell.y));
        }
    }

    #[test]
    fn test_zero_sized_grid_still_runs() {
        let tuning = PacSnakeTuning {
            grid_size: 0,
            tick_secs: 0.0,
            ..Default::default()
        };
        let mut state = PacSnakeState::new(2, tuning);
        assert_eq!(state.tuning.grid_size, 1);
        assert!(state.tuning.tick_secs > 0.0);
        let input = crate::sim::pacsnake::PacSnakeInput {
            start: true,
            turn: None,
        };
        crate::sim::pacsnake::tick(&mut state, &input);
        assert_eq!(state.head(), IVec2::ZERO);
    }

    #[test]
    fn test_wrap() {
        let state = PacSnakeState::new(1, PacSnakeTuning::default());
        assert_eq!(state.wrap(IVec2::new(-1, 30)), IVec2::new(29, 0));
    }
}
