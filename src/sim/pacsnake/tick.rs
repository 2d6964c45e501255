//! One grid step of the snake game

use super::state::{Direction, PacSnakeState};
use crate::sim::common::GamePhase;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct PacSnakeInput {
    pub start: bool,
    /// Most recent arrow key since the last tick
    pub turn: Option<Direction>,
}

/// Advance the snake game by one grid step
pub fn tick(state: &mut PacSnakeState, input: &PacSnakeInput) {
    if input.start && state.phase != GamePhase::Playing {
        state.reset();
        state.phase = GamePhase::Playing;
        log::info!("pacsnake: run started");
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    if let Some(turn) = input.turn {
        if turn != state.heading.opposite() {
            state.heading = turn;
        }
    }

    move_snake(state);
    for index in 0..state.ghosts.len() {
        if !resolve_contact(state, index) {
            return;
        }
    }

    for index in 0..state.ghosts.len() {
        if let Some(heading) = state.roll_turn() {
            state.ghosts[index].heading = heading;
        }
        let ghost = state.ghosts[index];
        state.ghosts[index].pos = state.wrap(ghost.pos + ghost.heading.delta());
        if !resolve_contact(state, index) {
            return;
        }
    }

    if state.power_until.is_some() && !state.is_powered() {
        state.power_until = None;
        log::debug!("pacsnake: power expired at tick {}", state.time_ticks);
    }
}

fn move_snake(state: &mut PacSnakeState) {
    let head = state.wrap(state.head() + state.heading.delta());
    state.body.push_front(head);

    if head == state.food {
        state.score.add(state.tuning.food_score);
        state.food = state.random_cell();
        log::trace!("pacsnake: ate food, length {}", state.body.len());
    } else {
        state.body.pop_back();
    }

    if state.pellet == Some(head) {
        state.power_until = Some(state.time_ticks + state.tuning.power_ticks());
        state.pellet = Some(state.random_cell());
        log::debug!("pacsnake: powered until tick {:?}", state.power_until);
    }
}

/// Settle a head/ghost meeting. Returns false when the run ended.
fn resolve_contact(state: &mut PacSnakeState, index: usize) -> bool {
    if state.ghosts[index].pos != state.head() {
        return true;
    }
    if state.is_powered() {
        state.score.add(state.tuning.capture_score);
        let size = state.tuning.grid_size;
        state.ghosts[index].reset(size);
        log::debug!("pacsnake: captured {:?}", state.ghosts[index].name);
        true
    } else {
        state.phase = GamePhase::GameOver;
        log::info!(
            "pacsnake: caught by {:?}, score {}",
            state.ghosts[index].name,
            state.score.value()
        );
        false
    }
}
