/// Command parsing and movement rules — truth-table driven.
///
/// Pure functions operating on the grid — no side effects.
/// These encode "what is legal" without performing the action.
///
/// ## Command Table
/// ┌──────────────┬────────────────────┐
/// │ Key           │ Command            │
/// ├──────────────┼────────────────────┤
/// │ W / w         │ Move Up    (y - 1) │
/// │ A / a         │ Move Left  (x - 1) │
/// │ S / s         │ Move Down  (y + 1) │
/// │ D / d         │ Move Right (x + 1) │
/// │ Q / q         │ Quit (confirmed)   │
/// │ R / r         │ Restart            │
/// │ anything else │ Invalid            │
/// └──────────────┴────────────────────┘
///
/// ## Movement Truth Table
/// ┌──────────────────────┬───────────────┬──────────────────┐
/// │ Target                │ Allow?        │ Effect           │
/// ├──────────────────────┼───────────────┼──────────────────┤
/// │ Out of bounds         │ DENY          │ notice           │
/// │ Obstacle              │ DENY          │ notice           │
/// │ Item                  │ ALLOW         │ items += 1       │
/// │ Bomb                  │ ALLOW         │ run lost         │
/// │ Goal / Empty          │ ALLOW         │ relocate         │
/// └──────────────────────┴───────────────┴──────────────────┘

use super::cell::Cell;
use super::grid::{Grid, Position};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Up,
    Left,
    Down,
    Right,
}

impl MoveDir {
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::Up => (0, -1),
            MoveDir::Left => (-1, 0),
            MoveDir::Down => (0, 1),
            MoveDir::Right => (1, 0),
        }
    }
}

/// One parsed turn command.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(MoveDir),
    Quit,
    Restart,
    Invalid(char),
}

impl Command {
    /// Case-insensitive single-key parse. See the command table above.
    pub fn parse(key: char) -> Command {
        match key.to_ascii_uppercase() {
            'W' => Command::Move(MoveDir::Up),
            'A' => Command::Move(MoveDir::Left),
            'S' => Command::Move(MoveDir::Down),
            'D' => Command::Move(MoveDir::Right),
            'Q' => Command::Quit,
            'R' => Command::Restart,
            _ => Command::Invalid(key),
        }
    }
}

/// Why a move was refused. The turn continues after either.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveError {
    OutOfBounds,
    Obstacle,
}

impl MoveError {
    pub fn notice(self) -> &'static str {
        match self {
            MoveError::OutOfBounds => "Invalid move! You can't go outside the grid.",
            MoveError::Obstacle => "Oops! You bumped into an obstacle.",
        }
    }
}

/// Notice shown for an unrecognized command.
pub const INVALID_COMMAND_NOTICE: &str =
    "Invalid move! Use W/A/S/D to move, Q to quit, or R to restart.";

/// Where would a step in `dir` from `from` land, and what is there?
/// Bounds are checked before the target cell is inspected.
pub fn check_move(grid: &Grid, from: Position, dir: MoveDir) -> Result<(Position, Cell), MoveError> {
    let (dx, dy) = dir.delta();
    let target = from
        .offset(dx, dy)
        .filter(|p| grid.contains(*p))
        .ok_or(MoveError::OutOfBounds)?;
    let cell = grid.get(target);
    if !cell.is_passable() {
        return Err(MoveError::Obstacle);
    }
    Ok((target, cell))
}
