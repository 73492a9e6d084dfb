/// GameSession: one playthrough from generation to a terminal outcome.
///
/// ## Grid layers
///
///   - `pristine` — the board as generated. **Never mutated.**
///   - `grid`     — the live board.
///
/// `replay()` resets `grid = pristine.clone()`.
///
/// ## Position bookkeeping
///
/// `player` and `goal` are tracked as fields *and* as cell values.
/// `apply()` keeps both views in sync: after every call the unique
/// Player cell sits at `player`, and `goal` never changes.

use log::{debug, info};

use crate::domain::cell::Cell;
use crate::domain::grid::{Grid, Position};
use crate::domain::rules::{self, Command, MoveDir};
use super::event::GameEvent;
use super::generate::{self, Layout};
use super::random::RandomSource;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Playing,
    Lost,
    Won,
    Restarted,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::Playing
    }
}

/// Read-only view handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub items_collected: u32,
    pub player_color: u8,
    pub notice: Option<&'a str>,
}

pub struct GameSession {
    pristine: Grid,
    grid: Grid,
    player: Position,
    goal: Position,
    items_collected: u32,
    player_color: u8,
    status: Status,
}

// ── Construction ──

impl GameSession {
    /// Generate a fresh board and start playing on it.
    pub fn generate<R: RandomSource + ?Sized>(
        size: usize,
        item_count: usize,
        rng: &mut R,
        player_color: u8,
    ) -> Self {
        let layout = generate::generate(size, item_count, rng);
        debug!(
            "generated {size}x{size} grid: goal=({}, {}) walls={} bombs={} items={}",
            layout.goal.x, layout.goal.y, layout.walls, layout.bombs, layout.items
        );
        Self::from_layout(layout, player_color)
    }

    pub fn from_layout(layout: Layout, player_color: u8) -> Self {
        GameSession {
            pristine: layout.grid.clone(),
            grid: layout.grid,
            player: Position::ORIGIN,
            goal: layout.goal,
            items_collected: 0,
            player_color,
            status: Status::Playing,
        }
    }

    /// Restore the generated board with the player back at the start.
    /// The item counter resets along with the board, and the goal stays put.
    pub fn replay(&mut self) {
        self.grid = self.pristine.clone();
        self.player = Position::ORIGIN;
        self.items_collected = 0;
        self.status = Status::Playing;
    }
}

// ── Queries ──

impl GameSession {
    #[cfg(test)]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn player(&self) -> Position {
        self.player
    }

    #[cfg(test)]
    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn items_collected(&self) -> u32 {
        self.items_collected
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn snapshot<'a>(&'a self, notice: Option<&'a str>) -> Snapshot<'a> {
        Snapshot {
            grid: &self.grid,
            items_collected: self.items_collected,
            player_color: self.player_color,
            notice,
        }
    }
}

// ── Command resolution ──

impl GameSession {
    /// Resolve one command. Terminal sessions ignore further commands.
    ///
    /// `Quit` only reports `QuitRequested`; confirming it is up to the
    /// caller, and an unconfirmed quit leaves the session untouched.
    pub fn apply(&mut self, command: Command) -> Vec<GameEvent> {
        if self.status.is_terminal() {
            return vec![];
        }

        match command {
            Command::Move(dir) => self.resolve_move(dir),
            Command::Quit => vec![GameEvent::QuitRequested],
            Command::Restart => {
                self.items_collected = 0;
                self.status = Status::Restarted;
                info!("run restarted");
                vec![GameEvent::Restarted]
            }
            Command::Invalid(key) => vec![GameEvent::InvalidCommand(key)],
        }
    }

    fn resolve_move(&mut self, dir: MoveDir) -> Vec<GameEvent> {
        let (target, cell) = match rules::check_move(&self.grid, self.player, dir) {
            Ok(ok) => ok,
            Err(e) => return vec![GameEvent::MoveBlocked(e)],
        };

        let mut events = Vec::with_capacity(2);
        let from = self.player;

        self.grid.set(from, Cell::Empty);
        self.grid.set(target, Cell::Player);
        self.player = target;
        events.push(GameEvent::PlayerMoved { from, to: target });

        if cell.is_item() {
            self.items_collected += 1;
            events.push(GameEvent::ItemCollected { at: target, total: self.items_collected });
        } else if cell.is_bomb() {
            self.status = Status::Lost;
            info!("bomb at ({}, {}) with {} items", target.x, target.y, self.items_collected);
            events.push(GameEvent::BombTriggered { at: target, items: self.items_collected });
            return events;
        }

        if self.player == self.goal {
            self.status = Status::Won;
            info!("goal reached with {} items", self.items_collected);
            events.push(GameEvent::GoalReached { items: self.items_collected });
        }

        events
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
