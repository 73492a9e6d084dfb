/// Events emitted while resolving one command.
/// The controller turns these into notices and outcome screens.

use crate::domain::grid::Position;
use crate::domain::rules::MoveError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PlayerMoved { from: Position, to: Position },
    ItemCollected { at: Position, total: u32 },
    BombTriggered { at: Position, items: u32 },
    GoalReached { items: u32 },
    MoveBlocked(MoveError),
    InvalidCommand(char),
    QuitRequested,
    Restarted,
}
