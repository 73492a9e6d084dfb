/// Grid generator.
///
/// ## Placement order:
///   1. Every cell Empty
///   2. Player at (0,0)
///   3. Goal: uniform sample, resampled until the cell is Empty
///   4. Hazards: row-major scan of the still-Empty cells, one roll in 1..=5 each
///        1 → Obstacle (walls += 1)
///        2 → Bomb, only while `bombs < walls / 3` (running counters)
///        _ → stays Empty
///   5. Player re-asserted at (0,0)
///   6. Items: uniform samples at distinct cells that are not the player,
///      the goal or a bomb. Obstacles may be overwritten.
///
/// Position sampling always draws x first, then y.

use log::debug;

use crate::domain::cell::Cell;
use crate::domain::grid::{Grid, Position};
use super::random::RandomSource;

pub const MIN_GRID_SIZE: usize = 2;
/// Largest board the size prompt accepts. Keeps `N²` allocations small
/// and every coordinate inside the `i32` range of `RandomSource`.
pub const MAX_GRID_SIZE: usize = 1000;

/// Roll value that turns a cell into an obstacle.
const ROLL_OBSTACLE: i32 = 1;
/// Roll value that turns a cell into a bomb (subject to the wall ratio).
const ROLL_BOMB: i32 = 2;
const ROLL_MAX: i32 = 5;
/// At most one bomb per this many walls.
const WALLS_PER_BOMB: usize = 3;

/// A freshly generated board plus placement statistics.
#[derive(Clone, Debug)]
pub struct Layout {
    pub grid: Grid,
    pub goal: Position,
    pub walls: usize,
    pub bombs: usize,
    pub items: usize,
}

/// Running counters from the hazard scan.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct HazardStats {
    pub walls: usize,
    pub bombs: usize,
}

/// Build a complete board. `size` is clamped to `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
pub fn generate<R: RandomSource + ?Sized>(size: usize, item_count: usize, rng: &mut R) -> Layout {
    let size = size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
    let mut grid = Grid::new(size);

    grid.set(Position::ORIGIN, Cell::Player);

    let goal = place_goal(&mut grid, rng);
    let stats = scatter_hazards(&mut grid, rng);

    grid.set(Position::ORIGIN, Cell::Player);

    let items = place_items(&mut grid, goal, item_count, rng);

    Layout { grid, goal, walls: stats.walls, bombs: stats.bombs, items }
}

fn sample_position<R: RandomSource + ?Sized>(size: usize, rng: &mut R) -> Position {
    let max = i32::try_from(size.saturating_sub(1)).unwrap_or(i32::MAX);
    let x = rng.uniform(0, max) as usize;
    let y = rng.uniform(0, max) as usize;
    Position::new(x, y)
}

fn place_goal<R: RandomSource + ?Sized>(grid: &mut Grid, rng: &mut R) -> Position {
    loop {
        let pos = sample_position(grid.size(), rng);
        if grid.get(pos).is_empty() {
            grid.set(pos, Cell::Goal);
            return pos;
        }
    }
}

/// Row-major obstacle/bomb scan over the cells that are still Empty.
pub fn scatter_hazards<R: RandomSource + ?Sized>(grid: &mut Grid, rng: &mut R) -> HazardStats {
    let mut stats = HazardStats::default();
    let size = grid.size();

    for y in 0..size {
        for x in 0..size {
            let pos = Position::new(x, y);
            if !grid.get(pos).is_empty() {
                continue;
            }
            match rng.uniform(1, ROLL_MAX) {
                ROLL_OBSTACLE => {
                    grid.set(pos, Cell::Obstacle);
                    stats.walls += 1;
                }
                ROLL_BOMB if stats.bombs < stats.walls / WALLS_PER_BOMB => {
                    grid.set(pos, Cell::Bomb);
                    stats.bombs += 1;
                }
                _ => {}
            }
        }
    }

    stats
}

/// Can an item go at `pos`? Empty and Obstacle cells qualify.
fn can_place_item(grid: &Grid, pos: Position, goal: Position) -> bool {
    if pos == Position::ORIGIN || pos == goal {
        return false;
    }
    matches!(grid.get(pos), Cell::Empty | Cell::Obstacle)
}

/// Place up to `count` items; returns how many were placed.
///
/// The count is clamped to the number of eligible cells so the
/// resampling loop always has somewhere to land on tiny grids.
fn place_items<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    goal: Position,
    count: usize,
    rng: &mut R,
) -> usize {
    let size = grid.size();
    let eligible = (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|p| can_place_item(grid, *p, goal))
        .count();
    let count = if count > eligible {
        debug!("item count {count} clamped to {eligible} eligible cells");
        eligible
    } else {
        count
    };

    for _ in 0..count {
        loop {
            let pos = sample_position(size, rng);
            if can_place_item(grid, pos, goal) {
                grid.set(pos, Cell::Item);
                break;
            }
        }
    }

    count
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
