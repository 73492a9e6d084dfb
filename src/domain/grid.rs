/// Grid: the square board of cells.
///
/// Coordinates are `(x, y)` with `x` the column and `y` the row,
/// both in `0..size`. Storage is row-major (`cells[y][x]`).
///
/// All mutations go through `set()`; out-of-range writes are ignored
/// so callers can't corrupt the board with a stale position.

use super::cell::Cell;

/// Integer position on the grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Offset by `(dx, dy)`. Returns `None` if the result would be negative.
    /// Upper bound is checked by the grid, which knows its size.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Position> {
        let x = self.x as i64 + dx as i64;
        let y = self.y as i64 + dy as i64;
        if x < 0 || y < 0 {
            return None;
        }
        Some(Position { x: x as usize, y: y as usize })
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// A `size` x `size` grid with every cell Empty.
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![vec![Cell::Empty; size]; size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    /// Cell at `pos`. Out of bounds reads as Obstacle (edge = wall).
    #[inline]
    pub fn get(&self, pos: Position) -> Cell {
        if self.contains(pos) {
            self.cells[pos.y][pos.x]
        } else {
            Cell::Obstacle
        }
    }

    #[inline]
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if self.contains(pos) {
            self.cells[pos.y][pos.x] = cell;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(|r| r.as_slice())
    }

    /// Every position holding `cell`, in row-major order.
    #[cfg(test)]
    pub fn positions_of(&self, cell: Cell) -> Vec<Position> {
        let mut out = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, c) in row.iter().enumerate() {
                if *c == cell {
                    out.push(Position { x, y });
                }
            }
        }
        out
    }

    #[cfg(test)]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|c| **c == cell).count()
    }

    /// Build a grid from glyph rows. Unknown glyphs become Empty.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut grid = Grid::new(size);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                grid.set(Position { x, y }, Cell::from_glyph(ch).unwrap_or_default());
            }
        }
        grid
    }
}

impl std::fmt::Display for Grid {
    /// One row per line, glyphs separated by single spaces.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(|c| c.glyph().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
