/// Cell types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Empty,
    Player,
    Goal,
    Obstacle, // Blocks movement
    Item,     // Pickup target
    Bomb,     // Ends the run when stepped on
}

impl Cell {
    /// Single-character glyph used in the text frame.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player => 'P',
            Cell::Goal => 'G',
            Cell::Obstacle => '#',
            Cell::Item => 'I',
            Cell::Bomb => 'B',
        }
    }

    /// Inverse of `glyph()`. Unknown characters map to `None`.
    #[cfg(test)]
    pub fn from_glyph(ch: char) -> Option<Cell> {
        match ch {
            '.' => Some(Cell::Empty),
            'P' => Some(Cell::Player),
            'G' => Some(Cell::Goal),
            '#' => Some(Cell::Obstacle),
            'I' => Some(Cell::Item),
            'B' => Some(Cell::Bomb),
            _ => None,
        }
    }

    /// Can the player step onto this cell?
    pub fn is_passable(self) -> bool {
        !matches!(self, Cell::Obstacle)
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Is this an item pickup?
    pub fn is_item(self) -> bool {
        matches!(self, Cell::Item)
    }

    pub fn is_bomb(self) -> bool {
        matches!(self, Cell::Bomb)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}
