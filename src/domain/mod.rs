/// Pure game rules: cells, the grid and movement legality.
/// Nothing in here performs I/O or owns randomness.

pub mod cell;
pub mod grid;
pub mod rules;
