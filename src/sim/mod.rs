/// Game state and its evolution: generation, per-command resolution
/// and the randomness that feeds them.

pub mod event;
pub mod generate;
pub mod random;
pub mod session;
