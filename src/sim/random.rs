/// Randomness sources.
///
/// Two independent streams exist per process:
///   - gameplay: `GameRng`, seeded once, injected into grid generation
///   - cosmetic: `player_color()`, a fresh time-seeded draw per game
///
/// Generation only sees the `RandomSource` trait, so tests can script
/// exact placements.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform integer in `min..=max`.
    fn uniform(&mut self, min: i32, max: i32) -> i32;
}

/// Gameplay stream backed by `StdRng`.
pub struct GameRng {
    rng: StdRng,
}

impl GameRng {
    /// Fixed seed gives reproducible boards; `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        GameRng { rng }
    }
}

impl RandomSource for GameRng {
    fn uniform(&mut self, min: i32, max: i32) -> i32 {
        self.rng.gen_range(min..=max)
    }
}

/// 256-color palette index for the player glyph, in `16..216`.
/// Seeded from wall-clock milliseconds, independent of the gameplay stream.
pub fn player_color() -> u8 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    color_from_seed(millis)
}

fn color_from_seed(seed: u64) -> u8 {
    let mut rng = StdRng::seed_from_u64(seed);
    16 + (rng.gen::<u32>() % 200) as u8
}

/// Replays a fixed list of values, panicking when exhausted or when a
/// value falls outside the requested range.
#[cfg(test)]
pub struct ScriptedRandom {
    values: std::collections::VecDeque<i32>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: &[i32]) -> Self {
        ScriptedRandom { values: values.iter().copied().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, min: i32, max: i32) -> i32 {
        let v = self.values.pop_front().expect("scripted random exhausted");
        assert!((min..=max).contains(&v), "scripted value {v} outside {min}..={max}");
        v
    }
}
