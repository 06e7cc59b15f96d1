//! Bounded random integers over explicitly threaded generators.

use rand::distributions::uniform::SampleUniform;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator owned by each mounted game.
pub type GameRng = ChaCha8Rng;

/// Returns an integer drawn uniformly from the closed interval `[min, max]`.
///
/// Reversed bounds are swapped rather than rejected.
pub fn rand_int<T, R>(rng: &mut R, min: T, max: T) -> T
where
    T: SampleUniform + PartialOrd + Copy,
    R: Rng + ?Sized,
{
    let (lo, hi) = if max < min { (max, min) } else { (min, max) };
    rng.gen_range(lo..=hi)
}

/// Deterministic generator for a given seed.
pub fn seeded(seed: u64) -> GameRng
{
    GameRng::seed_from_u64(seed)
}

/// Generator seeded from the thread-local entropy source.
pub fn from_entropy() -> GameRng
{
    GameRng::seed_from_u64(rand::thread_rng().next_u64())
}

/// Splits an independent stream off `parent`.
pub fn fork(parent: &mut GameRng) -> GameRng
{
    GameRng::seed_from_u64(parent.next_u64())
}
