//! # Breeding
//!
//! Crossover and mutation operators, and the [`ChildBuilder`] that combines
//! them into one offspring. The evolution launcher only sees the
//! [`BreedStrategy`] trait, so alternative breeders can be plugged in.
pub mod child;
pub mod crossover;
pub mod mutation;

use std::fmt::Debug;

use crate::rng::RandomNumberGenerator;

/// # BreedStrategy
///
/// The `BreedStrategy` trait defines how two parents produce one child.
pub trait BreedStrategy<P>
where
    Self: Debug + Send + Sync,
{
    /// Breeds a new individual from two parents.
    ///
    /// ## Parameters
    ///
    /// - `parent1`: The template parent whose context fields the child inherits.
    /// - `parent2`: The parent contributing the tail of the melody and harmony.
    /// - `rng`: The random number generator used for crossover and mutation.
    ///
    /// ## Returns
    ///
    /// A new individual that shares no storage with either parent.
    fn breed(&self, parent1: &P, parent2: &P, rng: &mut RandomNumberGenerator) -> P;
}

impl<P, B> BreedStrategy<P> for &B
where
    B: BreedStrategy<P> + ?Sized,
{
    fn breed(&self, parent1: &P, parent2: &P, rng: &mut RandomNumberGenerator) -> P {
        (**self).breed(parent1, parent2, rng)
    }
}

pub use child::ChildBuilder;
pub use crossover::{chord_block_crossover, melody_crossover};
pub use mutation::{mutate_pitch, mutate_rhythm, MutationRates};
