use std::cmp::Ordering;

use crate::error::{GeneticError, Result};
use crate::evolution::EvolutionResult;

/// The fewest individuals that ever survive a generation, so that two
/// distinct parents can always be sampled during refill.
pub const MIN_SURVIVORS: usize = 2;

/// A selection strategy that keeps the best fraction of a population.
///
/// Individuals are ranked by descending fitness with a stable sort, so ties
/// keep their original relative order, and the top
/// `max(2, floor(n * elite_ratio))` survive unmodified.
///
/// # Examples
///
/// ```
/// use genblend::selection::ElitistSelection;
///
/// let population = vec!["a", "b", "c", "d", "e"];
/// let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
///
/// let selection = ElitistSelection::new(0.2);
/// let elite = selection.select(population, &fitness).unwrap();
///
/// // floor(5 * 0.2) = 1, raised to the two-survivor minimum
/// assert_eq!(elite.len(), 2);
/// assert_eq!(elite[0].pheno, "d");
/// assert_eq!(elite[1].pheno, "b");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct ElitistSelection {
    /// Fraction of the population retained each generation.
    elite_ratio: f64,
}

impl ElitistSelection {
    pub fn new(elite_ratio: f64) -> Self {
        Self { elite_ratio }
    }

    pub fn elite_ratio(&self) -> f64 {
        self.elite_ratio
    }

    /// Number of survivors for a population of `population_size`,
    /// never more than the population itself.
    pub fn elite_count(&self, population_size: usize) -> usize {
        let share = (population_size as f64 * self.elite_ratio).floor() as usize;
        share.max(MIN_SURVIVORS).min(population_size)
    }

    /// Pairs each individual with its fitness and sorts best first.
    ///
    /// The sort is stable; NaN scores sink to the end.
    pub fn rank<P>(population: Vec<P>, fitness: &[f64]) -> Result<Vec<EvolutionResult<P>>> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        if fitness.len() != population.len() {
            return Err(GeneticError::Configuration(format!(
                "Fitness vector length ({}) doesn't match population length ({})",
                fitness.len(),
                population.len()
            )));
        }

        let mut ranked: Vec<EvolutionResult<P>> = population
            .into_iter()
            .zip(fitness.iter().copied())
            .map(|(pheno, score)| EvolutionResult { pheno, score })
            .collect();

        ranked.sort_by(|a, b| {
            b.score.partial_cmp(&a.score).unwrap_or_else(|| {
                if a.score.is_nan() && !b.score.is_nan() {
                    Ordering::Greater
                } else if b.score.is_nan() && !a.score.is_nan() {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
        });

        Ok(ranked)
    }

    /// Ranks the population and keeps the elite.
    pub fn select<P>(&self, population: Vec<P>, fitness: &[f64]) -> Result<Vec<EvolutionResult<P>>> {
        let keep = self.elite_count(population.len());
        let mut ranked = Self::rank(population, fitness)?;
        ranked.truncate(keep);
        Ok(ranked)
    }
}

impl Default for ElitistSelection {
    /// Keeps the top 20% of each generation.
    fn default() -> Self {
        Self { elite_ratio: 0.2 }
    }
}
