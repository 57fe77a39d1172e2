use std::fmt::Debug;
use std::marker::PhantomData;

use rayon::prelude::*;
use tracing::{debug, info};

use super::{
    challenge::Challenge,
    options::{EvolutionOptions, LogLevel},
};
use crate::{
    breeding::BreedStrategy,
    error::{GeneticError, OptionExt, Result},
    rng::RandomNumberGenerator,
    selection::ElitistSelection,
};

/// Represents the result of an evolution, containing a phenotype and its associated score.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult<P> {
    /// The evolved phenotype.
    pub pheno: P,
    /// The fitness score of the phenotype.
    pub score: f64,
}

/// Summary of one generation at the moment it was ranked.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_score: f64,
    pub mean_score: f64,
    pub elite_size: usize,
}

/// The winner of a run together with the per-generation history.
#[derive(Debug, Clone)]
pub struct EvolutionReport<P> {
    pub best: EvolutionResult<P>,
    pub history: Vec<GenerationStats>,
}

/// Manages the evolution process using a specified breeding strategy and challenge.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<P, Strategy, Chall>
where
    Strategy: BreedStrategy<P>,
    Chall: Challenge<P>,
{
    strategy: Strategy,
    challenge: Chall,
    _marker: PhantomData<P>,
}

impl<P, Strategy, Chall> EvolutionLauncher<P, Strategy, Chall>
where
    P: Clone + Debug + Send + Sync,
    Strategy: BreedStrategy<P>,
    Chall: Challenge<P> + Sync,
{
    /// Creates a new `EvolutionLauncher` instance with the specified breeding strategy and challenge.
    pub fn new(strategy: Strategy, challenge: Chall) -> Self {
        Self {
            strategy,
            challenge,
            _marker: PhantomData,
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn challenge(&self) -> &Chall {
        &self.challenge
    }

    /// Breeds `size` independent children of the two sources.
    pub fn init_population(
        &self,
        source1: &P,
        source2: &P,
        size: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<P> {
        (0..size)
            .map(|_| self.strategy.breed(source1, source2, rng))
            .collect()
    }

    /// Evolves `population` and returns the best individual with its score.
    ///
    /// See [`evolve_with_history`](Self::evolve_with_history).
    pub fn evolve(
        &self,
        population: Vec<P>,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult<P>> {
        self.evolve_with_history(population, options, rng)
            .map(|report| report.best)
    }

    /// Evolves `population` for `options.get_num_generations()` generations.
    ///
    /// Each generation the population is ranked by fitness, the elite survives
    /// unmodified, and the population is refilled to its original size with
    /// children of two distinct members of the growing survivor set. After the
    /// last generation the population is ranked once more and the top
    /// individual returned. Since elites are never modified, the best score is
    /// non-decreasing from one generation to the next.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The population is empty
    /// - The options fail validation
    /// - A fitness score is not finite
    ///
    /// # Performance
    ///
    /// Populations of at least `options.get_parallel_threshold()` individuals
    /// are scored in parallel with Rayon. Scoring draws no randomness, so the
    /// outcome does not depend on the threshold.
    pub fn evolve_with_history(
        &self,
        population: Vec<P>,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionReport<P>> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        options.validate()?;

        let selection = ElitistSelection::new(options.get_elite_ratio());
        let target_size = population.len();
        let mut population = population;
        let mut history = Vec::with_capacity(options.get_num_generations());

        for generation in 0..options.get_num_generations() {
            let scores = self.score_all(&population, options)?;
            let elite = selection.select(population, &scores)?;

            let best_score = elite.first().map(|r| r.score).ok_or_else_genetic(|| {
                GeneticError::Evolution(format!(
                    "No survivors selected in generation {}",
                    generation
                ))
            })?;
            let stats = GenerationStats {
                generation,
                best_score,
                mean_score: scores.iter().sum::<f64>() / scores.len() as f64,
                elite_size: elite.len(),
            };
            log_generation(options.get_log_level(), &stats, &scores);
            history.push(stats);

            let mut next: Vec<P> = Vec::with_capacity(target_size);
            next.extend(elite.into_iter().map(|survivor| survivor.pheno));

            while next.len() < target_size {
                let (i, j) = rng.sample_pair(next.len()).ok_or_else_genetic(|| {
                    GeneticError::Evolution(format!(
                        "Cannot sample two parents from {} survivors in generation {}",
                        next.len(),
                        generation
                    ))
                })?;
                let child = self.strategy.breed(&next[i], &next[j], rng);
                next.push(child);
            }

            population = next;
        }

        let scores = self.score_all(&population, options)?;
        let best = ElitistSelection::rank(population, &scores)?
            .into_iter()
            .next()
            .ok_or_else_genetic(|| {
                GeneticError::Evolution(
                    "Evolution completed but no viable candidates were produced".to_string(),
                )
            })?;

        Ok(EvolutionReport { best, history })
    }

    fn score_all(&self, population: &[P], options: &EvolutionOptions) -> Result<Vec<f64>> {
        let check = |score: f64| {
            if score.is_finite() {
                Ok(score)
            } else {
                Err(GeneticError::FitnessCalculation(format!(
                    "Non-finite fitness score encountered: {}",
                    score
                )))
            }
        };

        if population.len() >= options.get_parallel_threshold() {
            population
                .par_iter()
                .map(|candidate| check(self.challenge.score(candidate)))
                .collect()
        } else {
            population
                .iter()
                .map(|candidate| check(self.challenge.score(candidate)))
                .collect()
        }
    }
}

fn log_generation(level: &LogLevel, stats: &GenerationStats, scores: &[f64]) {
    match level {
        LogLevel::None => {}
        LogLevel::Minimal => info!(
            generation = stats.generation,
            best = stats.best_score,
            mean = stats.mean_score,
            elite = stats.elite_size,
            "generation ranked"
        ),
        LogLevel::Verbose => {
            info!(
                generation = stats.generation,
                best = stats.best_score,
                mean = stats.mean_score,
                elite = stats.elite_size,
                "generation ranked"
            );
            for (individual, score) in scores.iter().enumerate() {
                debug!(generation = stats.generation, individual, score, "scored");
            }
        }
    }
}
