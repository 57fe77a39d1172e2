//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration of a blending
//! run: the number of generations, the population size, the elite ratio, the
//! logging level, and the population size at which fitness scoring switches
//! to parallel evaluation.
//!
//! ## Example
//!
//! ```rust
//! use genblend::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(10, LogLevel::Minimal, 20, 0.25);
//!
//! // Create a new EvolutionOptions instance with default parameters
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.get_num_generations(), 25);
//! assert_eq!(default_options.get_population_size(), 200);
//! ```
//!
//! ## Defaults
//!
//! | option | default |
//! |--------|---------|
//! | `num_generations` | 25 |
//! | `population_size` | 200 |
//! | `elite_ratio` | 0.2 |
//! | `log_level` | `LogLevel::None` |
//! | `parallel_threshold` | 1000 |

use crate::error::{GeneticError, Result};

pub const DEFAULT_NUM_GENERATIONS: usize = 25;
pub const DEFAULT_POPULATION_SIZE: usize = 200;
pub const DEFAULT_ELITE_RATIO: f64 = 0.2;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// How much the evolution loop reports through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// One `info` event per generation plus a `debug` event per scored individual.
    Verbose,
    /// One `info` event per generation.
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone)]
pub struct EvolutionOptions {
    num_generations: usize,
    log_level: LogLevel,
    population_size: usize,
    /// Fraction of each generation kept unmodified
    elite_ratio: f64,
    /// Minimum population size scored in parallel
    parallel_threshold: usize,
}

impl EvolutionOptions {
    pub fn new(
        num_generations: usize,
        log_level: LogLevel,
        population_size: usize,
        elite_ratio: f64,
    ) -> Self {
        Self {
            num_generations,
            log_level,
            population_size,
            elite_ratio,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_elite_ratio(&self) -> f64 {
        self.elite_ratio
    }

    /// Returns the minimum population size scored in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Sets the number of generations.
    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the elite ratio.
    pub fn set_elite_ratio(&mut self, elite_ratio: f64) {
        self.elite_ratio = elite_ratio;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Checks that the options describe a runnable evolution.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the population size is zero
    /// or the elite ratio is not a finite value in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if !self.elite_ratio.is_finite() || !(0.0..=1.0).contains(&self.elite_ratio) {
            return Err(GeneticError::Configuration(format!(
                "Elite ratio must lie in [0, 1], got {}",
                self.elite_ratio
            )));
        }

        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use genblend::evolution::options::{EvolutionOptions, LogLevel};
    ///
    /// let options = EvolutionOptions::builder()
    ///     .num_generations(10)
    ///     .log_level(LogLevel::Minimal)
    ///     .population_size(20)
    ///     .elite_ratio(0.25)
    ///     .build();
    /// assert_eq!(options.get_parallel_threshold(), 1000);
    /// ```
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: DEFAULT_NUM_GENERATIONS,
            log_level: LogLevel::None,
            population_size: DEFAULT_POPULATION_SIZE,
            elite_ratio: DEFAULT_ELITE_RATIO,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Builder for `EvolutionOptions`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    log_level: Option<LogLevel>,
    population_size: Option<usize>,
    elite_ratio: Option<f64>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    /// Sets the number of generations.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the elite ratio.
    pub fn elite_ratio(mut self, value: f64) -> Self {
        self.elite_ratio = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(DEFAULT_NUM_GENERATIONS),
            log_level: self.log_level.unwrap_or(LogLevel::None),
            population_size: self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE),
            elite_ratio: self.elite_ratio.unwrap_or(DEFAULT_ELITE_RATIO),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        let built = EvolutionOptions::builder().build();
        let default = EvolutionOptions::default();
        assert_eq!(built.get_num_generations(), default.get_num_generations());
        assert_eq!(built.get_population_size(), default.get_population_size());
        assert_eq!(built.get_elite_ratio(), default.get_elite_ratio());
        assert_eq!(built.get_log_level(), default.get_log_level());
        assert_eq!(
            built.get_parallel_threshold(),
            default.get_parallel_threshold()
        );
    }

    #[test]
    fn test_validate_rejects_zero_population() {
        let options = EvolutionOptions::new(10, LogLevel::None, 0, 0.2);
        match options.validate() {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"))
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_elite_ratio() {
        let mut options = EvolutionOptions::default();
        options.set_elite_ratio(1.5);
        assert!(options.validate().is_err());
        options.set_elite_ratio(f64::NAN);
        assert!(options.validate().is_err());
        options.set_elite_ratio(-0.1);
        assert!(options.validate().is_err());
        options.set_elite_ratio(0.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_setters() {
        let mut options = EvolutionOptions::default();
        options.set_num_generations(3);
        options.set_population_size(8);
        options.set_log_level(LogLevel::Verbose);
        options.set_parallel_threshold(4);
        assert_eq!(options.get_num_generations(), 3);
        assert_eq!(options.get_population_size(), 8);
        assert_eq!(*options.get_log_level(), LogLevel::Verbose);
        assert_eq!(options.get_parallel_threshold(), 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial_options() {
        let options: EvolutionOptions =
            serde_json::from_str(r#"{ "num_generations": 5, "log_level": "Minimal" }"#).unwrap();
        assert_eq!(options.get_num_generations(), 5);
        assert_eq!(*options.get_log_level(), LogLevel::Minimal);
        assert_eq!(options.get_population_size(), DEFAULT_POPULATION_SIZE);
    }
}
