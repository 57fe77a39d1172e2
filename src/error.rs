//! # Error Types
//!
//! This module defines the error type for the blending engine. Data-quality
//! problems in feature bundles (empty melodies, missing chords, empty rhythms)
//! are never errors: the fitness function maps them to a low but defined score.
//! Errors are reserved for invalid configuration and for the outer boundary
//! where caller-supplied weights are validated.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genblend::error::{GeneticError, Result};
//!
//! fn some_function() -> Result<()> {
//!     Ok(())
//! }
//!
//! match some_function() {
//!     Ok(_) => println!("Success!"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genblend::error::{GeneticError, OptionExt};
//!
//! fn find_best_score(scores: &[u32]) -> genblend::error::Result<u32> {
//!     scores.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while blending two feature bundles.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an evolution process fails.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation produces an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when blend weights fall outside `[0, 1]` or do not sum to one.
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),
}

/// A specialized Result type for blending operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
