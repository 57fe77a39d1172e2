pub mod challenge;
pub mod launcher;
pub mod options;

pub use challenge::{BlendChallenge, Challenge};
pub use launcher::{EvolutionLauncher, EvolutionReport, EvolutionResult, GenerationStats};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
