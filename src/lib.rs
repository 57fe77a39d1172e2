pub mod blend;
pub mod breeding;
pub mod bundle;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod rng;
pub mod scale;
pub mod selection;

// Re-export commonly used types for convenience
pub use blend::{BlendOutcome, Blender};
pub use bundle::{FeatureBundle, MelodicEvent};
pub use error::{GeneticError, OptionExt, Result};
pub use fitness::{fitness, BlendWeights};
