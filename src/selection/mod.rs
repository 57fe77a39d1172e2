pub mod elitist;

pub use elitist::{ElitistSelection, MIN_SURVIVORS};
