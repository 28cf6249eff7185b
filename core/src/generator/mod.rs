use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces a fresh truth map at game start and on every restart.
pub trait BoardGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<TruthMap>;
}
