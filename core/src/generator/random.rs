use rand::{SeedableRng, rngs::SmallRng};

use super::*;

/// Uniformly random bomb placement from a generator seeded once at startup.
///
/// Restarts keep drawing from the same stream, so every game differs while a
/// seed still reproduces the whole sequence.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        log::debug!("seed: {}", seed);
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<TruthMap> {
        TruthMap::generate(config, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restarts_draw_new_boards() {
        let config = GameConfig::default();
        let mut generator = RandomBoardGenerator::new(1);

        let first = generator.generate(&config).unwrap();
        let second = generator.generate(&config).unwrap();

        assert_eq!(first.bomb_count(), second.bomb_count());
        assert_ne!(first, second);
    }

    #[test]
    fn seed_reproduces_sequence() {
        let config = GameConfig::default();
        let mut a = RandomBoardGenerator::new(99);
        let mut b = RandomBoardGenerator::new(99);

        for _ in 0..3 {
            assert_eq!(a.generate(&config), b.generate(&config));
        }
    }
}
