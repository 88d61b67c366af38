use rand::{rngs::StdRng, seq::IteratorRandom, Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::{GameError, Result};
use crate::grid::Grid;
use crate::snake::Snake;
use crate::Cell;

const MAX_RANDOM_DRAWS: usize = 64;

pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        FoodSpawner { rng }
    }

    /// Picks a uniformly random cell the snake doesn't cover.
    pub fn spawn(&mut self, grid: &Grid, snake: &Snake) -> Result<Cell> {
        if snake.len() >= grid.cell_count() {
            warn!(len = snake.len(), "snake covers the whole grid");
            return Err(GameError::GridFull);
        }

        // Rejection sampling is cheap while the snake is short
        for _ in 0..MAX_RANDOM_DRAWS {
            let cell = (self.rng.gen_range(0..grid.cols()), self.rng.gen_range(0..grid.rows()));
            if !snake.occupies(cell) {
                debug!(?cell, "food spawned");
                return Ok(cell);
            }
        }

        let cell = grid
            .cells()
            .filter(|&cell| !snake.occupies(cell))
            .choose(&mut self.rng)
            .ok_or(GameError::GridFull)?;
        debug!(?cell, "food spawned after exhausting random draws");
        Ok(cell)
    }
}
