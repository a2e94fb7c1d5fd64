use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};
use crate::snake::Snake;

/// Which cells a new food may land on.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Any cell the snake does not occupy.
    #[default]
    FreeCells,
    /// Any cell except the snake's head; food may sit on the body.
    AnyButHead,
}

impl SpawnPolicy {
    fn admits(self, position: Position, snake: &Snake) -> bool {
        match self {
            Self::FreeCells => !snake.occupies(position),
            Self::AnyButHead => position != snake.head(),
        }
    }
}

/// Source of food coordinates.
pub trait FoodSpawner {
    /// Picks the next food cell, or `None` when no admissible cell is left.
    fn spawn(&mut self, grid: Grid, occupied: &Snake) -> Option<Position>;
}

/// Uniform random spawner over the cells its policy admits.
#[derive(Debug, Clone)]
pub struct RandomFoodSpawner<R = StdRng> {
    rng: R,
    policy: SpawnPolicy,
}

impl RandomFoodSpawner<StdRng> {
    /// Creates a deterministic spawner for tests and reproducible games.
    #[must_use]
    pub fn with_seed(seed: u64, policy: SpawnPolicy) -> Self {
        Self::new(StdRng::seed_from_u64(seed), policy)
    }

    /// Creates a spawner seeded from OS entropy.
    #[must_use]
    pub fn from_entropy(policy: SpawnPolicy) -> Self {
        Self::new(StdRng::from_entropy(), policy)
    }
}

impl<R: Rng> RandomFoodSpawner<R> {
    #[must_use]
    pub fn new(rng: R, policy: SpawnPolicy) -> Self {
        Self { rng, policy }
    }
}

impl<R: Rng> FoodSpawner for RandomFoodSpawner<R> {
    fn spawn(&mut self, grid: Grid, occupied: &Snake) -> Option<Position> {
        spawn_position(&mut self.rng, grid, occupied, self.policy)
    }
}

/// Random draws tried before falling back to walking the board.
const MAX_SPAWN_ATTEMPTS: usize = 64;

/// Draws a uniformly random cell admitted by `policy`.
///
/// Sparse boards are sampled by rejection; once the snake covers half the board,
/// or every draw missed, the admitted cells are counted and one is picked by index.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    snake: &Snake,
    policy: SpawnPolicy,
) -> Option<Position> {
    if snake.len().saturating_mul(2) <= grid.cell_count() {
        let upper = i32::from(grid.size());
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let cell = Position::new(rng.gen_range(0..upper), rng.gen_range(0..upper));
            if policy.admits(cell, snake) {
                return Some(cell);
            }
        }
    }

    let admitted = grid.cells().filter(|cell| policy.admits(*cell, snake)).count();
    if admitted == 0 {
        return None;
    }

    let index = rng.gen_range(0..admitted);
    grid.cells()
        .filter(|cell| policy.admits(*cell, snake))
        .nth(index)
}
