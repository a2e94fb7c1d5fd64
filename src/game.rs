use std::time::Duration;

use crate::food::FoodSpawner;
use crate::grid::{Grid, Position};
use crate::input::Direction;
use crate::snake::Snake;
use crate::speed::tick_period;

/// Why a game reached its terminal state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    Wall,
    SelfCollision,
    /// The snake covers every cell food could be placed on.
    BoardFilled,
}

/// Snapshot of one game, replaced wholesale on every tick.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub interval_ms: u64,
    pub is_over: bool,
    pub end_reason: Option<EndReason>,
    pub tick_count: u64,
}

impl GameState {
    /// Fresh game: single-cell snake at `origin` and newly spawned food.
    #[must_use]
    pub fn initial<S: FoodSpawner + ?Sized>(
        grid: Grid,
        origin: Position,
        direction: Direction,
        interval_ms: u64,
        spawner: &mut S,
    ) -> Self {
        let snake = Snake::new(origin);
        let food = spawner
            .spawn(grid, &snake)
            .unwrap_or_else(|| first_cell_besides(origin));

        Self {
            snake,
            food,
            direction,
            score: 0,
            interval_ms,
            is_over: false,
            end_reason: None,
            tick_count: 0,
        }
    }

    /// Copy of this state marked terminal; everything else is left untouched.
    #[must_use]
    pub fn ended(&self, reason: EndReason) -> Self {
        Self {
            is_over: true,
            end_reason: Some(reason),
            ..self.clone()
        }
    }

    /// Current tick interval as a timer period.
    #[must_use]
    pub fn interval(&self) -> Duration {
        tick_period(self.interval_ms)
    }
}

// A grid is at least 2x2, so one of these two cells is always free.
fn first_cell_besides(origin: Position) -> Position {
    let corner = Position::new(0, 0);
    if origin == corner {
        Position::new(1, 0)
    } else {
        corner
    }
}
