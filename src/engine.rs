use tracing::debug;

use crate::collision::collides;
use crate::food::FoodSpawner;
use crate::game::{EndReason, GameState};
use crate::grid::Grid;
use crate::input::{Direction, direction_change_is_valid};
use crate::speed::SpeedController;

/// Pure tick function over [`GameState`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MovementEngine {
    grid: Grid,
    speed: SpeedController,
}

impl MovementEngine {
    #[must_use]
    pub fn new(grid: Grid, speed: SpeedController) -> Self {
        Self { grid, speed }
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn speed(&self) -> SpeedController {
        self.speed
    }

    /// Advances `state` by one tick and returns the successor.
    ///
    /// Terminal states are returned unchanged. A reversal request is ignored while
    /// the snake is longer than one cell.
    pub fn step<S: FoodSpawner + ?Sized>(
        &self,
        state: &GameState,
        requested: Direction,
        spawner: &mut S,
    ) -> GameState {
        if state.is_over {
            return state.clone();
        }

        let direction = resolve_direction(state.direction, requested, state.snake.len());
        let head = state.snake.head().offset(direction);

        if !self.grid.contains(head) {
            debug!(x = head.x, y = head.y, "snake left the grid");
            return state.ended(EndReason::Wall);
        }

        let mut snake = state.snake.prepended(head);
        if collides(&snake) {
            debug!(x = head.x, y = head.y, "snake ran into itself");
            return state.ended(EndReason::SelfCollision);
        }

        let mut next = GameState {
            direction,
            tick_count: state.tick_count + 1,
            ..state.clone()
        };

        if head == state.food {
            next.score += 1;
            next.interval_ms = self.speed.on_feed(state.interval_ms);
            debug!(
                score = next.score,
                interval_ms = next.interval_ms,
                "snake ate food"
            );

            match spawner.spawn(self.grid, &snake) {
                Some(food) => next.food = food,
                None => {
                    next.snake = snake;
                    return next.ended(EndReason::BoardFilled);
                }
            }
        } else {
            snake.drop_tail();
        }

        next.snake = snake;
        next
    }
}

/// Picks the direction a tick actually moves in.
#[must_use]
pub fn resolve_direction(current: Direction, requested: Direction, snake_len: usize) -> Direction {
    if snake_len > 1 && !direction_change_is_valid(current, requested) {
        current
    } else {
        requested
    }
}
