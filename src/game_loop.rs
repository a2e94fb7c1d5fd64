//! Tick driver: owns the live state, the timer and the pending command slots.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::config::{GameConfig, Palette, ValidatedConfig};
use crate::engine::MovementEngine;
use crate::error::ConfigError;
use crate::food::{FoodSpawner, RandomFoodSpawner};
use crate::game::GameState;
use crate::grid::{Grid, Position};
use crate::input::Direction;

/// Lifecycle phase of the driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoopPhase {
    Idle,
    Running,
    GameOver,
}

/// Cancellable one-shot deadline, re-armed after every tick.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickTimer {
    deadline: Option<Instant>,
}

impl TickTimer {
    /// Schedules the next tick `period` after `now`, replacing any pending one.
    pub fn arm(&mut self, now: Instant, period: Duration) {
        self.deadline = Some(now + period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Single-threaded game driver.
///
/// Input handlers only touch the pending direction and reset slots; the live
/// [`GameState`] changes exclusively inside [`GameLoop::poll`].
#[derive(Debug)]
pub struct GameLoop<S = RandomFoodSpawner> {
    engine: MovementEngine,
    origin: Position,
    initial_direction: Direction,
    palette: Palette,
    spawner: S,
    state: GameState,
    phase: LoopPhase,
    timer: TickTimer,
    pending_direction: Option<Direction>,
    pending_reset: bool,
    generation: u64,
}

impl GameLoop<RandomFoodSpawner> {
    /// Builds a loop with an entropy-seeded spawner using the configured policy.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let validated = config.validate()?;
        let spawner = RandomFoodSpawner::from_entropy(validated.food_policy);
        Ok(Self::with_spawner(validated, spawner))
    }

    /// Builds a reproducible loop.
    pub fn from_config_with_seed(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let validated = config.validate()?;
        let spawner = RandomFoodSpawner::with_seed(seed, validated.food_policy);
        Ok(Self::with_spawner(validated, spawner))
    }
}

impl<S: FoodSpawner> GameLoop<S> {
    /// Builds an idle loop around a custom spawner. The initial snapshot is
    /// available immediately; ticking starts with [`GameLoop::start`].
    #[must_use]
    pub fn with_spawner(config: ValidatedConfig, mut spawner: S) -> Self {
        let engine = MovementEngine::new(config.grid, config.speed);
        let state = GameState::initial(
            config.grid,
            config.origin,
            config.initial_direction,
            config.speed.initial_interval_ms(),
            &mut spawner,
        );

        Self {
            engine,
            origin: config.origin,
            initial_direction: config.initial_direction,
            palette: config.palette,
            spawner,
            state,
            phase: LoopPhase::Idle,
            timer: TickTimer::default(),
            pending_direction: None,
            pending_reset: false,
            generation: 0,
        }
    }

    /// Moves from `Idle` to `Running` and arms the first tick.
    pub fn start(&mut self, now: Instant) {
        if self.phase != LoopPhase::Idle {
            return;
        }

        self.phase = LoopPhase::Running;
        self.timer.arm(now, self.state.interval());
        info!(
            grid_size = self.engine.grid().size(),
            interval_ms = self.state.interval_ms,
            "game started"
        );
    }

    /// Buffers a direction request; the latest one before a tick wins.
    pub fn set_direction(&mut self, direction: Direction) {
        trace!(?direction, "direction buffered");
        self.pending_direction = Some(direction);
    }

    /// Requests a fresh game, applied at the next [`GameLoop::poll`].
    pub fn reset(&mut self) {
        trace!("reset requested");
        self.pending_reset = true;
    }

    /// Applies a pending reset or runs one due tick.
    ///
    /// Returns true when a new snapshot was published.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending_reset {
            self.pending_reset = false;
            self.restart(now);
            return true;
        }

        if self.phase != LoopPhase::Running || !self.timer.is_due(now) {
            return false;
        }

        let requested = self
            .pending_direction
            .take()
            .unwrap_or(self.state.direction);
        let next = self.engine.step(&self.state, requested, &mut self.spawner);
        let interval_changed = next.interval_ms != self.state.interval_ms;
        self.publish(next);

        if self.state.is_over {
            self.phase = LoopPhase::GameOver;
            self.timer.cancel();
            info!(
                score = self.state.score,
                length = self.state.snake.len(),
                reason = ?self.state.end_reason,
                "game over"
            );
        } else {
            if interval_changed {
                debug!(interval_ms = self.state.interval_ms, "tick interval changed");
            }
            self.timer.arm(now, self.state.interval());
        }

        true
    }

    /// Cancels the timer and returns the final snapshot.
    #[must_use]
    pub fn shutdown(mut self) -> GameState {
        self.timer.cancel();
        info!(
            ticks = self.state.tick_count,
            score = self.state.score,
            "game loop shut down"
        );
        self.state
    }

    fn restart(&mut self, now: Instant) {
        let state = GameState::initial(
            self.engine.grid(),
            self.origin,
            self.initial_direction,
            self.engine.speed().initial_interval_ms(),
            &mut self.spawner,
        );

        self.pending_direction = None;
        self.publish(state);
        self.phase = LoopPhase::Running;
        self.timer.arm(now, self.state.interval());
        info!("game reset");
    }

    fn publish(&mut self, state: GameState) {
        self.state = state;
        self.generation += 1;
        debug!(
            generation = self.generation,
            tick = self.state.tick_count,
            score = self.state.score,
            "snapshot published"
        );
    }
}

impl<S> GameLoop<S> {
    /// Most recently published state.
    #[must_use]
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Number of snapshots published since construction.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the next tick is due, if one is scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.engine.grid()
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }
}
