use std::collections::VecDeque;
use std::time::{Duration, Instant};

use grid_snake::config::GameConfig;
use grid_snake::food::FoodSpawner;
use grid_snake::game::EndReason;
use grid_snake::game_loop::{GameLoop, LoopPhase};
use grid_snake::grid::{Grid, Position};
use grid_snake::input::Direction;
use grid_snake::snake::Snake;

/// Hands out scripted cells, then falls back to a far corner.
struct Scripted(VecDeque<Position>);

impl FoodSpawner for Scripted {
    fn spawn(&mut self, grid: Grid, _occupied: &Snake) -> Option<Position> {
        let corner = i32::from(grid.size()) - 1;
        Some(
            self.0
                .pop_front()
                .unwrap_or(Position::new(corner, corner)),
        )
    }
}

fn game(foods: &[(i32, i32)]) -> GameLoop<Scripted> {
    let validated = GameConfig::default()
        .validate()
        .expect("defaults validate");
    let script = foods.iter().map(|&(x, y)| Position::new(x, y)).collect();
    GameLoop::with_spawner(validated, Scripted(script))
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn idle_loop_does_not_tick() {
    let mut game = game(&[(10, 10)]);
    let t0 = Instant::now();

    assert_eq!(game.phase(), LoopPhase::Idle);
    assert!(!game.poll(t0 + ms(1_000)));
    assert_eq!(game.generation(), 0);
    assert_eq!(game.snapshot().snake.head(), Position::new(2, 2));
}

#[test]
fn ticks_follow_the_interval() {
    let mut game = game(&[(10, 10)]);
    let t0 = Instant::now();
    game.start(t0);

    assert_eq!(game.phase(), LoopPhase::Running);
    assert!(!game.poll(t0 + ms(199)));
    assert!(game.poll(t0 + ms(200)));
    assert_eq!(game.snapshot().snake.head(), Position::new(3, 2));

    // Next deadline counts from the tick that just ran.
    assert!(!game.poll(t0 + ms(399)));
    assert!(game.poll(t0 + ms(400)));
    assert_eq!(game.snapshot().snake.head(), Position::new(4, 2));
    assert_eq!(game.generation(), 2);
}

#[test]
fn last_direction_request_wins() {
    let mut game = game(&[(10, 10)]);
    let t0 = Instant::now();
    game.start(t0);

    game.set_direction(Direction::Up);
    game.set_direction(Direction::Left);
    game.set_direction(Direction::Down);

    // Buffering alone never changes the published state.
    assert_eq!(game.snapshot().direction, Direction::Right);
    assert_eq!(game.pending_direction(), Some(Direction::Down));

    assert!(game.poll(t0 + ms(200)));
    assert_eq!(game.snapshot().snake.head(), Position::new(2, 3));
    assert_eq!(game.snapshot().direction, Direction::Down);
    assert_eq!(game.pending_direction(), None);
}

#[test]
fn feeding_reschedules_at_shorter_interval() {
    let mut game = game(&[(3, 2)]);
    let t0 = Instant::now();
    game.start(t0);

    assert!(game.poll(t0 + ms(200)));
    assert_eq!(game.snapshot().score, 1);
    assert_eq!(game.snapshot().interval_ms, 190);
    assert_eq!(game.next_deadline(), Some(t0 + ms(390)));
}

#[test]
fn wall_hit_stops_the_timer_until_reset() {
    let mut game = game(&[(10, 10)]);
    let t0 = Instant::now();
    game.start(t0);
    game.set_direction(Direction::Up);

    assert!(game.poll(t0 + ms(200)));
    assert!(game.poll(t0 + ms(400)));
    assert!(game.poll(t0 + ms(600)));

    let snapshot = game.snapshot();
    assert!(snapshot.is_over);
    assert_eq!(snapshot.end_reason, Some(EndReason::Wall));
    assert_eq!(snapshot.snake.head(), Position::new(2, 0));
    assert_eq!(game.phase(), LoopPhase::GameOver);
    assert_eq!(game.next_deadline(), None);

    let generation = game.generation();
    assert!(!game.poll(t0 + ms(10_000)));
    assert_eq!(game.generation(), generation);
}

#[test]
fn reset_is_deferred_to_the_next_poll() {
    let mut game = game(&[(3, 2), (10, 10), (7, 7)]);
    let t0 = Instant::now();
    game.start(t0);
    assert!(game.poll(t0 + ms(200)));
    assert_eq!(game.snapshot().snake.len(), 2);

    game.set_direction(Direction::Down);
    game.reset();

    // Live state is untouched until the driver runs.
    assert_eq!(game.snapshot().score, 1);

    let t1 = t0 + ms(250);
    assert!(game.poll(t1));
    let snapshot = game.snapshot();
    assert_eq!(snapshot.snake, Snake::new(Position::new(2, 2)));
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.interval_ms, 200);
    assert_eq!(snapshot.direction, Direction::Right);
    assert_eq!(snapshot.food, Position::new(7, 7));
    assert!(!snapshot.is_over);
    assert_eq!(game.pending_direction(), None);
    assert_eq!(game.phase(), LoopPhase::Running);
    assert_eq!(game.next_deadline(), Some(t1 + ms(200)));
}

#[test]
fn reset_revives_a_finished_game() {
    let mut game = game(&[(10, 10)]);
    let t0 = Instant::now();
    game.start(t0);
    game.set_direction(Direction::Up);
    for tick in 1..=3 {
        game.poll(t0 + ms(200 * tick));
    }
    assert_eq!(game.phase(), LoopPhase::GameOver);

    game.reset();
    let t1 = t0 + ms(5_000);
    assert!(game.poll(t1));
    assert_eq!(game.phase(), LoopPhase::Running);

    assert!(game.poll(t1 + ms(200)));
    assert_eq!(game.snapshot().snake.head(), Position::new(3, 2));
}

#[test]
fn shutdown_returns_final_snapshot() {
    let mut game = game(&[(10, 10)]);
    let t0 = Instant::now();
    game.start(t0);
    game.poll(t0 + ms(200));

    let last = game.shutdown();

    assert_eq!(last.tick_count, 1);
    assert_eq!(last.snake.head(), Position::new(3, 2));
}

#[test]
fn seeded_loops_are_reproducible() {
    let config = GameConfig::default();
    let first = GameLoop::from_config_with_seed(&config, 99).expect("valid config");
    let second = GameLoop::from_config_with_seed(&config, 99).expect("valid config");

    assert_eq!(first.snapshot(), second.snapshot());
}

#[test]
fn invalid_config_is_rejected_before_any_tick() {
    let config = GameConfig {
        grid_size: 1,
        ..GameConfig::default()
    };

    assert!(GameLoop::from_config(&config).is_err());
}
