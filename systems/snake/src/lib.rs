#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid-based snake simulation advanced on a fixed tick.
//!
//! The simulation is a two-state machine. While running, every tick moves the
//! head one cell, checks walls and the body before mutating anything, and then
//! either grows (after a meal) or drops the tail. Wall or self collision moves
//! it to the terminal game-over state, where ticks are no-ops until
//! [`SnakeSimulation::restart`]. Food placement draws from a seeded
//! [`ChaCha8Rng`] with a bounded number of attempts so a tick always
//! terminates, accepting an overlapping cell once the attempts run out.

use std::{collections::VecDeque, time::Duration};

use playstep_core::{Direction, Event, Features, GameOverCause, GridCell, SnakeSnapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use thiserror::Error;

/// Head of a freshly started snake, in cells.
const INITIAL_HEAD: (i32, i32) = (10, 10);
/// Segments in a freshly started snake.
const INITIAL_LENGTH: i32 = 3;
/// Food position of a freshly started game, in cells.
const INITIAL_FOOD: (i32, i32) = (15, 10);
/// Heading of a freshly started snake.
const INITIAL_DIRECTION: Direction = Direction::Right;

/// Tuning parameters for the snake simulation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Width of the field in world units.
    pub field_width: i32,
    /// Height of the field in world units.
    pub field_height: i32,
    /// Edge length of one cell in world units.
    pub cell_size: i32,
    /// Tick interval of a fresh game in milliseconds.
    pub initial_speed_ms: u32,
    /// Shortest tick interval speed scaling may reach.
    pub min_speed_ms: u32,
    /// Interval reduction applied at each speed-up.
    pub speed_step_ms: u32,
    /// Points awarded per meal.
    pub points_per_food: u32,
    /// Score distance between speed-ups.
    pub speed_up_every: u32,
    /// Random cells tried before food may overlap the body.
    pub placement_attempts: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            field_width: 700,
            field_height: 400,
            cell_size: 20,
            initial_speed_ms: 150,
            min_speed_ms: 80,
            speed_step_ms: 10,
            points_per_food: 10,
            speed_up_every: 50,
            placement_attempts: 100,
        }
    }
}

impl SnakeConfig {
    /// Checks that a fresh game fits the field and timings are usable.
    pub fn validate(&self) -> Result<(), SnakeError> {
        if self.cell_size <= 0 {
            return Err(SnakeError::InvalidCellSize {
                cell_size: self.cell_size,
            });
        }
        if self.field_width % self.cell_size != 0 || self.field_height % self.cell_size != 0 {
            return Err(SnakeError::MisalignedField {
                width: self.field_width,
                height: self.field_height,
                cell_size: self.cell_size,
            });
        }
        let required_columns = INITIAL_HEAD.0.max(INITIAL_FOOD.0) + 1;
        let required_rows = INITIAL_HEAD.1.max(INITIAL_FOOD.1) + 1;
        if self.columns() < required_columns || self.rows() < required_rows {
            return Err(SnakeError::FieldTooSmall {
                columns: self.columns(),
                rows: self.rows(),
            });
        }
        if self.min_speed_ms == 0 {
            return Err(SnakeError::ZeroSpeed);
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(SnakeError::SpeedFloorAboveInitial {
                floor: self.min_speed_ms,
                initial: self.initial_speed_ms,
            });
        }
        if self.speed_up_every == 0 {
            return Err(SnakeError::ZeroSpeedUpInterval);
        }
        if self.placement_attempts == 0 {
            return Err(SnakeError::ZeroPlacementAttempts);
        }
        Ok(())
    }

    /// Number of cell columns on the field.
    #[must_use]
    pub fn columns(&self) -> i32 {
        if self.cell_size > 0 {
            self.field_width / self.cell_size
        } else {
            0
        }
    }

    /// Number of cell rows on the field.
    #[must_use]
    pub fn rows(&self) -> i32 {
        if self.cell_size > 0 {
            self.field_height / self.cell_size
        } else {
            0
        }
    }

    /// Reports whether the cell lies inside `[0, width) × [0, height)`.
    #[must_use]
    pub fn contains(&self, cell: GridCell) -> bool {
        (0..self.field_width).contains(&cell.x()) && (0..self.field_height).contains(&cell.y())
    }

    fn wrap(&self, cell: GridCell) -> GridCell {
        GridCell::new(
            cell.x().rem_euclid(self.field_width),
            cell.y().rem_euclid(self.field_height),
        )
    }

    fn cell(&self, column: i32, row: i32) -> GridCell {
        GridCell::new(column * self.cell_size, row * self.cell_size)
    }
}

/// Reasons a snake configuration or explicit starting state is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnakeError {
    /// The cell size must be positive.
    #[error("cell size must be positive (received {cell_size})")]
    InvalidCellSize {
        /// Rejected cell size.
        cell_size: i32,
    },
    /// The field must be a whole number of cells on each axis.
    #[error("field {width}x{height} is not a multiple of the {cell_size} unit cell")]
    MisalignedField {
        /// Configured field width.
        width: i32,
        /// Configured field height.
        height: i32,
        /// Configured cell size.
        cell_size: i32,
    },
    /// The field cannot hold a freshly started game.
    #[error("a {columns}x{rows} field is too small for a new game")]
    FieldTooSmall {
        /// Columns available.
        columns: i32,
        /// Rows available.
        rows: i32,
    },
    /// Tick intervals must be positive.
    #[error("the speed floor must be positive")]
    ZeroSpeed,
    /// The speed floor must not exceed the starting interval.
    #[error("speed floor {floor}ms exceeds initial speed {initial}ms")]
    SpeedFloorAboveInitial {
        /// Configured floor.
        floor: u32,
        /// Configured initial interval.
        initial: u32,
    },
    /// Speed-ups need a positive score distance.
    #[error("speed-up interval must be positive")]
    ZeroSpeedUpInterval,
    /// Food placement needs at least one attempt.
    #[error("food placement needs at least one attempt")]
    ZeroPlacementAttempts,
    /// A running snake needs at least one segment.
    #[error("snake body is empty")]
    EmptyBody,
    /// A cell is not a multiple of the cell size.
    #[error("cell ({}, {}) is not grid aligned", cell.x(), cell.y())]
    MisalignedCell {
        /// Offending cell.
        cell: GridCell,
    },
    /// A cell lies outside the field.
    #[error("cell ({}, {}) lies outside the field", cell.x(), cell.y())]
    OutOfField {
        /// Offending cell.
        cell: GridCell,
    },
    /// A body cell appears more than once.
    #[error("cell ({}, {}) appears twice in the body", cell.x(), cell.y())]
    DuplicateCell {
        /// Offending cell.
        cell: GridCell,
    },
    /// The food sits on the body.
    #[error("food at ({}, {}) overlaps the body", cell.x(), cell.y())]
    FoodOnBody {
        /// Food cell.
        cell: GridCell,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Running,
    GameOver(GameOverCause),
}

/// Snake game state and the rules that advance it.
#[derive(Clone, Debug)]
pub struct SnakeSimulation {
    config: SnakeConfig,
    body: VecDeque<GridCell>,
    direction: Direction,
    last_moved: Direction,
    food: GridCell,
    score: u32,
    speed_ms: u32,
    speed_ups: u32,
    status: Status,
    rng: ChaCha8Rng,
}

impl SnakeSimulation {
    /// Starts a fresh game: three segments heading right with food ahead.
    ///
    /// `config` must pass [`SnakeConfig::validate`]; sessions check it once
    /// when they are built.
    #[must_use]
    pub fn new(config: SnakeConfig, seed: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "snake config must be validated");
        let body = initial_body(&config);
        let food = config.cell(INITIAL_FOOD.0, INITIAL_FOOD.1);
        Self::assemble(config, body, INITIAL_DIRECTION, food, seed)
    }

    /// Starts a game from an explicit layout.
    ///
    /// The configuration must pass [`SnakeConfig::validate`]. The body is listed head first and must be non-empty, grid aligned,
    /// inside the field and free of duplicates. The food must be aligned,
    /// inside the field and off the body.
    pub fn from_parts(
        config: SnakeConfig,
        body: Vec<GridCell>,
        direction: Direction,
        food: GridCell,
        seed: u64,
    ) -> Result<Self, SnakeError> {
        config.validate()?;
        if body.is_empty() {
            return Err(SnakeError::EmptyBody);
        }
        for (index, cell) in body.iter().enumerate() {
            check_cell(&config, *cell)?;
            if body[..index].contains(cell) {
                return Err(SnakeError::DuplicateCell { cell: *cell });
            }
        }
        check_cell(&config, food)?;
        if body.contains(&food) {
            return Err(SnakeError::FoodOnBody { cell: food });
        }
        Ok(Self::assemble(config, body.into(), direction, food, seed))
    }

    fn assemble(
        config: SnakeConfig,
        body: VecDeque<GridCell>,
        direction: Direction,
        food: GridCell,
        seed: u64,
    ) -> Self {
        Self {
            speed_ms: config.initial_speed_ms,
            config,
            body,
            direction,
            last_moved: direction,
            food,
            score: 0,
            speed_ups: 0,
            status: Status::Running,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns to a fresh game. The random stream continues where it was.
    pub fn restart(&mut self) {
        self.body = initial_body(&self.config);
        self.direction = INITIAL_DIRECTION;
        self.last_moved = INITIAL_DIRECTION;
        self.food = self.config.cell(INITIAL_FOOD.0, INITIAL_FOOD.1);
        self.score = 0;
        self.speed_ms = self.config.initial_speed_ms;
        self.speed_ups = 0;
        self.status = Status::Running;
    }

    /// Requests a new heading for the next tick.
    ///
    /// The exact opposite of the current heading is rejected, and so is
    /// reversing onto the segment the head just left, which a second turn
    /// before the next tick could otherwise reach. Requests while the game is
    /// over are ignored. Returns whether the heading changed.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.is_game_over()
            || direction == self.direction
            || direction == self.direction.opposite()
            || direction == self.last_moved.opposite()
        {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advances the game by one tick under the unlocked features.
    pub fn tick(&mut self, features: Features, out: &mut Vec<Event>) {
        if self.is_game_over() || !features.contains(Features::SNAKE_MOVEMENT) {
            return;
        }

        let Some(head) = self.body.front().copied() else {
            log::error!("snake tick found an empty body while running");
            self.finish(GameOverCause::InvariantViolation, out);
            return;
        };

        let mut next = head.stepped(self.direction, self.config.cell_size);
        if !self.config.contains(next) {
            if features.contains(Features::WALL_COLLISION) {
                self.finish(GameOverCause::Wall, out);
                return;
            }
            next = self.config.wrap(next);
        }

        if self.body.contains(&next) {
            self.finish(GameOverCause::SelfCollision, out);
            return;
        }

        self.body.push_front(next);
        self.last_moved = self.direction;

        if features.contains(Features::FOOD) && next == self.food {
            if features.contains(Features::SCORE) {
                self.score = self.score.saturating_add(self.config.points_per_food);
            }
            out.push(Event::FoodEaten {
                cell: next,
                score: self.score,
            });
            if !features.contains(Features::GROWTH) {
                let _ = self.body.pop_back();
            }
            self.place_food(out);
            if features.contains(Features::SPEED_SCALING) {
                self.apply_speed_scaling(out);
            }
        } else {
            let _ = self.body.pop_back();
        }
    }

    fn finish(&mut self, cause: GameOverCause, out: &mut Vec<Event>) {
        log::info!("snake game over ({cause:?}) with score {}", self.score);
        self.status = Status::GameOver(cause);
        out.push(Event::GameOver { cause });
    }

    fn place_food(&mut self, out: &mut Vec<Event>) {
        let columns = self.config.columns();
        let rows = self.config.rows();
        let mut candidate = self.food;

        for _ in 0..self.config.placement_attempts {
            candidate = self
                .config
                .cell(self.rng.gen_range(0..columns), self.rng.gen_range(0..rows));
            if !self.body.contains(&candidate) {
                self.food = candidate;
                out.push(Event::FoodPlaced {
                    cell: candidate,
                    overlapping: false,
                });
                return;
            }
        }

        log::warn!(
            "food placement gave up after {} attempts; accepting overlap",
            self.config.placement_attempts
        );
        self.food = candidate;
        out.push(Event::FoodPlaced {
            cell: candidate,
            overlapping: true,
        });
    }

    fn apply_speed_scaling(&mut self, out: &mut Vec<Event>) {
        let earned = self.score / self.config.speed_up_every;
        let before = self.speed_ms;
        while self.speed_ups < earned {
            self.speed_ups += 1;
            self.speed_ms = self
                .speed_ms
                .saturating_sub(self.config.speed_step_ms)
                .max(self.config.min_speed_ms);
        }
        if self.speed_ms != before {
            log::debug!("snake speed {before}ms -> {}ms", self.speed_ms);
            out.push(Event::SpeedChanged {
                interval: self.interval(),
            });
        }
    }

    /// Body cells, head first.
    pub fn body(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.body.iter().copied()
    }

    /// Number of body segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// First body cell.
    #[must_use]
    pub fn head(&self) -> Option<GridCell> {
        self.body.front().copied()
    }

    /// Heading applied on the next tick.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Cell holding the food.
    #[must_use]
    pub const fn food(&self) -> GridCell {
        self.food
    }

    /// Points earned so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Tick interval in milliseconds.
    #[must_use]
    pub const fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    /// Tick interval as a duration.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.speed_ms))
    }

    /// Whether the game reached its terminal state.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self.status, Status::GameOver(_))
    }

    /// Why the game ended, if it did.
    #[must_use]
    pub const fn game_over_cause(&self) -> Option<GameOverCause> {
        match self.status {
            Status::Running => None,
            Status::GameOver(cause) => Some(cause),
        }
    }

    /// Configuration the game was built with.
    #[must_use]
    pub const fn config(&self) -> &SnakeConfig {
        &self.config
    }

    /// Captures a read-only snapshot for renderers.
    #[must_use]
    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            body: self.body.iter().copied().collect(),
            direction: self.direction,
            food: self.food,
            score: self.score,
            speed_ms: self.speed_ms,
            game_over: self.is_game_over(),
            cause: self.game_over_cause(),
        }
    }
}

fn initial_body(config: &SnakeConfig) -> VecDeque<GridCell> {
    (0..INITIAL_LENGTH)
        .map(|offset| config.cell(INITIAL_HEAD.0 - offset, INITIAL_HEAD.1))
        .collect()
}

fn check_cell(config: &SnakeConfig, cell: GridCell) -> Result<(), SnakeError> {
    if !cell.is_aligned(config.cell_size) {
        return Err(SnakeError::MisalignedCell { cell });
    }
    if !config.contains(cell) {
        return Err(SnakeError::OutOfField { cell });
    }
    Ok(())
}
