#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Playstep tutorial engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative tutorial session, and the pure simulation systems. Adapters
//! submit [`Command`] values describing desired mutations, the session executes
//! them via its `apply` entry point, and then reports [`Event`] values in causal
//! order. Renderers never receive mutable access; they consume the plain-data
//! snapshots declared here.

use std::time::Duration;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tutorial track selected by the learner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Free-movement sandbox with collectibles.
    Movement,
    /// Grid-based snake game.
    Snake,
}

impl GameMode {
    /// Lowercase identifier used by adapters and scripts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movement => "movement",
            Self::Snake => "snake",
        }
    }
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves the tutorial cursor one step forward, clamped at the last step.
    Advance,
    /// Moves the tutorial cursor one step back, clamped at the first step.
    Retreat,
    /// Discards the active simulation and starts it again from scratch.
    Restart,
    /// Replaces the active tutorial with the track for the provided mode.
    SwitchMode {
        /// Mode the session should activate.
        mode: GameMode,
    },
    /// Records a key press or release observed by the input layer.
    SetKey {
        /// Physical key that changed state.
        key: KeyCode,
        /// Whether the key is now held down.
        pressed: bool,
    },
    /// Advances the session clock by the provided wall-clock delta.
    Tick {
        /// Time elapsed since the previous tick command.
        dt: Duration,
    },
    /// Marks the tutorial as finished. Only honoured on the last step.
    Complete,
}

/// Events reported by the session after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The tutorial cursor moved to a new step.
    StepChanged {
        /// Index of the step that became current.
        index: usize,
    },
    /// A different tutorial track became active.
    ModeChanged {
        /// Mode that became active.
        mode: GameMode,
    },
    /// The active simulation was discarded and rebuilt.
    SimulationReset {
        /// Mode of the rebuilt simulation.
        mode: GameMode,
    },
    /// The tick timer was (re)armed with a new interval.
    SchedulerArmed {
        /// Interval between successive simulation ticks.
        interval: Duration,
    },
    /// The player picked up a collectible in the movement sandbox.
    CollectibleCollected {
        /// Index of the collectible that was collected.
        index: usize,
    },
    /// The snake accepted a new heading.
    DirectionChanged {
        /// Heading the snake will follow on its next tick.
        direction: Direction,
    },
    /// The snake's head landed on the food cell.
    FoodEaten {
        /// Cell the food occupied.
        cell: GridCell,
        /// Score after the meal.
        score: u32,
    },
    /// Food was placed on a new cell.
    FoodPlaced {
        /// Cell now holding the food.
        cell: GridCell,
        /// Set when the bounded retry ran out and the food overlaps the body.
        overlapping: bool,
    },
    /// The snake's tick interval changed.
    SpeedChanged {
        /// New interval between snake ticks.
        interval: Duration,
    },
    /// The snake simulation entered its terminal state.
    GameOver {
        /// Reason the game ended.
        cause: GameOverCause,
    },
    /// The learner completed the active tutorial.
    TutorialCompleted {
        /// Tutorial track that was completed.
        mode: GameMode,
    },
}

/// Reasons the snake simulation may stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverCause {
    /// The head left the play field.
    Wall,
    /// The head ran into the snake's own body.
    SelfCollision,
    /// The simulation detected corrupted internal state.
    InvariantViolation,
}

/// Cardinal headings on the play field. `Up` decreases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward decreasing `y`.
    Up,
    /// Toward increasing `y`.
    Down,
    /// Toward decreasing `x`.
    Left,
    /// Toward increasing `x`.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Heading pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit offset along each axis.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Keys understood by the engine, named after DOM `KeyboardEvent.code` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// `W`, alternate up.
    KeyW,
    /// `A`, alternate left.
    KeyA,
    /// `S`, alternate down.
    KeyS,
    /// `D`, alternate right.
    KeyD,
    /// Space bar.
    Space,
    /// `R`.
    KeyR,
}

impl KeyCode {
    /// Keys that steer the player or the snake.
    pub const DIRECTIONAL: [KeyCode; 8] = [
        Self::ArrowUp,
        Self::ArrowDown,
        Self::ArrowLeft,
        Self::ArrowRight,
        Self::KeyW,
        Self::KeyS,
        Self::KeyA,
        Self::KeyD,
    ];

    /// Keys that restart a finished snake game.
    pub const RESTART: [KeyCode; 2] = [Self::Space, Self::KeyR];

    /// Parses a DOM key code such as `"ArrowUp"` or `"KeyW"`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let key = match code {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "KeyW" => Self::KeyW,
            "KeyA" => Self::KeyA,
            "KeyS" => Self::KeyS,
            "KeyD" => Self::KeyD,
            "Space" => Self::Space,
            "KeyR" => Self::KeyR,
            _ => return None,
        };
        Some(key)
    }

    /// DOM key code for this key.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::KeyW => "KeyW",
            Self::KeyA => "KeyA",
            Self::KeyS => "KeyS",
            Self::KeyD => "KeyD",
            Self::Space => "Space",
            Self::KeyR => "KeyR",
        }
    }

    /// Direction steered by this key, if it is directional.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::ArrowUp | Self::KeyW => Some(Direction::Up),
            Self::ArrowDown | Self::KeyS => Some(Direction::Down),
            Self::ArrowLeft | Self::KeyA => Some(Direction::Left),
            Self::ArrowRight | Self::KeyD => Some(Direction::Right),
            Self::Space | Self::KeyR => None,
        }
    }
}

/// Snapshot of the four directional inputs taken at the start of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionalInput {
    /// Whether any up key is held.
    pub up: bool,
    /// Whether any down key is held.
    pub down: bool,
    /// Whether any left key is held.
    pub left: bool,
    /// Whether any right key is held.
    pub right: bool,
}

impl DirectionalInput {
    /// Creates a snapshot with explicit values.
    #[must_use]
    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Whether the provided direction is held.
    #[must_use]
    pub const fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

bitflags! {
    /// Capabilities unlocked by tutorial steps.
    ///
    /// Steps declare the flags they introduce; the session unions them from the
    /// first step through the current one and simulations derive their
    /// behaviour from the result.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Features: u32 {
        /// The movement play field is drawn.
        const PLAY_FIELD = 1 << 0;
        /// The player square is drawn.
        const PLAYER = 1 << 1;
        /// The player moves right.
        const BASIC_MOVEMENT = 1 << 2;
        /// The player moves left and right.
        const LEFT_MOVEMENT = 1 << 3;
        /// The player moves along both axes.
        const FULL_MOVEMENT = 1 << 4;
        /// The player is clamped inside the play field.
        const BOUNDARIES = 1 << 5;
        /// Collectibles are drawn.
        const COLLECTIBLES = 1 << 6;
        /// The player picks up collectibles it touches.
        const COLLISION = 1 << 7;
        /// The snake grid is drawn.
        const GRID = 1 << 8;
        /// The snake body is drawn.
        const SNAKE_BODY = 1 << 9;
        /// The snake advances on every tick.
        const SNAKE_MOVEMENT = 1 << 10;
        /// Key presses turn the snake.
        const DIRECTION_CONTROL = 1 << 11;
        /// Food is placed and eaten.
        const FOOD = 1 << 12;
        /// Eating keeps the tail, growing the snake.
        const GROWTH = 1 << 13;
        /// Eating awards points.
        const SCORE = 1 << 14;
        /// Leaving the field ends the game instead of wrapping.
        const WALL_COLLISION = 1 << 15;
        /// The snake speeds up as the score grows.
        const SPEED_SCALING = 1 << 16;
        /// Space or R restarts a finished game.
        const RESTART_KEY = 1 << 17;
        /// Score and status overlay is drawn.
        const HUD = 1 << 18;
    }
}

impl Features {
    /// Names of the contained flags in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

/// Grid-aligned position on the snake field, measured in world units.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridCell {
    x: i32,
    y: i32,
}

impl GridCell {
    /// Creates a new cell at the provided coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Cell reached by moving `step` units in `direction`.
    #[must_use]
    pub const fn stepped(self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * step,
            y: self.y + dy * step,
        }
    }

    /// Reports whether both coordinates are multiples of `cell_size`.
    #[must_use]
    pub const fn is_aligned(&self, cell_size: i32) -> bool {
        cell_size > 0 && self.x % cell_size == 0 && self.y % cell_size == 0
    }
}

/// Immutable view of a single collectible in the movement sandbox.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CollectibleSnapshot {
    /// Centre of the collectible.
    pub center: Vec2,
    /// Pickup radius.
    pub radius: f32,
    /// Whether the player already picked it up.
    pub collected: bool,
}

/// Immutable representation of the movement sandbox.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovementSnapshot {
    /// Top-left corner of the player's bounding box.
    pub position: Vec2,
    /// Edge length of the square player.
    pub player_size: f32,
    /// Collectibles in index order.
    pub collectibles: Vec<CollectibleSnapshot>,
}

impl MovementSnapshot {
    /// Number of collectibles already picked up.
    #[must_use]
    pub fn collected_count(&self) -> usize {
        self.collectibles
            .iter()
            .filter(|collectible| collectible.collected)
            .count()
    }
}

/// Immutable representation of the snake simulation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SnakeSnapshot {
    /// Body cells, head first.
    pub body: Vec<GridCell>,
    /// Heading applied on the next tick.
    pub direction: Direction,
    /// Cell holding the food.
    pub food: GridCell,
    /// Points earned so far.
    pub score: u32,
    /// Interval between ticks in milliseconds.
    pub speed_ms: u32,
    /// Whether the game reached its terminal state.
    pub game_over: bool,
    /// Why the game ended, if it did.
    pub cause: Option<GameOverCause>,
}

impl SnakeSnapshot {
    /// First body cell, if the body is non-empty.
    #[must_use]
    pub fn head(&self) -> Option<GridCell> {
        self.body.first().copied()
    }
}

/// Snapshot of whichever simulation is active.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SimulationSnapshot {
    /// Movement sandbox state.
    Movement(MovementSnapshot),
    /// Snake game state.
    Snake(SnakeSnapshot),
}

impl SimulationSnapshot {
    /// Mode of the simulation that produced this snapshot.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        match self {
            Self::Movement(_) => GameMode::Movement,
            Self::Snake(_) => GameMode::Snake,
        }
    }
}
