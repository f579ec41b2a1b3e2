//! Built-in tutorial definitions.
//!
//! Each step lists only the features it introduces. Steps that teach a
//! concept without changing the simulation carry an empty set.

use playstep_core::{Features, GameMode};

use crate::TutorialStep;

type StepData = (&'static str, &'static str, &'static str, Features);

const NONE: Features = Features::empty();

const MOVEMENT: [StepData; 20] = [
    (
        "Meet the Canvas",
        "canvas",
        "An empty play field appears.",
        Features::PLAY_FIELD,
    ),
    (
        "Draw the Player",
        "drawing shapes",
        "A square marks the player's position.",
        Features::PLAYER,
    ),
    (
        "Position Variables",
        "variables",
        "The player's x and y live in variables.",
        NONE,
    ),
    (
        "The Game Loop",
        "game loop",
        "The scene redraws every frame.",
        NONE,
    ),
    (
        "Listening for Keys",
        "events",
        "Key presses are recorded as they happen.",
        NONE,
    ),
    (
        "Move Right",
        "conditionals",
        "Holding right moves the player right.",
        Features::BASIC_MOVEMENT,
    ),
    (
        "A Speed Constant",
        "constants",
        "Every frame moves the player by the same amount.",
        NONE,
    ),
    (
        "Move Left",
        "else-if",
        "Left joins right as a second direction.",
        Features::LEFT_MOVEMENT,
    ),
    (
        "Up and Down",
        "coordinates",
        "The player now moves along both axes.",
        Features::FULL_MOVEMENT,
    ),
    (
        "Diagonals",
        "combining conditions",
        "Two held keys move the player diagonally.",
        NONE,
    ),
    (
        "Off the Edge",
        "debugging",
        "Nothing stops the player from leaving the field yet.",
        NONE,
    ),
    (
        "Boundaries",
        "clamping",
        "The player stays inside the field.",
        Features::BOUNDARIES,
    ),
    (
        "Minimum and Maximum",
        "functions",
        "Clamping is a minimum of a maximum.",
        NONE,
    ),
    (
        "Collectibles",
        "arrays",
        "Stars are scattered around the field.",
        Features::COLLECTIBLES,
    ),
    (
        "Drawing Many Things",
        "loops",
        "One loop draws every star.",
        NONE,
    ),
    (
        "Measuring Distance",
        "pythagorean theorem",
        "Distance between centres decides contact.",
        NONE,
    ),
    (
        "Collision Detection",
        "collision",
        "Touching a star picks it up.",
        Features::COLLISION,
    ),
    (
        "Remembering Pickups",
        "booleans",
        "Each star remembers whether it was collected.",
        NONE,
    ),
    (
        "Counting Progress",
        "counters",
        "An overlay shows how many stars remain.",
        Features::HUD,
    ),
    (
        "Putting It Together",
        "review",
        "Collect every star to finish.",
        NONE,
    ),
];

const SNAKE: [StepData; 31] = [
    (
        "A Grid World",
        "grids",
        "The field is divided into square cells.",
        Features::GRID,
    ),
    (
        "Cells and Coordinates",
        "coordinates",
        "Every cell is addressed by its top-left corner.",
        NONE,
    ),
    (
        "The Snake as a List",
        "arrays",
        "The snake is a list of cells, head first.",
        Features::SNAKE_BODY,
    ),
    (
        "Drawing Each Segment",
        "loops",
        "A loop draws each body cell.",
        NONE,
    ),
    (
        "Heading",
        "state",
        "The snake remembers which way it is facing.",
        NONE,
    ),
    (
        "The Tick",
        "timers",
        "A timer moves the snake one cell at a time.",
        Features::SNAKE_MOVEMENT,
    ),
    (
        "A New Head",
        "list insertion",
        "Each tick adds a cell in front of the head.",
        NONE,
    ),
    (
        "Dropping the Tail",
        "list removal",
        "Each tick removes the last cell.",
        NONE,
    ),
    (
        "Listening for Arrows",
        "events",
        "Arrow keys turn the snake.",
        Features::DIRECTION_CONTROL,
    ),
    (
        "No U-Turns",
        "conditionals",
        "The snake refuses to reverse into itself.",
        NONE,
    ),
    (
        "One Turn per Press",
        "debouncing",
        "Holding a key turns the snake only once.",
        NONE,
    ),
    (
        "Placing Food",
        "objects",
        "A piece of food waits on the grid.",
        Features::FOOD,
    ),
    (
        "Random Positions",
        "random numbers",
        "Eaten food reappears somewhere random.",
        NONE,
    ),
    (
        "Snapping to the Grid",
        "rounding",
        "Random positions are rounded to whole cells.",
        NONE,
    ),
    (
        "Eating",
        "equality",
        "The head landing on the food counts as a meal.",
        NONE,
    ),
    (
        "Growing",
        "state changes",
        "A meal keeps the tail, so the snake grows.",
        Features::GROWTH,
    ),
    (
        "Keeping Score",
        "counters",
        "Every meal is worth ten points.",
        Features::SCORE,
    ),
    (
        "Showing the Score",
        "text rendering",
        "The score appears above the field.",
        Features::HUD,
    ),
    (
        "Wrapping Around",
        "modulo",
        "Leaving one edge brings the snake back on the other.",
        NONE,
    ),
    (
        "Walls",
        "boundary checks",
        "Hitting an edge ends the game.",
        Features::WALL_COLLISION,
    ),
    (
        "Biting Yourself",
        "searching lists",
        "Running into the body ends the game.",
        NONE,
    ),
    (
        "Game Over",
        "game states",
        "A finished game stops moving.",
        NONE,
    ),
    (
        "Playing Again",
        "resetting state",
        "Space or R starts a fresh game.",
        Features::RESTART_KEY,
    ),
    (
        "Food Never on the Snake",
        "validation",
        "New food avoids the snake's body.",
        NONE,
    ),
    (
        "Bounded Retries",
        "loop limits",
        "Placement gives up after a fixed number of tries.",
        NONE,
    ),
    (
        "Speeding Up",
        "difficulty curves",
        "Every fifty points the snake moves faster.",
        Features::SPEED_SCALING,
    ),
    (
        "A Speed Floor",
        "limits",
        "The snake never gets faster than a set limit.",
        NONE,
    ),
    (
        "Re-arming the Timer",
        "intervals",
        "A new speed restarts the timer.",
        NONE,
    ),
    (
        "Cleaning Up Timers",
        "resource cleanup",
        "Old timers are cancelled before new ones start.",
        NONE,
    ),
    (
        "Polish",
        "refactoring",
        "Small helpers keep the game loop readable.",
        NONE,
    ),
    (
        "Ship It",
        "review",
        "The complete game, ready to play.",
        NONE,
    ),
];

/// Steps of the free-movement tutorial.
#[must_use]
pub fn movement_steps() -> Vec<TutorialStep> {
    build(&MOVEMENT)
}

/// Steps of the snake tutorial.
#[must_use]
pub fn snake_steps() -> Vec<TutorialStep> {
    build(&SNAKE)
}

/// Steps of the tutorial that drives `mode`.
#[must_use]
pub fn steps_for(mode: GameMode) -> Vec<TutorialStep> {
    match mode {
        GameMode::Movement => movement_steps(),
        GameMode::Snake => snake_steps(),
    }
}

fn build(data: &[StepData]) -> Vec<TutorialStep> {
    data.iter()
        .enumerate()
        .map(|(index, &(title, concept, summary, features))| {
            TutorialStep::new(index, title, concept, summary, features)
        })
        .collect()
}
