#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tutorial orchestration for playstep.
//!
//! A [`Session`] owns the step sequencer, the keyboard tracker, the active
//! simulation and the tick scheduler. Every mutation arrives as a
//! [`Command`] through [`apply`], which reports what happened as [`Event`]s;
//! renderers read state through the [`query`] module and never receive a
//! mutable reference. Navigating, switching modes and restarting all discard
//! the simulation and build a fresh one, re-arming the scheduler so only one
//! tick stream is ever live.

mod config;
mod scheduler;

use playstep_core::{Command, Event, Features, GameMode, SimulationSnapshot};
use playstep_system_input::InputTracker;
use playstep_system_movement::MovementSimulation;
use playstep_system_sequencer::StepSequencer;
use playstep_system_snake::SnakeSimulation;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use config::{Config, ConfigError};
pub use scheduler::{Scheduler, MAX_CATCH_UP_TICKS};

#[derive(Clone, Debug)]
enum Simulation {
    Movement(MovementSimulation),
    Snake(SnakeSimulation),
}

impl Simulation {
    fn snapshot(&self) -> SimulationSnapshot {
        match self {
            Self::Movement(movement) => SimulationSnapshot::Movement(movement.snapshot()),
            Self::Snake(snake) => SimulationSnapshot::Snake(snake.snapshot()),
        }
    }
}

/// Tutorial session state: the active track, its simulation and its timer.
#[derive(Clone, Debug)]
pub struct Session {
    config: Config,
    mode: GameMode,
    sequencer: StepSequencer,
    input: InputTracker,
    simulation: Simulation,
    scheduler: Scheduler,
    rng: ChaCha8Rng,
    completed: bool,
}

impl Session {
    /// Creates a session on the first step of the movement tutorial.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Self::with_mode(config, GameMode::Movement)
    }

    /// Creates a session on the first step of the tutorial for `mode`.
    pub fn with_mode(config: Config, mode: GameMode) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let simulation = build_simulation(&config, mode, &mut rng);
        let mut session = Self {
            sequencer: StepSequencer::for_mode(mode),
            input: InputTracker::new(),
            scheduler: Scheduler::new(),
            completed: false,
            simulation,
            config,
            mode,
            rng,
        };
        let interval = session.tick_interval();
        session.scheduler.arm(interval);
        Ok(session)
    }

    /// Configuration the session was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    fn tick_interval(&self) -> std::time::Duration {
        match &self.simulation {
            Simulation::Movement(_) => self.config.frame_interval(),
            Simulation::Snake(snake) => snake.interval(),
        }
    }

    fn features(&self) -> Features {
        self.sequencer.cumulative_features()
    }

    fn rebuild(&mut self, out_events: &mut Vec<Event>) {
        self.scheduler.cancel();
        self.simulation = build_simulation(&self.config, self.mode, &mut self.rng);
        out_events.push(Event::SimulationReset { mode: self.mode });
        self.rearm(out_events);
    }

    fn rearm(&mut self, out_events: &mut Vec<Event>) {
        let interval = self.tick_interval();
        self.scheduler.arm(interval);
        out_events.push(Event::SchedulerArmed { interval });
    }

    fn step_changed(&mut self, out_events: &mut Vec<Event>) {
        let index = self.sequencer.current_index();
        log::debug!(
            "{} tutorial moved to step {index} ({})",
            self.mode.as_str(),
            self.sequencer.current_step().title()
        );
        out_events.push(Event::StepChanged { index });
        self.rebuild(out_events);
    }

    fn handle_key_edges(&mut self, out_events: &mut Vec<Event>) {
        let turn = self.input.take_direction_edge();
        let restart = self.input.take_restart_edge();
        let features = self.features();

        let Simulation::Snake(snake) = &mut self.simulation else {
            return;
        };

        if let Some(direction) = turn {
            if features.contains(Features::DIRECTION_CONTROL) && snake.request_direction(direction)
            {
                out_events.push(Event::DirectionChanged { direction });
            }
        }

        if restart && features.contains(Features::RESTART_KEY) && snake.is_game_over() {
            log::debug!("restart key pressed after game over");
            self.rebuild(out_events);
        }
    }

    fn run_due_ticks(&mut self, out_events: &mut Vec<Event>) {
        let features = self.features();
        while self.scheduler.poll() {
            match &mut self.simulation {
                Simulation::Movement(movement) => {
                    movement.tick(self.input.directional(), features, out_events);
                }
                Simulation::Snake(snake) => {
                    let before = snake.speed_ms();
                    snake.tick(features, out_events);
                    if snake.speed_ms() != before {
                        self.rearm(out_events);
                    }
                }
            }
        }
    }
}

fn build_simulation(config: &Config, mode: GameMode, rng: &mut ChaCha8Rng) -> Simulation {
    match mode {
        GameMode::Movement => {
            Simulation::Movement(MovementSimulation::new(config.movement.clone()))
        }
        GameMode::Snake => {
            Simulation::Snake(SnakeSimulation::new(config.snake.clone(), rng.next_u64()))
        }
    }
}

/// Applies the provided command to the session, mutating state deterministically.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Advance => {
            if session.sequencer.advance() {
                session.step_changed(out_events);
            }
        }
        Command::Retreat => {
            if session.sequencer.retreat() {
                session.step_changed(out_events);
            }
        }
        Command::Restart => session.rebuild(out_events),
        Command::SwitchMode { mode } => {
            if mode == session.mode {
                return;
            }
            log::debug!("switching tutorial to {}", mode.as_str());
            session.mode = mode;
            session.sequencer = StepSequencer::for_mode(mode);
            session.completed = false;
            session.input.release_all();
            out_events.push(Event::ModeChanged { mode });
            out_events.push(Event::StepChanged { index: 0 });
            session.rebuild(out_events);
        }
        Command::SetKey { key, pressed } => {
            session.input.set_pressed(key, pressed);
            session.handle_key_edges(out_events);
        }
        Command::Tick { dt } => {
            session.scheduler.advance(dt);
            session.run_due_ticks(out_events);
        }
        Command::Complete => {
            if session.sequencer.is_last() && !session.completed {
                session.completed = true;
                log::info!("{} tutorial completed", session.mode.as_str());
                out_events.push(Event::TutorialCompleted { mode: session.mode });
            }
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::time::Duration;

    use playstep_core::{Features, GameMode, KeyCode, SimulationSnapshot};
    use serde::Serialize;

    use super::Session;

    /// Everything a renderer needs to draw the current step.
    #[derive(Clone, Debug, PartialEq, Serialize)]
    pub struct StepView {
        /// Active tutorial track.
        pub mode: GameMode,
        /// Zero-based index of the current step.
        pub index: usize,
        /// Number of steps in the track.
        pub total: usize,
        /// Heading of the current step.
        pub title: &'static str,
        /// Concept the step teaches.
        pub concept: &'static str,
        /// What changes in this step.
        pub summary: &'static str,
        /// Features unlocked through the current step.
        pub features: Features,
        /// Whether this is the final step.
        pub is_last: bool,
        /// Whether the learner completed the track.
        pub completed: bool,
        /// Live simulation state.
        pub simulation: SimulationSnapshot,
    }

    /// Captures the current step together with the live simulation.
    #[must_use]
    pub fn current_step_view(session: &Session) -> StepView {
        let step = session.sequencer.current_step();
        StepView {
            mode: session.mode,
            index: step.index(),
            total: session.sequencer.len(),
            title: step.title(),
            concept: step.concept(),
            summary: step.summary(),
            features: session.features(),
            is_last: session.sequencer.is_last(),
            completed: session.completed,
            simulation: session.simulation.snapshot(),
        }
    }

    /// Active tutorial track.
    #[must_use]
    pub fn mode(session: &Session) -> GameMode {
        session.mode
    }

    /// Index of the current step.
    #[must_use]
    pub fn step_index(session: &Session) -> usize {
        session.sequencer.current_index()
    }

    /// Number of steps in the active track.
    #[must_use]
    pub fn step_count(session: &Session) -> usize {
        session.sequencer.len()
    }

    /// Whether the cursor rests on the final step.
    #[must_use]
    pub fn is_last_step(session: &Session) -> bool {
        session.sequencer.is_last()
    }

    /// Whether the active track was completed.
    #[must_use]
    pub fn is_completed(session: &Session) -> bool {
        session.completed
    }

    /// Features unlocked through the current step.
    #[must_use]
    pub fn cumulative_features(session: &Session) -> Features {
        session.features()
    }

    /// Snapshot of the active simulation.
    #[must_use]
    pub fn simulation_snapshot(session: &Session) -> SimulationSnapshot {
        session.simulation.snapshot()
    }

    /// Interval of the armed tick stream.
    #[must_use]
    pub fn scheduler_interval(session: &Session) -> Option<Duration> {
        session.scheduler.interval()
    }

    /// Whether the key is currently held.
    #[must_use]
    pub fn is_pressed(session: &Session, key: KeyCode) -> bool {
        session.input.is_pressed(key)
    }
}
