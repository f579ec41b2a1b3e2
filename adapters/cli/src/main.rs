#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that lists tutorial steps and replays input scripts.

mod render;
mod script;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use playstep_core::GameMode;
use playstep_session::{apply, query, Config, Session};
use playstep_system_sequencer::StepSequencer;

use crate::{render::TextView, script::Script};

#[derive(Debug, Parser)]
#[command(name = "playstep", version, about = "Headless driver for the playstep tutorials")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Lists every step of a tutorial with the features unlocked so far.
    Steps {
        /// Tutorial track to list.
        #[arg(long, value_enum, default_value_t = ModeArg::Movement)]
        mode: ModeArg,
    },
    /// Replays a TOML input script against a fresh session.
    Replay {
        /// Script of actions to replay.
        script: PathBuf,
        /// Session configuration; defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print events and the final view as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Movement,
    Snake,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Movement => GameMode::Movement,
            ModeArg::Snake => GameMode::Snake,
        }
    }
}

/// Entry point for the playstep command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Cli::parse().command {
        CliCommand::Steps { mode } => {
            list_steps(mode.into());
            Ok(())
        }
        CliCommand::Replay {
            script,
            config,
            json,
        } => replay(&script, config.as_deref(), json),
    }
}

fn list_steps(mode: GameMode) {
    let sequencer = StepSequencer::for_mode(mode);
    for step in sequencer.steps() {
        let unlocked = sequencer.cumulative_features_at(step.index());
        println!(
            "{:>2}  {:<28} {:<22} {}",
            step.index(),
            step.title(),
            format!("[{}]", step.concept()),
            unlocked.names().join(", ")
        );
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

fn replay(script_path: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let text = fs::read_to_string(script_path)
        .with_context(|| format!("failed to read script {}", script_path.display()))?;
    let script = Script::parse(&text)
        .with_context(|| format!("failed to parse script {}", script_path.display()))?;

    let commands = script.commands(config.frame_interval());
    let mut session = Session::new(config).context("invalid configuration")?;
    let mut events = Vec::new();
    for command in commands {
        apply(&mut session, command, &mut events);
    }
    log::info!(
        "replayed {} actions into {} events",
        script.actions.len(),
        events.len()
    );

    let view = query::current_step_view(&session);
    if json {
        for event in &events {
            println!("{}", serde_json::to_string(event)?);
        }
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        for event in &events {
            println!("{event:?}");
        }
        println!();
        print!("{}", TextView::new(&view, &session.config().snake));
    }
    Ok(())
}
