//! Scripted input sessions loaded from TOML.
//!
//! A script is a flat list of actions. Key actions map onto the session's
//! key command, `wait` is sliced into frame-sized ticks so the session sees
//! the same clock a real host would deliver.

use std::time::Duration;

use playstep_core::{Command, GameMode, KeyCode};
use serde::Deserialize;

/// Ordered list of actions replayed against a fresh session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct Script {
    #[serde(default)]
    pub(crate) actions: Vec<Action>,
}

/// Single scripted action.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum Action {
    Press {
        key: KeyCode,
    },
    Release {
        key: KeyCode,
    },
    /// Press immediately followed by release.
    Tap {
        key: KeyCode,
    },
    Wait {
        ms: u64,
    },
    Advance {
        #[serde(default = "once")]
        times: u32,
    },
    Retreat {
        #[serde(default = "once")]
        times: u32,
    },
    Restart,
    SwitchMode {
        mode: GameMode,
    },
    Complete,
}

fn once() -> u32 {
    1
}

impl Script {
    /// Parses a TOML script.
    pub(crate) fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Expands the script into session commands.
    pub(crate) fn commands(&self, frame: Duration) -> Vec<Command> {
        let mut commands = Vec::new();
        for action in &self.actions {
            action.expand(frame, &mut commands);
        }
        commands
    }
}

impl Action {
    fn expand(&self, frame: Duration, out: &mut Vec<Command>) {
        match *self {
            Self::Press { key } => out.push(Command::SetKey { key, pressed: true }),
            Self::Release { key } => out.push(Command::SetKey {
                key,
                pressed: false,
            }),
            Self::Tap { key } => {
                out.push(Command::SetKey { key, pressed: true });
                out.push(Command::SetKey {
                    key,
                    pressed: false,
                });
            }
            Self::Wait { ms } => push_wait(Duration::from_millis(ms), frame, out),
            Self::Advance { times } => {
                out.extend(std::iter::repeat(Command::Advance).take(times as usize));
            }
            Self::Retreat { times } => {
                out.extend(std::iter::repeat(Command::Retreat).take(times as usize));
            }
            Self::Restart => out.push(Command::Restart),
            Self::SwitchMode { mode } => out.push(Command::SwitchMode { mode }),
            Self::Complete => out.push(Command::Complete),
        }
    }
}

fn push_wait(total: Duration, frame: Duration, out: &mut Vec<Command>) {
    if frame.is_zero() {
        out.push(Command::Tick { dt: total });
        return;
    }

    let mut remaining = total;
    while !remaining.is_zero() {
        let dt = remaining.min(frame);
        out.push(Command::Tick { dt });
        remaining -= dt;
    }
}
