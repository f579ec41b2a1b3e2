#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic free-movement sandbox driven by tutorial features.
//!
//! A tick reads a directional input snapshot and the unlocked [`Features`],
//! moves the player, clamps it inside the field once boundaries are unlocked,
//! and picks up every collectible it touches once collision is unlocked. The
//! tick is a pure function of the previous state, the input and the features.

use glam::Vec2;
use playstep_core::{CollectibleSnapshot, DirectionalInput, Event, Features, MovementSnapshot};
use serde::Deserialize;

/// Placement of a collectible on the field.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct CollectibleConfig {
    /// Centre of the collectible.
    pub center: Vec2,
    /// Pickup radius.
    pub radius: f32,
}

impl CollectibleConfig {
    /// Creates a collectible description.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Tuning parameters for the movement sandbox.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Width of the play field.
    pub field_width: f32,
    /// Height of the play field.
    pub field_height: f32,
    /// Margin kept between the player and every edge once boundaries apply.
    pub inset: f32,
    /// Edge length of the square player.
    pub player_size: f32,
    /// Distance travelled per tick along each held axis.
    pub speed: f32,
    /// Initial top-left corner of the player.
    pub start: Vec2,
    /// Collectibles in index order.
    pub collectibles: Vec<CollectibleConfig>,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            field_width: 700.0,
            field_height: 400.0,
            inset: 15.0,
            player_size: 50.0,
            speed: 3.0,
            start: Vec2::new(50.0, 175.0),
            collectibles: vec![
                CollectibleConfig::new(Vec2::new(200.0, 100.0), 15.0),
                CollectibleConfig::new(Vec2::new(350.0, 300.0), 15.0),
                CollectibleConfig::new(Vec2::new(600.0, 150.0), 15.0),
            ],
        }
    }
}

impl MovementConfig {
    /// Smallest permitted top-left corner once boundaries apply.
    #[must_use]
    pub fn min_bound(&self) -> Vec2 {
        Vec2::splat(self.inset)
    }

    /// Largest permitted top-left corner once boundaries apply.
    #[must_use]
    pub fn max_bound(&self) -> Vec2 {
        Vec2::new(
            self.field_width - self.player_size - self.inset,
            self.field_height - self.player_size - self.inset,
        )
    }

    fn half_extent(&self) -> f32 {
        self.player_size / 2.0
    }
}

/// Movement sandbox state: the player's position and which collectibles are gone.
#[derive(Clone, Debug)]
pub struct MovementSimulation {
    config: MovementConfig,
    position: Vec2,
    collected: Vec<bool>,
}

impl MovementSimulation {
    /// Creates a sandbox with the player at the configured start position.
    #[must_use]
    pub fn new(config: MovementConfig) -> Self {
        let start = config.start;
        Self::with_position(config, start)
    }

    /// Creates a sandbox with the player at an explicit position.
    #[must_use]
    pub fn with_position(config: MovementConfig, position: Vec2) -> Self {
        let collected = vec![false; config.collectibles.len()];
        Self {
            config,
            position,
            collected,
        }
    }

    /// Advances the sandbox by one tick.
    ///
    /// Every collectible in range during the tick is collected; each one
    /// reports [`Event::CollectibleCollected`] exactly once per lifetime.
    pub fn tick(&mut self, input: DirectionalInput, features: Features, out: &mut Vec<Event>) {
        self.position += movement_delta(input, features, self.config.speed);

        if features.contains(Features::BOUNDARIES) {
            self.position = self
                .position
                .clamp(self.config.min_bound(), self.config.max_bound());
        }

        if features.contains(Features::COLLISION) {
            self.collect_touching(out);
        }
    }

    fn collect_touching(&mut self, out: &mut Vec<Event>) {
        let half_extent = self.config.half_extent();
        let player_center = self.position + Vec2::splat(half_extent);

        for (index, collectible) in self.config.collectibles.iter().enumerate() {
            if self.collected[index] {
                continue;
            }
            if player_center.distance(collectible.center) < collectible.radius + half_extent {
                self.collected[index] = true;
                log::debug!("collectible {index} picked up at {player_center}");
                out.push(Event::CollectibleCollected { index });
            }
        }
    }

    /// Top-left corner of the player.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Collection state of each collectible, in index order.
    #[must_use]
    pub fn collected(&self) -> &[bool] {
        &self.collected
    }

    /// Whether every collectible has been picked up.
    #[must_use]
    pub fn all_collected(&self) -> bool {
        self.collected.iter().all(|collected| *collected)
    }

    /// Configuration the sandbox was built with.
    #[must_use]
    pub const fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Captures a read-only snapshot for renderers.
    #[must_use]
    pub fn snapshot(&self) -> MovementSnapshot {
        MovementSnapshot {
            position: self.position,
            player_size: self.config.player_size,
            collectibles: self
                .config
                .collectibles
                .iter()
                .zip(&self.collected)
                .map(|(collectible, collected)| CollectibleSnapshot {
                    center: collectible.center,
                    radius: collectible.radius,
                    collected: *collected,
                })
                .collect(),
        }
    }
}

/// Displacement for one tick given the held keys and the unlocked movement.
///
/// Right is available from the first movement step, left joins it next, and
/// the vertical axis opens last. Opposing keys cancel out.
#[must_use]
pub fn movement_delta(input: DirectionalInput, features: Features, speed: f32) -> Vec2 {
    let full = features.contains(Features::FULL_MOVEMENT);
    let horizontal_left = full || features.contains(Features::LEFT_MOVEMENT);
    let horizontal_right = horizontal_left || features.contains(Features::BASIC_MOVEMENT);

    let mut delta = Vec2::ZERO;
    if horizontal_right && input.right {
        delta.x += speed;
    }
    if horizontal_left && input.left {
        delta.x -= speed;
    }
    if full && input.down {
        delta.y += speed;
    }
    if full && input.up {
        delta.y -= speed;
    }
    delta
}
