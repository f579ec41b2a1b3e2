#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Linear tutorial sequencing.
//!
//! A tutorial is an ordered list of immutable [`TutorialStep`] values. Each
//! step declares the [`Features`] it introduces, and the [`StepSequencer`]
//! answers which features are unlocked at its cursor by unioning every step
//! from the first through the current one. Simulations derive their behaviour
//! from that union, so adding a step is a matter of appending data to a
//! [`catalog`].

pub mod catalog;

use playstep_core::{Features, GameMode};
use serde::Serialize;

/// Single immutable step of a tutorial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TutorialStep {
    index: usize,
    title: &'static str,
    concept: &'static str,
    summary: &'static str,
    features: Features,
}

impl TutorialStep {
    /// Creates a step description.
    #[must_use]
    pub const fn new(
        index: usize,
        title: &'static str,
        concept: &'static str,
        summary: &'static str,
        features: Features,
    ) -> Self {
        Self {
            index,
            title,
            concept,
            summary,
            features,
        }
    }

    /// Zero-based position of the step within its tutorial.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Heading shown to the learner.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Programming concept the step teaches.
    #[must_use]
    pub const fn concept(&self) -> &'static str {
        self.concept
    }

    /// One-line description of what changes in this step.
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        self.summary
    }

    /// Features introduced by this step alone.
    #[must_use]
    pub const fn features(&self) -> Features {
        self.features
    }
}

/// Cursor over a tutorial's steps with clamped navigation.
#[derive(Clone, Debug)]
pub struct StepSequencer {
    steps: Vec<TutorialStep>,
    current: usize,
}

impl StepSequencer {
    /// Creates a sequencer over the built-in tutorial for `mode`.
    #[must_use]
    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            steps: catalog::steps_for(mode),
            current: 0,
        }
    }

    /// Creates a sequencer over custom steps positioned at the first step.
    ///
    /// Returns `None` when `steps` is empty or when any step's index does not
    /// match its position.
    #[cfg(test)]
    #[must_use]
    fn from_steps(steps: Vec<TutorialStep>) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        if steps
            .iter()
            .enumerate()
            .any(|(position, step)| step.index() != position)
        {
            return None;
        }
        Some(Self { steps, current: 0 })
    }

    /// Moves to the next step. Returns `false` on the last step.
    pub fn advance(&mut self) -> bool {
        if self.current < self.last_index() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Moves to the previous step. Returns `false` on the first step.
    pub fn retreat(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Index of the current step.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Index of the final step.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Number of steps in the tutorial.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; sequencers are never constructed without steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the cursor rests on the final step.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current == self.last_index()
    }

    /// Step under the cursor.
    #[must_use]
    pub fn current_step(&self) -> &TutorialStep {
        &self.steps[self.current]
    }

    /// All steps in order.
    #[must_use]
    pub fn steps(&self) -> &[TutorialStep] {
        &self.steps
    }

    /// Union of the features of every step up to and including the cursor.
    #[must_use]
    pub fn cumulative_features(&self) -> Features {
        self.cumulative_features_at(self.current)
    }

    /// Union of the features of every step up to and including `index`.
    ///
    /// Indices past the end are clamped to the last step.
    #[must_use]
    pub fn cumulative_features_at(&self, index: usize) -> Features {
        let end = index.min(self.last_index());
        self.steps[..=end]
            .iter()
            .fold(Features::empty(), |unlocked, step| unlocked | step.features())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> Vec<TutorialStep> {
        vec![
            TutorialStep::new(0, "a", "x", "", Features::PLAYER),
            TutorialStep::new(1, "b", "y", "", Features::empty()),
            TutorialStep::new(2, "c", "z", "", Features::BOUNDARIES),
        ]
    }

    #[test]
    fn from_steps_rejects_empty_tutorials() {
        assert!(StepSequencer::from_steps(Vec::new()).is_none());
    }

    #[test]
    fn from_steps_rejects_misnumbered_steps() {
        let mut steps = three_steps();
        steps.swap(0, 1);
        assert!(StepSequencer::from_steps(steps).is_none());
    }

    #[test]
    fn cumulative_index_is_clamped() {
        let sequencer = StepSequencer::from_steps(three_steps()).expect("valid steps");
        assert_eq!(
            sequencer.cumulative_features_at(99),
            Features::PLAYER | Features::BOUNDARIES
        );
    }
}
