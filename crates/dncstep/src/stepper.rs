//! Shared driver contract for every divide-and-conquer stepper.
//!
//! Purpose
//! - One trait (`Stepper`) so callers drive closest pair, Quickhull, and
//!   maximum subarray the same way: query `can_*`, then call `step_*`, which
//!   returns a new snapshot and leaves the old one untouched.
//! - Trace data for teaching views is pushed to an `Observer` during a step
//!   instead of being stored on the nodes.
//!
//! Guards are pure. A step whose guard is false returns an unchanged clone.

use crate::tree::NodeId;

/// One of the three micro-steps a caller can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Action {
    Divide,
    Conquer,
    Combine,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Divide, Action::Conquer, Action::Combine];
}

/// Receives the events a step emits.
pub trait Observer<E> {
    fn observe(&mut self, event: &E);
}

impl<E> Observer<E> for () {
    #[inline]
    fn observe(&mut self, _event: &E) {}
}

/// Observer that keeps every event it sees.
#[derive(Clone, Debug)]
pub struct Recorder<E> {
    pub events: Vec<E>,
}

impl<E> Default for Recorder<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E: Clone> Observer<E> for Recorder<E> {
    fn observe(&mut self, event: &E) {
        self.events.push(event.clone());
    }
}

impl<E> Recorder<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain recorded events, e.g. once per rendered frame.
    pub fn take(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }
}

/// Externally driven divide-and-conquer state machine.
///
/// Implementors provide target selection and the three observed steps; the
/// guards and unobserved steps follow.
pub trait Stepper: Clone {
    /// Trace event type emitted by the steps.
    type Event;

    fn next_divide_target(&self) -> Option<NodeId>;
    fn next_conquer_target(&self) -> Option<NodeId>;
    fn next_combine_target(&self) -> Option<NodeId>;

    #[must_use]
    fn step_divide_observed(&self, obs: &mut dyn Observer<Self::Event>) -> Self;
    #[must_use]
    fn step_conquer_observed(&self, obs: &mut dyn Observer<Self::Event>) -> Self;
    #[must_use]
    fn step_combine_observed(&self, obs: &mut dyn Observer<Self::Event>) -> Self;

    /// Node touched by the last successful step.
    fn active(&self) -> Option<NodeId>;

    /// True once no further step can change the result.
    fn is_finished(&self) -> bool;

    #[inline]
    fn can_divide(&self) -> bool {
        self.next_divide_target().is_some()
    }
    #[inline]
    fn can_conquer(&self) -> bool {
        self.next_conquer_target().is_some()
    }
    #[inline]
    fn can_combine(&self) -> bool {
        self.next_combine_target().is_some()
    }

    #[must_use]
    fn step_divide(&self) -> Self {
        self.step_divide_observed(&mut ())
    }
    #[must_use]
    fn step_conquer(&self) -> Self {
        self.step_conquer_observed(&mut ())
    }
    #[must_use]
    fn step_combine(&self) -> Self {
        self.step_combine_observed(&mut ())
    }

    fn can(&self, action: Action) -> bool {
        match action {
            Action::Divide => self.can_divide(),
            Action::Conquer => self.can_conquer(),
            Action::Combine => self.can_combine(),
        }
    }

    #[must_use]
    fn step_observed(&self, action: Action, obs: &mut dyn Observer<Self::Event>) -> Self {
        match action {
            Action::Divide => self.step_divide_observed(obs),
            Action::Conquer => self.step_conquer_observed(obs),
            Action::Combine => self.step_combine_observed(obs),
        }
    }

    #[must_use]
    fn step(&self, action: Action) -> Self {
        self.step_observed(action, &mut ())
    }

    /// Actions whose guard currently holds, in `Action::ALL` order.
    fn enabled(&self) -> Vec<Action> {
        Action::ALL.into_iter().filter(|&a| self.can(a)).collect()
    }

    /// First enabled action in `Action::ALL` order.
    fn first_enabled(&self) -> Option<Action> {
        Action::ALL.into_iter().find(|&a| self.can(a))
    }

    /// Apply the first enabled action until none is left.
    #[must_use]
    fn run_to_end(&self) -> Self {
        self.run_to_end_observed(&mut ())
    }

    #[must_use]
    fn run_to_end_observed(&self, obs: &mut dyn Observer<Self::Event>) -> Self {
        let mut s = self.clone();
        while let Some(a) = s.first_enabled() {
            s = s.step_observed(a, obs);
        }
        s
    }
}
