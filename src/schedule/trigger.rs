//! Start/interval evaluation trigger

/// Decides whether to evaluate at the current decision point
///
/// `interval` is refreshed from the milestone table before every decision;
/// refreshing is cheap and idempotent. The decision rule itself:
/// evaluate when the completed progress count (`progress + 1`) lands on the
/// interval grid, shifted by `start` when one is set, and always at the
/// very last progress point so a run never ends without a fresh evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalTrigger {
    start: Option<u64>,
    interval: u64,
}

impl EvalTrigger {
    /// Create a trigger with the given start point and interval
    pub fn new(start: Option<u64>, interval: u64) -> Self {
        Self { start, interval }
    }

    /// Interval currently in effect
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Replace the interval (called once per decision point)
    pub fn set_interval(&mut self, interval: u64) {
        self.interval = interval;
    }

    /// Whether evaluation should run after the step at `progress`
    ///
    /// A zero interval never lands on the grid; only the final point fires.
    pub fn should_evaluate(&self, progress: u64, total: u64) -> bool {
        let completed = progress + 1;
        if completed == total {
            return true;
        }
        if self.interval == 0 {
            return false;
        }
        match self.start {
            None => completed % self.interval == 0,
            Some(start) => completed >= start && (completed - start) % self.interval == 0,
        }
    }
}
