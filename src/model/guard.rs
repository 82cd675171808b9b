//! Scoped isolation of recurrent history around an evaluation pass

use super::history::{HistorySnapshot, RecurrentState};
use super::EvalModel;

/// Save/clear/restore guard for recurrent history buffers
///
/// Evaluation sequences are independent of the training sequence order, so
/// the pass must start with no recurrent memory. On `isolate` the primary
/// model's buffers are deep-copied and cleared and the shadow model's
/// buffers are cleared. On drop the snapshot is written back to the
/// primary; the shadow is intentionally left cleared.
///
/// The restore runs on every exit path, including unwinding out of the
/// evaluation call. Models without the `RecurrentState` capability are
/// left untouched and no guard is produced.
pub struct HistoryGuard<'a> {
    primary: &'a mut dyn RecurrentState,
    snapshot: Option<HistorySnapshot>,
}

impl<'a> HistoryGuard<'a> {
    /// Snapshot and clear history on both models, if the primary has any
    pub fn isolate<P, S>(primary: &'a mut P, shadow: &mut S) -> Option<Self>
    where
        P: EvalModel + ?Sized,
        S: EvalModel + ?Sized,
    {
        let state = primary.recurrent_state_mut()?;
        let snapshot = state.snapshot();
        state.clear();
        if let Some(shadow_state) = shadow.recurrent_state_mut() {
            shadow_state.clear();
        }
        Some(Self { primary: state, snapshot })
    }

    /// Whether a snapshot was captured (false when history was absent)
    pub fn captured(&self) -> bool {
        self.snapshot.is_some()
    }
}

impl Drop for HistoryGuard<'_> {
    fn drop(&mut self) {
        match self.snapshot.take() {
            Some(snapshot) => self.primary.restore(snapshot),
            None => self.primary.clear(),
        }
    }
}
