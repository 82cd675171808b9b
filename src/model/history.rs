//! Recurrent history buffers of temporal-occupancy heads

use ndarray::{Array1, Array2, Array3, ArrayD};

/// Deep copy of the four history tensors carried by a temporal head
///
/// The four buffers live and die together: either all are present or the
/// head holds no history at all.
#[derive(Clone, Debug, PartialEq)]
pub struct HistorySnapshot {
    /// Past occupancy state, layout owned by the head
    pub occupancy: ArrayD<f32>,
    /// Identity of the training sequence each batch slot belongs to
    pub seq_ids: Array1<i64>,
    /// Forward-augmentation transforms, one 4x4 matrix per slot
    pub forward_augs: Array3<f32>,
    /// Sweep timestamps per slot
    pub sweep_times: Array2<f32>,
}

/// Capability of models that carry recurrent temporal state
///
/// The hook dispatches over this trait; it never inspects model type names
/// or reaches into head internals.
pub trait RecurrentState {
    /// Deep-copy the current buffers, `None` when no history is held
    fn snapshot(&self) -> Option<HistorySnapshot>;

    /// Drop all history, returning the head to its uninitialized state
    fn clear(&mut self);

    /// Replace the buffers with a previously captured snapshot
    fn restore(&mut self, snapshot: HistorySnapshot);
}

/// Owned history-buffer slot, the concrete `RecurrentState` of a temporal head
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryBuffers {
    state: Option<HistorySnapshot>,
}

impl HistoryBuffers {
    /// Empty buffer set, as a head starts out
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Replace the live buffers (called by the head after each sequence step)
    pub fn set(&mut self, snapshot: HistorySnapshot) {
        self.state = Some(snapshot);
    }

    /// Current buffers, if any
    pub fn get(&self) -> Option<&HistorySnapshot> {
        self.state.as_ref()
    }

    /// Whether the head currently holds no history
    pub fn is_empty(&self) -> bool {
        self.state.is_none()
    }
}

impl RecurrentState for HistoryBuffers {
    fn snapshot(&self) -> Option<HistorySnapshot> {
        self.state.clone()
    }

    fn clear(&mut self) {
        self.state = None;
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        self.state = Some(snapshot);
    }
}

/// Small filled snapshot for unit tests across this module tree
#[cfg(test)]
pub(crate) fn sample_snapshot(fill: f32) -> HistorySnapshot {
    HistorySnapshot {
        occupancy: ArrayD::from_elem(ndarray::IxDyn(&[2, 4, 4, 4]), fill),
        seq_ids: Array1::from(vec![7, 8]),
        forward_augs: Array3::from_elem((2, 4, 4), fill),
        sweep_times: Array2::from_elem((2, 3), fill),
    }
}
