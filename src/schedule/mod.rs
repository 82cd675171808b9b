//! Evaluation cadence scheduling
//!
//! Two pieces decide when an evaluation pass runs:
//! - `MilestoneTable` - maps training progress to the current interval
//! - `EvalTrigger` - applies the start/interval rule at each decision point

mod milestones;
mod trigger;

pub use milestones::MilestoneTable;
pub use trigger::EvalTrigger;
