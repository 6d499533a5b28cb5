//! Aggregation model: group parsed runs and derive the report views.

pub mod bar;
pub mod group;
pub mod stats;

pub use bar::{BarView, bar_view, representative_run};
pub use group::{GroupedSamples, Variation, group_runs};
pub use stats::{SpeedupReport, speedup_report};
