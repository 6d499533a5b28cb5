//! Handoff of the aggregated views to the chart renderer.

pub mod json;

pub use crate::config::ViewKind;
pub use json::{ReportData, build_report, render_json_report};
