use crate::model::{
    BarView, GroupedSamples, SpeedupReport, bar_view, group_runs, representative_run,
    speedup_report,
};
use crate::render::ViewKind;
use crate::scan::Batch;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub runs: usize,
    pub skipped: usize,
}

/// Everything the chart renderer consumes.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub totals: TotalsView,
    /// One diagnostic per skipped log file.
    pub skipped: Vec<String>,
    /// `process_tasks` samples by variation and concurrency.
    pub samples: GroupedSamples,
    pub speedup: Option<SpeedupReport>,
    pub bar: Option<BarView>,
    /// Views that were requested but could not be computed.
    pub failures: Vec<String>,
}

/// Aggregate a parsed batch into the requested views.
///
/// A view that cannot be computed is left out and recorded in `failures`;
/// the grouped samples are always present.
pub fn build_report(batch: &Batch, view: ViewKind) -> ReportData {
    let samples = group_runs(&batch.runs);
    let mut failures = Vec::new();

    let speedup = if view.speedup() {
        match speedup_report(&samples) {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::error!(%err, "cannot compute speed-up");
                failures.push(format!("speedup: {}", err));
                None
            }
        }
    } else {
        None
    };

    let bar = if view.bar() {
        match representative_run(&batch.runs).and_then(bar_view) {
            Ok(bar) => Some(bar),
            Err(err) => {
                tracing::error!(%err, "cannot compute phase breakdown");
                failures.push(format!("bar: {}", err));
                None
            }
        }
    } else {
        None
    };

    ReportData {
        totals: TotalsView {
            runs: batch.runs.len(),
            skipped: batch.skipped.len(),
        },
        skipped: batch.skipped.iter().map(|e| e.to_string()).collect(),
        samples,
        speedup,
        bar,
        failures,
    }
}

/// Serialize the report as pretty-printed JSON.
pub fn render_json_report(data: &ReportData) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    Ok(json)
}
