use crate::log::parse::LogRecord;
use crate::log::variation::Variation;
use serde::Serialize;
use std::collections::BTreeMap;

/// Run parameters encoded in a log file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunParameters {
    /// Variation tags exactly as they appear in the file name.
    pub variation_tag: String,
    /// `None` when the tag names no known variation.
    pub variation: Option<Variation>,
    pub concurrency: u32,
    pub iteration: u32,
}

/// One row of the profiler table. Durations are already in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfilingEntry {
    pub id: String,
    pub call_count: u64,
    pub min: f64,
    pub max: f64,
    pub mad: f64,
    pub mean: f64,
    pub time_percent: u32,
    pub time: f64,
}

/// Everything extracted from a single log file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRun {
    pub file: String,
    pub params: RunParameters,

    pub variable_count: u32,
    pub record_count: u32,
    pub max_parents: u32,
    /// `Variations` line of the preamble.
    pub variations: String,
    pub profiling_enabled: bool,

    // Phase timings in milliseconds.
    pub generate_data: f64,
    pub generate_adtree: f64,
    pub create_tasks: f64,
    pub process_tasks: f64,
    pub learn: f64,
    pub elapsed: f64,

    /// Profiling id -> mean / 1000.
    pub profile_mean: BTreeMap<String, f64>,
    /// Profiling id -> mean * calls / 1000.
    pub profile_total: BTreeMap<String, f64>,
    /// Profiling id -> calls.
    pub profile_calls: BTreeMap<String, u64>,

    /// Raw `Clock Time` / `Accounted Time` summary values, when profiled.
    pub clock_time: Option<String>,
    pub accounted_time: Option<String>,
}

impl ParsedRun {
    pub fn has_profile(&self) -> bool {
        !self.profile_mean.is_empty()
    }
}

/// Derive the per-id maps kept on a run from the raw profiler rows.
///
/// The profiler table is recorded in a unit a thousand times finer than the
/// phase timings, hence the division.
pub fn profile_maps(
    entries: &[ProfilingEntry],
) -> (
    BTreeMap<String, f64>,
    BTreeMap<String, f64>,
    BTreeMap<String, u64>,
) {
    let mut mean = BTreeMap::new();
    let mut total = BTreeMap::new();
    let mut calls = BTreeMap::new();
    for e in entries {
        mean.insert(e.id.clone(), e.mean / 1000.0);
        total.insert(e.id.clone(), e.mean * e.call_count as f64 / 1000.0);
        calls.insert(e.id.clone(), e.call_count);
    }
    (mean, total, calls)
}

impl ParsedRun {
    pub fn new(file: &str, params: RunParameters, record: LogRecord) -> Self {
        let (profile_mean, profile_total, profile_calls) = profile_maps(&record.profile);
        Self {
            file: file.to_string(),
            params,
            variable_count: record.variable_count,
            record_count: record.record_count,
            max_parents: record.max_parents,
            variations: record.variations,
            profiling_enabled: record.profiling_enabled,
            generate_data: record.generate_data,
            generate_adtree: record.generate_adtree,
            create_tasks: record.create_tasks,
            process_tasks: record.process_tasks,
            learn: record.learn,
            elapsed: record.elapsed,
            profile_mean,
            profile_total,
            profile_calls,
            clock_time: record.clock_time,
            accounted_time: record.accounted_time,
        }
    }
}
