use crate::error::BenchError;
use crate::model::group::{GroupedSamples, Variation};
use serde::Serialize;
use std::collections::BTreeMap;

/// 25th, 50th and 75th percentile of one sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuartileSummary {
    pub first: f64,
    pub median: f64,
    pub third: f64,
}

impl QuartileSummary {
    /// `None` for an empty sample set.
    pub fn of(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            first: percentile_sorted(&sorted, 25.0),
            median: percentile_sorted(&sorted, 50.0),
            third: percentile_sorted(&sorted, 75.0),
        })
    }
}

/// Percentile with linear interpolation between closest ranks.
///
/// `sorted` must be ascending and non-empty; `p` is in [0, 100].
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Speed-up at one concurrency level with asymmetric error bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedupPoint {
    pub speedup: f64,
    /// Distance down to the speed-up of the third-quartile time.
    pub error_low: f64,
    /// Distance up to the speed-up of the first-quartile time.
    pub error_high: f64,
}

/// Highest median speed-up of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesMaximum {
    pub concurrency: u32,
    pub speedup: f64,
    /// Median `process_tasks` time at that level, in ms.
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupSeries {
    pub points: BTreeMap<u32, SpeedupPoint>,
    pub maximum: Option<SeriesMaximum>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupReport {
    /// Median time of the original version at t = 1, in ms.
    pub baseline: f64,
    pub quartiles: BTreeMap<Variation, BTreeMap<u32, QuartileSummary>>,
    pub series: BTreeMap<Variation, SpeedupSeries>,
}

/// Quartiles for every (variation, concurrency) group that has samples.
pub fn quartiles(
    groups: &GroupedSamples,
) -> BTreeMap<Variation, BTreeMap<u32, QuartileSummary>> {
    groups
        .iter()
        .map(|(variation, by_t)| {
            let summaries = by_t
                .iter()
                .filter_map(|(t, samples)| QuartileSummary::of(samples).map(|q| (*t, q)))
                .collect();
            (*variation, summaries)
        })
        .collect()
}

/// Speed-up of every group relative to the original version at t = 1.
///
/// A higher time is a lower speed-up, so the first quartile in time bounds
/// the speed-up from above and the third quartile bounds it from below.
/// Groups with a non-positive first-quartile time have no finite speed-up
/// and are left out of the series; a non-positive baseline counts as missing.
pub fn speedup_report(groups: &GroupedSamples) -> Result<SpeedupReport, BenchError> {
    let quartiles = quartiles(groups);
    let baseline = quartiles
        .get(&Variation::Original)
        .and_then(|by_t| by_t.get(&1u32))
        .map(|q| q.median)
        .filter(|median| *median > 0.0)
        .ok_or(BenchError::MissingBaseline)?;
    let speedup = |time: f64| baseline / time;

    let mut series = BTreeMap::new();
    for (variation, by_t) in &quartiles {
        let mut points = BTreeMap::new();
        let mut maximum: Option<SeriesMaximum> = None;

        for (&t, q) in by_t {
            if q.first <= 0.0 {
                tracing::warn!(
                    variation = %variation,
                    t,
                    first_quartile_ms = q.first,
                    "no finite speed-up for zero time, level left out of series"
                );
                continue;
            }
            let median = speedup(q.median);
            points.insert(
                t,
                SpeedupPoint {
                    speedup: median,
                    error_low: median - speedup(q.third),
                    error_high: speedup(q.first) - median,
                },
            );
            if maximum.is_none_or(|m| median > m.speedup) {
                maximum = Some(SeriesMaximum {
                    concurrency: t,
                    speedup: median,
                    time: q.median,
                });
            }
        }

        if let Some(m) = &maximum {
            tracing::info!(
                variation = %variation,
                t = m.concurrency,
                speedup = m.speedup,
                time_ms = m.time,
                "maximal speed-up"
            );
        }
        series.insert(*variation, SpeedupSeries { points, maximum });
    }

    Ok(SpeedupReport {
        baseline,
        quartiles,
        series,
    })
}
