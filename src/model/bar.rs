//! Phase breakdown of a single profiled run.

use crate::error::BenchError;
use crate::log::ParsedRun;
use serde::Serialize;
use std::collections::BTreeMap;

/// Profiler ids summed into the "generate input" phase.
const INPUT_PHASE: [&str; 4] = [
    "bayes.main/generate-data",
    "bayes.main/generate-adtree",
    "bayes.main/score-original",
    "bayes.main/alloc-learner",
];
const LEARN_PHASE: [&str; 1] = ["bayes.main/run-learner"];
const VALIDATE_PHASE: [&str; 2] = ["bayes.main/check-solution", "bayes.main/score-solution"];

const RUN_LEARNER: &str = "bayes.main/run-learner";
/// Time spent inside transactions during learning.
const FIND_BEST_INSERT: &str = "bayes.learner/find-best-insert-task";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    /// File the breakdown was taken from.
    pub file: String,
    /// Input generation, learning, validation (mean time).
    pub main_phases: [f64; 3],
    pub main_phases_sum: f64,
    /// Start offset of each phase in a stacked bar.
    pub main_phases_cumsum: [f64; 3],
    /// Share of each phase in `main_phases_sum`.
    pub main_phases_share: [f64; 3],
    /// Transactional, non-transactional time within the learning phase.
    pub transactional: [f64; 2],
    pub transactional_share: [f64; 2],
}

/// Pick the first run (in the given order) that carries a profiling table.
pub fn representative_run(runs: &[ParsedRun]) -> Result<&ParsedRun, BenchError> {
    runs.iter()
        .find(|r| r.has_profile())
        .ok_or(BenchError::NoProfiledRun)
}

pub fn bar_view(run: &ParsedRun) -> Result<BarView, BenchError> {
    let sum_of = |map: &BTreeMap<String, f64>, ids: &[&str]| -> Result<f64, BenchError> {
        ids.iter().map(|id| lookup(run, map, id)).sum()
    };

    let means = &run.profile_mean;
    let main_phases = [
        sum_of(means, &INPUT_PHASE)?,
        sum_of(means, &LEARN_PHASE)?,
        sum_of(means, &VALIDATE_PHASE)?,
    ];
    let main_phases_sum: f64 = main_phases.iter().sum();

    let mut main_phases_cumsum = [0.0; 3];
    let mut acc = 0.0;
    for (slot, phase) in main_phases_cumsum.iter_mut().zip(main_phases) {
        *slot = acc;
        acc += phase;
    }

    let totals = &run.profile_total;
    let in_tx = lookup(run, totals, FIND_BEST_INSERT)?;
    let transactional = [in_tx, lookup(run, totals, RUN_LEARNER)? - in_tx];
    let tx_sum: f64 = transactional.iter().sum();

    Ok(BarView {
        file: run.file.clone(),
        main_phases,
        main_phases_sum,
        main_phases_cumsum,
        main_phases_share: main_phases.map(|p| p / main_phases_sum),
        transactional,
        transactional_share: transactional.map(|p| p / tx_sum),
    })
}

fn lookup(run: &ParsedRun, map: &BTreeMap<String, f64>, id: &str) -> Result<f64, BenchError> {
    map.get(id)
        .copied()
        .ok_or_else(|| BenchError::MissingProfileEntry {
            file: run.file.clone(),
            id: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::fixtures::LogFixture;
    use crate::log::{LogTemplate, parse_run};
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn profiled_run(name: &str) -> ParsedRun {
        let text = LogFixture::new(3360.0).profiled().render();
        parse_run(&LogTemplate::new().unwrap(), name, &text).unwrap()
    }

    #[test]
    fn phases_come_from_profile_means() {
        let view = bar_view(&profiled_run("original-t1-i0.txt")).unwrap();

        assert!(close(view.main_phases[0], 0.8));
        assert!(close(view.main_phases[1], 3.4));
        assert!(close(view.main_phases[2], 0.2));
        assert!(close(view.main_phases_sum, 4.4));
        assert_eq!(view.main_phases_cumsum[0], 0.0);
        assert!(close(view.main_phases_cumsum[1], 0.8));
        assert!(close(view.main_phases_cumsum[2], 4.2));
        assert!(close(view.main_phases_share.iter().sum::<f64>(), 1.0));
    }

    #[test]
    fn transactional_split_uses_totals() {
        let view = bar_view(&profiled_run("original-t1-i0.txt")).unwrap();
        assert!(close(view.transactional[0], 2.0));
        assert!(close(view.transactional[1], 1.4));
        assert!(close(view.transactional_share[0], 2.0 / 3.4));
    }

    #[test]
    fn missing_entry_is_reported() {
        let mut run = profiled_run("original-t1-i0.txt");
        run.profile_mean.remove("bayes.main/score-solution");
        assert_eq!(
            bar_view(&run),
            Err(BenchError::MissingProfileEntry {
                file: "original-t1-i0.txt".to_string(),
                id: "bayes.main/score-solution".to_string(),
            })
        );
    }

    #[test]
    fn representative_run_skips_unprofiled() {
        let plain = LogFixture::new(1.0).render();
        let unprofiled = parse_run(&LogTemplate::new().unwrap(), "-t1-i0.txt", &plain).unwrap();
        let runs = vec![unprofiled.clone(), profiled_run("original-t2-i0.txt")];

        assert_eq!(representative_run(&runs).unwrap().file, "original-t2-i0.txt");
        assert_eq!(
            representative_run(&[unprofiled]).unwrap_err(),
            BenchError::NoProfiledRun
        );
    }
}
