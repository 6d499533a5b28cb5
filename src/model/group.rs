use crate::error::BenchError;
use crate::log::ParsedRun;
use std::collections::BTreeMap;

pub use crate::log::variation::Variation;

/// `process_tasks` samples of one variation, keyed by concurrency level.
pub type VariationGroup = BTreeMap<u32, Vec<f64>>;

/// Samples of every variation. Both levels iterate in key order.
pub type GroupedSamples = BTreeMap<Variation, VariationGroup>;

/// Group `process_tasks` timings by variation and concurrency.
///
/// The variation is the one the file name parser settled on; runs it left
/// unclassified are logged and left out.
pub fn group_runs(runs: &[ParsedRun]) -> GroupedSamples {
    let mut groups = GroupedSamples::new();
    for run in runs {
        let Some(variation) = run.params.variation else {
            let err = BenchError::UnknownVariation(run.params.variation_tag.clone());
            tracing::warn!(file = %run.file, %err, "run excluded from aggregation");
            continue;
        };
        groups
            .entry(variation)
            .or_default()
            .entry(run.params.concurrency)
            .or_default()
            .push(run.process_tasks);
    }
    groups
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::log::parse::LogRecord;
    use crate::log::parse_file_name;
    use pretty_assertions::assert_eq;

    /// A parsed run with only the fields aggregation looks at.
    pub(crate) fn run(tag: &str, t: u32, i: u32, process_tasks: f64) -> ParsedRun {
        let file = format!("{}-t{}-i{}.txt", tag, t, i);
        let params = parse_file_name(&file).unwrap();
        let record = LogRecord {
            process_tasks,
            ..LogRecord::default()
        };
        ParsedRun::new(&file, params, record)
    }

    #[test]
    fn groups_by_variation_then_concurrency() {
        let runs = vec![
            run("original", 1, 0, 3000.0),
            run("", 1, 1, 3360.0),
            run("alternatives-parallel", 4, 0, 1100.0),
            run("original", 2, 0, 2000.0),
            run("original", 1, 2, 3800.0),
        ];
        let groups = group_runs(&runs);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&Variation::Original][&1u32], vec![3000.0, 3360.0, 3800.0]);
        assert_eq!(groups[&Variation::Original][&2u32], vec![2000.0]);
        assert_eq!(groups[&Variation::ParallelFor][&4u32], vec![1100.0]);
    }

    #[test]
    fn unknown_variation_is_excluded() {
        let runs = vec![
            run("original", 1, 0, 3000.0),
            run("alternatives-paralleloriginal", 1, 0, 10.0),
        ];
        let groups = group_runs(&runs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&Variation::Original][&1u32], vec![3000.0]);
    }

    #[test]
    fn mixed_tag_is_unclassified_in_parser_and_aggregator() {
        let mixed = run("originalalternatives-parallel", 2, 0, 100.0);
        assert_eq!(mixed.params.variation, None);

        let groups = group_runs(&[run("original", 1, 0, 100.0), mixed]);
        assert_eq!(groups.len(), 1);
        assert!(!groups[&Variation::Original].contains_key(&2u32));
        assert!(!groups.contains_key(&Variation::ParallelFor));
    }

    #[test]
    fn aggregator_follows_parsed_variation() {
        for tag in ["", "original", "alternatives-parallel"] {
            let r = run(tag, 3, 0, 1.0);
            let groups = group_runs(std::slice::from_ref(&r));
            let variation = r.params.variation.unwrap();
            assert_eq!(groups[&variation][&3u32], vec![1.0]);
        }
    }
}
