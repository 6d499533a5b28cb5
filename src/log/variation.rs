use crate::error::BenchError;
use serde::Serialize;
use std::fmt;

/// Tag of the alternative implementation that runs the learner loop in parallel.
pub const PARALLEL_TAG: &str = "alternatives-parallel";
/// Tag of the unmodified program.
pub const ORIGINAL_TAG: &str = "original";
/// Canonical label of the parallel alternative.
pub const PARALLEL_LABEL: &str = "parallel-for";

/// Implementation under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Variation {
    /// The unmodified program; the speed-up baseline.
    #[serde(rename = "")]
    Original,
    #[serde(rename = "parallel-for")]
    ParallelFor,
}

impl Variation {
    /// Classify the raw variation tags of a file name.
    ///
    /// Only a lone tag is known; combinations such as `originaloriginal`
    /// are exploratory runs and stay unclassified.
    pub fn classify(tag: &str) -> Result<Self, BenchError> {
        match tag {
            "" | ORIGINAL_TAG => Ok(Variation::Original),
            PARALLEL_TAG => Ok(Variation::ParallelFor),
            other => Err(BenchError::UnknownVariation(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variation::Original => "",
            Variation::ParallelFor => PARALLEL_LABEL,
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn classifies_known_tags() {
        assert_eq!(Variation::classify(""), Ok(Variation::Original));
        assert_eq!(Variation::classify("original"), Ok(Variation::Original));
        assert_eq!(
            Variation::classify("alternatives-parallel"),
            Ok(Variation::ParallelFor)
        );
        assert_eq!(
            Variation::classify("originaloriginal"),
            Err(BenchError::UnknownVariation("originaloriginal".to_string()))
        );
        assert_eq!(Variation::ParallelFor.to_string(), "parallel-for");
    }

    #[test]
    fn variation_labels_serialize_as_map_keys() {
        let mut m = BTreeMap::new();
        m.insert(Variation::ParallelFor, 1);
        m.insert(Variation::Original, 0);
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            r#"{"":0,"parallel-for":1}"#
        );
    }
}
