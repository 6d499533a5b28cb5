use crate::error::BenchError;
use regex::Regex;
use std::sync::LazyLock;

// `[\d.]+` followed by exactly one of the profiler's unit suffixes.
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d.]+)(s|ms|μs|ns)$").expect("duration regex"));

/// Convert a profiler duration such as `8.1s` or `78.2μs` into milliseconds.
///
/// 8.1s -> 8100, 150.9ms -> 150.9, 78.2μs -> 0.0782, 2.0ns -> 0.000002
pub fn parse_duration(d: &str) -> Result<f64, BenchError> {
    let caps = DURATION_RE
        .captures(d.trim())
        .ok_or_else(|| BenchError::UnknownDurationUnit(d.to_string()))?;

    let number: f64 = caps[1]
        .parse()
        .map_err(|_| BenchError::UnknownDurationUnit(d.to_string()))?;
    let factor = match &caps[2] {
        "s" => 1e3,
        "ms" => 1.0,
        "μs" => 1e-3,
        "ns" => 1e-6,
        _ => return Err(BenchError::UnknownDurationUnit(d.to_string())),
    };

    Ok(number * factor)
}
