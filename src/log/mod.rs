//! Parsing of benchmark log files: file names, durations and the log body.

pub mod duration;
pub mod filename;
pub mod parse;
pub mod row;
pub mod variation;

#[cfg(test)]
pub mod fixtures;

pub use filename::parse_file_name;
pub use parse::LogTemplate;
pub use row::ParsedRun;

use crate::error::BenchError;

/// Parse one log file given its name and full text.
///
/// Fails with `InvalidFilename` before looking at the text when the name
/// does not follow the benchmark naming scheme.
pub fn parse_run(template: &LogTemplate, name: &str, text: &str) -> Result<ParsedRun, BenchError> {
    let params = parse_file_name(name)?;
    let record = template.parse(name, text)?;
    Ok(ParsedRun::new(name, params, record))
}
