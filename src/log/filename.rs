use crate::error::BenchError;
use crate::log::row::RunParameters;
use crate::log::variation::Variation;
use regex::Regex;
use std::sync::LazyLock;

static FILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<variations>(?:alternatives-parallel|original)*)-t(?P<t>\d+)-i(?P<i>\d+)\.txt$",
    )
    .expect("file name regex")
});

/// Parse `<variations>-t<concurrency>-i<iteration>.txt`.
///
/// Example:
/// alternatives-parallel-t16-i0.txt  =>  parallel-for, t = 16, i = 0
pub fn parse_file_name(name: &str) -> Result<RunParameters, BenchError> {
    let invalid = || BenchError::InvalidFilename(name.to_string());
    let caps = FILE_NAME_RE.captures(name).ok_or_else(invalid)?;

    let variation_tag = caps["variations"].to_string();
    let concurrency: u32 = caps["t"].parse().map_err(|_| invalid())?;
    let iteration: u32 = caps["i"].parse().map_err(|_| invalid())?;

    let variation = Variation::classify(&variation_tag).ok();

    Ok(RunParameters {
        variation_tag,
        variation,
        concurrency,
        iteration,
    })
}
