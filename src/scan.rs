//! Read a snapshot of the benchmark directory and parse every log in it.

use crate::config::Config;
use crate::error::BenchError;
use crate::log::{LogTemplate, ParsedRun, parse_file_name, parse_run};
use anyhow::Context;
use std::fs;

/// Parsed runs of one directory plus the files that had to be skipped.
#[derive(Debug, Default)]
pub struct Batch {
    /// Sorted by file name.
    pub runs: Vec<ParsedRun>,
    pub skipped: Vec<BenchError>,
}

/// Parse every benchmark log in `config.input_dir`.
///
/// Files whose names do not follow the benchmark scheme are ignored. A log
/// that does not match the template is reported and skipped; only failing to
/// list the directory itself is an error.
pub fn load_runs(config: &Config) -> anyhow::Result<Batch> {
    let dir = &config.input_dir;
    let template = LogTemplate::new()?;

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))? {
        let entry = entry.with_context(|| format!("list directory {}", dir.display()))?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::debug!(name = ?raw, "skipping non UTF-8 file name"),
        }
    }
    names.sort();

    let mut batch = Batch::default();
    for name in names {
        if let Err(err) = parse_file_name(&name) {
            tracing::debug!(%err, "skipping unrelated file");
            continue;
        }

        let parsed = match fs::read_to_string(dir.join(&name)) {
            Ok(text) => parse_run(&template, &name, &text),
            Err(err) => Err(BenchError::MalformedLog {
                file: name.clone(),
                line: 0,
                reason: format!("cannot read file: {}", err),
            }),
        };

        match parsed {
            Ok(run) => batch.runs.push(run),
            Err(err) => {
                tracing::warn!(
                    file = %name,
                    %err,
                    "file did not match expected output, make sure the verification passed"
                );
                batch.skipped.push(err);
            }
        }
    }

    tracing::info!(
        dir = %dir.display(),
        runs = batch.runs.len(),
        skipped = batch.skipped.len(),
        "parsed benchmark logs"
    );
    Ok(batch)
}
