use std::path::PathBuf;

/// Directory scanned when none is given on the command line.
pub const DEFAULT_INPUT_DIR: &str = "20151203T9999-combined";

/// Inputs of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_dir: PathBuf,
}

impl Config {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
        }
    }
}

/// Which data products a report contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewKind {
    Speedup,
    Bar,
    All,
}

impl ViewKind {
    pub fn speedup(self) -> bool {
        matches!(self, ViewKind::Speedup | ViewKind::All)
    }

    pub fn bar(self) -> bool {
        matches!(self, ViewKind::Bar | ViewKind::All)
    }
}
