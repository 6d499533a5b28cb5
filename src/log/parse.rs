use crate::error::BenchError;
use crate::log::duration::parse_duration;
use crate::log::row::ProfilingEntry;
use regex::{Captures, Regex};
use std::str::FromStr;

/// Fields extracted from the body of one benchmark log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    pub variable_count: u32,
    pub record_count: u32,
    pub max_parents: u32,
    pub variations: String,
    pub profiling_enabled: bool,

    pub generate_data: f64,
    pub generate_adtree: f64,
    pub create_tasks: f64,
    pub process_tasks: f64,
    pub learn: f64,
    pub elapsed: f64,

    pub profile: Vec<ProfilingEntry>,
    pub clock_time: Option<String>,
    pub accounted_time: Option<String>,
}

/// Sections of the log, in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    GenerateData,
    GenerateAdtree,
    LearnStructure,
    Scores,
    Profiling,
    Elapsed,
    Done,
}

/// Compiled line patterns of the benchmark output.
///
/// Expected layout (whitespace runs around `=` may vary):
///
/// ```text
/// Random seed                = 1
/// Number of vars             = 32
/// Number of records          = 4096
/// Max num parents            = 2
/// % chance of parent         = 10
/// Insert penalty             = 2
/// Max num edge learned / var = -1
/// Operation quality factor   = 1.0
/// Variations                 = ...
/// Profiling?                 = false
/// Generating data...
/// Elapsed time: 812.5 msecs
/// done.
/// Generating adtree...
/// Elapsed time: 240.2 msecs
/// done.
/// Learning structure...
/// tasks created ...               (one or more)
/// Elapsed time: 12.0 msecs
/// task processed ... | new task ...  (one or more)
/// Elapsed time: 3360.0 msecs
/// Elapsed time: 3380.0 msecs
/// done.
/// Learn score  = -123456.7
/// Actual score = -123400.5
/// <date> <time> ... TRACE [bayes.main] - Profiling: :bayes.main/all   (optional block)
///     Id  nCalls  Min  Max  MAD  Mean  Time%  Time
///     :<id> <calls> <min> <max> <mad> <mean> <pct> <time>           (zero or more)
///     Clock Time      <n> <value>
///     Accounted Time  <n> <value>
///
/// Elapsed time: 4500.0 msecs
/// ```
pub struct LogTemplate {
    random_seed: Regex,
    var_count: Regex,
    record_count: Regex,
    max_parents: Regex,
    parent_chance: Regex,
    insert_penalty: Regex,
    max_edges: Regex,
    quality_factor: Regex,
    variations: Regex,
    profiling_flag: Regex,
    elapsed: Regex,
    learn_score: Regex,
    actual_score: Regex,
    profile_trace: Regex,
    profile_header: Regex,
    profile_row: Regex,
    clock_time: Regex,
    accounted_time: Regex,
}

impl LogTemplate {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            random_seed: Regex::new(r"^Random seed\s+=\s+\d+$")?,
            var_count: Regex::new(r"^Number of vars\s+=\s+(\d+)$")?,
            record_count: Regex::new(r"^Number of records\s+=\s+(\d+)$")?,
            max_parents: Regex::new(r"^Max num parents\s+=\s+(\d+)$")?,
            parent_chance: Regex::new(r"^% chance of parent\s+=\s+\d+$")?,
            insert_penalty: Regex::new(r"^Insert penalty\s+=\s+[\d.]+$")?,
            max_edges: Regex::new(r"^Max num edge learned / var\s+=\s+[-\d.]+$")?,
            quality_factor: Regex::new(r"^Operation quality factor\s+=\s+[\d.]+$")?,
            variations: Regex::new(r"^Variations\s+=\s?(.*)$")?,
            profiling_flag: Regex::new(r"^Profiling\?\s+=\s+(true|false)$")?,
            elapsed: Regex::new(r"^Elapsed time: ([\d.]+) msecs$")?,
            learn_score: Regex::new(r"^Learn score\s+=\s+[\d.-]+$")?,
            actual_score: Regex::new(r"^Actual score\s+=\s+[\d.-]+$")?,
            profile_trace: Regex::new(
                r"^\d+-.+-\d+ \d+:\d+:\d+ .* TRACE \[bayes\.main\] - Profiling: :bayes\.main/all$",
            )?,
            profile_header: Regex::new(
                r"^\s*Id\s+nCalls\s+Min\s+Max\s+MAD\s+Mean\s+Time%\s+Time$",
            )?,
            profile_row: Regex::new(
                r"^\s*:(\S*)\s+(\d+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S+)$",
            )?,
            clock_time: Regex::new(r"^\s*Clock Time\s+\d+ (.+)$")?,
            accounted_time: Regex::new(r"^\s*Accounted Time\s+\d+ (.+)$")?,
        })
    }

    /// Match `text` against the template and extract every field.
    ///
    /// Anything before the `Random seed` line and after the final
    /// `Elapsed time` line is ignored. `file` only labels diagnostics.
    pub fn parse(&self, file: &str, text: &str) -> Result<LogRecord, BenchError> {
        let mut cur = Cursor::new(file, text);
        let start = cur
            .lines
            .iter()
            .position(|l| self.random_seed.is_match(l))
            .ok_or_else(|| cur.malformed("no `Random seed` preamble found"))?;
        cur.pos = start;

        let mut rec = LogRecord::default();
        let mut section = Section::Preamble;
        while section != Section::Done {
            section = match section {
                Section::Preamble => {
                    self.preamble(&mut cur, &mut rec)?;
                    Section::GenerateData
                }
                Section::GenerateData => {
                    cur.expect_literal("Generating data...")?;
                    rec.generate_data = self.elapsed_ms(&mut cur)?;
                    cur.expect_literal("done.")?;
                    Section::GenerateAdtree
                }
                Section::GenerateAdtree => {
                    cur.expect_literal("Generating adtree...")?;
                    rec.generate_adtree = self.elapsed_ms(&mut cur)?;
                    cur.expect_literal("done.")?;
                    Section::LearnStructure
                }
                Section::LearnStructure => {
                    cur.expect_literal("Learning structure...")?;
                    cur.skip_run("`tasks created` line", |l| l.starts_with("tasks created"))?;
                    rec.create_tasks = self.elapsed_ms(&mut cur)?;
                    cur.skip_run("`task processed` or `new task` line", |l| {
                        l.starts_with("task processed") || l.starts_with("new task")
                    })?;
                    rec.process_tasks = self.elapsed_ms(&mut cur)?;
                    rec.learn = self.elapsed_ms(&mut cur)?;
                    cur.expect_literal("done.")?;
                    Section::Scores
                }
                Section::Scores => {
                    cur.expect(&self.learn_score, "`Learn score` line")?;
                    cur.expect(&self.actual_score, "`Actual score` line")?;
                    match cur.peek() {
                        Some(l) if self.profile_trace.is_match(l) => Section::Profiling,
                        _ => Section::Elapsed,
                    }
                }
                Section::Profiling => {
                    self.profiling(&mut cur, &mut rec)?;
                    Section::Elapsed
                }
                Section::Elapsed => {
                    rec.elapsed = self.elapsed_ms(&mut cur)?;
                    Section::Done
                }
                Section::Done => Section::Done,
            };
        }

        Ok(rec)
    }

    fn preamble(&self, cur: &mut Cursor<'_>, rec: &mut LogRecord) -> Result<(), BenchError> {
        cur.expect(&self.random_seed, "`Random seed` line")?;
        let caps = cur.expect(&self.var_count, "`Number of vars` line")?;
        rec.variable_count = cur.number(&caps[1], "variable count")?;
        let caps = cur.expect(&self.record_count, "`Number of records` line")?;
        rec.record_count = cur.number(&caps[1], "record count")?;
        let caps = cur.expect(&self.max_parents, "`Max num parents` line")?;
        rec.max_parents = cur.number(&caps[1], "max parents")?;
        cur.expect(&self.parent_chance, "`% chance of parent` line")?;
        cur.expect(&self.insert_penalty, "`Insert penalty` line")?;
        cur.expect(&self.max_edges, "`Max num edge learned / var` line")?;
        cur.expect(&self.quality_factor, "`Operation quality factor` line")?;
        let caps = cur.expect(&self.variations, "`Variations` line")?;
        rec.variations = caps[1].to_string();
        let caps = cur.expect(&self.profiling_flag, "`Profiling?` line")?;
        rec.profiling_enabled = &caps[1] == "true";
        if rec.profiling_enabled {
            tracing::warn!(file = cur.file, "profiling enabled, timings include profiler overhead");
        }
        Ok(())
    }

    fn profiling(&self, cur: &mut Cursor<'_>, rec: &mut LogRecord) -> Result<(), BenchError> {
        cur.expect(&self.profile_trace, "profiling trace line")?;
        cur.expect(&self.profile_header, "profiling table header")?;

        while let Some(line) = cur.peek() {
            if !line.trim_start().starts_with(':') {
                break;
            }
            let caps = cur.expect(&self.profile_row, "profiling table row")?;
            let entry = self.profile_entry(cur, &caps)?;
            rec.profile.push(entry);
        }

        let caps = cur.expect(&self.clock_time, "`Clock Time` summary row")?;
        rec.clock_time = Some(caps[1].to_string());
        let caps = cur.expect(&self.accounted_time, "`Accounted Time` summary row")?;
        rec.accounted_time = Some(caps[1].to_string());

        while cur.peek().is_some_and(|l| l.trim().is_empty()) {
            cur.pos += 1;
        }
        Ok(())
    }

    fn profile_entry(
        &self,
        cur: &Cursor<'_>,
        caps: &Captures<'_>,
    ) -> Result<ProfilingEntry, BenchError> {
        let duration = |idx: usize| {
            parse_duration(&caps[idx]).map_err(|err| {
                tracing::error!(
                    file = cur.file,
                    line = cur.pos,
                    %err,
                    "profiler duration format changed"
                );
                cur.malformed_at(cur.pos, err.to_string())
            })
        };

        Ok(ProfilingEntry {
            id: caps[1].to_string(),
            call_count: cur.number_at(cur.pos, &caps[2], "call count")?,
            min: duration(3)?,
            max: duration(4)?,
            mad: duration(5)?,
            mean: duration(6)?,
            time_percent: cur.number_at(cur.pos, &caps[7], "time percentage")?,
            time: duration(8)?,
        })
    }

    fn elapsed_ms(&self, cur: &mut Cursor<'_>) -> Result<f64, BenchError> {
        let caps = cur.expect(&self.elapsed, "`Elapsed time: <ms> msecs` line")?;
        let ms: f64 = cur.number(&caps[1], "elapsed time")?;
        Ok(ms)
    }
}

/// Line cursor over one file's text.
struct Cursor<'a> {
    file: &'a str,
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(file: &'a str, text: &'a str) -> Self {
        Self {
            file,
            lines: text.lines().map(str::trim_end).collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consume the next line; fails at end of input.
    fn next_line(&mut self, expected: &str) -> Result<&'a str, BenchError> {
        let line = self.peek().ok_or_else(|| {
            self.malformed(format!("unexpected end of file, expected {}", expected))
        })?;
        self.pos += 1;
        Ok(line)
    }

    fn expect(&mut self, re: &Regex, expected: &str) -> Result<Captures<'a>, BenchError> {
        let line = self.next_line(expected)?;
        re.captures(line).ok_or_else(|| {
            self.malformed_at(self.pos, format!("expected {}, found {:?}", expected, line))
        })
    }

    fn expect_literal(&mut self, literal: &str) -> Result<(), BenchError> {
        let line = self.next_line(literal)?;
        if line != literal {
            return Err(self.malformed_at(
                self.pos,
                format!("expected {:?}, found {:?}", literal, line),
            ));
        }
        Ok(())
    }

    /// Skip one or more consecutive lines accepted by `accept`.
    fn skip_run(
        &mut self,
        expected: &str,
        accept: impl Fn(&str) -> bool,
    ) -> Result<(), BenchError> {
        let line = self.next_line(expected)?;
        if !accept(line) {
            return Err(self.malformed_at(
                self.pos,
                format!("expected {}, found {:?}", expected, line),
            ));
        }
        while self.peek().is_some_and(&accept) {
            self.pos += 1;
        }
        Ok(())
    }

    fn number<T: FromStr>(&self, s: &str, what: &str) -> Result<T, BenchError> {
        self.number_at(self.pos, s, what)
    }

    fn number_at<T: FromStr>(&self, line: usize, s: &str, what: &str) -> Result<T, BenchError> {
        s.parse()
            .map_err(|_| self.malformed_at(line, format!("bad {}: {:?}", what, s)))
    }

    /// Error pointing at the line about to be read.
    fn malformed(&self, reason: impl Into<String>) -> BenchError {
        self.malformed_at(self.pos + 1, reason)
    }

    /// Error pointing at the 1-based line `line`.
    fn malformed_at(&self, line: usize, reason: impl Into<String>) -> BenchError {
        BenchError::MalformedLog {
            file: self.file.to_string(),
            line,
            reason: reason.into(),
        }
    }
}
