//! Benchmark log text used across the test suites.

pub const PROFILE_BLOCK: &str = "\
2015-12-03 14:22:01 bench-host TRACE [bayes.main] - Profiling: :bayes.main/all
                                           Id      nCalls       Min        Max       MAD      Mean   Time% Time
                   :bayes.main/run-learner           1     3.4s       3.4s      0ns       3.4s      80  3.4s
                 :bayes.main/generate-data           1    500ms      500ms      0ns      500ms      12  500ms
               :bayes.main/generate-adtree           1    200ms      200ms      0ns      200ms       5  200ms
                :bayes.main/score-original           1     50ms       50ms      0ns       50ms       1  50ms
                 :bayes.main/alloc-learner           1     50ms       50ms      0ns       50ms       1  50ms
                :bayes.main/check-solution           1    150ms      150ms      0ns      150ms       4  150ms
                :bayes.main/score-solution           1     50ms       50ms      0ns       50ms       1  50ms
   :bayes.learner/find-best-insert-task         800     1.0ms      9.0ms    0.5ms      2.5ms      47  2.0s
                                   Clock Time                                                          100 4.2s
                               Accounted Time                                                          95 4.0s

";

/// Builder for a complete, well-formed benchmark log.
pub struct LogFixture {
    process_tasks: f64,
    profiling_enabled: bool,
    profile_block: Option<String>,
}

impl LogFixture {
    pub fn new(process_tasks: f64) -> Self {
        Self {
            process_tasks,
            profiling_enabled: false,
            profile_block: None,
        }
    }

    pub fn profiled(self) -> Self {
        self.with_profile_block(PROFILE_BLOCK)
    }

    pub fn with_profile_block(mut self, block: &str) -> Self {
        self.profiling_enabled = true;
        self.profile_block = Some(block.to_string());
        self
    }

    pub fn render(&self) -> String {
        format!(
            "\
Random seed                = 1
Number of vars             = 32
Number of records          = 4096
Max num parents            = 2
% chance of parent         = 10
Insert penalty             = 2
Max num edge learned / var = -1
Operation quality factor   = 1.0
Variations                 =
Profiling?                 = {profiling}
Generating data...
Elapsed time: 812.5 msecs
done.
Generating adtree...
Elapsed time: 240.25 msecs
done.
Learning structure...
tasks created: 32
tasks created: 64
Elapsed time: 12.0 msecs
task processed: 1
new task: 2
task processed: 2
Elapsed time: {process} msecs
Elapsed time: 3380.0 msecs
done.
Learn score  = -123456.789
Actual score = -123400.5
{block}Elapsed time: 4500.0 msecs
",
            profiling = self.profiling_enabled,
            process = self.process_tasks,
            block = self.profile_block.as_deref().unwrap_or(""),
        )
    }
}
