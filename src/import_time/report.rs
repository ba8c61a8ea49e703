//! Plain-text rendering of an import-time measurement.
use std::fmt::{self, Write as _};

use super::registry::InterpreterInfo;
use super::stats::Summary;
use super::{ImportTimings, ModuleCounts};

const COL_WIDTH: usize = 11;
const PRECISION: usize = 3;
const HEADERS: [&str; 8] = ["Type", "Min", "Q1", "Median", "Mean", "Q3", "Max", "StdErr"];
/// Position of the mean among the statistic columns (after `Type`).
const MEAN_COLUMN: usize = 4;

/// Everything printed for one `import-time` run.
#[derive(Debug, Clone)]
pub struct ImportTimeReport {
    /// Interpreter the measurement ran in.
    pub interpreter: InterpreterInfo,
    /// When the measurement started, already formatted.
    pub date: String,
    /// Collected samples.
    pub timings: ImportTimings,
    /// Modules pulled in by one fresh import.
    pub counts: ModuleCounts,
}

impl fmt::Display for ImportTimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let executable = self.interpreter.executable.display().to_string().replace('\\', "/");
        writeln!(f, "Module under test: {}", self.timings.module_name)?;
        writeln!(f, "Number of runs   : {}", self.timings.initial.len())?;
        writeln!(f, "Date of test     : {}", self.date)?;
        writeln!(f, "Python version   : {}", self.interpreter.version)?;
        writeln!(f, "Executable       : {executable}")?;
        writeln!(f)?;
        f.write_str(&stats_table(&self.timings))?;
        writeln!(f)?;
        writeln!(
            f,
            "Number of imported modules: {} module(s) & {} submodule(s)",
            self.counts.modules, self.counts.submodules
        )
    }
}

/// Markdown table of the `initial` and `subsequent` samples plus the
/// timeit-style mean, followed by the unit line.
#[must_use]
pub fn stats_table(timings: &ImportTimings) -> String {
    let mut out = String::new();

    push_row(&mut out, HEADERS.iter().map(|h| format!("{h:<COL_WIDTH$}")));
    push_row(&mut out, HEADERS.iter().map(|_| "-".repeat(COL_WIDTH)));

    for (label, samples) in [("initial", &timings.initial), ("subsequent", &timings.subsequent)] {
        let label = format!("{label:<COL_WIDTH$}");
        let cells = Summary::of(samples).map_or_else(
            || vec![dashes(); HEADERS.len() - 1],
            |s| {
                [s.min, s.q1, s.median, s.mean, s.q3, s.max, s.std_err]
                    .iter()
                    .map(|v| number(*v))
                    .collect()
            },
        );
        push_row(&mut out, std::iter::once(label).chain(cells));
    }

    let timeit = (1..HEADERS.len()).map(|col| {
        if col == MEAN_COLUMN {
            number(timings.subsequent_timeit_mean)
        } else {
            dashes()
        }
    });
    push_row(
        &mut out,
        std::iter::once(format!("{:>COL_WIDTH$}", "via timeit")).chain(timeit),
    );

    let _ = writeln!(out, "  Unit-of-Measure: {}", timings.unit_of_measure);
    out
}

fn number(value: f64) -> String {
    format!("{value:>COL_WIDTH$.PRECISION$}")
}

fn dashes() -> String {
    format!("{:>COL_WIDTH$}", "--")
}

fn push_row(out: &mut String, cells: impl IntoIterator<Item = String>) {
    for cell in cells {
        out.push_str("| ");
        out.push_str(&cell);
        out.push(' ');
    }
    out.push_str("|\n");
}
