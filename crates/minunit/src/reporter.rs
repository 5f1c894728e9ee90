//! Reporter - render the run summary and derive the exit status

use crate::palette::{Palette, Tone};
use crate::recorder::RunCounters;
use crate::timer::Elapsed;
use std::io::{self, Write};

/// Summary renderer with output configuration
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    /// Colored multi-line summary with timings instead of the one-line form
    verbose: bool,
    palette: Palette,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Reporter {
    /// Create a new reporter
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            palette: Palette::default(),
        }
    }

    /// Use a specific palette for verbose output
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Write the summary. Counters are only read.
    pub fn write_summary(
        &self,
        out: &mut dyn Write,
        counters: &RunCounters,
        elapsed: Elapsed,
    ) -> io::Result<()> {
        if self.verbose {
            self.write_verbose(out, counters, elapsed)
        } else {
            write!(
                out,
                "\n\n{} tests, {} assertions, {} failures\n",
                counters.tests_run, counters.assertions, counters.failures
            )
        }
    }

    fn write_verbose(
        &self,
        out: &mut dyn Write,
        counters: &RunCounters,
        elapsed: Elapsed,
    ) -> io::Result<()> {
        let p = &self.palette;
        writeln!(out, "\n\n{}", p.paint("=== Test Summary ===", Tone::Heading))?;
        writeln!(
            out,
            "{}",
            p.paint(&format!("Tests run: {}", counters.tests_run), Tone::Tests)
        )?;
        writeln!(
            out,
            "{}",
            p.paint(
                &format!("Assertions: {}", counters.assertions),
                Tone::Assertions
            )
        )?;
        writeln!(
            out,
            "{}",
            p.paint(&format!("Failures: {}", counters.failures), Tone::Failures)
        )?;
        let timing = format!(
            "Finished in {:.8} seconds (real) {:.8} seconds (proc)",
            elapsed.real, elapsed.cpu
        );
        writeln!(out, "\n{}\n", p.paint(&timing, Tone::Heading))
    }

    /// Render the summary to a string
    pub fn render(&self, counters: &RunCounters, elapsed: Elapsed) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.write_summary(&mut buf, counters, elapsed);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Process exit status for a run: the number of failed tests.
///
/// Saturates at `i32::MAX`; hosts on platforms that keep only the low byte of
/// the status will see the count truncated.
pub fn exit_code(counters: &RunCounters) -> i32 {
    i32::try_from(counters.failures).unwrap_or(i32::MAX)
}
