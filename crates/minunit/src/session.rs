//! Test session - the explicit context every test, suite and assertion runs in
//!
//! A [`Session`] owns everything a run needs: counters and the last failure
//! message, the active hook pair, the timer, output settings and the writer.
//! Tests receive `&mut Session` and assert through it.

use crate::assertion::{Check, Convention, Failure, Location, Outcome, Verdict};
use crate::compare::EPSILON;
use crate::hooks::{Hook, HookPair};
use crate::palette::{Palette, Tone};
use crate::recorder::{Recorder, RunCounters};
use crate::reporter::{self, Reporter};
use crate::timer::Timer;
use crate::CaptureBuffer;
use minunit_config::{Config, DEFAULT_MESSAGE_CAPACITY};
use std::fmt;
use std::io::{self, Write};

/// Function name used in failure messages when no test is running
const NO_TEST: &str = "<no test>";

pub struct Session {
    recorder: Recorder,
    hooks: HookPair,
    timer: Timer,
    palette: Palette,
    epsilon: f64,
    current_test: Option<String>,
    out: Box<dyn Write>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session printing to stdout with default settings
    pub fn new() -> Self {
        Self {
            recorder: Recorder::new(DEFAULT_MESSAGE_CAPACITY),
            hooks: HookPair::new(),
            timer: Timer::new(),
            palette: Palette::default(),
            epsilon: EPSILON,
            current_test: None,
            out: Box::new(io::stdout()),
        }
    }

    /// Create a session from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        log::debug!(
            "session config: color={}, epsilon={}, message_capacity={}",
            config.color(),
            config.epsilon(),
            config.message_capacity()
        );
        Self::new()
            .with_palette(Palette::from_choice(config.color()))
            .with_epsilon(config.epsilon())
            .with_message_capacity(config.message_capacity())
    }

    /// Create an uncolored session whose output is captured in memory
    pub fn captured() -> (Self, CaptureBuffer) {
        let capture = CaptureBuffer::new();
        let session = Self::new()
            .with_writer(capture.clone())
            .with_palette(Palette::new(false));
        (session, capture)
    }

    /// Send console output to `writer` instead of stdout
    pub fn with_writer(mut self, writer: impl Write + 'static) -> Self {
        self.out = Box::new(writer);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Enable or disable colored verbose output
    pub fn with_color(self, enabled: bool) -> Self {
        self.with_palette(Palette::new(enabled))
    }

    /// Set the absolute tolerance for floating-point equality
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the last-failure message capacity. Clears the stored message only.
    pub fn with_message_capacity(mut self, capacity: usize) -> Self {
        self.recorder.set_message_capacity(capacity);
        self
    }

    // ------------------------------------------------------------------
    // Hooks and suites
    // ------------------------------------------------------------------

    /// Install the setup/teardown pair for the current suite
    pub fn configure(&mut self, setup: Option<Hook>, teardown: Option<Hook>) {
        log::debug!(
            "hooks configured: setup={}, teardown={}",
            setup.is_some(),
            teardown.is_some()
        );
        self.hooks.configure(setup, teardown);
    }

    pub fn hooks(&self) -> &HookPair {
        &self.hooks
    }

    /// Run a suite body, then clear the hooks it configured
    pub fn suite<F>(&mut self, name: &str, body: F)
    where
        F: FnOnce(&mut Session),
    {
        log::debug!("suite `{}` started", name);
        body(self);
        self.hooks.reset();
        log::debug!("suite `{}` finished, hooks reset", name);
    }

    /// Like [`Session::suite`], announced with a `[SUITE]` banner
    pub fn suite_verbose<F>(&mut self, name: &str, body: F)
    where
        F: FnOnce(&mut Session),
    {
        self.say(&format!("[SUITE] Running {}", name), Tone::Suite);
        self.suite(name, body);
    }

    // ------------------------------------------------------------------
    // Test runners
    // ------------------------------------------------------------------

    /// Run a basic test: failures set the status flag and execution falls through.
    ///
    /// The test counts as failed if any assertion inside it failed; the last
    /// recorded message is printed after teardown.
    pub fn run_test<F>(&mut self, name: &str, test: F)
    where
        F: FnOnce(&mut Session),
    {
        self.hooks.setup();
        self.recorder.begin_test();
        self.current_test = Some(name.to_string());
        test(self);
        self.current_test = None;
        self.hooks.teardown();

        let failed = self.recorder.status_failed();
        self.complete_test(name, failed);
        if failed {
            let message = format!("F\n{}\n", self.recorder.last_message());
            self.emit(format_args!("{}", message));
        }
        self.flush();
    }

    /// Run a verbose test: the body returns its first failure, if any.
    ///
    /// Starts the session timer on the first verbose test.
    pub fn run_test_verbose<F>(&mut self, name: &str, test: F)
    where
        F: FnOnce(&mut Session) -> Outcome,
    {
        self.timer.start_if_needed();
        self.hooks.setup();
        self.recorder.begin_test();
        self.current_test = Some(name.to_string());
        let outcome = test(self);
        self.current_test = None;
        self.hooks.teardown();

        self.complete_test(name, outcome.is_err());
        if let Err(failure) = outcome {
            self.say(&format!("[FAIL] {}", failure), Tone::Fail);
        }
        self.flush();
    }

    fn complete_test(&mut self, name: &str, failed: bool) {
        self.recorder.record_test_completion(failed);
        log::trace!(
            "test `{}` {}",
            name,
            if failed { "failed" } else { "passed" }
        );
    }

    // ------------------------------------------------------------------
    // Assertions
    // ------------------------------------------------------------------

    /// Evaluate one assertion.
    ///
    /// Always counts the assertion. On failure the message
    /// `"<test> failed:\n\t<file>:<line>: <detail>"` is recorded and returned
    /// in the verdict; the convention only decides how output is printed.
    pub fn check(&mut self, check: Check<'_>, convention: Convention, at: Location) -> Verdict {
        self.recorder.record_assertion();
        let eval = check.evaluate(convention, self.epsilon);

        if eval.passed {
            log::trace!("assertion passed at {}", at);
            match convention {
                Convention::Basic if eval.pass_inline => {
                    self.emit(format_args!("{}", eval.pass_line))
                }
                Convention::Basic => self.emit(format_args!("{}\n", eval.pass_line)),
                Convention::Verbose => self.say(&eval.pass_line, Tone::Pass),
            }
            return Verdict::Pass;
        }

        let function = self.current_test.as_deref().unwrap_or(NO_TEST);
        self.recorder.record_failure(format_args!(
            "{} failed:\n\t{}: {}",
            function, at, eval.detail
        ));
        log::trace!("assertion failed at {}", at);

        if let Some(tag) = eval.fail_tag {
            let line = format!("{} {}", tag, self.recorder.last_message());
            match convention {
                Convention::Basic => self.emit(format_args!("{}\n", line)),
                Convention::Verbose => self.say(&line, Tone::Fail),
            }
        }
        Verdict::Fail(Failure::new(self.recorder.last_message()))
    }

    // ------------------------------------------------------------------
    // Reporting
    // ------------------------------------------------------------------

    /// Print the one-line summary
    pub fn report(&mut self) {
        let counters = self.counters();
        let reporter = Reporter::new(false);
        let _ = reporter.write_summary(&mut *self.out, &counters, self.timer.elapsed());
        self.flush();
    }

    /// Print the colored summary with elapsed real and CPU time
    pub fn report_verbose(&mut self) {
        let counters = self.counters();
        let reporter = Reporter::new(true).with_palette(self.palette);
        let _ = reporter.write_summary(&mut *self.out, &counters, self.timer.elapsed());
        self.flush();
    }

    /// Process exit status: the number of failed tests
    pub fn exit_code(&self) -> i32 {
        reporter::exit_code(&self.recorder.counters())
    }

    // ------------------------------------------------------------------
    // Accessors and output
    // ------------------------------------------------------------------

    pub fn counters(&self) -> RunCounters {
        self.recorder.counters()
    }

    /// The most recent failure message, possibly from an earlier test
    pub fn last_message(&self) -> &str {
        self.recorder.last_message()
    }

    /// Name of the running test, if any
    pub fn current_test(&self) -> Option<&str> {
        self.current_test.as_deref()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Print a line of host output through the session writer in a palette tone
    pub fn say(&mut self, text: &str, tone: Tone) {
        let painted = self.palette.paint(text, tone);
        self.emit(format_args!("{}\n", painted));
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        // Console output is best effort; a closed stdout must not abort the run.
        let _ = self.out.write_fmt(args);
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    const HERE: Location = Location::new("src/session.rs", 10);

    fn condition(passed: bool) -> Check<'static> {
        Check::Condition {
            passed,
            expr: "x == y",
        }
    }

    #[test]
    fn test_passing_test_counts_run_only() {
        let (mut session, _capture) = Session::captured();
        session.run_test("ok", |s| {
            let _ = s.check(condition(true), Convention::Basic, HERE);
        });

        assert_eq!(
            session.counters(),
            RunCounters {
                tests_run: 1,
                assertions: 1,
                failures: 0,
            }
        );
    }

    #[test]
    fn test_failure_message_format() {
        let (mut session, _capture) = Session::captured();
        session.run_test("test_values", |s| {
            let _ = s.check(condition(false), Convention::Basic, HERE);
        });

        assert_eq!(
            session.last_message(),
            "test_values failed:\n\tsrc/session.rs:10: x == y"
        );
    }

    #[test]
    fn test_basic_output_lines() {
        let (mut session, capture) = Session::captured();
        session.run_test("test_values", |s| {
            let _ = s.check(condition(true), Convention::Basic, HERE);
            let _ = s.check(
                Check::IntEq {
                    expected: 1,
                    actual: 1,
                },
                Convention::Basic,
                HERE,
            );
            let _ = s.check(condition(false), Convention::Basic, HERE);
        });

        assert_eq!(
            capture.contents(),
            "[CHECK PASSED] x == y\n\
             .[CHECK FAILED] test_values failed:\n\tsrc/session.rs:10: x == y\n\
             F\ntest_values failed:\n\tsrc/session.rs:10: x == y\n"
        );
    }

    #[test]
    fn test_verbose_failure_printed_by_runner() {
        let (mut session, capture) = Session::captured();
        session.run_test_verbose("test_v", |s| {
            s.check(Check::Forced { message: "boom" }, Convention::Verbose, HERE)
                .into_outcome()
        });

        let out = capture.contents();
        assert!(out.contains("[FAIL] test_v failed:\n\tsrc/session.rs:10: boom\n"));
        assert_eq!(session.counters().failures, 1);
    }

    #[test]
    fn test_check_outside_test_uses_placeholder_name() {
        let (mut session, _capture) = Session::captured();
        let verdict = session.check(condition(false), Convention::Basic, HERE);

        assert!(verdict.is_fail());
        assert!(session.last_message().starts_with("<no test> failed:"));
        assert_eq!(session.counters().tests_run, 0);
    }

    #[test]
    fn test_message_capacity_truncates() {
        let (session, _capture) = Session::captured();
        let mut session = session.with_message_capacity(12);
        session.run_test("a_very_long_test_name", |s| {
            let _ = s.check(condition(false), Convention::Basic, HERE);
        });

        assert_eq!(session.last_message(), "a_very_long_");
    }

    #[test]
    fn test_message_capacity_change_keeps_counters() {
        let (mut session, _capture) = Session::captured();
        session.run_test("fails", |s| {
            let _ = s.check(condition(false), Convention::Basic, HERE);
        });
        let before = session.counters();

        let session = session.with_message_capacity(256);
        assert_eq!(session.counters(), before);
        assert_eq!(before.failures, 1);
    }

    #[test]
    fn test_suite_resets_hooks() {
        let (mut session, _capture) = Session::captured();
        session.suite("configured", |s| {
            s.configure(hook(|| {}), hook(|| {}));
            assert!(!s.hooks().is_empty());
        });

        assert!(session.hooks().is_empty());
    }

    #[test]
    fn test_verbose_test_starts_timer_once() {
        let (mut session, _capture) = Session::captured();
        assert!(!session.timer.is_started());

        session.run_test("basic", |_| {});
        assert!(!session.timer.is_started());

        session.run_test_verbose("verbose", |_| Ok(()));
        assert!(session.timer.is_started());
    }

    #[test]
    fn test_current_test_visible_inside_body() {
        let (mut session, _capture) = Session::captured();
        let seen = Rc::new(Cell::new(false));
        let inner = Rc::clone(&seen);
        session.run_test("named", move |s| inner.set(s.current_test() == Some("named")));

        assert!(seen.get());
        assert_eq!(session.current_test(), None);
    }
}
