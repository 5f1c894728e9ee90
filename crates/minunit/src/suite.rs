//! Declarative suites: an ordered list of named tests plus an optional hook pair

use crate::assertion::Outcome;
use crate::hooks::Hook;
use crate::session::Session;
use std::fmt;

/// Body of a basic test
pub type BasicFn = Box<dyn Fn(&mut Session)>;

/// Body of a verbose test
pub type VerboseFn = Box<dyn Fn(&mut Session) -> Outcome>;

/// A test body in one of the two conventions
pub enum TestBody {
    Basic(BasicFn),
    Verbose(VerboseFn),
}

/// A named test registered in a suite
pub struct TestCase {
    name: String,
    body: TestBody,
}

impl TestCase {
    pub fn basic<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Session) + 'static,
    {
        Self {
            name: name.into(),
            body: TestBody::Basic(Box::new(f)),
        }
    }

    pub fn verbose<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Session) -> Outcome + 'static,
    {
        Self {
            name: name.into(),
            body: TestBody::Verbose(Box::new(f)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self.body, TestBody::Verbose(_))
    }

    /// Run this test with the runner matching its convention
    pub fn run_in(&self, session: &mut Session) {
        match &self.body {
            TestBody::Basic(f) => session.run_test(&self.name, |s| f(s)),
            TestBody::Verbose(f) => session.run_test_verbose(&self.name, |s| f(s)),
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("verbose", &self.is_verbose())
            .finish()
    }
}

/// An ordered collection of tests sharing one setup/teardown pair.
///
/// ```
/// use minunit::{check, ensure, Outcome, Session, Suite};
///
/// fn adds(s: &mut Session) {
///     check!(s, 1 + 1 == 2);
/// }
///
/// fn multiplies(s: &mut Session) -> Outcome {
///     ensure!(s, 2 * 3 == 6);
///     Ok(())
/// }
///
/// let (mut session, _output) = Session::captured();
/// let suite = Suite::new("arithmetic")
///     .setup(|| {})
///     .test("adds", adds)
///     .verbose_test("multiplies", multiplies);
///
/// session.run_suite(suite);
/// assert_eq!(session.counters().tests_run, 2);
/// assert!(session.hooks().is_empty());
/// ```
pub struct Suite {
    name: String,
    setup: Option<Hook>,
    teardown: Option<Hook>,
    tests: Vec<TestCase>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setup: None,
            teardown: None,
            tests: Vec::new(),
        }
    }

    pub fn setup<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.setup = Some(Box::new(f));
        self
    }

    pub fn teardown<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.teardown = Some(Box::new(f));
        self
    }

    /// Append a basic test
    pub fn test<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Session) + 'static,
    {
        self.tests.push(TestCase::basic(name, f));
        self
    }

    /// Append a verbose test
    pub fn verbose_test<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Session) -> Outcome + 'static,
    {
        self.tests.push(TestCase::verbose(name, f));
        self
    }

    /// Append an already built test case
    pub fn case(mut self, case: TestCase) -> Self {
        self.tests.push(case);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Run every test in insertion order.
    ///
    /// Suites holding at least one verbose test are announced with a
    /// `[SUITE]` banner. Hooks are cleared from the session afterwards.
    pub fn run(self, session: &mut Session) {
        let Suite {
            name,
            setup,
            teardown,
            tests,
        } = self;

        let body = |s: &mut Session| {
            s.configure(setup, teardown);
            for test in &tests {
                test.run_in(s);
            }
        };

        if tests.iter().any(TestCase::is_verbose) {
            session.suite_verbose(&name, body);
        } else {
            session.suite(&name, body);
        }
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("setup", &self.setup.is_some())
            .field("teardown", &self.teardown.is_some())
            .field("tests", &self.tests)
            .finish()
    }
}

impl Session {
    /// Run a declarative suite; see [`Suite::run`]
    pub fn run_suite(&mut self, suite: Suite) {
        suite.run(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::{Check, Convention, Location};
    use std::cell::RefCell;
    use std::rc::Rc;

    const HERE: Location = Location::new("src/suite.rs", 1);

    #[test]
    fn test_runs_in_insertion_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let (first, second) = (Rc::clone(&order), Rc::clone(&order));

        let suite = Suite::new("ordered")
            .test("first", move |_| first.borrow_mut().push("first"))
            .verbose_test("second", move |_| {
                second.borrow_mut().push("second");
                Ok(())
            });
        assert_eq!(suite.len(), 2);

        let (mut session, _capture) = Session::captured();
        session.run_suite(suite);

        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_banner_only_for_verbose_suites() {
        let (mut session, capture) = Session::captured();
        session.run_suite(Suite::new("plain").test("t", |_| {}));
        assert!(!capture.contents().contains("[SUITE]"));

        session.run_suite(Suite::new("fancy").verbose_test("t", |_| Ok(())));
        assert!(capture.contents().contains("[SUITE] Running fancy\n"));
    }

    #[test]
    fn test_mixed_conventions_count_failures() {
        let suite = Suite::new("mixed")
            .test("basic_fails", |s| {
                let _ = s.check(Check::Forced { message: "b" }, Convention::Basic, HERE);
            })
            .verbose_test("verbose_fails", |s| {
                s.check(Check::Forced { message: "v" }, Convention::Verbose, HERE)
                    .into_outcome()
            })
            .case(TestCase::basic("passes", |_| {}));

        let (mut session, _capture) = Session::captured();
        session.run_suite(suite);

        let counters = session.counters();
        assert_eq!(counters.tests_run, 3);
        assert_eq!(counters.failures, 2);
        assert_eq!(session.exit_code(), 2);
    }

    #[test]
    fn test_hooks_cleared_after_run() {
        let (mut session, _capture) = Session::captured();
        session.run_suite(Suite::new("hooked").setup(|| {}).teardown(|| {}).test("t", |_| {}));

        assert!(session.hooks().is_empty());
    }
}
