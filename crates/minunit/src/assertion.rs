//! Assertion kinds, verdicts and the verbose test outcome type
//!
//! Every assertion macro builds a [`Check`] and hands it to
//! [`Session::check`](crate::Session::check), which counts it, records a
//! failure and prints the console line. What happens next depends on the
//! [`Convention`]: basic tests ignore the returned [`Verdict`] and keep going,
//! verbose tests turn a failing verdict into an early `Err` return.

use crate::compare::{self, Comparison};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Source position of an assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// How a failing assertion propagates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// Record the failure and continue with the next statement
    Basic,
    /// Record the failure and return it from the test body
    Verbose,
}

/// One assertion to evaluate
#[derive(Debug, Clone, PartialEq)]
pub enum Check<'a> {
    /// A boolean condition; the detail is the expression text
    Condition { passed: bool, expr: &'a str },
    /// An unconditional failure with a custom message
    Forced { message: &'a str },
    /// A boolean condition with a custom message
    Asserted { passed: bool, message: &'a str },
    /// Integer equality
    IntEq { expected: i128, actual: i128 },
    /// Floating-point equality within the session epsilon
    DoubleEq { expected: f64, actual: f64 },
    /// String equality; `None` is a missing string
    StrEq {
        expected: Option<&'a str>,
        actual: Option<&'a str>,
    },
}

/// A check after evaluation: outcome plus the text needed for output
pub(crate) struct Evaluation<'a> {
    pub passed: bool,
    pub detail: Cow<'a, str>,
    /// Tag printed before the failure message, if this kind prints one
    pub fail_tag: Option<&'static str>,
    /// Line printed on success
    pub pass_line: Cow<'a, str>,
    /// Print `pass_line` without a line break (basic comparison dots)
    pub pass_inline: bool,
}

impl<'a> Check<'a> {
    pub(crate) fn evaluate(&self, convention: Convention, epsilon: f64) -> Evaluation<'a> {
        match *self {
            Check::Condition { passed, expr } => Evaluation {
                passed,
                detail: Cow::Borrowed(expr),
                fail_tag: Some("[CHECK FAILED]"),
                pass_line: Cow::Owned(format!("[CHECK PASSED] {}", expr)),
                pass_inline: false,
            },
            Check::Forced { message } => Evaluation {
                passed: false,
                detail: Cow::Borrowed(message),
                fail_tag: Some("[FAIL]"),
                pass_line: Cow::Borrowed(""),
                pass_inline: false,
            },
            Check::Asserted { passed, message } => Evaluation {
                passed,
                detail: Cow::Borrowed(message),
                fail_tag: Some("[ASSERTION FAILED]"),
                pass_line: Cow::Owned(format!("[ASSERTION PASSED] {}", message)),
                pass_inline: false,
            },
            Check::IntEq { expected, actual } => {
                comparison(compare::int_eq(expected, actual), INTEGER_TAGS, convention)
            }
            Check::DoubleEq { expected, actual } => comparison(
                compare::double_eq(expected, actual, epsilon),
                DOUBLE_TAGS,
                convention,
            ),
            Check::StrEq { expected, actual } => {
                comparison(compare::str_eq(expected, actual), STRING_TAGS, convention)
            }
        }
    }
}

/// Typed comparisons print a dot in basic output and a summary line in verbose output.
/// Their basic failures stay silent until the runner prints the message.
fn comparison<'a>(
    cmp: Comparison,
    tags: (&'static str, &'static str),
    convention: Convention,
) -> Evaluation<'a> {
    let (pass_tag, fail_tag) = tags;
    match convention {
        Convention::Basic => Evaluation {
            passed: cmp.passed,
            detail: Cow::Owned(cmp.detail),
            fail_tag: None,
            pass_line: Cow::Borrowed("."),
            pass_inline: true,
        },
        Convention::Verbose => Evaluation {
            passed: cmp.passed,
            pass_line: Cow::Owned(format!("{} {}", pass_tag, cmp.summary)),
            detail: Cow::Owned(cmp.detail),
            fail_tag: Some(fail_tag),
            pass_inline: false,
        },
    }
}

const INTEGER_TAGS: (&str, &str) = (
    "[INTEGER COMPARISON PASSED]",
    "[INTEGER COMPARISON FAILED]",
);
const DOUBLE_TAGS: (&str, &str) = ("[DOUBLE COMPARISON PASSED]", "[DOUBLE COMPARISON FAILED]");
const STRING_TAGS: (&str, &str) = ("[STRING COMPARISON PASSED]", "[STRING COMPARISON FAILED]");

/// A failed verbose test: the recorded failure message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Failure {}

/// What a verbose test returns: `Ok(())` on success, the first failure otherwise
pub type Outcome = Result<(), Failure>;

/// Result of a single assertion
#[must_use = "basic tests may ignore a verdict explicitly; verbose tests should propagate it"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(Failure),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail(_))
    }

    /// Convert into a verbose outcome so `?` can short-circuit the test body
    pub fn into_outcome(self) -> Outcome {
        match self {
            Verdict::Pass => Ok(()),
            Verdict::Fail(failure) => Err(failure),
        }
    }
}
