//! Assertion macros for both test conventions.
//!
//! Basic tests (`fn(&mut Session)`) use the `check*` family and `fail!`: a
//! failing assertion is recorded and the test body carries on, so the last
//! failure message wins.
//!
//! Verbose tests (`fn(&mut Session) -> Outcome`) use the `ensure*` family and
//! `bail!`: a failing assertion returns its failure from the test body, so the
//! first failure wins and later assertions never run.
//!
//! Every operand is evaluated before the session is borrowed, so operands may
//! read from the session themselves.

#[doc(hidden)]
#[macro_export]
macro_rules! __location {
    () => {
        $crate::Location::new(file!(), line!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __basic {
    ($session:expr, $check:expr) => {{
        let _ = $session.check($check, $crate::Convention::Basic, $crate::__location!());
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __verbose {
    ($session:expr, $check:expr) => {
        $session
            .check($check, $crate::Convention::Verbose, $crate::__location!())
            .into_outcome()?
    };
}

// ============================================================================
// Basic convention
// ============================================================================

/// Check a condition; the failure detail is the expression text.
///
/// ```
/// use minunit::{check, Session};
///
/// let (mut session, _output) = Session::captured();
/// session.run_test("values", |s| {
///     let x = 5;
///     check!(s, x == 5);
/// });
/// assert_eq!(session.counters().failures, 0);
/// ```
#[macro_export]
macro_rules! check {
    ($session:expr, $cond:expr $(,)?) => {{
        let passed: bool = $cond;
        $crate::__basic!(
            $session,
            $crate::Check::Condition {
                passed,
                expr: stringify!($cond),
            }
        )
    }};
}

/// Check a condition, reporting `message` on failure
#[macro_export]
macro_rules! check_that {
    ($session:expr, $cond:expr, $message:expr $(,)?) => {{
        let passed: bool = $cond;
        let message: &str = &$message;
        $crate::__basic!($session, $crate::Check::Asserted { passed, message })
    }};
}

/// Record an unconditional failure and continue
#[macro_export]
macro_rules! fail {
    ($session:expr, $message:expr $(,)?) => {{
        let message: &str = &$message;
        $crate::__basic!($session, $crate::Check::Forced { message })
    }};
}

/// Check two integers for equality
#[macro_export]
macro_rules! check_int_eq {
    ($session:expr, $expected:expr, $actual:expr $(,)?) => {{
        let expected = $crate::IntOperand::into_operand($expected);
        let actual = $crate::IntOperand::into_operand($actual);
        $crate::__basic!($session, $crate::Check::IntEq { expected, actual })
    }};
}

/// Check two floats for equality within the session epsilon
#[macro_export]
macro_rules! check_double_eq {
    ($session:expr, $expected:expr, $actual:expr $(,)?) => {{
        let expected = ($expected) as f64;
        let actual = ($actual) as f64;
        $crate::__basic!($session, $crate::Check::DoubleEq { expected, actual })
    }};
}

/// Check two strings for equality; `None` operands print as `<null pointer>`
#[macro_export]
macro_rules! check_str_eq {
    ($session:expr, $expected:expr, $actual:expr $(,)?) => {{
        let expected = $expected;
        let actual = $actual;
        $crate::__basic!(
            $session,
            $crate::Check::StrEq {
                expected: $crate::NullableStr::as_nullable(&expected),
                actual: $crate::NullableStr::as_nullable(&actual),
            }
        )
    }};
}

// ============================================================================
// Verbose convention
// ============================================================================

/// Ensure a condition holds, returning the failure from the test otherwise.
///
/// ```
/// use minunit::{ensure, Outcome, Session};
///
/// fn stops_early(s: &mut Session) -> Outcome {
///     ensure!(s, 1 == 2);
///     unreachable!("the failed ensure! returned");
/// }
///
/// let (mut session, _output) = Session::captured();
/// session.run_test_verbose("stops_early", stops_early);
/// assert_eq!(session.counters().assertions, 1);
/// assert_eq!(session.counters().failures, 1);
/// ```
#[macro_export]
macro_rules! ensure {
    ($session:expr, $cond:expr $(,)?) => {{
        let passed: bool = $cond;
        $crate::__verbose!(
            $session,
            $crate::Check::Condition {
                passed,
                expr: stringify!($cond),
            }
        )
    }};
}

/// Ensure a condition holds, returning `message` as the failure otherwise
#[macro_export]
macro_rules! ensure_that {
    ($session:expr, $cond:expr, $message:expr $(,)?) => {{
        let passed: bool = $cond;
        let message: &str = &$message;
        $crate::__verbose!($session, $crate::Check::Asserted { passed, message })
    }};
}

/// Return an unconditional failure from the test
#[macro_export]
macro_rules! bail {
    ($session:expr, $message:expr $(,)?) => {{
        let message: &str = &$message;
        return $session
            .check(
                $crate::Check::Forced { message },
                $crate::Convention::Verbose,
                $crate::__location!(),
            )
            .into_outcome();
    }};
}

/// Ensure two integers are equal
#[macro_export]
macro_rules! ensure_int_eq {
    ($session:expr, $expected:expr, $actual:expr $(,)?) => {{
        let expected = $crate::IntOperand::into_operand($expected);
        let actual = $crate::IntOperand::into_operand($actual);
        $crate::__verbose!($session, $crate::Check::IntEq { expected, actual })
    }};
}

/// Ensure two floats are equal within the session epsilon
#[macro_export]
macro_rules! ensure_double_eq {
    ($session:expr, $expected:expr, $actual:expr $(,)?) => {{
        let expected = ($expected) as f64;
        let actual = ($actual) as f64;
        $crate::__verbose!($session, $crate::Check::DoubleEq { expected, actual })
    }};
}

/// Ensure two strings are equal; `None` operands print as `<null pointer>`
#[macro_export]
macro_rules! ensure_str_eq {
    ($session:expr, $expected:expr, $actual:expr $(,)?) => {{
        let expected = $expected;
        let actual = $actual;
        $crate::__verbose!(
            $session,
            $crate::Check::StrEq {
                expected: $crate::NullableStr::as_nullable(&expected),
                actual: $crate::NullableStr::as_nullable(&actual),
            }
        )
    }};
}
