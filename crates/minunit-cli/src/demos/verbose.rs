//! Verbose convention: every assertion is tagged and the first failure ends the test

use super::{setup, teardown};
use minunit::{
    bail, ensure, ensure_double_eq, ensure_int_eq, ensure_str_eq, ensure_that, hook, Outcome,
    Session, Suite,
};

fn test_check_verbose(s: &mut Session) -> Outcome {
    let x = 5;
    let y = 5;
    ensure!(s, x == y);
    Ok(())
}

fn test_fail_verbose(s: &mut Session) -> Outcome {
    bail!(s, "This test is designed to fail");
}

fn test_assert_verbose(s: &mut Session) -> Outcome {
    let value = 42;
    ensure_that!(s, value == 42, "Value should be 42");
    Ok(())
}

fn test_int_and_string_eq(s: &mut Session) -> Outcome {
    ensure_int_eq!(s, 42, 6 * 7);
    ensure_str_eq!(s, "Hello, World!", format!("Hello, {}!", "World"));
    Ok(())
}

fn test_double_eq_verbose(s: &mut Session) -> Outcome {
    ensure_double_eq!(s, 0.3, 0.1 + 0.2);
    ensure_double_eq!(s, 1.0 / 3.0, 0.333);
    Ok(())
}

pub fn run(session: &mut Session) {
    session.suite_verbose("test_suite", |s| {
        s.configure(hook(setup), hook(teardown));

        s.run_test_verbose("test_check_verbose", test_check_verbose);
        s.run_test_verbose("test_fail_verbose", test_fail_verbose);
        s.run_test_verbose("test_assert_verbose", test_assert_verbose);
    });

    let comparisons = Suite::new("comparisons")
        .setup(setup)
        .teardown(teardown)
        .verbose_test("test_int_and_string_eq", test_int_and_string_eq)
        .verbose_test("test_double_eq_verbose", test_double_eq_verbose);
    log::debug!("running suite `{}` with {} tests", comparisons.name(), comparisons.len());
    session.run_suite(comparisons);
}
