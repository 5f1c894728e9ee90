//! Basic convention: failures are recorded and the test keeps running

use super::{setup, teardown};
use minunit::{check, check_that, fail, hook, Session};

fn test_check(s: &mut Session) {
    let x = 5;
    let y = 5;
    check!(s, x == y);
}

fn test_fail(s: &mut Session) {
    fail!(s, "This test is designed to fail");
}

fn test_assert(s: &mut Session) {
    let value = 42;
    check_that!(s, value == 42, "Value should be 42");
}

pub fn run(session: &mut Session) {
    session.suite("test_suite", |s| {
        s.configure(hook(setup), hook(teardown));

        s.run_test("test_check", test_check);
        s.run_test("test_fail", test_fail);
        s.run_test("test_assert", test_assert);
    });
}
