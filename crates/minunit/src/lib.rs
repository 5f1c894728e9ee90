//! minunit - a minimal unit-testing micro-framework
//!
//! Tests are plain functions that receive a [`Session`] and assert through
//! macros. Two conventions are supported side by side:
//! - Basic tests (`fn(&mut Session)`) record failures and keep running; the
//!   last failure message is printed after the test.
//! - Verbose tests (`fn(&mut Session) -> Outcome`) stop at the first failure
//!   and print colored, tagged output for every assertion.
//!
//! Suites group tests under an optional setup/teardown pair. At the end of a
//! run the session prints a summary and returns the number of failed tests as
//! the process exit status.
//!
//! # Example
//!
//! ```no_run
//! use minunit::{check, check_int_eq, ensure_str_eq, Outcome, Session};
//!
//! fn test_arithmetic(s: &mut Session) {
//!     check!(s, 2 + 2 == 4);
//!     check_int_eq!(s, 4, 2 * 2);
//! }
//!
//! fn test_greeting(s: &mut Session) -> Outcome {
//!     ensure_str_eq!(s, "hello", "hello");
//!     Ok(())
//! }
//!
//! let mut session = Session::new();
//! session.suite("all", |s| {
//!     s.run_test("test_arithmetic", test_arithmetic);
//!     s.run_test_verbose("test_greeting", test_greeting);
//! });
//! session.report();
//! std::process::exit(session.exit_code());
//! ```

/// minunit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod macros;

pub mod assertion;
pub mod capture;
pub mod compare;
pub mod hooks;
pub mod message;
pub mod palette;
pub mod recorder;
pub mod reporter;
pub mod session;
pub mod suite;
pub mod timer;

// Re-export commonly used types
pub use assertion::{Check, Convention, Failure, Location, Outcome, Verdict};
pub use capture::CaptureBuffer;
pub use compare::{IntOperand, NullableStr, EPSILON, NULL_POINTER};
pub use hooks::{hook, Hook, HookPair};
pub use message::FailureMessage;
pub use palette::{Palette, Tone};
pub use recorder::{Recorder, RunCounters};
pub use reporter::{exit_code, Reporter};
pub use session::Session;
pub use suite::{Suite, TestBody, TestCase};
pub use timer::{Elapsed, Timer, TimingSample};

pub use minunit_config::{ColorChoice, Config, ConfigLoader};
