//! Outcome recorder - run counters, status flag and last failure message

use crate::message::FailureMessage;
use std::fmt;

/// Counters accumulated over a whole session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Tests that ran to completion
    pub tests_run: u32,
    /// Assertions evaluated, passing or failing
    pub assertions: u32,
    /// Tests that recorded at least one failure
    pub failures: u32,
}

impl RunCounters {
    /// Tests that completed without failure
    pub fn passed(&self) -> u32 {
        self.tests_run - self.failures
    }
}

/// Tracks counters and the failure state of the running test.
///
/// Counters only ever grow. The status flag belongs to the current test and is
/// cleared by [`Recorder::begin_test`].
#[derive(Debug)]
pub struct Recorder {
    counters: RunCounters,
    last_message: FailureMessage,
    status_failed: bool,
}

impl Recorder {
    pub fn new(message_capacity: usize) -> Self {
        Self {
            counters: RunCounters::default(),
            last_message: FailureMessage::new(message_capacity),
            status_failed: false,
        }
    }

    /// Swap in an empty message buffer of a new capacity; counters are kept
    pub fn set_message_capacity(&mut self, capacity: usize) {
        self.last_message = FailureMessage::new(capacity);
    }

    /// Count one evaluated assertion
    pub fn record_assertion(&mut self) {
        self.counters.assertions += 1;
    }

    /// Store a failure description and mark the current test as failed
    pub fn record_failure(&mut self, message: fmt::Arguments<'_>) {
        self.last_message.set(message);
        self.status_failed = true;
    }

    /// Clear the status flag on entry to a test body
    pub fn begin_test(&mut self) {
        self.status_failed = false;
    }

    /// Count a finished test, and its failure at most once
    pub fn record_test_completion(&mut self, failed: bool) {
        self.counters.tests_run += 1;
        if failed {
            self.counters.failures += 1;
        }
    }

    /// Whether the current test has recorded a failure
    pub fn status_failed(&self) -> bool {
        self.status_failed
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    pub fn last_message(&self) -> &str {
        self.last_message.as_str()
    }
}
