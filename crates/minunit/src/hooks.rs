//! Setup/teardown hook registry

use std::fmt;

/// A zero-argument setup or teardown procedure
pub type Hook = Box<dyn FnMut()>;

/// Wrap a function or closure as a configured hook slot
///
/// ```
/// use minunit::{hook, Session};
///
/// fn setup() {}
///
/// let mut session = Session::new();
/// session.configure(hook(setup), None);
/// assert!(session.hooks().has_setup());
/// ```
pub fn hook<F>(f: F) -> Option<Hook>
where
    F: FnMut() + 'static,
{
    Some(Box::new(f))
}

/// The setup/teardown pair active for the current suite
#[derive(Default)]
pub struct HookPair {
    setup: Option<Hook>,
    teardown: Option<Hook>,
}

impl HookPair {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both slots; either may be `None`
    pub fn configure(&mut self, setup: Option<Hook>, teardown: Option<Hook>) {
        self.setup = setup;
        self.teardown = teardown;
    }

    /// Clear both slots
    pub fn reset(&mut self) {
        self.setup = None;
        self.teardown = None;
    }

    pub fn has_setup(&self) -> bool {
        self.setup.is_some()
    }

    pub fn has_teardown(&self) -> bool {
        self.teardown.is_some()
    }

    /// True when neither slot is configured
    pub fn is_empty(&self) -> bool {
        self.setup.is_none() && self.teardown.is_none()
    }

    /// Invoke the setup hook, if any
    pub fn setup(&mut self) {
        if let Some(setup) = self.setup.as_mut() {
            setup();
        }
    }

    /// Invoke the teardown hook, if any
    pub fn teardown(&mut self) {
        if let Some(teardown) = self.teardown.as_mut() {
            teardown();
        }
    }

    /// Run `body` between setup and teardown.
    ///
    /// Teardown runs once the body returns, whatever the body produced.
    pub fn run_with_hooks<R>(&mut self, body: impl FnOnce() -> R) -> R {
        self.setup();
        let result = body();
        self.teardown();
        result
    }
}

impl fmt::Debug for HookPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookPair")
            .field("setup", &self.has_setup())
            .field("teardown", &self.has_teardown())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tracing_hook(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> Option<Hook> {
        let log = Rc::clone(log);
        hook(move || log.borrow_mut().push(label))
    }

    #[test]
    fn test_run_with_hooks_orders_calls() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = HookPair::new();
        hooks.configure(tracing_hook(&log, "setup"), tracing_hook(&log, "teardown"));

        let body_log = Rc::clone(&log);
        let value = hooks.run_with_hooks(|| {
            body_log.borrow_mut().push("body");
            7
        });

        assert_eq!(value, 7);
        assert_eq!(*log.borrow(), vec!["setup", "body", "teardown"]);
    }

    #[test]
    fn test_teardown_runs_for_failed_body() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = HookPair::new();
        hooks.configure(None, tracing_hook(&log, "teardown"));

        let result: Result<(), &str> = hooks.run_with_hooks(|| Err("failed"));

        assert!(result.is_err());
        assert_eq!(*log.borrow(), vec!["teardown"]);
    }

    #[test]
    fn test_reset_clears_both_slots() {
        let mut hooks = HookPair::new();
        hooks.configure(hook(|| {}), hook(|| {}));
        assert!(hooks.has_setup() && hooks.has_teardown());

        hooks.reset();
        assert!(hooks.is_empty());
    }

    #[test]
    fn test_configure_replaces_slots() {
        let mut hooks = HookPair::new();
        hooks.configure(hook(|| {}), hook(|| {}));
        hooks.configure(None, hook(|| {}));

        assert!(!hooks.has_setup());
        assert!(hooks.has_teardown());
    }
}
