//! Action capture.
//!
//! Event handlers are declared as closures but never executed against a real
//! game. While a handler runs inside [`ActionCapture::capture`], side-effecting
//! calls such as [`crate::Mod::send_console`] are recorded as [`Action`]s and
//! replayed later by the generated program. Outside any capture context the
//! same calls become startup actions.
//!
//! The sink uses `RefCell` and is not `Sync`: declaration happens on a single
//! thread.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

/// One recorded side-effecting call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Run a server console command.
    Console { command: String },
}

impl Action {
    /// Creates a console action.
    pub fn console(command: impl Into<String>) -> Self {
        Self::Console {
            command: command.into(),
        }
    }

    /// Returns the console command, if this action carries a non-empty one.
    pub fn console_command(&self) -> Option<&str> {
        match self {
            Self::Console { command } if !command.is_empty() => Some(command.as_str()),
            Self::Console { .. } => None,
        }
    }
}

/// Actions recorded by one handler invocation, in call order.
pub type ActionList = Vec<Action>;

/// Collects console commands from an action list, skipping empty ones.
pub fn console_commands(actions: &[Action]) -> Vec<String> {
    actions
        .iter()
        .filter_map(Action::console_command)
        .map(str::to_string)
        .collect()
}

/// Stack of recording contexts plus the startup action list.
#[derive(Debug, Default)]
pub struct ActionCapture {
    stack: RefCell<Vec<ActionList>>,
    startup: RefCell<ActionList>,
}

/// Pops the context pushed by `capture` even if the procedure unwinds.
struct ContextGuard<'a> {
    capture: &'a ActionCapture,
    depth: usize,
    finished: bool,
}

impl ContextGuard<'_> {
    fn finish(mut self) -> ActionList {
        self.finished = true;
        self.capture.pop_to(self.depth)
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.capture.pop_to(self.depth);
        }
    }
}

impl ActionCapture {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self) -> ContextGuard<'_> {
        let mut stack = self.stack.borrow_mut();
        stack.push(ActionList::new());
        ContextGuard {
            capture: self,
            depth: stack.len(),
            finished: false,
        }
    }

    /// Pops contexts until the stack is one shorter than `depth` and returns
    /// the list that was at `depth`.
    fn pop_to(&self, depth: usize) -> ActionList {
        let mut stack = self.stack.borrow_mut();
        let mut recorded = ActionList::new();
        while stack.len() >= depth {
            match stack.pop() {
                Some(list) => recorded = list,
                None => break,
            }
        }
        recorded
    }

    /// Runs `procedure` once inside a fresh recording context and returns
    /// what it recorded.
    pub fn capture<F>(&self, procedure: F) -> ActionList
    where
        F: FnOnce(),
    {
        let guard = self.push();
        procedure();
        guard.finish()
    }

    /// Like [`capture`](Self::capture) for fallible procedures. The context is
    /// popped before the error is returned.
    pub fn try_capture<F, E>(&self, procedure: F) -> Result<ActionList, E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        let guard = self.push();
        let outcome = procedure();
        let recorded = guard.finish();
        outcome.map(|()| recorded)
    }

    /// Records an action in the innermost context, or as a startup action when
    /// no context is active.
    pub fn record(&self, action: Action) {
        let mut stack = self.stack.borrow_mut();
        match stack.last_mut() {
            Some(current) => current.push(action),
            None => self.startup.borrow_mut().push(action),
        }
    }

    /// Number of active recording contexts.
    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    /// Actions recorded outside any capture context.
    pub fn startup_actions(&self) -> ActionList {
        self.startup.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let sink = ActionCapture::new();
        let actions = sink.capture(|| {
            sink.record(Action::console("first"));
            sink.record(Action::console("second"));
        });

        assert_eq!(
            actions,
            vec![Action::console("first"), Action::console("second")]
        );
        assert_eq!(sink.depth(), 0);
        assert!(sink.startup_actions().is_empty());
    }

    #[test]
    fn outside_context_goes_to_startup() {
        let sink = ActionCapture::new();
        sink.record(Action::console("boot"));
        let inner = sink.capture(|| sink.record(Action::console("inner")));

        assert_eq!(sink.startup_actions(), vec![Action::console("boot")]);
        assert_eq!(inner, vec![Action::console("inner")]);
    }

    #[test]
    fn nested_contexts_are_isolated() {
        let sink = ActionCapture::new();
        let mut nested = ActionList::new();
        let outer = sink.capture(|| {
            sink.record(Action::console("outer-1"));
            nested = sink.capture(|| sink.record(Action::console("inner")));
            sink.record(Action::console("outer-2"));
        });

        assert_eq!(nested, vec![Action::console("inner")]);
        assert_eq!(
            outer,
            vec![Action::console("outer-1"), Action::console("outer-2")]
        );
    }

    #[test]
    fn failing_procedure_pops_context() {
        let sink = ActionCapture::new();
        let result: Result<ActionList, &str> = sink.try_capture(|| {
            sink.record(Action::console("lost"));
            Err("boom")
        });

        assert_eq!(result, Err("boom"));
        assert_eq!(sink.depth(), 0);
        sink.record(Action::console("after"));
        assert_eq!(sink.startup_actions(), vec![Action::console("after")]);
    }

    #[test]
    fn panicking_procedure_pops_context() {
        let sink = ActionCapture::new();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sink.capture(|| panic!("handler blew up"));
        }));

        assert!(outcome.is_err());
        assert_eq!(sink.depth(), 0);
    }

    #[test]
    fn serializes_as_tagged_record() {
        let json = serde_json::to_value(Action::console("ping")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "console", "command": "ping"}));
    }
}
