//! Mock input hook for unit testing.
//!
//! Allows tests to inject synthetic [`RawInputEvent`]s without a running
//! Windows message loop or OS hooks.

use super::{CaptureError, EventHandler, InputHook, RawInputEvent, SampleDecision};

/// A mock implementation of [`InputHook`] that calls the handler inline.
#[derive(Default)]
pub struct MockInputHook {
    handler: Option<EventHandler>,
    decisions: Vec<(RawInputEvent, SampleDecision)>,
}

impl MockInputHook {
    /// Creates a new, stopped mock hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` as if captured from hardware and returns the
    /// handler's decision.
    ///
    /// Panics if `start()` has not been called or `stop()` has been called.
    pub fn inject(&mut self, event: RawInputEvent) -> SampleDecision {
        let handler = self
            .handler
            .as_mut()
            .expect("MockInputHook::inject called before start()");
        let decision = handler(event);
        self.decisions.push((event, decision));
        decision
    }

    /// Every injected event with the decision the handler returned.
    pub fn decisions(&self) -> &[(RawInputEvent, SampleDecision)] {
        &self.decisions
    }

    /// Number of injected events the handler asked to swallow.
    pub fn consumed_count(&self) -> usize {
        self.decisions
            .iter()
            .filter(|(_, d)| *d == SampleDecision::Consume)
            .count()
    }

    pub fn is_running(&self) -> bool {
        self.handler.is_some()
    }
}

impl InputHook for MockInputHook {
    fn start(&mut self, handler: EventHandler) -> Result<(), CaptureError> {
        if self.handler.is_some() {
            return Err(CaptureError::AlreadyRunning);
        }
        self.handler = Some(handler);
        Ok(())
    }

    fn stop(&mut self) {
        self.handler = None;
    }
}
