//! Hook-thread event dispatch.
//!
//! Warping the cursor from inside the mouse hook can make the OS call the
//! hook again before the first callback has returned.  The handler is still
//! borrowed at that point, so [`HookDispatcher`] queues the nested event and
//! replays it through the handler as soon as the outer call finishes.  The
//! relocation echo therefore always reaches the crossing detector and clears
//! its suppression flag.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::{EventHandler, RawInputEvent, SampleDecision};

/// Single-threaded owner of the [`EventHandler`].
#[derive(Default)]
pub struct HookDispatcher {
    handler: RefCell<Option<EventHandler>>,
    deferred: RefCell<VecDeque<RawInputEvent>>,
}

impl HookDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `handler`, replacing any previous one.
    pub fn install(&self, handler: EventHandler) {
        *self.handler.borrow_mut() = Some(handler);
        self.deferred.borrow_mut().clear();
    }

    /// Drops the handler and any queued events.
    pub fn clear(&self) {
        self.handler.borrow_mut().take();
        self.deferred.borrow_mut().clear();
    }

    pub fn is_installed(&self) -> bool {
        self.handler.borrow().is_some()
    }

    /// Number of nested events waiting for replay.
    pub fn pending(&self) -> usize {
        self.deferred.borrow().len()
    }

    /// Runs the handler for `event` and returns its decision.
    ///
    /// A nested call made while the handler is running is queued and answered
    /// with [`SampleDecision::Ignore`]; the queue is drained through the
    /// handler before the outer call returns.  Decisions for replayed events
    /// are discarded because the OS has already been answered for them.
    pub fn dispatch(&self, event: RawInputEvent) -> SampleDecision {
        let Ok(mut slot) = self.handler.try_borrow_mut() else {
            self.deferred.borrow_mut().push_back(event);
            return SampleDecision::Ignore;
        };
        let Some(handler) = slot.as_mut() else {
            return SampleDecision::Ignore;
        };

        let decision = handler(event);
        loop {
            let next = self.deferred.borrow_mut().pop_front();
            match next {
                Some(nested) => {
                    handler(nested);
                }
                None => break,
            }
        }
        decision
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
