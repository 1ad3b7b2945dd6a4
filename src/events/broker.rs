//! Per-annotator publish/subscribe hub
//!
//! Handlers receive the firing context as an explicit `&mut C` argument
//! instead of capturing it, so the owner of the broker can hand itself to its
//! own handlers without aliasing.
//!
//! Dispatch is synchronous and in registration order. A firing pass works on
//! a snapshot of the handler list taken when it starts: handlers registered
//! while a pass is running are kept, but only run on later passes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::types::{Event, EventType};

/// A registered handler
pub type Handler<C> = Rc<RefCell<dyn FnMut(&mut C, &Event)>>;

pub struct EventBroker<C> {
    handlers: HashMap<EventType, Vec<Handler<C>>>,
}

impl<C> EventBroker<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for `event_type`. There is no unregistration.
    pub fn add_handler<F>(&mut self, event_type: EventType, handler: F)
    where
        F: FnMut(&mut C, &Event) + 'static,
    {
        let handler: Handler<C> = Rc::new(RefCell::new(handler));
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Handlers for `event_type` in registration order, detached from the
    /// broker so they can be run while the broker's owner is borrowed mutably
    pub fn snapshot(&self, event_type: EventType) -> Vec<Handler<C>> {
        self.handlers
            .get(&event_type)
            .map(|handlers| handlers.to_vec())
            .unwrap_or_default()
    }

    /// Run every handler registered for the event's type against `context`.
    /// Firing a type with no handlers is a no-op.
    pub fn fire_event(&self, context: &mut C, event: &Event) {
        dispatch(&self.snapshot(event.event_type()), context, event);
    }
}

impl<C> Default for EventBroker<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a handler snapshot in order.
///
/// A handler that is already running further up the stack (an event fired
/// from inside its own handler) is skipped rather than re-entered.
pub fn dispatch<C>(handlers: &[Handler<C>], context: &mut C, event: &Event) {
    for handler in handlers {
        match handler.try_borrow_mut() {
            Ok(mut handler) => (&mut *handler)(context, event),
            Err(_) => log::warn!(
                "skipping re-entrant {} handler",
                event.event_type()
            ),
        }
    }
}
