//! Named-event listener registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::event::ClientEvent;

/// Event name for normalized incoming messages.
pub const EVENT_MESSAGE: &str = "message";
/// Event name fired once the platform connection is up.
pub const EVENT_ONLINE: &str = "system.online";

pub type Listener = Arc<dyn Fn(&ClientEvent) + Send + Sync>;

/// Maps event names to listeners kept in registration order.
#[derive(Clone, Default)]
pub struct EventEmitter {
    listeners: Arc<RwLock<HashMap<String, Vec<Listener>>>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` to the list for `event`.
    pub fn on<F>(&self, event: &str, listener: F)
    where
        F: Fn(&ClientEvent) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .entry(event.to_string())
            .or_default()
            .push(Arc::new(listener));
    }

    /// Calls every listener of `event` synchronously, in registration order. Returns how many ran.
    pub fn emit(&self, event: &str, payload: &ClientEvent) -> usize {
        // Snapshot so a listener may register further listeners without deadlocking.
        let listeners = self
            .listeners
            .read()
            .get(event)
            .cloned()
            .unwrap_or_default();
        for listener in &listeners {
            listener(payload);
        }
        listeners.len()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.read().get(event).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<String, usize> = self
            .listeners
            .read()
            .iter()
            .map(|(name, list)| (name.clone(), list.len()))
            .collect();
        f.debug_struct("EventEmitter")
            .field("listeners", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_emit_runs_listeners_in_registration_order() {
        let emitter = EventEmitter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let seen = seen.clone();
            emitter.on(EVENT_ONLINE, move |_| seen.lock().push(i));
        }

        assert_eq!(emitter.emit(EVENT_ONLINE, &ClientEvent::Online), 3);
        assert_eq!(*seen.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_emit_without_listeners() {
        let emitter = EventEmitter::new();
        assert_eq!(emitter.emit(EVENT_MESSAGE, &ClientEvent::Online), 0);
        assert_eq!(emitter.listener_count(EVENT_MESSAGE), 0);
    }

    #[test]
    fn test_events_are_isolated_by_name() {
        let emitter = EventEmitter::new();
        emitter.on(EVENT_MESSAGE, |_| {});
        assert_eq!(emitter.listener_count(EVENT_MESSAGE), 1);
        assert_eq!(emitter.emit(EVENT_ONLINE, &ClientEvent::Online), 0);
    }

    #[test]
    fn test_listener_can_register_during_emit() {
        let emitter = EventEmitter::new();
        let inner = emitter.clone();
        emitter.on(EVENT_ONLINE, move |_| inner.on(EVENT_MESSAGE, |_| {}));

        emitter.emit(EVENT_ONLINE, &ClientEvent::Online);
        assert_eq!(emitter.listener_count(EVENT_MESSAGE), 1);
    }
}
