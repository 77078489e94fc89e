//! Typed publish/subscribe registry.
//!
//! Handlers are registered per event kind and invoked synchronously, in
//! registration order, on whatever task emits the event. The handler
//! list is cloned out of the lock before invocation, so a handler may
//! re-enter the emitter (subscribe, unsubscribe, or emit) without
//! deadlocking.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Handle returned by [`Emitter::on`]; pass to [`Emitter::off`] to
/// remove the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<V> = Arc<dyn Fn(&V) + Send + Sync>;

/// A registry mapping event kind → ordered list of handlers.
pub struct Emitter<K, V> {
    next_id: AtomicU64,
    handlers: Mutex<HashMap<K, Vec<(SubscriptionId, Handler<V>)>>>,
}

impl<K: Eq + Hash + Copy, V> Emitter<K, V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handlers: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a handler for `kind`. Handlers fire in registration
    /// order.
    pub fn on(
        &self,
        kind: K,
        handler: impl Fn(&V) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id =
            SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .lock()
            .expect("emitter lock poisoned")
            .entry(kind)
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Removes a handler. Returns `true` if it was still registered.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut handlers =
            self.handlers.lock().expect("emitter lock poisoned");
        for list in handlers.values_mut() {
            if let Some(pos) = list.iter().position(|(sid, _)| *sid == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Invokes every handler registered for `kind`, synchronously.
    pub fn emit(&self, kind: K, value: &V) {
        let snapshot: Vec<Handler<V>> = {
            let handlers =
                self.handlers.lock().expect("emitter lock poisoned");
            match handlers.get(&kind) {
                Some(list) => {
                    list.iter().map(|(_, h)| Arc::clone(h)).collect()
                }
                None => return,
            }
        };
        for handler in snapshot {
            handler(value);
        }
    }
}

impl<K: Eq + Hash + Copy, V> Default for Emitter<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        A,
        B,
    }

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> Box<dyn Fn(&u32) + Send + Sync>)
    {
        let log: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let log2 = Arc::clone(&log);
        let make = move |tag: u32| -> Box<dyn Fn(&u32) + Send + Sync> {
            let log = Arc::clone(&log2);
            Box::new(move |v| log.lock().unwrap().push(tag * 100 + *v))
        };
        (log, make)
    }

    #[test]
    fn test_emit_invokes_handlers_in_registration_order() {
        let emitter: Emitter<Kind, u32> = Emitter::new();
        let (log, make) = recorder();

        emitter.on(Kind::A, make(1));
        emitter.on(Kind::A, make(2));
        emitter.emit(Kind::A, &7);

        assert_eq!(*log.lock().unwrap(), vec![107, 207]);
    }

    #[test]
    fn test_emit_only_reaches_matching_kind() {
        let emitter: Emitter<Kind, u32> = Emitter::new();
        let (log, make) = recorder();

        emitter.on(Kind::A, make(1));
        emitter.on(Kind::B, make(2));
        emitter.emit(Kind::B, &5);

        assert_eq!(*log.lock().unwrap(), vec![205]);
    }

    #[test]
    fn test_off_removes_only_the_named_handler() {
        let emitter: Emitter<Kind, u32> = Emitter::new();
        let (log, make) = recorder();

        let first = emitter.on(Kind::A, make(1));
        emitter.on(Kind::A, make(2));

        assert!(emitter.off(first));
        assert!(!emitter.off(first), "second removal is a no-op");

        emitter.emit(Kind::A, &3);
        assert_eq!(*log.lock().unwrap(), vec![203]);
    }

    #[test]
    fn test_emit_without_handlers_is_a_no_op() {
        let emitter: Emitter<Kind, u32> = Emitter::new();
        emitter.emit(Kind::A, &1);
    }

    #[test]
    fn test_handler_may_reenter_the_emitter() {
        let emitter: Arc<Emitter<Kind, u32>> = Arc::new(Emitter::new());
        let log: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));

        let inner_emitter = Arc::clone(&emitter);
        let inner_log = Arc::clone(&log);
        emitter.on(Kind::A, move |v| {
            inner_log.lock().unwrap().push(*v);
            // Subscribing from inside a handler must not deadlock.
            let log = Arc::clone(&inner_log);
            inner_emitter.on(Kind::B, move |v| log.lock().unwrap().push(*v));
        });

        emitter.emit(Kind::A, &1);
        emitter.emit(Kind::B, &2);
        assert_eq!(*log.lock().unwrap(), vec![1, 2]);
    }
}
