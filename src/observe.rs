//! Typed geometry-change subscriptions.
//!
//! Hosts subscribe to resolved-geometry changes and contained layout faults.
//! The registry lives outside the document lock's `RefCell`, so a callback
//! may re-enter the `Interface` (including subscribing again) without
//! tripping a borrow.

use std::sync::Arc;

use crate::error::LayoutFault;
use crate::geometry::Region;
use crate::tree::WidgetId;

/// A resolved-geometry notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryEvent {
    /// A widget's slot changed during a layout drain.
    SlotChanged {
        widget: WidgetId,
        old: Region,
        new: Region,
    },
    /// An axis failed to converge and was pinned.
    Fault(LayoutFault),
}

/// Handle for removing a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn(&GeometryEvent) + Send + Sync>;

/// Registry of geometry observers.
#[derive(Default)]
pub struct Subscribers {
    next: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every future [`GeometryEvent`].
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&GeometryEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push((id, Arc::new(callback)));
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        before != self.entries.len()
    }

    /// Clone out the current callbacks so they can be invoked without
    /// holding the registry lock.
    pub fn snapshot(&self) -> Vec<Callback> {
        self.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no one is listening.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn subscribe_and_notify() {
        let mut subs = Subscribers::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits2 = Arc::clone(&hits);
        subs.subscribe(move |_| {
            hits2.fetch_add(1, Ordering::SeqCst);
        });

        let event = GeometryEvent::SlotChanged {
            widget: WidgetId::default(),
            old: Region::EMPTY,
            new: Region::new(0, 0, 10, 10),
        };
        for cb in subs.snapshot() {
            cb(&event);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut subs = Subscribers::new();
        let id = subs.subscribe(|_| {});
        assert_eq!(subs.len(), 1);
        assert!(subs.unsubscribe(id));
        assert!(subs.is_empty());
        assert!(!subs.unsubscribe(id));
    }

    #[test]
    fn ids_are_unique() {
        let mut subs = Subscribers::new();
        let a = subs.subscribe(|_| {});
        let b = subs.subscribe(|_| {});
        assert_ne!(a, b);
    }
}
