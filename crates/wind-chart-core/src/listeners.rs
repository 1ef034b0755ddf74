// File: crates/wind-chart-core/src/listeners.rs
// Summary: Document-level pointer-down hub. Chart instances subscribe on mount and hold a
// Subscription guard; dropping the guard unsubscribes.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::geometry::Point;

type Handler = Rc<RefCell<dyn FnMut(Point)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Shared by every chart on a page. Single-threaded; clones share one registry.
#[derive(Clone, Default)]
pub struct PointerHub {
    registry: Rc<RefCell<Registry>>,
}

impl PointerHub {
    pub fn new() -> Self { Self::default() }

    pub fn subscribe(&self, handler: impl FnMut(Point) + 'static) -> Subscription {
        let mut reg = self.registry.borrow_mut();
        reg.next_id += 1;
        let id = reg.next_id;
        reg.handlers.push((id, Rc::new(RefCell::new(handler))));
        trace!(id, listeners = reg.handlers.len(), "pointer listener added");
        Subscription { id, registry: Rc::downgrade(&self.registry) }
    }

    /// Deliver a pointer-down at client point `at` to every live subscriber.
    /// Handlers may subscribe or unsubscribe while being called.
    pub fn dispatch_pointer_down(&self, at: Point) -> usize {
        let snapshot: Vec<(u64, Handler)> = self.registry.borrow().handlers.clone();
        let mut delivered = 0;
        for (id, handler) in snapshot {
            let live = self.registry.borrow().handlers.iter().any(|(h, _)| *h == id);
            if !live {
                continue;
            }
            // A handler that re-enters dispatch is skipped on the nested call.
            if let Ok(mut f) = handler.try_borrow_mut() {
                (*f)(at);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn len(&self) -> usize { self.registry.borrow().handlers.len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Keeps one handler registered while alive.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> u64 { self.id }

    /// False once the hub itself is gone.
    pub fn is_active(&self) -> bool {
        let Some(reg) = self.registry.upgrade() else { return false };
        let live = reg.borrow().handlers.iter().any(|(h, _)| *h == self.id);
        live
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(reg) = self.registry.upgrade() {
            let mut reg = reg.borrow_mut();
            reg.handlers.retain(|(h, _)| *h != self.id);
            trace!(id = self.id, listeners = reg.handlers.len(), "pointer listener removed");
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn guard_drop_unsubscribes() {
        let hub = PointerHub::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = hub.subscribe(move |_| h.set(h.get() + 1));
        assert_eq!(hub.dispatch_pointer_down(Point::new(1.0, 1.0)), 1);
        drop(sub);
        assert!(hub.is_empty());
        assert_eq!(hub.dispatch_pointer_down(Point::new(1.0, 1.0)), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn handler_can_drop_another_subscription_mid_dispatch() {
        let hub = PointerHub::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let v = victim.clone();
        let _killer = hub.subscribe(move |_| {
            v.borrow_mut().take();
        });
        let reached = Rc::new(Cell::new(false));
        let r = reached.clone();
        *victim.borrow_mut() = Some(hub.subscribe(move |_| r.set(true)));
        assert_eq!(hub.dispatch_pointer_down(Point::new(0.0, 0.0)), 1);
        assert!(!reached.get());
        assert_eq!(hub.len(), 1);
    }

    #[test]
    fn subscription_outliving_hub_is_inactive() {
        let hub = PointerHub::new();
        let sub = hub.subscribe(|_| {});
        assert!(sub.is_active());
        drop(hub);
        assert!(!sub.is_active());
    }
}
