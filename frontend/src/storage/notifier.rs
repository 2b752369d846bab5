use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn()>;

/// Observer registry for "the stored subscription set changed".
///
/// Same-tab writes call [`ChangeNotifier::notify`] directly; the app also
/// forwards the browser's cross-tab `storage` event to it.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_id: Cell<usize>,
}

/// Keeps a listener registered; dropping it unregisters the listener.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct ChangeSubscription {
    notifier: Weak<ChangeNotifier>,
    id: usize,
}

impl ChangeNotifier {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn subscribe(self: &Rc<Self>, listener: impl Fn() + 'static) -> ChangeSubscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        ChangeSubscription {
            notifier: Rc::downgrade(self),
            id,
        }
    }

    pub fn notify(&self) {
        // Snapshot so listeners may (un)subscribe while being notified
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        log::debug!("Notifying {} subscription listener(s)", listeners.len());
        for listener in listeners {
            listener();
        }
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        if let Some(notifier) = self.notifier.upgrade() {
            notifier
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_live_listeners_only() {
        let notifier = ChangeNotifier::new();
        let hits = Rc::new(Cell::new(0));

        let first = {
            let hits = hits.clone();
            notifier.subscribe(move || hits.set(hits.get() + 1))
        };
        let second = {
            let hits = hits.clone();
            notifier.subscribe(move || hits.set(hits.get() + 10))
        };

        notifier.notify();
        assert_eq!(hits.get(), 11);

        drop(first);
        notifier.notify();
        assert_eq!(hits.get(), 21);
        assert_eq!(notifier.listener_count(), 1);

        drop(second);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_notifier_is_harmless() {
        let notifier = ChangeNotifier::new();
        let subscription = notifier.subscribe(|| {});
        drop(notifier);
        drop(subscription);
    }
}
