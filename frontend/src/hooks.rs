use crate::storage::{ChangeNotifier, InteractionStore, WatchHistory};
use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

/// Shared "subscriptions changed" notifier, provided once by the app root.
#[derive(Clone)]
pub struct InteractionContext {
    pub notifier: Rc<ChangeNotifier>,
}

impl InteractionContext {
    pub fn new() -> Self {
        Self {
            notifier: ChangeNotifier::new(),
        }
    }
}

impl Default for InteractionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for InteractionContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.notifier, &other.notifier)
    }
}

fn context_notifier(context: Option<InteractionContext>) -> Rc<ChangeNotifier> {
    match context {
        Some(context) => context.notifier,
        None => {
            log::warn!("No InteractionContext provided, subscription changes stay local");
            ChangeNotifier::new()
        }
    }
}

#[hook]
pub fn use_interactions() -> Rc<InteractionStore> {
    let context = use_context::<InteractionContext>();
    Rc::new(InteractionStore::browser(context_notifier(context)))
}

#[hook]
pub fn use_watch_history() -> Rc<WatchHistory> {
    Rc::new(WatchHistory::browser())
}

#[derive(Default, PartialEq)]
struct Revision(u32);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(Revision(self.0.wrapping_add(1)))
    }
}

/// A counter bumped on every subscription change, in this tab or another.
/// Use it as an effect dependency to re-read the subscribed set.
#[hook]
pub fn use_subscription_revision() -> u32 {
    let revision = use_reducer(Revision::default);
    let context = use_context::<InteractionContext>();
    {
        let dispatcher = revision.dispatcher();
        use_effect_with(context, move |context| {
            let subscription = context
                .as_ref()
                .map(|context| context.notifier.subscribe(move || dispatcher.dispatch(())));
            move || drop(subscription)
        });
    }
    revision.0
}

/// Hands out tickets for async requests. Only the latest ticket is current,
/// and none is once the owning component unmounted.
#[derive(Clone, Default)]
pub struct RequestGuard {
    generation: Rc<Cell<u64>>,
}

pub struct RequestTicket {
    generation: Rc<Cell<u64>>,
    issued: u64,
}

impl RequestGuard {
    pub fn begin(&self) -> RequestTicket {
        let issued = self.generation.get() + 1;
        self.generation.set(issued);
        RequestTicket {
            generation: self.generation.clone(),
            issued,
        }
    }

    pub fn cancel_all(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        self.generation.get() == self.issued
    }
}

#[hook]
pub fn use_request_guard() -> RequestGuard {
    let guard = use_state(RequestGuard::default);
    {
        let guard = (*guard).clone();
        use_effect_with((), move |_| move || guard.cancel_all());
    }
    (*guard).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older_one() {
        let guard = RequestGuard::default();
        let first = guard.begin();
        assert!(first.is_current());

        let second = guard.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn unmount_invalidates_pending_requests() {
        let guard = RequestGuard::default();
        let pending = guard.begin();
        guard.clone().cancel_all();
        assert!(!pending.is_current());
    }

    #[test]
    fn contexts_compare_by_notifier() {
        let context = InteractionContext::new();
        assert!(context == context.clone());
        assert!(context != InteractionContext::new());
    }
}
