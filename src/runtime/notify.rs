//! Application notification bus.
//!
//! Observers register for one [`NotifyCategory`] and receive every event of that
//! category synchronously from [`NotifyBus::dispatch`]. Registrations are owned by
//! [`Subscription`] guards; dropping or cancelling the guard removes the observer.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::core::window::{WindowId, WindowRc, WindowWeak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyCategory {
    /// Receives every event.
    All,
    /// A configuration setting changed.
    Config,
    /// A window was created, reflowed or destroyed.
    Window,
}

impl NotifyCategory {
    fn accepts(self, category: NotifyCategory) -> bool {
        self == NotifyCategory::All || self == category
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventConfig {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventData {
    Config(EventConfig),
    Window { id: WindowId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub category: NotifyCategory,
    pub data: Option<EventData>,
}

impl Notification {
    pub fn config_changed(name: impl Into<String>) -> Self {
        Self {
            category: NotifyCategory::Config,
            data: Some(EventData::Config(EventConfig { name: name.into() })),
        }
    }
}

/// What an observer saw in one delivery.
pub struct NotifyCallback<'a> {
    pub category: NotifyCategory,
    pub data: Option<&'a EventData>,
    /// The context window given at subscribe time, if it is still alive.
    pub context: Option<WindowRc>,
}

/// Result of one observer invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Not relevant to this observer.
    Ignored,
    /// Malformed delivery (missing payload or context), or a context window that
    /// was busy and could not be updated.
    Rejected,
    /// The observer acted on the event.
    Handled,
}

pub type NotifyHandler = Box<dyn FnMut(&NotifyCallback<'_>) -> NotifyOutcome>;

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

#[derive(Default)]
struct BusState {
    entries: Vec<ObserverEntry>,
    next_id: u64,
}

struct ObserverEntry {
    id: SubscriptionId,
    category: NotifyCategory,
    handler: Rc<RefCell<NotifyHandler>>,
    context: Option<WindowWeak>,
}

/// Per-dispatch record of what each observer returned, in delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub outcomes: Vec<(SubscriptionId, NotifyOutcome)>,
}

impl DispatchReport {
    pub fn count(&self, outcome: NotifyOutcome) -> usize {
        self.outcomes.iter().filter(|(_, seen)| *seen == outcome).count()
    }

    pub fn delivered(&self) -> usize {
        self.outcomes.len()
    }
}

/// Cheaply clonable handle to one shared bus.
#[derive(Clone, Default)]
pub struct NotifyBus {
    state: Rc<RefCell<BusState>>,
}

impl NotifyBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        category: NotifyCategory,
        handler: NotifyHandler,
        context: Option<&WindowRc>,
    ) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id = state.next_id.wrapping_add(1);
        state.entries.push(ObserverEntry {
            id,
            category,
            handler: Rc::new(RefCell::new(handler)),
            context: context.map(Rc::downgrade),
        });
        tracing::trace!(subscription = %id, ?category, "observer added");
        Subscription {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_registered(&self, id: SubscriptionId) -> bool {
        self.state.borrow().entries.iter().any(|entry| entry.id == id)
    }

    /// Deliver `event` to every matching observer, in registration order.
    ///
    /// The bus is not borrowed while handlers run, so handlers may subscribe or
    /// cancel. An observer cancelled mid-dispatch is not called afterwards; an
    /// observer added mid-dispatch first sees the next event.
    pub fn dispatch(&self, event: &Notification) -> DispatchReport {
        let targets: Vec<(SubscriptionId, Rc<RefCell<NotifyHandler>>, Option<WindowWeak>)> = {
            let state = self.state.borrow();
            state
                .entries
                .iter()
                .filter(|entry| entry.category.accepts(event.category))
                .map(|entry| (entry.id, Rc::clone(&entry.handler), entry.context.clone()))
                .collect()
        };

        let mut report = DispatchReport::default();
        for (id, handler, context) in targets {
            if !self.is_registered(id) {
                continue;
            }
            let Ok(mut handler) = handler.try_borrow_mut() else {
                tracing::warn!(subscription = %id, "skipping re-entrant delivery");
                continue;
            };
            let callback = NotifyCallback {
                category: event.category,
                data: event.data.as_ref(),
                context: context.as_ref().and_then(Weak::upgrade),
            };
            let outcome = (&mut *handler)(&callback);
            report.outcomes.push((id, outcome));
        }
        report
    }

    fn remove(state: &Weak<RefCell<BusState>>, id: SubscriptionId) -> bool {
        let Some(state) = state.upgrade() else {
            return false;
        };
        // Dropped after the borrow ends: the handler may own other subscriptions.
        let removed = {
            let mut state = state.borrow_mut();
            let index = state.entries.iter().position(|entry| entry.id == id);
            index.map(|index| state.entries.remove(index))
        };
        removed.is_some()
    }
}

/// Scoped observer registration. Cancelled on drop.
pub struct Subscription {
    id: SubscriptionId,
    state: Weak<RefCell<BusState>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        let state = state.borrow();
        state.entries.iter().any(|entry| entry.id == self.id)
    }

    /// Remove the observer. Repeated calls are no-ops.
    pub fn cancel(&mut self) {
        if NotifyBus::remove(&self.state, self.id) {
            tracing::trace!(subscription = %self.id, "observer removed");
        }
        self.state = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
