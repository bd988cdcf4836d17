//! Runtime orchestration: notification bus, dialog stack, focus.

pub mod context;
pub mod dialog_stack;
pub mod focus;
pub mod notify;
pub mod window_registry;

pub use context::AppContext;
pub use dialog_stack::{DialogStack, StackError};
pub use notify::{
    DispatchReport, EventConfig, EventData, Notification, NotifyBus, NotifyCallback,
    NotifyCategory, NotifyHandler, NotifyOutcome, Subscription, SubscriptionId,
};
