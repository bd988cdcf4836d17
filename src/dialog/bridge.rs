//! Keeps a dialog's status bar placement in step with `status_on_top`.

use std::rc::{Rc, Weak};

use crate::config::{ConfigStore, STATUS_ON_TOP};
use crate::core::window::{WindowRc, WindowWeak};
use crate::dialog::layout::apply_status_on_top;
use crate::runtime::notify::{
    EventData, NotifyBus, NotifyCallback, NotifyCategory, NotifyOutcome, Subscription,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Inactive,
    Active,
}

/// Config observer bound to one dialog root.
///
/// Holds only a weak reference to the dialog. The observer registration lives
/// exactly as long as the bridge is active; dropping the bridge deactivates it.
pub struct ConfigChangeBridge {
    dialog: WindowWeak,
    config: ConfigStore,
    subscription: Option<Subscription>,
}

impl ConfigChangeBridge {
    pub fn new(dialog: &WindowRc, config: ConfigStore) -> Self {
        Self {
            dialog: Rc::downgrade(dialog),
            config,
            subscription: None,
        }
    }

    /// Register with `bus`. Already-active bridges keep their registration.
    pub fn activate(&mut self, bus: &NotifyBus) {
        if self.subscription.is_some() {
            return;
        }
        let Some(dialog) = self.dialog.upgrade() else {
            tracing::warn!("not activating bridge for a released dialog");
            return;
        };

        let config = self.config.clone();
        let subscription = bus.subscribe(
            NotifyCategory::Config,
            Box::new(move |cb| Self::on_notify(&config, cb)),
            Some(&dialog),
        );
        tracing::debug!(
            dialog = %dialog.borrow().id(),
            subscription = %subscription.id(),
            "config bridge active"
        );
        self.subscription = Some(subscription);
    }

    /// Cancel the registration. Repeated calls are no-ops.
    pub fn deactivate(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
            tracing::debug!(subscription = %subscription.id(), "config bridge inactive");
        }
    }

    pub fn state(&self) -> BridgeState {
        match self.subscription {
            Some(_) => BridgeState::Active,
            None => BridgeState::Inactive,
        }
    }

    pub fn dialog(&self) -> Option<WindowRc> {
        Weak::upgrade(&self.dialog)
    }

    /// React to one delivery on behalf of the dialog in `cb.context`.
    pub fn on_notify(config: &ConfigStore, cb: &NotifyCallback<'_>) -> NotifyOutcome {
        let (Some(data), Some(dialog)) = (cb.data, cb.context.as_ref()) else {
            return NotifyOutcome::Rejected;
        };
        if cb.category != NotifyCategory::Config {
            return NotifyOutcome::Ignored;
        }
        let EventData::Config(event) = data else {
            return NotifyOutcome::Ignored;
        };
        if event.name != STATUS_ON_TOP {
            return NotifyOutcome::Ignored;
        }

        match place_status_bar(config, dialog) {
            Some(_) => NotifyOutcome::Handled,
            None => NotifyOutcome::Rejected,
        }
    }

    /// Re-apply the current `status_on_top` value to the dialog.
    ///
    /// Catches up on a change that arrived while the dialog was borrowed. Returns
    /// whether the order changed.
    pub fn sync(&self) -> bool {
        self.dialog
            .upgrade()
            .and_then(|dialog| place_status_bar(&self.config, &dialog))
            .unwrap_or(false)
    }
}

/// `None` when the dialog is borrowed elsewhere and could not be rearranged.
fn place_status_bar(config: &ConfigStore, dialog: &WindowRc) -> Option<bool> {
    let status_on_top = config.get_bool(STATUS_ON_TOP).unwrap_or_else(|err| {
        tracing::warn!(%err, "treating status_on_top as unset");
        false
    });
    let Ok(mut dialog) = dialog.try_borrow_mut() else {
        tracing::warn!(status_on_top, "dialog busy, status bar placement deferred");
        return None;
    };
    let moved = apply_status_on_top(&mut dialog, status_on_top);
    tracing::debug!(dialog = %dialog.id(), status_on_top, moved, "status bar placement");
    Some(moved)
}

impl Drop for ConfigChangeBridge {
    fn drop(&mut self) {
        self.deactivate();
    }
}
