//! Application context shared by dialog construction and teardown.

use crate::config::{ConfigStore, EnvConfig};
use crate::runtime::dialog_stack::DialogStack;
use crate::runtime::focus::FocusState;
use crate::runtime::notify::NotifyBus;
use crate::runtime::window_registry::WindowIds;

/// Everything a dialog needs from the surrounding application: one bus, one
/// settings store publishing on that bus, the open-dialog stack, focus, and the
/// window id allocator.
pub struct AppContext {
    pub(crate) bus: NotifyBus,
    pub(crate) config: ConfigStore,
    pub(crate) dialogs: DialogStack,
    pub(crate) focus: FocusState,
    pub(crate) ids: WindowIds,
}

impl AppContext {
    pub fn new(env: &EnvConfig) -> Self {
        let bus = NotifyBus::new();
        let config = ConfigStore::with_defaults(bus.clone(), env);
        Self {
            bus,
            config,
            dialogs: DialogStack::new(),
            focus: FocusState::new(),
            ids: WindowIds::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&EnvConfig::from_env())
    }

    pub fn bus(&self) -> &NotifyBus {
        &self.bus
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Read-only view; only dialog construction and teardown mutate the stack.
    pub fn dialogs(&self) -> &DialogStack {
        &self.dialogs
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn window_ids(&mut self) -> &mut WindowIds {
        &mut self.ids
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(&EnvConfig::default())
    }
}
