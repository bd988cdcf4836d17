//! Environment configuration and the live settings store.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::env;
use std::rc::Rc;

use thiserror::Error;

use crate::runtime::notify::{NotifyBus, Notification};

/// Boolean setting placing the status bar above a dialog's list.
pub const STATUS_ON_TOP: &str = "status_on_top";

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub status_on_top: bool,
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            status_on_top: env_flag("TAPE_STATUS_ON_TOP"),
            log_filter: env_string_opt("TAPE_DIALOG_LOG"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Str(String),
}

impl ConfigValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Str(_) => "string",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown config setting '{name}'")]
    UnknownSetting { name: String },

    #[error("config setting '{name}' is a {found}, not a {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Named settings shared by every clone of the store.
///
/// Settings must be registered before they can be written. A write that changes
/// a value publishes a config-changed notification on the bus after the new value
/// is stored, so observers read the updated value.
#[derive(Clone)]
pub struct ConfigStore {
    values: Rc<RefCell<BTreeMap<String, ConfigValue>>>,
    bus: NotifyBus,
}

impl ConfigStore {
    pub fn new(bus: NotifyBus) -> Self {
        Self {
            values: Rc::new(RefCell::new(BTreeMap::new())),
            bus,
        }
    }

    /// Store with the display settings registered, seeded from the environment.
    pub fn with_defaults(bus: NotifyBus, env: &EnvConfig) -> Self {
        let store = Self::new(bus);
        store.register(STATUS_ON_TOP, ConfigValue::Bool(env.status_on_top));
        store
    }

    /// Add a setting (or reset its value) without notifying observers.
    pub fn register(&self, name: impl Into<String>, value: ConfigValue) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<ConfigValue> {
        self.values.borrow().get(name).cloned()
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, ConfigError> {
        match self.lookup(name)? {
            ConfigValue::Bool(value) => Ok(value),
            other => Err(mismatch(name, "boolean", &other)),
        }
    }

    pub fn get_str(&self, name: &str) -> Result<String, ConfigError> {
        match self.lookup(name)? {
            ConfigValue::Str(value) => Ok(value),
            other => Err(mismatch(name, "string", &other)),
        }
    }

    /// Returns whether the value changed (and observers were notified).
    pub fn set_bool(&self, name: &str, value: bool) -> Result<bool, ConfigError> {
        self.set(name, ConfigValue::Bool(value))
    }

    pub fn set_str(&self, name: &str, value: impl Into<String>) -> Result<bool, ConfigError> {
        self.set(name, ConfigValue::Str(value.into()))
    }

    pub fn toggle_bool(&self, name: &str) -> Result<bool, ConfigError> {
        let next = !self.get_bool(name)?;
        self.set_bool(name, next)?;
        Ok(next)
    }

    fn lookup(&self, name: &str) -> Result<ConfigValue, ConfigError> {
        self.get(name).ok_or_else(|| ConfigError::UnknownSetting {
            name: name.to_string(),
        })
    }

    fn set(&self, name: &str, value: ConfigValue) -> Result<bool, ConfigError> {
        {
            let mut values = self.values.borrow_mut();
            let current = values
                .get_mut(name)
                .ok_or_else(|| ConfigError::UnknownSetting {
                    name: name.to_string(),
                })?;
            if current.type_name() != value.type_name() {
                return Err(mismatch(name, value.type_name(), current));
            }
            if *current == value {
                return Ok(false);
            }
            *current = value;
        }

        tracing::debug!(setting = name, "config changed");
        self.bus.dispatch(&Notification::config_changed(name));
        Ok(true)
    }
}

fn mismatch(name: &str, expected: &'static str, found: &ConfigValue) -> ConfigError {
    ConfigError::TypeMismatch {
        name: name.to_string(),
        expected,
        found: found.type_name(),
    }
}
