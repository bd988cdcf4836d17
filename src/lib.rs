//! Dialog window trees for inline TUIs.
//!
//! Invariant: a dialog's config observer is cancelled before its window tree is
//! released, so no notification ever reaches a half-destroyed dialog.
//!
//! # Public API Overview
//! - Open and close list dialogs with [`create_simple_index`] and
//!   [`destroy_simple_index`] against an [`AppContext`].
//! - Flip the `status_on_top` setting through [`ConfigStore`]; open dialogs move
//!   their status bar in place.
//! - Compose your own trees from [`WindowNode`]s and [`Component`] payloads.

pub mod config;
pub mod logging;

pub mod core;
pub mod dialog;
pub mod runtime;
pub mod widgets;

/// Settings and environment configuration.
pub use crate::config::{ConfigError, ConfigStore, ConfigValue, EnvConfig, STATUS_ON_TOP};

/// Window payload traits.
pub use crate::core::component::{Component, Focusable};

/// Window tree types.
pub use crate::core::window::{
    DialogKind, HelpBinding, HelpMapping, MenuKind, Orientation, SizePolicy, WindowError,
    WindowId, WindowKind, WindowNode, WindowRc, WindowWeak,
};

/// Dialog lifecycle.
pub use crate::dialog::{
    apply_status_on_top, arrange, create_simple_index, create_simple_index_with,
    destroy_simple_index, BridgeState, ConfigChangeBridge, DefaultWindowFactory, DialogHandle,
    WindowFactory,
};

/// Application context, notification bus and dialog stack.
pub use crate::runtime::{
    AppContext, DialogStack, DispatchReport, EventConfig, EventData, Notification, NotifyBus,
    NotifyCallback, NotifyCategory, NotifyHandler, NotifyOutcome, StackError, Subscription,
    SubscriptionId,
};
pub use crate::runtime::window_registry::WindowIds;

/// Built-in window payloads.
pub use crate::widgets::{help_line, HelpBar, MenuList, MenuState, StatusBar};

/// ANSI-aware width helpers.
pub use crate::core::text::{truncate_to_width, visible_width};
