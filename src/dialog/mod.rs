//! Dialog construction, live layout and teardown.

pub mod bridge;
pub mod layout;
pub mod simple;

pub use bridge::{BridgeState, ConfigChangeBridge};
pub use layout::{apply_status_on_top, arrange};
pub use simple::{
    create_simple_index, create_simple_index_with, destroy_simple_index, DefaultWindowFactory,
    DialogHandle, WindowFactory,
};
