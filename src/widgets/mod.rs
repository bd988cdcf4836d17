//! Window payload widgets.

pub mod help_bar;
pub mod menu_list;
pub mod status_bar;

pub use help_bar::{help_line, HelpBar};
pub use menu_list::{MenuList, MenuState};
pub use status_bar::StatusBar;
