//! Core interfaces and types.

pub mod component;
pub mod text;
pub mod window;
