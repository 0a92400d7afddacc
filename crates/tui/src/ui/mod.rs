//! UI layer: components, theme, runtime.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
