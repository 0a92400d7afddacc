//! Navigation sidebar: geometry and the component drawing it.

mod layout;
mod sidebar_component;

#[cfg(test)]
pub use layout::{COLLAPSED_WIDTH, EXPANDED_WIDTH};
pub use layout::{SidebarLayout, sidebar_width};
pub use sidebar_component::SidebarComponent;
