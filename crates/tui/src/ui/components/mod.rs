//! UI components: sidebar and content pane.

pub mod component;
pub mod content;
pub mod sidebar;

pub use component::*;
pub use content::ContentComponent;
pub use sidebar::SidebarComponent;
