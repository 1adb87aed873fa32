pub mod components;
mod layout;
pub mod render;
pub mod screens;
mod theme;

pub use layout::Layout;
pub use theme::Theme;
