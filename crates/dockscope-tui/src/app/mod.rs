mod action;
mod state;
pub mod viewport;

pub use action::Action;
pub use state::AppState;
pub use viewport::ViewportState;
