//! Built-in widgets.

pub mod composite;
pub mod label;
pub mod panel;
pub mod viewport;

pub use composite::Composite;
pub use label::Label;
pub use panel::Panel;
pub use viewport::Viewport;
