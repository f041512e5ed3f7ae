pub mod clock;
pub mod geometry;
pub mod indicator;
pub mod ipc;
pub mod layout;
mod macros;
pub mod render;
pub mod style;

pub use indicator::{IndicatorConfig, LoadingIndicator};
pub use style::Style;
