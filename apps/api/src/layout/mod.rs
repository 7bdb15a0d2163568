// Layout policy: physical units, colors and the immutable style configuration
// the builder reads. Nothing here touches the document model directly.

pub mod color;
pub mod style;
pub mod units;

// Re-export the public API consumed by other modules (builder, state).
pub use color::HexColor;
pub use style::StyleConfig;
pub use units::Length;
