//! PDF reading and rendering module

pub mod form;
pub mod metrics;
pub mod render;
pub mod text;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used items
pub use render::{render_document, FormRenderer};
pub use text::{PageText, Rect, TextLine, TextRun};
