//! `formula-drawing-model` defines the in-memory structures for floating objects placed on a
//! worksheet grid.
//!
//! The crate is intentionally free of any OPC/XML concerns so it can be shared by:
//! - the `.xlsx` drawing writer/reader (`formula-drawing-xlsx`)
//! - IPC boundaries via `serde` (JSON-safe schema)

/// Chart payload model (chart space presentation properties).
pub mod charts;
mod color;
/// Drawing primitives (cell markers, anchors, graphic frames).
pub mod drawings;
mod error;

pub use color::Color;
pub use error::DrawingError;
