//! Worksheet drawing parts (`xl/drawings/drawing*.xml`).

mod part;
mod surface;

pub use surface::DrawingSurface;
