//! XLSX wiring for anchored chart objects.
//!
//! Placing a chart on a worksheet touches several package parts that must agree with each other:
//!
//! - [`ContentTypes`]: `[Content_Types].xml` must declare an override for every chart part.
//! - [`Relationships`]: the drawing part's `.rels` must point at the chart part; the generated
//!   relationship id is what the drawing XML references.
//! - [`drawings::DrawingSurface`]: the drawing part (`xl/drawings/drawingN.xml`) holds the anchor
//!   and the graphic frame carrying the relationship id and a non-visual object id.
//!
//! [`WorkbookPackage`] owns all of these registries and [`bind_chart`] wires a new chart through
//! them in one step. [`WorkbookPackage::write_into_parts`] serializes the result into a part map
//! (part name -> bytes) for the packaging layer.

mod bind;
pub mod charts;
mod content_types;
pub mod drawings;
mod package;
pub mod path;
mod relationships;
mod write;
mod xml;

pub use bind::{bind_chart, bind_chart_with, ChartBindOptions, EmbeddedObjectBinding};
pub use content_types::{
    ContentTypes, CONTENT_TYPE_CHART, CONTENT_TYPE_DRAWING, CONTENT_TYPE_RELATIONSHIPS,
    CONTENT_TYPE_XML,
};
pub use package::{ChartRef, DrawingRef, WorkbookPackage, XlsxError};
pub use relationships::{Relationship, Relationships, REL_TYPE_CHART};
