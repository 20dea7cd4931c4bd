use std::sync::atomic::{AtomicU64, Ordering};

use formula_drawing_model::charts::ChartSpace;
use formula_drawing_model::DrawingError;
use serde::Serialize;
use thiserror::Error;

use crate::content_types::{ContentTypes, CONTENT_TYPE_DRAWING};
use crate::drawings::DrawingSurface;
use crate::path::{absolute_part_name, DocType, PartKind};
use crate::relationships::Relationships;
use crate::{bind, EmbeddedObjectBinding};

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("drawing {0:?} is not registered with this package")]
    SurfaceNotRegistered(DrawingRef),
    #[error("duplicate relationship id: {0}")]
    DuplicateRelationshipId(String),
    #[error("relationship id space exhausted")]
    RelationshipIdOverflow,
    #[error("invalid part name: {0:?}")]
    InvalidPartName(String),
    #[error("{kind:?} parts are not defined for {doc_type:?} packages")]
    UnsupportedPart { doc_type: DocType, kind: PartKind },
    #[error(transparent)]
    Drawing(#[from] DrawingError),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("xml error: {0}")]
    RoXml(#[from] roxmltree::Error),
    #[error("xml attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("invalid xlsx: {0}")]
    Invalid(String),
}

static NEXT_PACKAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable handle to a drawing registered with a [`WorkbookPackage`].
///
/// Handles are only valid for the package that issued them; two structurally identical drawings
/// still get distinct handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawingRef {
    package: u64,
    index: usize,
}

impl DrawingRef {
    /// 1-based sequence number of the drawing part (`xl/drawings/drawing{n}.xml`).
    pub fn sequence_number(self) -> usize {
        self.index + 1
    }
}

/// Handle to a chart payload owned by a [`WorkbookPackage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChartRef(pub(crate) usize);

impl ChartRef {
    /// 1-based sequence number of the chart part (`xl/charts/chart{n}.xml`).
    pub fn sequence_number(self) -> usize {
        self.0 + 1
    }
}

/// In-memory registries of a spreadsheet package that anchored charts are wired through.
///
/// Invariant: `drawings` and `drawing_rels` always have the same length, and the relationships at
/// index `i` belong to the drawing at index `i`.
#[derive(Debug)]
pub struct WorkbookPackage {
    id: u64,
    pub(crate) doc_type: DocType,
    pub(crate) content_types: ContentTypes,
    pub(crate) drawings: Vec<DrawingSurface>,
    pub(crate) drawing_rels: Vec<Relationships>,
    pub(crate) charts: Vec<ChartSpace>,
}

impl Default for WorkbookPackage {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookPackage {
    pub fn new() -> Self {
        Self {
            id: NEXT_PACKAGE_ID.fetch_add(1, Ordering::Relaxed),
            doc_type: DocType::Spreadsheet,
            content_types: ContentTypes::new(),
            drawings: Vec::new(),
            drawing_rels: Vec::new(),
            charts: Vec::new(),
        }
    }

    pub fn doc_type(&self) -> DocType {
        self.doc_type
    }

    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Mutable access for collaborators registering their own parts (worksheets, styles, ...).
    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    /// Register a new, empty drawing part.
    pub fn add_drawing(&mut self) -> Result<DrawingRef, XlsxError> {
        self.add_drawing_surface(DrawingSurface::new())
    }

    /// Register an existing drawing (e.g. one parsed with [`DrawingSurface::from_xml`]) together
    /// with its relationships.
    pub fn add_drawing_surface(&mut self, surface: DrawingSurface) -> Result<DrawingRef, XlsxError> {
        self.add_drawing_with_relationships(surface, Relationships::new())
    }

    pub fn add_drawing_with_relationships(
        &mut self,
        surface: DrawingSurface,
        relationships: Relationships,
    ) -> Result<DrawingRef, XlsxError> {
        let index = self.drawings.len();
        let part_name = absolute_part_name(self.doc_type, PartKind::Drawing, index + 1)?;
        self.content_types
            .add_override(&part_name, CONTENT_TYPE_DRAWING)?;

        self.drawings.push(surface);
        self.drawing_rels.push(relationships);
        log::debug!("registered drawing {part_name}");

        Ok(DrawingRef {
            package: self.id,
            index,
        })
    }

    /// Handles of all registered drawings, in part order.
    pub fn drawing_refs(&self) -> impl Iterator<Item = DrawingRef> + '_ {
        (0..self.drawings.len()).map(|index| DrawingRef {
            package: self.id,
            index,
        })
    }

    pub fn drawing(&self, drawing: DrawingRef) -> Result<&DrawingSurface, XlsxError> {
        let index = self.resolve(drawing)?;
        Ok(&self.drawings[index])
    }

    pub fn drawing_mut(&mut self, drawing: DrawingRef) -> Result<&mut DrawingSurface, XlsxError> {
        let index = self.resolve(drawing)?;
        Ok(&mut self.drawings[index])
    }

    pub fn drawing_relationships(&self, drawing: DrawingRef) -> Result<&Relationships, XlsxError> {
        let index = self.resolve(drawing)?;
        Ok(&self.drawing_rels[index])
    }

    /// Absolute part name of a drawing (`/xl/drawings/drawing{n}.xml`).
    pub fn drawing_part_name(&self, drawing: DrawingRef) -> Result<String, XlsxError> {
        let index = self.resolve(drawing)?;
        absolute_part_name(self.doc_type, PartKind::Drawing, index + 1)
    }

    pub fn charts(&self) -> &[ChartSpace] {
        &self.charts
    }

    pub fn chart(&self, chart: ChartRef) -> Option<&ChartSpace> {
        self.charts.get(chart.0)
    }

    pub fn chart_mut(&mut self, chart: ChartRef) -> Option<&mut ChartSpace> {
        self.charts.get_mut(chart.0)
    }

    /// Create a chart and place it on `drawing`. See [`bind::bind_chart`].
    pub fn add_chart(&mut self, drawing: DrawingRef) -> Result<EmbeddedObjectBinding, XlsxError> {
        bind::bind_chart(self, drawing)
    }

    /// Index of `drawing` in the aligned drawing/relationship collections.
    pub(crate) fn resolve(&self, drawing: DrawingRef) -> Result<usize, XlsxError> {
        debug_assert_eq!(self.drawings.len(), self.drawing_rels.len());
        if drawing.package != self.id || drawing.index >= self.drawings.len() {
            return Err(XlsxError::SurfaceNotRegistered(drawing));
        }
        Ok(drawing.index)
    }
}
