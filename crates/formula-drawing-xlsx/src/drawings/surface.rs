use formula_drawing_model::drawings::{AnchorPlacement, CellMarker};

use crate::XlsxError;

/// Excel numbers the first graphic frame of a drawing `2`.
const FIRST_OBJECT_ID: u32 = 2;

/// A worksheet drawing hosting a single anchored object slot.
///
/// The surface also hands out non-visual object ids (`xdr:cNvPr/@id`). Ids increase
/// monotonically per surface, so every frame ever placed on it gets a distinct id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingSurface {
    anchor: AnchorPlacement,
    next_object_id: u32,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface {
    pub fn new() -> Self {
        Self::with_anchor(AnchorPlacement::new())
    }

    pub fn with_anchor(anchor: AnchorPlacement) -> Self {
        let next_object_id = anchor
            .object()
            .map(|frame| frame.id.saturating_add(1).max(FIRST_OBJECT_ID))
            .unwrap_or(FIRST_OBJECT_ID);
        Self {
            anchor,
            next_object_id,
        }
    }

    /// Parse a drawing part. Only the first anchor is kept.
    pub fn from_xml(xml: &str) -> Result<Self, XlsxError> {
        Ok(Self::with_anchor(super::part::parse_drawing_xml(xml)?))
    }

    /// Serialize as a `xdr:wsDr` drawing part.
    pub fn to_xml(&self) -> String {
        super::part::build_drawing_xml(&self.anchor)
    }

    pub fn anchor(&self) -> &AnchorPlacement {
        &self.anchor
    }

    pub fn anchor_mut(&mut self) -> &mut AnchorPlacement {
        &mut self.anchor
    }

    pub fn top_left(&mut self) -> &mut CellMarker {
        self.anchor.top_left()
    }

    /// Fails with [`XlsxError::Drawing`] for one-cell anchors.
    pub fn bottom_right(&mut self) -> Result<&mut CellMarker, XlsxError> {
        Ok(self.anchor.bottom_right()?)
    }

    /// The id the next placed frame will receive.
    pub fn next_object_id(&self) -> u32 {
        self.next_object_id
    }

    pub(crate) fn allocate_object_id(&mut self) -> u32 {
        let id = self.next_object_id;
        self.next_object_id = self.next_object_id.saturating_add(1);
        id
    }
}
