use core::fmt;

use serde::{Deserialize, Serialize};

use super::{CellMarker, EmuSize, GraphicFrame};
use crate::DrawingError;

/// Resize/move behavior of an anchored object when the underlying cells change
/// (`xdr:twoCellAnchor/@editAs`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditAs {
    /// Move and resize with the anchor cells (`twoCell`, the schema default).
    #[default]
    MoveAndSize,
    /// Move with the anchor cells but keep the size (`oneCell`).
    MoveOnly,
    /// Neither move nor resize (`absolute`).
    FixedSize,
}

impl EditAs {
    pub fn as_xml_value(self) -> &'static str {
        match self {
            EditAs::MoveAndSize => "twoCell",
            EditAs::MoveOnly => "oneCell",
            EditAs::FixedSize => "absolute",
        }
    }

    pub fn from_xml_value(value: &str) -> Option<Self> {
        match value.trim() {
            "twoCell" => Some(EditAs::MoveAndSize),
            "oneCell" => Some(EditAs::MoveOnly),
            "absolute" => Some(EditAs::FixedSize),
            _ => None,
        }
    }
}

/// Two-endpoint region (`xdr:twoCellAnchor`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoCellAnchor {
    pub from: CellMarker,
    pub to: CellMarker,
    #[serde(default)]
    pub edit_as: EditAs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<GraphicFrame>,
}

impl TwoCellAnchor {
    pub fn new(from: CellMarker, to: CellMarker) -> Self {
        Self {
            from,
            to,
            edit_as: EditAs::default(),
            object: None,
        }
    }

    /// The region used when an object is placed without explicit coordinates: `F1:K21`, moving
    /// with its cells but keeping its size.
    ///
    /// The region must not be degenerate: Excel does not render objects anchored at `(0,0)-(0,0)`.
    pub fn default_region() -> Self {
        Self {
            from: CellMarker::new(5, 0),
            to: CellMarker::new(10, 20),
            edit_as: EditAs::MoveOnly,
            object: None,
        }
    }
}

/// Single-endpoint placement with an explicit extent (`xdr:oneCellAnchor`).
///
/// Read access only: new objects are always placed with a [`TwoCellAnchor`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneCellAnchor {
    pub from: CellMarker,
    pub ext: EmuSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<GraphicFrame>,
}

impl OneCellAnchor {
    pub fn new(from: CellMarker, ext: EmuSize) -> Self {
        Self {
            from,
            ext,
            object: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Anchor {
    TwoCell(TwoCellAnchor),
    OneCell(OneCellAnchor),
}

impl Anchor {
    pub fn kind(&self) -> AnchorKind {
        match self {
            Anchor::TwoCell(_) => AnchorKind::TwoCell,
            Anchor::OneCell(_) => AnchorKind::OneCell,
        }
    }

    pub fn from(&self) -> &CellMarker {
        match self {
            Anchor::TwoCell(anchor) => &anchor.from,
            Anchor::OneCell(anchor) => &anchor.from,
        }
    }

    pub fn to(&self) -> Option<&CellMarker> {
        match self {
            Anchor::TwoCell(anchor) => Some(&anchor.to),
            Anchor::OneCell(_) => None,
        }
    }

    pub fn object(&self) -> Option<&GraphicFrame> {
        match self {
            Anchor::TwoCell(anchor) => anchor.object.as_ref(),
            Anchor::OneCell(anchor) => anchor.object.as_ref(),
        }
    }

    fn object_slot(&mut self) -> &mut Option<GraphicFrame> {
        match self {
            Anchor::TwoCell(anchor) => &mut anchor.object,
            Anchor::OneCell(anchor) => &mut anchor.object,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorKind {
    Unset,
    TwoCell,
    OneCell,
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnchorKind::Unset => "unset",
            AnchorKind::TwoCell => "two-cell",
            AnchorKind::OneCell => "one-cell",
        })
    }
}

/// Where a floating object sits on the worksheet grid.
///
/// A placement starts [`AnchorKind::Unset`]. The first access to an endpoint materializes
/// [`TwoCellAnchor::default_region`]; from then on the endpoints stay present, so handles returned
/// by [`AnchorPlacement::top_left`] always point at live data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorPlacement {
    anchor: Option<Anchor>,
}

impl AnchorPlacement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    pub fn kind(&self) -> AnchorKind {
        self.anchor
            .as_ref()
            .map(Anchor::kind)
            .unwrap_or(AnchorKind::Unset)
    }

    pub fn is_two_cell(&self) -> bool {
        matches!(self.anchor, Some(Anchor::TwoCell(_)))
    }

    pub fn as_two_cell(&self) -> Option<&TwoCellAnchor> {
        match &self.anchor {
            Some(Anchor::TwoCell(anchor)) => Some(anchor),
            _ => None,
        }
    }

    pub fn as_one_cell(&self) -> Option<&OneCellAnchor> {
        match &self.anchor {
            Some(Anchor::OneCell(anchor)) => Some(anchor),
            _ => None,
        }
    }

    /// The object currently occupying the anchor's choice slot.
    pub fn object(&self) -> Option<&GraphicFrame> {
        self.anchor.as_ref().and_then(Anchor::object)
    }

    /// Mutable handle to the top-left marker.
    ///
    /// Materializes the default two-cell region when nothing is placed yet. A one-cell anchor
    /// hands out its single `from` marker.
    pub fn top_left(&mut self) -> &mut CellMarker {
        match self.materialize() {
            Anchor::TwoCell(anchor) => &mut anchor.from,
            Anchor::OneCell(anchor) => &mut anchor.from,
        }
    }

    /// Mutable handle to the bottom-right marker.
    ///
    /// One-cell anchors have no `to` marker; they are reported as
    /// [`DrawingError::UnsupportedAnchorKind`] and left untouched.
    pub fn bottom_right(&mut self) -> Result<&mut CellMarker, DrawingError> {
        match self.materialize() {
            Anchor::TwoCell(anchor) => Ok(&mut anchor.to),
            Anchor::OneCell(_) => Err(DrawingError::UnsupportedAnchorKind {
                kind: AnchorKind::OneCell,
            }),
        }
    }

    /// Replace whatever is placed with [`TwoCellAnchor::default_region`].
    ///
    /// Offsets are stored as explicit zeros.
    pub fn set_defaults(&mut self) {
        self.anchor = Some(Anchor::TwoCell(TwoCellAnchor::default_region()));
    }

    /// Store `frame` in the choice slot, returning the object it displaced.
    pub fn set_object(&mut self, frame: GraphicFrame) -> Option<GraphicFrame> {
        self.materialize().object_slot().replace(frame)
    }

    /// Empty the choice slot.
    pub fn clear_object(&mut self) -> Option<GraphicFrame> {
        self.anchor.as_mut().and_then(|anchor| anchor.object_slot().take())
    }

    fn materialize(&mut self) -> &mut Anchor {
        self.anchor
            .get_or_insert_with(|| Anchor::TwoCell(TwoCellAnchor::default_region()))
    }
}

impl From<Anchor> for AnchorPlacement {
    fn from(anchor: Anchor) -> Self {
        Self {
            anchor: Some(anchor),
        }
    }
}

impl From<TwoCellAnchor> for AnchorPlacement {
    fn from(anchor: TwoCellAnchor) -> Self {
        Anchor::TwoCell(anchor).into()
    }
}

impl From<OneCellAnchor> for AnchorPlacement {
    fn from(anchor: OneCellAnchor) -> Self {
        Anchor::OneCell(anchor).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn top_left_materializes_two_cell_region() {
        let mut placement = AnchorPlacement::new();
        assert_eq!(placement.kind(), AnchorKind::Unset);

        assert_eq!(*placement.top_left(), CellMarker::new(5, 0));
        assert_eq!(placement.kind(), AnchorKind::TwoCell);
        assert_eq!(
            placement.as_two_cell().map(|a| a.edit_as),
            Some(EditAs::MoveOnly)
        );
    }

    #[test]
    fn bottom_right_on_unset_materializes_defaults() {
        let mut placement = AnchorPlacement::new();
        assert_eq!(*placement.bottom_right().unwrap(), CellMarker::new(10, 20));
        assert_eq!(*placement.top_left(), CellMarker::new(5, 0));
    }

    #[test]
    fn one_cell_top_left_is_its_from_marker() {
        let mut placement = AnchorPlacement::from(OneCellAnchor::new(
            CellMarker::new(2, 3),
            EmuSize::new(100, 200),
        ));
        placement.top_left().set_col(7);
        assert_eq!(
            placement.as_one_cell().map(|a| a.from),
            Some(CellMarker::new(7, 3))
        );
    }

    #[test]
    fn set_object_materializes_and_replaces() {
        let mut placement = AnchorPlacement::new();
        assert_eq!(placement.set_object(GraphicFrame::chart(2, "Chart", "rId1")), None);
        assert!(placement.is_two_cell());

        let displaced = placement.set_object(GraphicFrame::chart(3, "Chart", "rId2"));
        assert_eq!(displaced.map(|f| f.id), Some(2));
        assert_eq!(placement.object().and_then(|f| f.chart_rel_id()), Some("rId2"));

        assert_eq!(placement.clear_object().map(|f| f.id), Some(3));
        assert_eq!(placement.object(), None);
    }

    #[test]
    fn edit_as_xml_values() {
        for edit_as in [EditAs::MoveAndSize, EditAs::MoveOnly, EditAs::FixedSize] {
            assert_eq!(EditAs::from_xml_value(edit_as.as_xml_value()), Some(edit_as));
        }
        assert_eq!(EditAs::from_xml_value(" oneCell "), Some(EditAs::MoveOnly));
        assert_eq!(EditAs::from_xml_value("sideways"), None);
    }
}
