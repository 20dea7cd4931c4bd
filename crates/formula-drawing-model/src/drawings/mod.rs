mod anchor;
mod frame;
mod marker;

pub use anchor::{Anchor, AnchorKind, AnchorPlacement, EditAs, OneCellAnchor, TwoCellAnchor};
pub use frame::{GraphicData, GraphicFrame, GRAPHIC_DATA_CHART_URI};
pub use marker::{CellMarker, EmuSize, EMU_PER_INCH, EMU_PER_PIXEL};
