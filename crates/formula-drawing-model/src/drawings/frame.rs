use serde::{Deserialize, Serialize};

/// `a:graphicData/@uri` identifying a chart payload.
pub const GRAPHIC_DATA_CHART_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

/// The object stored in an anchor's choice slot (`xdr:graphicFrame`).
///
/// Only graphic frames are modeled; pictures and shapes are outside this crate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphicFrame {
    /// Non-visual object id (`xdr:nvGraphicFramePr/xdr:cNvPr/@id`).
    pub id: u32,
    /// Display name (`xdr:cNvPr/@name`).
    pub name: String,
    pub graphic_data: GraphicData,
}

impl GraphicFrame {
    /// A frame rendering the chart part referenced by `rel_id`.
    pub fn chart(id: u32, name: impl Into<String>, rel_id: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            graphic_data: GraphicData {
                uri: GRAPHIC_DATA_CHART_URI.to_string(),
                rel_id: rel_id.into(),
            },
        }
    }

    pub fn is_chart(&self) -> bool {
        self.graphic_data.uri == GRAPHIC_DATA_CHART_URI
    }

    /// Relationship id of the referenced chart part, if this frame renders a chart.
    pub fn chart_rel_id(&self) -> Option<&str> {
        self.is_chart().then_some(self.graphic_data.rel_id.as_str())
    }
}

/// Graphic-data payload reference (`a:graphic/a:graphicData`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphicData {
    /// Namespace of the payload element.
    pub uri: String,
    /// Relationship id carried by the payload element (`c:chart/@r:id` for charts).
    pub rel_id: String,
}
