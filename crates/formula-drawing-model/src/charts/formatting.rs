use serde::{Deserialize, Serialize};

use crate::Color;

/// Solid fill formatting (`a:solidFill`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidFill {
    pub color: Color,
}

/// Shape fill formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum FillStyle {
    Solid(SolidFill),
    /// Explicitly unfilled (`a:noFill`).
    None,
}

/// Line formatting (`a:ln`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Width in EMUs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_emu: Option<u32>,
}

/// Shape properties (`c:spPr`) as a simplified fill+stroke model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

impl ShapeStyle {
    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.line.is_none()
    }
}
