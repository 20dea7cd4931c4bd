use serde::{Deserialize, Serialize};

use super::{FillStyle, ShapeStyle, SolidFill};
use crate::Color;

/// How empty cells are plotted (`c:chart/c:dispBlanksAs/@val`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayBlanksAs {
    /// Leave a gap.
    #[default]
    Gap,
    /// Plot as zero.
    Zero,
    /// Connect neighbouring points.
    Span,
}

impl DisplayBlanksAs {
    pub fn as_xml_value(self) -> &'static str {
        match self {
            DisplayBlanksAs::Gap => "gap",
            DisplayBlanksAs::Zero => "zero",
            DisplayBlanksAs::Span => "span",
        }
    }

    pub fn from_xml_value(value: &str) -> Option<Self> {
        match value.trim() {
            "gap" => Some(DisplayBlanksAs::Gap),
            "zero" => Some(DisplayBlanksAs::Zero),
            "span" => Some(DisplayBlanksAs::Span),
            _ => None,
        }
    }
}

/// A chart part payload (`c:chartSpace`).
///
/// Only presentation-level properties are modeled; plot areas and series are filled in by the
/// charting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpace {
    /// Chart area shape properties (`c:chartSpace/c:spPr`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_area_style: Option<ShapeStyle>,
    /// How to display blanks (`c:chart/c:dispBlanksAs/@val`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disp_blanks_as: Option<DisplayBlanksAs>,
    /// Whether only visible cells are plotted (`c:chart/c:plotVisOnly/@val`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_vis_only: Option<bool>,
    /// Whether rounded corners are enabled (`c:chartSpace/c:roundedCorners/@val`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounded_corners: Option<bool>,
}

impl ChartSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the chart area with a solid color, keeping any line formatting.
    pub fn set_solid_fill(&mut self, color: Color) {
        self.chart_area_style
            .get_or_insert_with(ShapeStyle::default)
            .fill = Some(FillStyle::Solid(SolidFill { color }));
    }

    pub fn set_display_blanks_as(&mut self, policy: DisplayBlanksAs) {
        self.disp_blanks_as = Some(policy);
    }

    pub fn set_plot_visible_only(&mut self, visible_only: bool) {
        self.plot_vis_only = Some(visible_only);
    }

    /// The chart area's solid fill color, if any.
    pub fn solid_fill(&self) -> Option<Color> {
        match self.chart_area_style.as_ref()?.fill.as_ref()? {
            FillStyle::Solid(fill) => Some(fill.color),
            FillStyle::None => None,
        }
    }
}
