use formula_drawing_model::charts::{ChartSpace, DisplayBlanksAs};
use formula_drawing_model::drawings::{AnchorKind, GraphicFrame, GRAPHIC_DATA_CHART_URI};
use formula_drawing_model::Color;
use serde::{Deserialize, Serialize};

use crate::content_types::{ContentTypes, CONTENT_TYPE_CHART};
use crate::path::{absolute_part_name, relative_target, PartKind};
use crate::relationships::REL_TYPE_CHART;
use crate::{ChartRef, DrawingRef, WorkbookPackage, XlsxError};

/// Presentation applied to charts created by [`bind_chart_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartBindOptions {
    /// `xdr:cNvPr/@name` of the graphic frame.
    pub frame_name: String,
    /// Solid chart-area fill.
    pub background: Color,
    pub display_blanks_as: DisplayBlanksAs,
}

impl Default for ChartBindOptions {
    fn default() -> Self {
        Self {
            frame_name: "Chart".to_string(),
            background: Color::WHITE,
            display_blanks_as: DisplayBlanksAs::Gap,
        }
    }
}

/// Record of a chart wired into a drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedObjectBinding {
    chart: ChartRef,
    content_type_path: String,
    relationship_id: String,
    numeric_object_id: u32,
    graphic_data_uri: String,
}

impl EmbeddedObjectBinding {
    pub fn chart(&self) -> ChartRef {
        self.chart
    }

    /// Absolute part name registered in `[Content_Types].xml`, e.g. `/xl/charts/chart1.xml`.
    pub fn content_type_path(&self) -> &str {
        &self.content_type_path
    }

    /// Id of the drawing -> chart relationship.
    pub fn relationship_id(&self) -> &str {
        &self.relationship_id
    }

    /// `xdr:cNvPr/@id` of the graphic frame.
    pub fn numeric_object_id(&self) -> u32 {
        self.numeric_object_id
    }

    pub fn graphic_data_uri(&self) -> &str {
        &self.graphic_data_uri
    }
}

/// Create a chart part and place it on `drawing` with the default presentation.
pub fn bind_chart(
    package: &mut WorkbookPackage,
    drawing: DrawingRef,
) -> Result<EmbeddedObjectBinding, XlsxError> {
    bind_chart_with(package, drawing, &ChartBindOptions::default())
}

/// Create a chart part and place it on `drawing`.
///
/// On success the package has:
/// - a new chart payload (`/xl/charts/chart{n}.xml`, `n` = new chart count) with a content type
///   override,
/// - a chart relationship from the drawing (`../charts/chart{n}.xml`),
/// - a graphic frame in the drawing's anchor referencing that relationship. A drawing without a
///   two-cell region gets the default region (`F1:K21`) first.
///
/// On error nothing is modified.
pub fn bind_chart_with(
    package: &mut WorkbookPackage,
    drawing: DrawingRef,
    options: &ChartBindOptions,
) -> Result<EmbeddedObjectBinding, XlsxError> {
    let index = package.resolve(drawing)?;

    let seq = package.charts.len() + 1;
    let part_name = absolute_part_name(package.doc_type, PartKind::Chart, seq)?;
    let target = relative_target(package.doc_type, PartKind::Chart, seq)?;

    ContentTypes::validate_part_name(&part_name)?;

    let relationship_id = package.drawing_rels[index].add_relationship(&target, REL_TYPE_CHART)?;
    // Only part-name validation can fail here, and that already passed.
    package
        .content_types
        .add_override(&part_name, CONTENT_TYPE_CHART)?;

    // Nothing below can fail.
    let mut chart = ChartSpace::new();
    chart.set_solid_fill(options.background);
    chart.set_display_blanks_as(options.display_blanks_as);
    package.charts.push(chart);
    let chart = ChartRef(seq - 1);

    let surface = &mut package.drawings[index];
    match surface.anchor().kind() {
        AnchorKind::TwoCell => {}
        AnchorKind::Unset => surface.anchor_mut().set_defaults(),
        AnchorKind::OneCell => {
            log::warn!(
                "replacing one-cell anchor at {} with the default two-cell region for {part_name}",
                surface.anchor().anchor().map(|a| a.from().to_a1()).unwrap_or_default()
            );
            surface.anchor_mut().set_defaults();
        }
    }

    let numeric_object_id = surface.allocate_object_id();
    let frame = GraphicFrame::chart(
        numeric_object_id,
        options.frame_name.as_str(),
        relationship_id.as_str(),
    );
    if let Some(previous) = surface.anchor_mut().set_object(frame) {
        log::debug!(
            "graphic frame {} on drawing {} replaced by {part_name}",
            previous.id,
            drawing.sequence_number()
        );
    }

    log::debug!(
        "bound {part_name} to drawing {} as {relationship_id} (object id {numeric_object_id})",
        drawing.sequence_number()
    );

    Ok(EmbeddedObjectBinding {
        chart,
        content_type_path: part_name,
        relationship_id,
        numeric_object_id,
        graphic_data_uri: GRAPHIC_DATA_CHART_URI.to_string(),
    })
}
