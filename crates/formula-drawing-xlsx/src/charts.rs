//! Chart part (`xl/charts/chart{n}.xml`) serialization.
//!
//! Only the chart-space level presentation captured by [`ChartSpace`] is written: chart area
//! fill/line, `c:plotVisOnly`, `c:dispBlanksAs` and `c:roundedCorners`. The plot area is emitted
//! empty for the caller's series writer to fill in.

use formula_drawing_model::charts::{
    ChartSpace, DisplayBlanksAs, FillStyle, LineStyle, ShapeStyle, SolidFill,
};
use formula_drawing_model::Color;
use roxmltree::{Document, Node};

use crate::xml::{push_attr, A_NS, C_NS, REL_NS, XML_DECLARATION};
use crate::XlsxError;

/// Serialize `chart` as a `c:chartSpace` part.
pub fn write_chart_space(chart: &ChartSpace) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str("\n<c:chartSpace");
    push_attr(&mut xml, "xmlns:c", C_NS);
    push_attr(&mut xml, "xmlns:a", A_NS);
    push_attr(&mut xml, "xmlns:r", REL_NS);
    xml.push('>');

    if let Some(rounded) = chart.rounded_corners {
        push_bool(&mut xml, "roundedCorners", rounded);
    }

    xml.push_str("<c:chart><c:plotArea><c:layout/></c:plotArea>");
    if let Some(visible_only) = chart.plot_vis_only {
        push_bool(&mut xml, "plotVisOnly", visible_only);
    }
    if let Some(blanks) = chart.disp_blanks_as {
        xml.push_str("<c:dispBlanksAs");
        push_attr(&mut xml, "val", blanks.as_xml_value());
        xml.push_str("/>");
    }
    xml.push_str("</c:chart>");

    if let Some(style) = chart.chart_area_style.as_ref().filter(|s| !s.is_empty()) {
        push_shape_style(&mut xml, style);
    }

    xml.push_str("</c:chartSpace>");
    xml
}

fn push_bool(out: &mut String, tag: &str, value: bool) {
    out.push_str(&format!(
        r#"<c:{tag} val="{}"/>"#,
        if value { "1" } else { "0" }
    ));
}

fn push_shape_style(out: &mut String, style: &ShapeStyle) {
    out.push_str("<c:spPr>");
    match &style.fill {
        Some(FillStyle::Solid(fill)) => push_solid_fill(out, fill.color),
        Some(FillStyle::None) => out.push_str("<a:noFill/>"),
        None => {}
    }
    if let Some(line) = &style.line {
        push_line(out, line);
    }
    out.push_str("</c:spPr>");
}

fn push_line(out: &mut String, line: &LineStyle) {
    out.push_str("<a:ln");
    if let Some(width) = line.width_emu {
        push_attr(out, "w", &width.to_string());
    }
    match line.color {
        Some(color) => {
            out.push('>');
            push_solid_fill(out, color);
            out.push_str("</a:ln>");
        }
        None => out.push_str("/>"),
    }
}

fn push_solid_fill(out: &mut String, color: Color) {
    out.push_str("<a:solidFill><a:srgbClr");
    push_attr(out, "val", &color.to_rgb_hex());
    let alpha = color.alpha_per_100k();
    if alpha < 100_000 {
        out.push_str(&format!(r#"><a:alpha val="{alpha}"/></a:srgbClr>"#));
    } else {
        out.push_str("/>");
    }
    out.push_str("</a:solidFill>");
}

/// Parse the chart-space level presentation of a chart part.
///
/// Unknown elements (series, axes, text properties, ...) are ignored.
pub fn parse_chart_space(xml: &str) -> Result<ChartSpace, XlsxError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "chartSpace" {
        return Err(XlsxError::Invalid(format!(
            "expected <c:chartSpace> root, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut chart = ChartSpace::new();
    chart.rounded_corners = child(root, "roundedCorners").map(parse_bool).transpose()?;

    if let Some(chart_node) = child(root, "chart") {
        chart.plot_vis_only = child(chart_node, "plotVisOnly")
            .map(parse_bool)
            .transpose()?;
        chart.disp_blanks_as = match child(chart_node, "dispBlanksAs") {
            // `val` defaults to `zero` in the schema.
            Some(node) => Some(match node.attribute("val") {
                Some(value) => DisplayBlanksAs::from_xml_value(value.trim()).ok_or_else(|| {
                    XlsxError::Invalid(format!("invalid dispBlanksAs value {value:?}"))
                })?,
                None => DisplayBlanksAs::Zero,
            }),
            None => None,
        };
    }

    chart.chart_area_style = child(root, "spPr")
        .map(parse_shape_style)
        .filter(|style| !style.is_empty());

    Ok(chart)
}

fn parse_shape_style(sp_pr: Node<'_, '_>) -> ShapeStyle {
    let fill = sp_pr
        .children()
        .filter(|n| n.is_element())
        .find_map(|n| match n.tag_name().name() {
            "solidFill" => parse_solid_fill_color(n).map(|color| FillStyle::Solid(SolidFill { color })),
            "noFill" => Some(FillStyle::None),
            _ => None,
        });

    let line = child(sp_pr, "ln").map(|ln| LineStyle {
        color: child(ln, "solidFill").and_then(parse_solid_fill_color),
        width_emu: ln.attribute("w").and_then(|w| w.trim().parse().ok()),
    });

    ShapeStyle { fill, line }
}

/// Only `a:srgbClr` is understood; scheme colors are dropped.
fn parse_solid_fill_color(solid_fill: Node<'_, '_>) -> Option<Color> {
    let srgb = child(solid_fill, "srgbClr")?;
    let hex = srgb.attribute("val")?.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;

    let alpha = child(srgb, "alpha")
        .and_then(|n| n.attribute("val"))
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(|per_100k| ((per_100k.min(100_000) as f64 * 255.0) / 100_000.0).round() as u32)
        .unwrap_or(0xFF);

    Some(Color::new_argb(alpha << 24 | rgb))
}

/// `CT_Boolean`: a missing `val` means true.
fn parse_bool(node: Node<'_, '_>) -> Result<bool, XlsxError> {
    match node.attribute("val").map(str::trim) {
        None | Some("1") | Some("true") => Ok(true),
        Some("0") | Some("false") => Ok(false),
        Some(other) => Err(XlsxError::Invalid(format!(
            "invalid boolean {other:?} on <{}>",
            node.tag_name().name()
        ))),
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bound_chart() -> ChartSpace {
        let mut chart = ChartSpace::new();
        chart.set_solid_fill(Color::WHITE);
        chart.set_display_blanks_as(DisplayBlanksAs::Gap);
        chart
    }

    #[test]
    fn writes_bound_chart_presentation() {
        let xml = write_chart_space(&bound_chart());
        let body = xml.split_once("<c:chart>").map(|(_, rest)| rest).unwrap();
        assert_eq!(
            body,
            concat!(
                r#"<c:plotArea><c:layout/></c:plotArea><c:dispBlanksAs val="gap"/></c:chart>"#,
                r#"<c:spPr><a:solidFill><a:srgbClr val="FFFFFF"/></a:solidFill></c:spPr>"#,
                "</c:chartSpace>"
            )
        );
    }

    #[test]
    fn translucent_fills_carry_alpha() {
        let mut chart = ChartSpace::new();
        chart.set_solid_fill(Color::new_argb(0x80336699));
        let xml = write_chart_space(&chart);
        assert!(xml.contains(r#"<a:srgbClr val="336699"><a:alpha val="50196"/></a:srgbClr>"#));

        assert_eq!(parse_chart_space(&xml).unwrap(), chart);
    }

    #[test]
    fn written_chart_parses_back() {
        let mut chart = bound_chart();
        chart.set_plot_visible_only(true);
        chart.rounded_corners = Some(false);
        chart.chart_area_style.as_mut().unwrap().line = Some(LineStyle {
            color: Some(Color::BLACK),
            width_emu: Some(9525),
        });

        let parsed = parse_chart_space(&write_chart_space(&chart)).unwrap();
        assert_eq!(parsed, chart);
    }

    #[test]
    fn no_fill_is_preserved() {
        let mut chart = ChartSpace::new();
        chart.chart_area_style = Some(ShapeStyle {
            fill: Some(FillStyle::None),
            line: None,
        });
        let xml = write_chart_space(&chart);
        assert!(xml.contains("<c:spPr><a:noFill/></c:spPr>"));
        assert_eq!(parse_chart_space(&xml).unwrap().solid_fill(), None);
    }

    #[test]
    fn parses_chart_written_elsewhere() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart"
              xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <c:roundedCorners/>
  <c:chart>
    <c:autoTitleDeleted val="1"/>
    <c:plotArea><c:layout/></c:plotArea>
    <c:plotVisOnly val="true"/>
    <c:dispBlanksAs/>
  </c:chart>
  <c:spPr>
    <a:solidFill><a:schemeClr val="bg1"/></a:solidFill>
  </c:spPr>
</c:chartSpace>"#;

        let chart = parse_chart_space(xml).unwrap();
        assert_eq!(chart.rounded_corners, Some(true));
        assert_eq!(chart.plot_vis_only, Some(true));
        assert_eq!(chart.disp_blanks_as, Some(DisplayBlanksAs::Zero));
        assert_eq!(chart.chart_area_style, None);
    }

    #[test]
    fn rejects_other_roots_and_bad_values() {
        assert!(matches!(
            parse_chart_space("<xdr:wsDr xmlns:xdr=\"urn:x\"/>"),
            Err(XlsxError::Invalid(_))
        ));

        let bad = r#"<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart">
  <c:chart><c:dispBlanksAs val="sideways"/></c:chart>
</c:chartSpace>"#;
        assert!(matches!(
            parse_chart_space(bad),
            Err(XlsxError::Invalid(msg)) if msg.contains("sideways")
        ));
    }
}
