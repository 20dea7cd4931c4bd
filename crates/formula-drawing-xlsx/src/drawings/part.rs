use formula_drawing_model::drawings::{
    Anchor, AnchorPlacement, CellMarker, EditAs, EmuSize, GraphicData, GraphicFrame,
    OneCellAnchor, TwoCellAnchor,
};
use roxmltree::{Document, Node};

use crate::xml::{push_attr, A_NS, C_NS, REL_NS, XDR_NS, XML_DECLARATION};
use crate::XlsxError;

type Result<T> = std::result::Result<T, XlsxError>;

pub(super) fn build_drawing_xml(placement: &AnchorPlacement) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str("\n<xdr:wsDr");
    push_attr(&mut xml, "xmlns:xdr", XDR_NS);
    push_attr(&mut xml, "xmlns:a", A_NS);
    push_attr(&mut xml, "xmlns:r", REL_NS);
    push_attr(&mut xml, "xmlns:c", C_NS);
    xml.push('>');

    if let Some(anchor) = placement.anchor() {
        match anchor.object() {
            Some(frame) => push_anchor(&mut xml, anchor, frame),
            // An anchor must carry exactly one object; an empty one is schema-invalid.
            None => log::debug!("skipping {} anchor without an object", anchor.kind()),
        }
    }

    xml.push_str("</xdr:wsDr>");
    xml
}

fn push_anchor(out: &mut String, anchor: &Anchor, frame: &GraphicFrame) {
    match anchor {
        Anchor::TwoCell(anchor) => {
            out.push_str("<xdr:twoCellAnchor");
            if anchor.edit_as != EditAs::default() {
                push_attr(out, "editAs", anchor.edit_as.as_xml_value());
            }
            out.push('>');
            push_marker(out, "from", &anchor.from);
            push_marker(out, "to", &anchor.to);
        }
        Anchor::OneCell(anchor) => {
            out.push_str("<xdr:oneCellAnchor>");
            push_marker(out, "from", &anchor.from);
            out.push_str(&format!(
                r#"<xdr:ext cx="{}" cy="{}"/>"#,
                anchor.ext.cx, anchor.ext.cy
            ));
        }
    }

    push_graphic_frame(out, frame);
    out.push_str("<xdr:clientData/>");

    match anchor {
        Anchor::TwoCell(_) => out.push_str("</xdr:twoCellAnchor>"),
        Anchor::OneCell(_) => out.push_str("</xdr:oneCellAnchor>"),
    }
}

/// Offsets are always written, absent ones as `0`: Mac Excel rejects markers without them.
fn push_marker(out: &mut String, tag: &str, marker: &CellMarker) {
    out.push_str(&format!(
        "<xdr:{tag}><xdr:col>{}</xdr:col><xdr:colOff>{}</xdr:colOff><xdr:row>{}</xdr:row><xdr:rowOff>{}</xdr:rowOff></xdr:{tag}>",
        marker.col,
        marker.col_offset(),
        marker.row,
        marker.row_offset()
    ));
}

fn push_graphic_frame(out: &mut String, frame: &GraphicFrame) {
    out.push_str(r#"<xdr:graphicFrame macro=""><xdr:nvGraphicFramePr><xdr:cNvPr"#);
    push_attr(out, "id", &frame.id.to_string());
    push_attr(out, "name", &frame.name);
    out.push_str("/><xdr:cNvGraphicFramePr/></xdr:nvGraphicFramePr>");
    out.push_str(r#"<xdr:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/></xdr:xfrm>"#);
    out.push_str("<a:graphic><a:graphicData");
    push_attr(out, "uri", &frame.graphic_data.uri);
    out.push('>');
    if let Some(rel_id) = frame.chart_rel_id() {
        out.push_str("<c:chart");
        push_attr(out, "r:id", rel_id);
        out.push_str("/>");
    }
    out.push_str("</a:graphicData></a:graphic></xdr:graphicFrame>");
}

/// Parse a worksheet drawing part into its (single) placement.
///
/// Notes:
/// - `<xdr:colOff>` / `<xdr:rowOff>` are optional in the wild; absence is recorded as `None`.
/// - Whitespace around numeric values is tolerated.
/// - Only the first `twoCellAnchor`/`oneCellAnchor` is kept; other anchors are skipped.
pub(super) fn parse_drawing_xml(xml: &str) -> Result<AnchorPlacement> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "wsDr" {
        return Err(XlsxError::Invalid(format!(
            "expected <xdr:wsDr> drawing root, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut placement = AnchorPlacement::new();
    for node in root.children().filter(|n| n.is_element()) {
        let name = node.tag_name().name();
        if !matches!(name, "twoCellAnchor" | "oneCellAnchor") {
            log::warn!("skipping unsupported drawing element <{name}>");
            continue;
        }
        // Later anchors are not parsed, so malformed ones cannot fail the read.
        if placement.anchor().is_some() {
            log::warn!("drawing holds more than one anchor; keeping the first");
            break;
        }
        placement = match name {
            "twoCellAnchor" => Anchor::TwoCell(parse_two_cell_anchor(node)?),
            _ => Anchor::OneCell(parse_one_cell_anchor(node)?),
        }
        .into();
    }

    Ok(placement)
}

fn parse_two_cell_anchor(node: Node<'_, '_>) -> Result<TwoCellAnchor> {
    let from = parse_marker(required_child(node, "from")?)?;
    let to = parse_marker(required_child(node, "to")?)?;
    let edit_as = match node.attribute("editAs") {
        Some(value) => EditAs::from_xml_value(value)
            .ok_or_else(|| XlsxError::Invalid(format!("invalid editAs value {value:?}")))?,
        None => EditAs::default(),
    };

    Ok(TwoCellAnchor {
        from,
        to,
        edit_as,
        object: parse_graphic_frame(node)?,
    })
}

fn parse_one_cell_anchor(node: Node<'_, '_>) -> Result<OneCellAnchor> {
    let from = parse_marker(required_child(node, "from")?)?;
    let ext = required_child(node, "ext")?;
    let ext = EmuSize::new(parse_attr(ext, "cx")?, parse_attr(ext, "cy")?);

    Ok(OneCellAnchor {
        from,
        ext,
        object: parse_graphic_frame(node)?,
    })
}

fn parse_marker(node: Node<'_, '_>) -> Result<CellMarker> {
    Ok(CellMarker {
        col: parse_child(node, "col")?.ok_or_else(|| missing(node, "col"))?,
        row: parse_child(node, "row")?.ok_or_else(|| missing(node, "row"))?,
        col_off: parse_child(node, "colOff")?,
        row_off: parse_child(node, "rowOff")?,
    })
}

fn parse_graphic_frame(anchor: Node<'_, '_>) -> Result<Option<GraphicFrame>> {
    let Some(frame) = child(anchor, "graphicFrame") else {
        return Ok(None);
    };

    let c_nv_pr = frame
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "cNvPr")
        .ok_or_else(|| missing(frame, "cNvPr"))?;
    let id = parse_attr(c_nv_pr, "id")?;
    let name = c_nv_pr.attribute("name").unwrap_or_default().to_string();

    let graphic_data = frame
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "graphicData")
        .ok_or_else(|| missing(frame, "graphicData"))?;
    let uri = graphic_data
        .attribute("uri")
        .ok_or_else(|| missing(graphic_data, "@uri"))?
        .to_string();
    let rel_id = graphic_data
        .descendants()
        .filter(|n| n.is_element())
        .find_map(|n| n.attribute((REL_NS, "id")))
        .unwrap_or_default()
        .to_string();

    Ok(Some(GraphicFrame {
        id,
        name,
        graphic_data: GraphicData { uri, rel_id },
    }))
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
}

fn required_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Result<Node<'a, 'input>> {
    child(node, tag).ok_or_else(|| missing(node, tag))
}

fn parse_child<T: std::str::FromStr>(node: Node<'_, '_>, tag: &str) -> Result<Option<T>> {
    let Some(text) = child(node, tag).map(|n| n.text().unwrap_or_default()) else {
        return Ok(None);
    };
    text.trim()
        .parse()
        .map(Some)
        .map_err(|_| XlsxError::Invalid(format!("invalid <{tag}> value {text:?}")))
}

fn parse_attr<T: std::str::FromStr>(node: Node<'_, '_>, attr: &str) -> Result<T> {
    let value = node
        .attribute(attr)
        .ok_or_else(|| missing(node, &format!("@{attr}")))?;
    value.trim().parse().map_err(|_| {
        XlsxError::Invalid(format!(
            "invalid {attr} value {value:?} on <{}>",
            node.tag_name().name()
        ))
    })
}

fn missing(node: Node<'_, '_>, what: &str) -> XlsxError {
    XlsxError::Invalid(format!("<{}> is missing {what}", node.tag_name().name()))
}
