use std::collections::BTreeMap;

use formula_drawing_model::drawings::{AnchorKind, CellMarker, EditAs};
use formula_drawing_model::Color;
use formula_drawing_xlsx::charts::parse_chart_space;
use formula_drawing_xlsx::drawings::DrawingSurface;
use formula_drawing_xlsx::{Relationships, WorkbookPackage, REL_TYPE_CHART};
use pretty_assertions::assert_eq;

fn written_parts(package: &WorkbookPackage) -> BTreeMap<String, Vec<u8>> {
    let mut parts = BTreeMap::new();
    package.write_into_parts(&mut parts).unwrap();
    parts
}

fn part_str<'a>(parts: &'a BTreeMap<String, Vec<u8>>, name: &str) -> &'a str {
    std::str::from_utf8(&parts[name]).unwrap()
}

#[test]
fn drawing_xml_always_carries_offsets() {
    let mut package = WorkbookPackage::new();
    let drawing = package.add_drawing().unwrap();
    package.add_chart(drawing).unwrap();

    let parts = written_parts(&package);
    let xml = part_str(&parts, "xl/drawings/drawing1.xml");
    assert_eq!(xml.matches("<xdr:colOff>0</xdr:colOff>").count(), 2);
    assert_eq!(xml.matches("<xdr:rowOff>0</xdr:rowOff>").count(), 2);
    assert!(xml.contains(r#"<xdr:twoCellAnchor editAs="oneCell">"#));
    assert!(xml.contains(r#"<xdr:cNvPr id="2" name="Chart"/>"#));
    assert!(xml.contains(r#"<c:chart r:id="rId1"/>"#));
}

#[test]
fn written_package_reads_back() {
    let mut package = WorkbookPackage::new();
    let drawing = package.add_drawing().unwrap();
    {
        let surface = package.drawing_mut(drawing).unwrap();
        surface.top_left().move_to(1, 2);
        let to = surface.bottom_right().unwrap();
        to.move_to(7, 15);
        to.set_col_offset(19_050);
    }
    let binding = package.add_chart(drawing).unwrap();

    let parts = written_parts(&package);

    let surface = DrawingSurface::from_xml(part_str(&parts, "xl/drawings/drawing1.xml")).unwrap();
    assert_eq!(surface.anchor(), package.drawing(drawing).unwrap().anchor());
    assert_eq!(surface.next_object_id(), 3);
    let anchor = surface.anchor().as_two_cell().unwrap();
    assert_eq!(anchor.edit_as, EditAs::MoveOnly);
    assert_eq!(anchor.to, CellMarker::with_offsets(7, 15, 19_050, 0));

    let rels = Relationships::from_xml(&parts["xl/drawings/_rels/drawing1.xml.rels"]).unwrap();
    let rel = rels.get(binding.relationship_id()).unwrap();
    assert_eq!(rel.type_, REL_TYPE_CHART);
    assert_eq!(
        formula_drawing_xlsx::path::resolve_target("xl/drawings/drawing1.xml", &rel.target),
        "xl/charts/chart1.xml"
    );

    let chart = parse_chart_space(part_str(&parts, "xl/charts/chart1.xml")).unwrap();
    assert_eq!(&chart, package.chart(binding.chart()).unwrap());
    assert_eq!(chart.solid_fill(), Some(Color::WHITE));
}

#[test]
fn parsed_drawing_can_host_a_new_chart() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing"
          xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <xdr:twoCellAnchor>
    <xdr:from><xdr:col>0</xdr:col><xdr:row>1</xdr:row></xdr:from>
    <xdr:to><xdr:col>4</xdr:col><xdr:row>9</xdr:row></xdr:to>
    <xdr:clientData/>
  </xdr:twoCellAnchor>
</xdr:wsDr>"#;

    let surface = DrawingSurface::from_xml(xml).unwrap();
    assert_eq!(surface.anchor().kind(), AnchorKind::TwoCell);

    let mut package = WorkbookPackage::new();
    let drawing = package.add_drawing_surface(surface).unwrap();
    package.add_chart(drawing).unwrap();

    let parts = written_parts(&package);
    let written = part_str(&parts, "xl/drawings/drawing1.xml");
    // Absent offsets are written explicitly; the default editAs is omitted.
    assert!(written.contains(
        "<xdr:twoCellAnchor><xdr:from><xdr:col>0</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>1</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>"
    ));
}
