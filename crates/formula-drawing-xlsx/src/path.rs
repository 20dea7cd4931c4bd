//! Part naming for OPC packages.
//!
//! Part names come in two flavours:
//! - absolute names as registered in `[Content_Types].xml` (`/xl/charts/chart1.xml`)
//! - relationship targets, relative to the part that references them (`../charts/chart1.xml`
//!   from `xl/drawings/drawing1.xml`)
//!
//! Both are deterministic functions of the document type, the kind of part and its 1-based
//! sequence number.

use crate::XlsxError;

/// Top-level document flavour of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocType {
    Spreadsheet,
    Document,
    Presentation,
}

impl DocType {
    fn root_dir(self) -> &'static str {
        match self {
            DocType::Spreadsheet => "xl",
            DocType::Document => "word",
            DocType::Presentation => "ppt",
        }
    }
}

/// Kind of content stored in a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Chart,
    /// Worksheet drawing (`xdr:wsDr`), only defined for spreadsheets.
    Drawing,
}

/// Absolute part name for the `sequence`-th part of `kind` (e.g. `/xl/charts/chart3.xml`).
pub fn absolute_part_name(
    doc_type: DocType,
    kind: PartKind,
    sequence: usize,
) -> Result<String, XlsxError> {
    check_sequence(sequence)?;
    let root = doc_type.root_dir();
    match (doc_type, kind) {
        (_, PartKind::Chart) => Ok(format!("/{root}/charts/chart{sequence}.xml")),
        (DocType::Spreadsheet, PartKind::Drawing) => {
            Ok(format!("/{root}/drawings/drawing{sequence}.xml"))
        }
        (doc_type, kind) => Err(XlsxError::UnsupportedPart { doc_type, kind }),
    }
}

/// Relationship target for the `sequence`-th part of `kind`, relative to the part that usually
/// references it.
///
/// Spreadsheet charts are referenced from `xl/drawings/*`, spreadsheet drawings from
/// `xl/worksheets/*`, presentation charts from `ppt/slides/*` and document charts from
/// `word/document.xml`.
pub fn relative_target(
    doc_type: DocType,
    kind: PartKind,
    sequence: usize,
) -> Result<String, XlsxError> {
    check_sequence(sequence)?;
    match (doc_type, kind) {
        (DocType::Spreadsheet | DocType::Presentation, PartKind::Chart) => {
            Ok(format!("../charts/chart{sequence}.xml"))
        }
        (DocType::Document, PartKind::Chart) => Ok(format!("charts/chart{sequence}.xml")),
        (DocType::Spreadsheet, PartKind::Drawing) => {
            Ok(format!("../drawings/drawing{sequence}.xml"))
        }
        (doc_type, kind) => Err(XlsxError::UnsupportedPart { doc_type, kind }),
    }
}

fn check_sequence(sequence: usize) -> Result<(), XlsxError> {
    if sequence == 0 {
        return Err(XlsxError::Invalid(
            "part sequence numbers are 1-based".to_string(),
        ));
    }
    Ok(())
}

/// The `.rels` part describing `part`'s outgoing relationships.
pub fn rels_for_part(part: &str) -> String {
    let part = part.strip_prefix('/').unwrap_or(part);
    match part.rsplit_once('/') {
        Some((dir, file_name)) => format!("{dir}/_rels/{file_name}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

/// Resolve a relationship `target` against the part that owns the relationship.
///
/// The result is a normalized part name without a leading slash.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    // Relationship targets are URIs; OPC part names never carry fragments.
    let target = target.split('#').next().unwrap_or(target);
    if target.is_empty() {
        return normalize(source_part);
    }
    if let Some(target) = target.strip_prefix('/') {
        return normalize(target);
    }

    let base_dir = source_part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    normalize(&format!("{base_dir}/{target}"))
}

fn normalize(path: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out.join("/")
}
