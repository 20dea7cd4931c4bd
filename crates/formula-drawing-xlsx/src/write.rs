use std::collections::BTreeMap;

use crate::charts::write_chart_space;
use crate::path::{absolute_part_name, rels_for_part, PartKind};
use crate::xml::push_attr;
use crate::{WorkbookPackage, XlsxError};

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

impl WorkbookPackage {
    /// Write every drawing, drawing `.rels`, chart and the content type registry into `parts`
    /// (keyed by zip entry name, i.e. part name without the leading `/`).
    ///
    /// An existing `[Content_Types].xml` in `parts` is patched with the missing overrides instead
    /// of being replaced, so parts owned by other writers keep their registrations.
    pub fn write_into_parts(&self, parts: &mut BTreeMap<String, Vec<u8>>) -> Result<(), XlsxError> {
        for (index, (surface, rels)) in self.drawings.iter().zip(&self.drawing_rels).enumerate() {
            let part_name = absolute_part_name(self.doc_type, PartKind::Drawing, index + 1)?;
            let entry = part_name.trim_start_matches('/');
            parts.insert(entry.to_string(), surface.to_xml().into_bytes());
            if !rels.is_empty() {
                parts.insert(rels_for_part(entry), rels.to_xml());
            }
        }

        for (index, chart) in self.charts.iter().enumerate() {
            let part_name = absolute_part_name(self.doc_type, PartKind::Chart, index + 1)?;
            parts.insert(
                part_name.trim_start_matches('/').to_string(),
                write_chart_space(chart).into_bytes(),
            );
        }

        let content_types = match parts.get(CONTENT_TYPES_PART) {
            Some(existing) => self.merge_content_types(existing)?,
            None => self.content_types.to_xml(),
        };
        parts.insert(CONTENT_TYPES_PART.to_string(), content_types);

        log::debug!(
            "wrote {} drawing(s) and {} chart(s)",
            self.drawings.len(),
            self.charts.len()
        );
        Ok(())
    }

    fn merge_content_types(&self, existing: &[u8]) -> Result<Vec<u8>, XlsxError> {
        let mut xml = String::from_utf8(existing.to_vec())
            .map_err(|e| XlsxError::Invalid(format!("{CONTENT_TYPES_PART} is not UTF-8: {e}")))?;
        let Some(end) = xml.rfind("</Types>") else {
            return Err(XlsxError::Invalid(format!(
                "{CONTENT_TYPES_PART} is missing </Types>"
            )));
        };

        let mut insert = String::new();
        for (part_name, content_type) in self.content_types.overrides() {
            if xml.contains(&format!(r#"PartName="{part_name}""#)) {
                continue;
            }
            insert.push_str("<Override");
            push_attr(&mut insert, "PartName", part_name);
            push_attr(&mut insert, "ContentType", content_type);
            insert.push_str("/>");
        }
        xml.insert_str(end, &insert);
        Ok(xml.into_bytes())
    }
}
