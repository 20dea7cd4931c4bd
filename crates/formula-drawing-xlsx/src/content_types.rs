use std::collections::BTreeMap;

use crate::xml::{push_attr, XML_DECLARATION};
use crate::XlsxError;

pub const CONTENT_TYPE_RELATIONSHIPS: &str =
    "application/vnd.openxmlformats-package.relationships+xml";
pub const CONTENT_TYPE_XML: &str = "application/xml";
pub const CONTENT_TYPE_CHART: &str =
    "application/vnd.openxmlformats-officedocument.drawingml.chart+xml";
pub const CONTENT_TYPE_DRAWING: &str = "application/vnd.openxmlformats-officedocument.drawing+xml";

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// The `[Content_Types].xml` registry.
///
/// Defaults are keyed by (lowercase) extension, overrides by absolute part name. Both behave as
/// sets: registering the same key again never produces a second entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypes {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypes {
    /// Registry with the `rels` and `xml` defaults every package needs.
    pub fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), CONTENT_TYPE_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), CONTENT_TYPE_XML.to_string());
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults.insert(
            extension.trim_start_matches('.').to_ascii_lowercase(),
            content_type.to_string(),
        );
    }

    /// Register `content_type` for `part_name`.
    ///
    /// Returns `true` when the part was not registered before. Re-registering an existing part is
    /// a no-op apart from updating its content type.
    pub fn add_override(&mut self, part_name: &str, content_type: &str) -> Result<bool, XlsxError> {
        Self::validate_part_name(part_name)?;
        match self.overrides.get_mut(part_name) {
            Some(existing) if existing == content_type => Ok(false),
            Some(existing) => {
                log::warn!(
                    "content type override for {part_name} changed from {existing} to {content_type}"
                );
                *existing = content_type.to_string();
                Ok(false)
            }
            None => {
                self.overrides
                    .insert(part_name.to_string(), content_type.to_string());
                Ok(true)
            }
        }
    }

    pub fn remove_override(&mut self, part_name: &str) -> Option<String> {
        self.overrides.remove(part_name)
    }

    pub fn override_for(&self, part_name: &str) -> Option<&str> {
        self.overrides.get(part_name).map(String::as_str)
    }

    /// Effective content type of a part: its override, or the default for its extension.
    pub fn content_type_for(&self, part_name: &str) -> Option<&str> {
        if let Some(content_type) = self.override_for(part_name) {
            return Some(content_type);
        }
        let (_, ext) = part_name.rsplit_once('.')?;
        self.defaults
            .get(&ext.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides
            .iter()
            .map(|(part, content_type)| (part.as_str(), content_type.as_str()))
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Check that `part_name` is an absolute OPC part name (`/dir/file.ext`).
    pub fn validate_part_name(part_name: &str) -> Result<(), XlsxError> {
        let invalid = || XlsxError::InvalidPartName(part_name.to_string());
        let rest = part_name.strip_prefix('/').ok_or_else(invalid)?;
        if rest.is_empty() || rest.ends_with('/') {
            return Err(invalid());
        }
        if rest
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(invalid());
        }
        Ok(())
    }

    pub fn to_xml(&self) -> Vec<u8> {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push_str("\n<Types");
        push_attr(&mut xml, "xmlns", CONTENT_TYPES_NS);
        xml.push('>');
        for (extension, content_type) in &self.defaults {
            xml.push_str("<Default");
            push_attr(&mut xml, "Extension", extension);
            push_attr(&mut xml, "ContentType", content_type);
            xml.push_str("/>");
        }
        for (part_name, content_type) in &self.overrides {
            xml.push_str("<Override");
            push_attr(&mut xml, "PartName", part_name);
            push_attr(&mut xml, "ContentType", content_type);
            xml.push_str("/>");
        }
        xml.push_str("</Types>");
        xml.into_bytes()
    }
}
