use std::io::Cursor;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::xml::{local_name, push_attr, XML_DECLARATION};
use crate::XlsxError;

pub const REL_TYPE_CHART: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart";

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub type_: String,
    pub target: String,
    pub target_mode: Option<String>,
}

/// Outgoing relationships of a single part (the contents of its `.rels` part).
///
/// Ids are unique within the collection. Generated ids follow Excel's `rId{n}` scheme, one past
/// the largest numeric id already present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.id == id)
    }

    pub fn target_for(&self, id: &str) -> Option<&str> {
        self.get(id).map(|rel| rel.target.as_str())
    }

    /// The id [`Relationships::add_relationship`] would hand out next.
    pub fn next_r_id(&self) -> Result<String, XlsxError> {
        let max = self
            .rels
            .iter()
            .filter_map(|rel| rel.id.strip_prefix("rId")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        let next = max.checked_add(1).ok_or(XlsxError::RelationshipIdOverflow)?;
        Ok(format!("rId{next}"))
    }

    /// Append an existing relationship, rejecting duplicate ids.
    pub fn push(&mut self, rel: Relationship) -> Result<(), XlsxError> {
        if self.get(&rel.id).is_some() {
            return Err(XlsxError::DuplicateRelationshipId(rel.id));
        }
        self.rels.push(rel);
        Ok(())
    }

    /// Add an internal relationship to `target` and return its generated id.
    pub fn add_relationship(&mut self, target: &str, type_: &str) -> Result<String, XlsxError> {
        let id = self.next_r_id()?;
        self.push(Relationship {
            id: id.clone(),
            type_: type_.to_string(),
            target: target.to_string(),
            target_mode: None,
        })?;
        Ok(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Relationship> {
        let idx = self.rels.iter().position(|rel| rel.id == id)?;
        Some(self.rels.remove(idx))
    }

    pub fn to_xml(&self) -> Vec<u8> {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push_str("\n<Relationships");
        push_attr(&mut xml, "xmlns", RELATIONSHIPS_NS);
        xml.push('>');
        for rel in &self.rels {
            xml.push_str("<Relationship");
            push_attr(&mut xml, "Id", &rel.id);
            push_attr(&mut xml, "Type", &rel.type_);
            push_attr(&mut xml, "Target", &rel.target);
            if let Some(mode) = &rel.target_mode {
                push_attr(&mut xml, "TargetMode", mode);
            }
            xml.push_str("/>");
        }
        xml.push_str("</Relationships>");
        xml.into_bytes()
    }

    /// Parse a `.rels` part. Entries missing `Id`, `Type` or `Target` are skipped; duplicate ids
    /// are an error.
    pub fn from_xml(xml: &[u8]) -> Result<Self, XlsxError> {
        let mut reader = Reader::from_reader(Cursor::new(xml));
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();
        let mut relationships = Relationships::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(start) | Event::Empty(start) => {
                    if local_name(start.name().as_ref()).eq_ignore_ascii_case(b"Relationship") {
                        let mut id = None;
                        let mut target = None;
                        let mut type_ = None;
                        let mut target_mode = None;
                        for attr in start.attributes() {
                            let attr = attr?;
                            let key = local_name(attr.key.as_ref());
                            let value = attr.unescape_value()?.into_owned();
                            if key.eq_ignore_ascii_case(b"Id") {
                                id = Some(value);
                            } else if key.eq_ignore_ascii_case(b"Target") {
                                target = Some(value);
                            } else if key.eq_ignore_ascii_case(b"Type") {
                                type_ = Some(value);
                            } else if key.eq_ignore_ascii_case(b"TargetMode") {
                                target_mode = Some(value);
                            }
                        }
                        match (id, target, type_) {
                            (Some(id), Some(target), Some(type_)) => {
                                relationships.push(Relationship {
                                    id,
                                    type_,
                                    target,
                                    target_mode,
                                })?;
                            }
                            _ => log::debug!("skipping incomplete <Relationship> entry"),
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(relationships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generated_ids_follow_the_largest_existing_id() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add_relationship("../charts/chart1.xml", REL_TYPE_CHART).unwrap(), "rId1");
        rels.push(Relationship {
            id: "rId7".to_string(),
            type_: REL_TYPE_CHART.to_string(),
            target: "../charts/chart7.xml".to_string(),
            target_mode: None,
        })
        .unwrap();
        rels.push(Relationship {
            id: "custom".to_string(),
            type_: REL_TYPE_CHART.to_string(),
            target: "../charts/chart8.xml".to_string(),
            target_mode: None,
        })
        .unwrap();

        assert_eq!(rels.add_relationship("../charts/chart2.xml", REL_TYPE_CHART).unwrap(), "rId8");
        assert_eq!(rels.target_for("rId8"), Some("../charts/chart2.xml"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut rels = Relationships::new();
        rels.add_relationship("a.xml", REL_TYPE_CHART).unwrap();
        let err = rels
            .push(Relationship {
                id: "rId1".to_string(),
                type_: REL_TYPE_CHART.to_string(),
                target: "b.xml".to_string(),
                target_mode: None,
            })
            .unwrap_err();
        assert!(matches!(err, XlsxError::DuplicateRelationshipId(id) if id == "rId1"));
        assert_eq!(rels.len(), 1);
    }

    #[test]
    fn id_overflow_is_reported() {
        let mut rels = Relationships::new();
        rels.push(Relationship {
            id: format!("rId{}", u32::MAX),
            type_: REL_TYPE_CHART.to_string(),
            target: "a.xml".to_string(),
            target_mode: None,
        })
        .unwrap();

        assert!(matches!(
            rels.add_relationship("b.xml", REL_TYPE_CHART),
            Err(XlsxError::RelationshipIdOverflow)
        ));
        assert_eq!(rels.len(), 1);
    }

    #[test]
    fn xml_round_trip() {
        let mut rels = Relationships::new();
        rels.add_relationship("../charts/chart1.xml", REL_TYPE_CHART)
            .unwrap();
        rels.push(Relationship {
            id: "rId5".to_string(),
            type_: "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink"
                .to_string(),
            target: "https://example.com/?a=1&b=2".to_string(),
            target_mode: Some("External".to_string()),
        })
        .unwrap();

        let parsed = Relationships::from_xml(&rels.to_xml()).unwrap();
        assert_eq!(parsed, rels);
    }

    #[test]
    fn parses_prefixed_relationships_and_skips_incomplete_entries() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<pr:Relationships xmlns:pr="http://schemas.openxmlformats.org/package/2006/relationships">
  <pr:Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart" Target="../charts/chart1.xml"/>
  <pr:Relationship Id="rId2" Target="../charts/chart2.xml"/>
</pr:Relationships>"#;

        let rels = Relationships::from_xml(xml).unwrap();
        assert_eq!(rels.len(), 1);
        assert_eq!(rels.target_for("rId1"), Some("../charts/chart1.xml"));
        assert_eq!(rels.next_r_id().unwrap(), "rId2");
    }
}
