//! Relationship-related objects for OPC packages.
//!
//! Relationships connect a source (the package or a part) to a target part
//! or an external URL. They are serialized in `.rels` parts.

use crate::common::xml::{escape_xml, unescape_xml};
use crate::ooxml::opc::constants::{namespace, target_mode};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use quick_xml::Reader;
use quick_xml::events::Event;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference, relative to the source's base URI, or an external URL
    target_ref: String,

    is_external: bool,
}

impl Relationship {
    pub fn new(r_id: String, reltype: String, target_ref: String, is_external: bool) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }
}

/// Relationships from a single source, in document order.
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create an empty collection whose targets resolve against `base_uri`.
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: Vec::new(),
        }
    }

    /// Parse a `.rels` part.
    pub fn from_xml(base_uri: impl Into<String>, xml: &[u8]) -> Result<Self> {
        let mut rels = Self::new(base_uri);
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = None;
                    let mut target_ref = None;
                    let mut is_external = false;

                    for attr in e.attributes() {
                        let attr = attr?;
                        let value = unescape_xml(std::str::from_utf8(&attr.value)?);
                        match attr.key.as_ref() {
                            b"Id" => r_id = Some(value),
                            b"Type" => reltype = Some(value),
                            b"Target" => target_ref = Some(value),
                            b"TargetMode" => is_external = value == target_mode::EXTERNAL,
                            _ => {},
                        }
                    }

                    match (r_id, reltype, target_ref) {
                        (Some(r_id), Some(reltype), Some(target_ref)) => {
                            rels.add_relationship(reltype, target_ref, r_id, is_external);
                        },
                        _ => {
                            return Err(OpcError::XmlError(
                                "Relationship element missing Id, Type or Target".to_string(),
                            ));
                        },
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Relationships parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(rels)
    }

    #[inline]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Add a relationship, replacing any existing one with the same rId.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) -> &Relationship {
        let rel = Relationship::new(r_id, reltype, target_ref, is_external);
        let idx = match self.rels.iter().position(|r| r.r_id == rel.r_id) {
            Some(idx) => {
                self.rels[idx] = rel;
                idx
            },
            None => {
                self.rels.push(rel);
                self.rels.len() - 1
            },
        };
        &self.rels[idx]
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|r| r.r_id == r_id)
    }

    /// Return the internal relationship of `reltype` to `target`, creating it if missing.
    pub fn get_or_add(&mut self, reltype: &str, target: &PackURI) -> &Relationship {
        let target_ref = target.relative_ref(&self.base_uri);
        if let Some(idx) = self.rels.iter().position(|rel| {
            rel.reltype == reltype && rel.target_ref == target_ref && !rel.is_external
        }) {
            return &self.rels[idx];
        }

        let r_id = self.next_r_id();
        self.add_relationship(reltype.to_string(), target_ref, r_id, false)
    }

    /// Lowest unused "rIdN", filling gaps first.
    fn next_r_id(&self) -> String {
        let mut used: Vec<u32> = self
            .rels
            .iter()
            .filter_map(|rel| {
                rel.r_id
                    .strip_prefix("rId")
                    .and_then(|n| atoi_simd::parse::<u32, false, false>(n.as_bytes()).ok())
            })
            .collect();
        used.sort_unstable();

        let mut next_num = 1u32;
        for &num in &used {
            match num.cmp(&next_num) {
                std::cmp::Ordering::Equal => next_num += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {},
            }
        }

        format!("rId{}", next_num)
    }

    /// The single relationship of `reltype`.
    ///
    /// Fails if there is none, or if more than one exists.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.rels.iter().filter(|rel| rel.reltype == reltype);
        match (matching.next(), matching.next()) {
            (Some(rel), None) => Ok(rel),
            (None, _) => Err(OpcError::RelationshipNotFound(format!(
                "No relationship of type '{}'",
                reltype
            ))),
            (Some(_), Some(_)) => Err(OpcError::RelationshipNotFound(format!(
                "Multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    /// Absolute part name targeted by an internal relationship.
    pub fn target_partname(&self, rel: &Relationship) -> Result<PackURI> {
        if rel.is_external {
            return Err(OpcError::InvalidPackUri(format!(
                "{} targets an external resource",
                rel.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &rel.target_ref)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize to the XML of a `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Relationships xmlns=""#);
        xml.push_str(namespace::OPC_RELATIONSHIPS);
        xml.push_str(r#"">"#);

        for rel in &self.rels {
            let mode = if rel.is_external {
                r#" TargetMode="External""#
            } else {
                ""
            };
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape_xml(&rel.r_id),
                escape_xml(&rel.reltype),
                escape_xml(&rel.target_ref),
                mode
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[test]
    fn test_next_r_id_fills_gaps() {
        let mut rels = Relationships::new("/word");
        assert_eq!(rels.next_r_id(), "rId1");

        rels.add_relationship("t".to_string(), "a.xml".to_string(), "rId1".to_string(), false);
        rels.add_relationship("t".to_string(), "b.xml".to_string(), "rId3".to_string(), false);
        assert_eq!(rels.next_r_id(), "rId2");
    }

    #[test]
    fn test_next_r_id_skips_non_numeric_ids() {
        let mut rels = Relationships::new("/word");
        rels.add_relationship("t".to_string(), "a.xml".to_string(), "rId1".to_string(), false);
        rels.add_relationship("t".to_string(), "b.xml".to_string(), "rIdX".to_string(), false);
        rels.add_relationship("t".to_string(), "c.xml".to_string(), "rId2".to_string(), false);
        assert_eq!(rels.next_r_id(), "rId3");
    }

    #[test]
    fn test_get_or_add_reuses_existing() {
        let mut rels = Relationships::new("/word");
        let styles = PackURI::new("/word/styles.xml").unwrap();

        let first = rels.get_or_add(rt::STYLES, &styles).r_id().to_string();
        let second = rels.get_or_add(rt::STYLES, &styles).r_id().to_string();
        assert_eq!(first, "rId1");
        assert_eq!(first, second);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels.get("rId1").unwrap().target_ref(), "styles.xml");
    }

    #[test]
    fn test_xml_round_trip_keeps_order_and_mode() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId2" Type="http://x/hyperlink" Target="https://a.example/?q=1&amp;b=2" TargetMode="External"/>
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;
        let rels = Relationships::from_xml("/word", xml).unwrap();
        let ids: Vec<&str> = rels.iter().map(|r| r.r_id()).collect();
        assert_eq!(ids, ["rId2", "rId1"]);

        let link = rels.get("rId2").unwrap();
        assert!(link.is_external());
        assert_eq!(link.target_ref(), "https://a.example/?q=1&b=2");
        assert!(rels.target_partname(link).is_err());

        let styles = rels.part_with_reltype(rt::STYLES).unwrap();
        assert_eq!(rels.target_partname(styles).unwrap().as_str(), "/word/styles.xml");

        let out = rels.to_xml();
        assert!(out.contains(r#"Target="https://a.example/?q=1&amp;b=2" TargetMode="External""#));
        let reparsed = Relationships::from_xml("/word", out.as_bytes()).unwrap();
        assert_eq!(reparsed.len(), 2);
    }
}
