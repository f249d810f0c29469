//! Read side of an OPC package.
//!
//! Parses `[Content_Types].xml`, the package relationships, and every part
//! reachable through the relationship graph.

use crate::common::xml::unescape_xml;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{BlobPart, Part};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::Relationships;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Content type lookup from `[Content_Types].xml` Default and Override entries.
#[derive(Debug, Default)]
pub(crate) struct ContentTypeMap {
    /// Lower-cased extension to content type
    defaults: HashMap<String, String>,

    /// Lower-cased partname to content type
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    pub(crate) fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let is_default = match e.local_name().as_ref() {
                        b"Default" => true,
                        b"Override" => false,
                        _ => {
                            buf.clear();
                            continue;
                        },
                    };

                    let mut key = None;
                    let mut content_type = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        let value = unescape_xml(std::str::from_utf8(&attr.value)?);
                        match attr.key.as_ref() {
                            b"Extension" | b"PartName" => key = Some(value),
                            b"ContentType" => content_type = Some(value),
                            _ => {},
                        }
                    }

                    if let (Some(key), Some(ct)) = (key, content_type) {
                        let target = if is_default {
                            &mut map.defaults
                        } else {
                            &mut map.overrides
                        };
                        target.insert(key.to_lowercase(), ct);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Content types parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Override first, then the default for the extension. Matching is case-insensitive.
    pub(crate) fn get(&self, pack_uri: &PackURI) -> Result<&str> {
        if let Some(ct) = self.overrides.get(&pack_uri.as_str().to_lowercase()) {
            return Ok(ct);
        }
        self.defaults
            .get(&pack_uri.ext().to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(pack_uri.to_string()))
    }
}

/// Parts and package relationships read from a serialized package.
pub struct PackageReader {
    pkg_rels: Relationships,

    /// Parts in archive order
    parts: Vec<BlobPart>,
}

impl PackageReader {
    /// Parse a package from its raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let mut phys = PhysPkgReader::from_bytes(data)?;
        let members = phys.read_all()?;
        Self::from_members(members)
    }

    fn from_members(members: Vec<(String, Vec<u8>)>) -> Result<Self> {
        let order: HashMap<String, usize> = members
            .iter()
            .enumerate()
            .map(|(idx, (name, _))| (name.clone(), idx))
            .collect();
        let mut cache: HashMap<String, Vec<u8>> = members.into_iter().collect();

        let ct_member = CONTENT_TYPES_URI.trim_start_matches('/');
        let content_types = cache
            .get(ct_member)
            .ok_or_else(|| OpcError::PartNotFound(CONTENT_TYPES_URI.to_string()))
            .and_then(|xml| ContentTypeMap::from_xml(xml))?;

        let package_uri = PackURI::new(PACKAGE_URI)?;
        let pkg_rels = Self::load_rels(&cache, &package_uri)?;

        let mut parts = Self::load_parts(&mut cache, &pkg_rels, &content_types)?;
        parts.sort_by_key(|part| {
            order
                .get(part.partname().membername())
                .copied()
                .unwrap_or(usize::MAX)
        });

        debug!(parts = parts.len(), "read OPC package");
        Ok(Self { pkg_rels, parts })
    }

    fn load_rels(cache: &HashMap<String, Vec<u8>>, source: &PackURI) -> Result<Relationships> {
        let rels_uri = source.rels_uri()?;
        match cache.get(rels_uri.membername()) {
            Some(xml) => Relationships::from_xml(source.base_uri(), xml),
            None => Ok(Relationships::new(source.base_uri())),
        }
    }

    /// Walk the relationship graph from the package relationships.
    fn load_parts(
        cache: &mut HashMap<String, Vec<u8>>,
        pkg_rels: &Relationships,
        content_types: &ContentTypeMap,
    ) -> Result<Vec<BlobPart>> {
        let mut parts = Vec::new();
        let mut visited = HashSet::new();
        let mut work_queue: Vec<PackURI> = Vec::new();

        let mut enqueue = |rels: &Relationships, queue: &mut Vec<PackURI>| -> Result<()> {
            for rel in rels.iter().filter(|rel| !rel.is_external()) {
                let partname = rels.target_partname(rel)?;
                if visited.insert(partname.clone()) {
                    queue.push(partname);
                }
            }
            Ok(())
        };

        enqueue(pkg_rels, &mut work_queue)?;

        while let Some(partname) = work_queue.pop() {
            let Some(blob) = cache.remove(partname.membername()) else {
                warn!(part = %partname, "relationship target missing from package");
                continue;
            };
            let rels = Self::load_rels(cache, &partname)?;
            enqueue(&rels, &mut work_queue)?;

            let content_type = content_types.get(&partname)?.to_string();
            parts.push(BlobPart::with_rels(partname, content_type, blob, rels));
        }

        Ok(parts)
    }

    /// Package-level relationships.
    pub fn pkg_rels(&self) -> &Relationships {
        &self.pkg_rels
    }

    /// Take ownership of the package relationships and parts.
    pub fn into_parts(self) -> (Relationships, Vec<BlobPart>) {
        (self.pkg_rels, self.parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_TYPES: &[u8] = br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="PNG" ContentType="image/png"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

    #[test]
    fn test_content_type_map() {
        let ct_map = ContentTypeMap::from_xml(CONTENT_TYPES).unwrap();

        let uri = PackURI::new("/test.xml").unwrap();
        assert_eq!(ct_map.get(&uri).unwrap(), "application/xml");

        let uri = PackURI::new("/word/document.xml").unwrap();
        assert!(ct_map.get(&uri).unwrap().ends_with("document.main+xml"));

        let uri = PackURI::new("/word/media/image1.png").unwrap();
        assert_eq!(ct_map.get(&uri).unwrap(), "image/png");

        let uri = PackURI::new("/word/fonts/font1.odttf").unwrap();
        assert!(matches!(ct_map.get(&uri), Err(OpcError::ContentTypeNotFound(_))));
    }

    #[test]
    fn test_walks_relationship_graph_in_archive_order() {
        let members = vec![
            ("[Content_Types].xml".to_string(), CONTENT_TYPES.to_vec()),
            (
                "_rels/.rels".to_string(),
                br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#.to_vec(),
            ),
            ("word/document.xml".to_string(), b"<w:document/>".to_vec()),
            (
                "word/_rels/document.xml.rels".to_string(),
                br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="urn:styles" Target="styles.xml"/></Relationships>"#.to_vec(),
            ),
            ("word/styles.xml".to_string(), b"<w:styles/>".to_vec()),
            ("orphan.xml".to_string(), b"<x/>".to_vec()),
        ];

        let reader = PackageReader::from_members(members).unwrap();
        assert_eq!(reader.pkg_rels().len(), 1);
        let (_, parts) = reader.into_parts();
        let names: Vec<&str> = parts.iter().map(|p| p.partname().as_str()).collect();
        assert_eq!(names, ["/word/document.xml", "/word/styles.xml"]);
        assert_eq!(parts[0].rels().len(), 1);
    }
}
