/// In-memory OPC package: parts plus package-level relationships.
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::path::Path;

/// An Open Packaging Convention package held entirely in memory.
///
/// Parts keep the order they had in the source archive, so a package that is
/// read and written back lists its members in the same sequence.
#[derive(Debug)]
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    parts: Vec<Box<dyn Part>>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI),
            parts: Vec::new(),
        }
    }

    /// Read and parse a package file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Parse a package from its raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let (rels, parts) = PackageReader::from_bytes(data)?.into_parts();
        Ok(Self {
            rels,
            parts: parts
                .into_iter()
                .map(|part| Box::new(part) as Box<dyn Part>)
                .collect(),
        })
    }

    /// Partname of the main document part (the officeDocument relationship target).
    pub fn main_document_partname(&self) -> Result<PackURI> {
        let rel = self
            .rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?;
        self.rels.target_partname(rel)
    }

    /// The main document part, e.g. `/word/document.xml`.
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        let partname = self.main_document_partname()?;
        self.get_part(&partname)
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .iter()
            .find(|part| part.partname() == partname)
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get a mutable reference to a part by its partname.
    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        self.parts
            .iter_mut()
            .find(|part| part.partname() == partname)
            .map(|b| &mut **b as &mut dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Add a part, replacing any existing part with the same partname in place.
    pub fn add_part(&mut self, part: Box<dyn Part>) {
        match self
            .parts
            .iter()
            .position(|p| p.partname() == part.partname())
        {
            Some(idx) => self.parts[idx] = part,
            None => self.parts.push(part),
        }
    }

    /// Parts in package order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.iter().map(|b| &**b as &dyn Part)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Get a reference to the package-level relationships.
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Relate the package to a part and return the relationship ID.
    pub fn relate_to(&mut self, partname: &PackURI, reltype: &str) -> String {
        self.rels.get_or_add(reltype, partname).r_id().to_string()
    }

    /// Serialize the package into ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
