//! Physical (ZIP) layer of an OPC package.
//!
//! Reading decompresses every member into memory up front; writing builds
//! the archive in memory so the caller decides when and where bytes hit disk.

use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Cursor, Read, Write};
use zip::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Reads members of a ZIP-based OPC package.
pub struct PhysPkgReader {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl PhysPkgReader {
    /// Open a package from its raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Open a package from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Number of members, directory entries included.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Decompress every file member, in archive order.
    pub fn read_all(&mut self) -> Result<Vec<(String, Vec<u8>)>> {
        let mut members = Vec::with_capacity(self.archive.len());
        for idx in 0..self.archive.len() {
            let mut file = self.archive.by_index(idx)?;
            if file.is_dir() {
                continue;
            }
            let mut blob = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut blob)?;
            members.push((file.name().to_string(), blob));
        }
        Ok(members)
    }
}

/// Writes members of a ZIP-based OPC package into memory.
pub struct PhysPkgWriter {
    zip_writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            zip_writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Add a member for `pack_uri` with deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip_writer
            .start_file(pack_uri.membername(), options)?;
        self.zip_writer.write_all(blob)?;
        Ok(())
    }

    /// Finalize the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.zip_writer.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_members() {
        let mut writer = PhysPkgWriter::new();
        writer
            .write(&PackURI::new("/word/document.xml").unwrap(), b"<doc/>")
            .unwrap();
        writer
            .write(&PackURI::new("/_rels/.rels").unwrap(), b"<rels/>")
            .unwrap();
        let bytes = writer.finish().unwrap();

        let mut reader = PhysPkgReader::from_bytes(bytes).unwrap();
        assert_eq!(reader.len(), 2);
        let members = reader.read_all().unwrap();
        assert_eq!(members[0].0, "word/document.xml");
        assert_eq!(members[0].1, b"<doc/>");
        assert_eq!(members[1].0, "_rels/.rels");
    }

    #[test]
    fn test_rejects_non_zip() {
        assert!(PhysPkgReader::from_bytes(b"plain text, not a package".to_vec()).is_err());
    }
}
