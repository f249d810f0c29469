/// Package implementation for Word documents.
use crate::ooxml::docx::parts::document_part;
use crate::ooxml::docx::writer::{
    BulletList, CoreProperties, MutableDocument, MutableStyle, generate_numbering_xml,
    generate_styles_xml,
};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{BlobPart, OpcPackage, PackURI, Part};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// A Word (.docx) package.
///
/// Wraps an OPC package together with the editable model of its main
/// document part. Every other part is carried through unchanged.
///
/// # Examples
///
/// ```rust,no_run
/// use transferdoc::ooxml::docx::Package;
///
/// let mut pkg = Package::open("Transferencia_Tecnologica_20240101.docx")?;
/// println!("{} paragraphs", pkg.document().paragraph_count());
/// pkg.save("copia.docx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
    /// Partname of the main document part
    main_partname: PackURI,
    document: MutableDocument,
}

impl Package {
    /// Open a .docx package from a file path.
    ///
    /// The file is read fully into memory and never written to.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        let pkg = Self::from_bytes(data)?;
        debug!(
            path = %path.as_ref().display(),
            parts = pkg.opc.part_count(),
            "opened docx package"
        );
        Ok(pkg)
    }

    /// Parse a .docx package from its bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let opc = OpcPackage::from_bytes(data)?;

        // Verify it's a Word document by checking the main part's content type
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main document part: {e}")))?;

        let content_type = main_part.content_type();
        if content_type != ct::WML_DOCUMENT_MAIN {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::WML_DOCUMENT_MAIN.to_string(),
                got: content_type.to_string(),
            });
        }

        let main_partname = main_part.partname().clone();
        let document = document_part::load(main_part)?;
        Ok(Self {
            opc,
            main_partname,
            document,
        })
    }

    /// Assemble a new package around a document built in memory.
    ///
    /// Writes the main document, styles, numbering and core-properties parts
    /// and relates them the way Word does.
    pub fn from_document(
        document: MutableDocument,
        styles: &[MutableStyle],
        lists: &[BulletList],
        core: &CoreProperties,
    ) -> Result<Self> {
        let main_partname = PackURI::new("/word/document.xml")?;
        let styles_partname = PackURI::new("/word/styles.xml")?;
        let numbering_partname = PackURI::new("/word/numbering.xml")?;
        let core_partname = PackURI::new("/docProps/core.xml")?;

        let mut main_part = BlobPart::new(
            main_partname.clone(),
            ct::WML_DOCUMENT_MAIN,
            document.to_xml()?.into_bytes(),
        );
        main_part.relate_to(&styles_partname, rt::STYLES);
        main_part.relate_to(&numbering_partname, rt::NUMBERING);

        let mut opc = OpcPackage::new();
        opc.relate_to(&main_partname, rt::OFFICE_DOCUMENT);
        opc.relate_to(&core_partname, rt::CORE_PROPERTIES);
        opc.add_part(Box::new(main_part));
        opc.add_part(Box::new(BlobPart::new(
            styles_partname,
            ct::WML_STYLES,
            generate_styles_xml(styles)?.into_bytes(),
        )));
        opc.add_part(Box::new(BlobPart::new(
            numbering_partname,
            ct::WML_NUMBERING,
            generate_numbering_xml(lists)?.into_bytes(),
        )));
        opc.add_part(Box::new(BlobPart::new(
            core_partname,
            ct::OPC_CORE_PROPERTIES,
            core.to_xml().into_bytes(),
        )));

        Ok(Self {
            opc,
            main_partname,
            document,
        })
    }

    /// The main document.
    #[inline]
    pub fn document(&self) -> &MutableDocument {
        &self.document
    }

    /// Mutable access to the main document.
    #[inline]
    pub fn document_mut(&mut self) -> &mut MutableDocument {
        &mut self.document
    }

    /// Get the underlying OPC package.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }

    /// Serialize the package, writing the current document model into the
    /// main document part first.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let xml = self.document.to_xml()?;
        self.opc
            .get_part_mut(&self.main_partname)?
            .set_blob(xml.into_bytes());
        Ok(self.opc.to_bytes()?)
    }

    /// Save the package to `path`.
    ///
    /// The package is serialized in memory, written to a temporary file in
    /// the destination directory and renamed into place, so a failure never
    /// leaves a partial file at `path`.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".transferdoc-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| OoxmlError::Io(e.error))?;

        debug!(path = %path.display(), bytes = bytes.len(), "saved docx package");
        Ok(())
    }
}
