/// Parser of the main `word/document.xml` part into the mutable document model.
///
/// Only the structure that text editing needs is interpreted: body
/// paragraphs and tables, rows, cells, runs and run text. Everything else
/// (properties, section settings, drawings, fields, bookmarks, nested tables)
/// is captured as verbatim source and written back byte-for-byte.
use crate::common::xml::{resolve_entity, unescape_xml};
use crate::ooxml::docx::writer::{
    BodyElement, CellElement, MutableCell, MutableDocument, MutableParagraph, MutableRow,
    MutableRun, MutableTable, ParagraphElement, RowElement, RunContent, TableElement,
};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

/// A child node of an element, borrowed from the source text.
enum Node<'a> {
    Element(Element<'a>),
    /// Comments, processing instructions, CDATA or stray text
    Other(&'a str),
}

struct Element<'a> {
    /// Local name (`p` for `<w:p>`)
    local: &'a str,
    /// The start tag as written; for empty elements, `<x .../>` rewritten as `<x ...>`
    open_tag: String,
    /// Content between the tags, `None` for empty elements
    inner: Option<&'a str>,
    /// The whole element
    raw: &'a str,
}

/// Local name of the element a raw tag opens.
fn tag_local_name(tag: &str) -> &str {
    let qname = tag
        .trim_start_matches('<')
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()
        .unwrap_or_default();
    qname.rsplit(':').next().unwrap_or(qname)
}

/// Turn `<w:p w:x="1"/>` into `<w:p w:x="1">`.
fn as_start_tag(raw: &str) -> String {
    let body = raw.trim_end_matches('>').trim_end_matches('/').trim_end();
    format!("{body}>")
}

/// Split the content of an element into its child nodes.
///
/// Whitespace between elements is dropped.
fn children(xml: &str) -> Result<Vec<Node<'_>>> {
    let mut reader = Reader::from_str(xml);
    let mut nodes = Vec::new();

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) => {
                let open_end = reader.buffer_position() as usize;
                let span = reader.read_to_end(e.name())?;
                let end = reader.buffer_position() as usize;
                let open_tag = &xml[start..open_end];
                nodes.push(Node::Element(Element {
                    local: tag_local_name(open_tag),
                    open_tag: open_tag.to_string(),
                    inner: Some(&xml[span.start as usize..span.end as usize]),
                    raw: &xml[start..end],
                }));
            },
            Event::Empty(_) => {
                let end = reader.buffer_position() as usize;
                let raw = &xml[start..end];
                nodes.push(Node::Element(Element {
                    local: tag_local_name(raw),
                    open_tag: as_start_tag(raw),
                    inner: None,
                    raw,
                }));
            },
            Event::End(e) => {
                return Err(OoxmlError::Xml(format!(
                    "unexpected closing tag </{}>",
                    String::from_utf8_lossy(e.name().as_ref())
                )));
            },
            Event::Eof => break,
            Event::Text(_) => {
                let end = reader.buffer_position() as usize;
                let text = &xml[start..end];
                if !text.trim().is_empty() {
                    nodes.push(Node::Other(text));
                }
            },
            _ => {
                let end = reader.buffer_position() as usize;
                nodes.push(Node::Other(&xml[start..end]));
            },
        }
    }

    Ok(nodes)
}

/// Value of the attribute with the given local name on the element `raw` opens.
fn attribute_value(raw: &str, local_key: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_str(raw);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                for attr in e.attributes() {
                    let attr = attr?;
                    if attr.key.local_name().as_ref() == local_key {
                        let value = std::str::from_utf8(&attr.value)?;
                        return Ok(Some(unescape_xml(value)));
                    }
                }
                return Ok(None);
            },
            Event::Eof => return Ok(None),
            _ => {},
        }
    }
}

/// `w:val` of the first child named `local` inside a properties element.
fn child_val(properties: &Element<'_>, local: &str) -> Result<Option<String>> {
    let Some(inner) = properties.inner else {
        return Ok(None);
    };
    for node in children(inner)? {
        if let Node::Element(child) = node
            && child.local == local
        {
            return attribute_value(child.raw, b"val");
        }
    }
    Ok(None)
}

/// Decode character data: predefined and numeric entities, CDATA sections.
fn decode_text(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix("<![CDATA[") {
        return rest.trim_end_matches("]]>").to_string();
    }
    if memchr::memchr(b'&', raw.as_bytes()).is_none() {
        return raw.to_string();
    }

    let mut text = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = memchr::memchr(b'&', rest.as_bytes()) {
        text.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = memchr::memchr(b';', tail.as_bytes()) else {
            text.push_str(tail);
            return text;
        };
        match resolve_entity(&tail[1..semi]) {
            Some(ch) => text.push(ch),
            None => text.push_str(&tail[..=semi]),
        }
        rest = &tail[semi + 1..];
    }
    text.push_str(rest);
    text
}

fn parse_run(element: &Element<'_>) -> Result<MutableRun> {
    let mut run = MutableRun::new();
    run.open_tag = Some(element.open_tag.clone());
    let Some(inner) = element.inner else {
        return Ok(run);
    };

    for node in children(inner)? {
        let child = match node {
            Node::Element(child) => child,
            Node::Other(source) => {
                run.content.push(RunContent::Raw(source.to_string()));
                continue;
            },
        };
        let item = match child.local {
            "rPr" if run.properties.verbatim.is_none() && run.content.is_empty() => {
                run.properties.verbatim = Some(child.raw.to_string());
                continue;
            },
            "t" => RunContent::Text(child.inner.map(decode_text).unwrap_or_default()),
            "tab" => RunContent::Tab,
            "ptab" => RunContent::PositionalTab(child.raw.to_string()),
            "noBreakHyphen" if child.inner.is_none() => RunContent::NoBreakHyphen,
            "cr" => RunContent::Break,
            "br" => {
                let kind = attribute_value(child.raw, b"type")?;
                let clear = attribute_value(child.raw, b"clear")?;
                match (kind.as_deref(), clear) {
                    (None | Some("textWrapping"), None) => RunContent::Break,
                    (Some("page"), None) => RunContent::PageBreak,
                    _ => RunContent::Raw(child.raw.to_string()),
                }
            },
            _ => RunContent::Raw(child.raw.to_string()),
        };
        run.content.push(item);
    }
    Ok(run)
}

fn parse_paragraph(element: &Element<'_>) -> Result<MutableParagraph> {
    let mut paragraph = MutableParagraph::new();
    paragraph.open_tag = Some(element.open_tag.clone());
    let Some(inner) = element.inner else {
        return Ok(paragraph);
    };

    for node in children(inner)? {
        match node {
            Node::Element(child)
                if child.local == "pPr"
                    && paragraph.elements.is_empty()
                    && paragraph.properties.verbatim.is_none() =>
            {
                paragraph.properties.style = child_val(&child, "pStyle")?;
                paragraph.properties.verbatim = Some(child.raw.to_string());
            },
            Node::Element(child) if child.local == "r" => {
                paragraph
                    .elements
                    .push(ParagraphElement::Run(parse_run(&child)?));
            },
            Node::Element(child) => {
                paragraph
                    .elements
                    .push(ParagraphElement::Raw(child.raw.to_string()));
            },
            Node::Other(source) => {
                paragraph
                    .elements
                    .push(ParagraphElement::Raw(source.to_string()));
            },
        }
    }
    Ok(paragraph)
}

fn parse_cell(element: &Element<'_>) -> Result<MutableCell> {
    let mut cell = MutableCell::new(None);
    cell.open_tag = Some(element.open_tag.clone());
    cell.elements.clear();
    let Some(inner) = element.inner else {
        return Ok(cell);
    };

    for node in children(inner)? {
        match node {
            Node::Element(child) if child.local == "tcPr" && cell.elements.is_empty() => {
                cell.properties.verbatim = Some(child.raw.to_string());
            },
            Node::Element(child) if child.local == "p" => {
                cell.elements
                    .push(CellElement::Paragraph(parse_paragraph(&child)?));
            },
            Node::Element(Element { raw, .. }) | Node::Other(raw) => {
                cell.elements.push(CellElement::Raw(raw.to_string()));
            },
        }
    }
    Ok(cell)
}

fn parse_row(element: &Element<'_>) -> Result<MutableRow> {
    let mut row = MutableRow::new(0, None);
    row.open_tag = Some(element.open_tag.clone());
    let Some(inner) = element.inner else {
        return Ok(row);
    };

    for node in children(inner)? {
        match node {
            Node::Element(child) if child.local == "tc" => {
                row.elements.push(RowElement::Cell(parse_cell(&child)?));
            },
            Node::Element(Element { raw, .. }) | Node::Other(raw) => {
                row.elements.push(RowElement::Raw(raw.to_string()));
            },
        }
    }
    Ok(row)
}

fn parse_table(element: &Element<'_>) -> Result<MutableTable> {
    let mut table = MutableTable::new(0, 0);
    table.open_tag = Some(element.open_tag.clone());
    table.grid.clear();
    let Some(inner) = element.inner else {
        return Ok(table);
    };

    for node in children(inner)? {
        match node {
            Node::Element(child)
                if child.local == "tblPr" && table.properties.verbatim.is_none() =>
            {
                table.properties.style = child_val(&child, "tblStyle")?;
                table.properties.verbatim = Some(child.raw.to_string());
            },
            Node::Element(child) if child.local == "tr" => {
                table.elements.push(TableElement::Row(parse_row(&child)?));
            },
            Node::Element(Element { raw, .. }) | Node::Other(raw) => {
                table.elements.push(TableElement::Raw(raw.to_string()));
            },
        }
    }
    Ok(table)
}

fn parse_body(inner: &str) -> Result<Vec<BodyElement>> {
    let mut elements = Vec::new();
    for node in children(inner)? {
        let element = match node {
            Node::Element(child) if child.local == "p" => {
                BodyElement::Paragraph(parse_paragraph(&child)?)
            },
            Node::Element(child) if child.local == "tbl" => {
                BodyElement::Table(parse_table(&child)?)
            },
            Node::Element(Element { raw, .. }) | Node::Other(raw) => {
                BodyElement::Raw(raw.to_string())
            },
        };
        elements.push(element);
    }
    Ok(elements)
}

/// Parse the text of a `word/document.xml` part.
///
/// Everything before the body content (XML declaration, `<w:document>`
/// with its namespace declarations, `<w:body>`) and everything after it is
/// kept verbatim.
pub fn parse_document(xml: &str) -> Result<MutableDocument> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"body" => {
                let open_end = reader.buffer_position() as usize;
                let span = reader.read_to_end(e.name())?;
                let elements = parse_body(&xml[span.start as usize..span.end as usize])?;
                debug!(
                    elements = elements.len(),
                    raw = elements
                        .iter()
                        .filter(|e| matches!(e, BodyElement::Raw(_)))
                        .count(),
                    "parsed document body"
                );
                return Ok(MutableDocument::from_parts(
                    xml[..open_end].to_string(),
                    elements,
                    xml[span.end as usize..].to_string(),
                ));
            },
            Event::Empty(e) if e.local_name().as_ref() == b"body" => {
                let end = reader.buffer_position() as usize;
                let qname = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let preamble = format!("{}{}", &xml[..start], as_start_tag(&xml[start..end]));
                let postamble = format!("</{qname}>{}", &xml[end..]);
                return Ok(MutableDocument::from_parts(preamble, Vec::new(), postamble));
            },
            Event::Eof => {
                return Err(OoxmlError::InvalidFormat(
                    "document part has no w:body element".to_string(),
                ));
            },
            _ => {},
        }
    }
}

/// Load the mutable document from the main document part.
pub fn load(part: &dyn Part) -> Result<MutableDocument> {
    let xml = std::str::from_utf8(part.blob())?;
    parse_document(xml)
}
