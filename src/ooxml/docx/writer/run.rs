/// Run types and implementation for DOCX documents.
use crate::common::xml::{escape_text, escape_xml};
use crate::ooxml::error::Result;
use smallvec::SmallVec;
use std::fmt::Write as FmtWrite;

/// A single content item inside a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunContent {
    /// Plain text (`<w:t>`)
    Text(String),
    /// Tab character (`<w:tab/>`)
    Tab,
    /// Line break (`<w:br/>`, `<w:cr/>`)
    Break,
    /// Non-breaking hyphen (`<w:noBreakHyphen/>`), read as `'-'`
    NoBreakHyphen,
    /// Absolute position tab (`<w:ptab .../>`), read as `'\t'`; keeps its source
    PositionalTab(String),
    /// Page break (`<w:br w:type="page"/>`)
    PageBreak,
    /// Markup the model does not interpret (drawings, field characters, ...), kept verbatim
    Raw(String),
}

impl RunContent {
    /// Whether this item contributes to the run's visible text.
    fn is_textual(&self) -> bool {
        !matches!(self, Self::PageBreak | Self::Raw(_))
    }

    /// Text this item reads as.
    fn as_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Tab | Self::PositionalTab(_) => "\t",
            Self::Break => "\n",
            Self::NoBreakHyphen => "-",
            Self::PageBreak | Self::Raw(_) => "",
        }
    }
}

/// The bytes `from..to` of a textual item, as content items.
///
/// Single-character items survive only when kept whole.
fn slice_item(item: &RunContent, from: usize, to: usize) -> SmallVec<[RunContent; 2]> {
    match item {
        RunContent::Text(s) => content_from_text(&s[from..to]),
        _ if from == 0 && to == item.as_text().len() && to > 0 => {
            let mut items = SmallVec::new();
            items.push(item.clone());
            items
        },
        _ => SmallVec::new(),
    }
}

/// Length of the common prefix of `a` and `b`, on a char boundary.
fn common_prefix(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map_or_else(|| a.len().min(b.len()), |((idx, _), _)| idx)
}

/// Length of the common suffix of `a` and `b`, on a char boundary.
fn common_suffix(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// Split text into run content items: `'\t'` becomes a tab, `'\n'` and `'\r'` a line break.
fn content_from_text(text: &str) -> SmallVec<[RunContent; 2]> {
    let mut items = SmallVec::new();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        let item = match ch {
            '\t' => RunContent::Tab,
            '\n' | '\r' => RunContent::Break,
            _ => continue,
        };
        if idx > start {
            items.push(RunContent::Text(text[start..idx].to_string()));
        }
        items.push(item);
        start = idx + 1;
    }
    if start < text.len() {
        items.push(RunContent::Text(text[start..].to_string()));
    }
    items
}

/// A mutable run.
///
/// Runs contain text and character formatting. A run loaded from an existing
/// document keeps its start tag and its `w:rPr` source verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableRun {
    /// Original `<w:r ...>` start tag
    pub(crate) open_tag: Option<String>,
    /// Run content
    pub(crate) content: SmallVec<[RunContent; 2]>,
    /// Run properties
    pub(crate) properties: RunProperties,
}

impl MutableRun {
    pub(crate) fn new() -> Self {
        Self {
            open_tag: None,
            content: SmallVec::new(),
            properties: RunProperties::default(),
        }
    }

    /// Create a run holding the given text.
    pub fn with_text(text: &str) -> Self {
        let mut run = Self::new();
        run.set_text(text);
        run
    }

    /// The visible text of the run.
    ///
    /// Tabs read as `'\t'`, line breaks as `'\n'` and non-breaking hyphens
    /// as `'-'`; page breaks and uninterpreted markup contribute nothing.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for item in &self.content {
            text.push_str(item.as_text());
        }
        text
    }

    /// Replace the text of the run.
    ///
    /// Only the span that differs from the current text is rewritten: items
    /// before and after it are kept as they are, and page breaks or
    /// uninterpreted markup never move. Newly written text goes into the
    /// first item the span touches (`'\t'` as a tab, `'\n'`/`'\r'` as a
    /// break). Run properties are never touched.
    pub fn set_text(&mut self, text: &str) {
        let old = self.text();
        if old == text {
            return;
        }
        let start = common_prefix(&old, text);
        let suffix = common_suffix(&old[start..], &text[start..]);
        let end = old.len() - suffix;
        let middle = &text[start..text.len() - suffix];

        if !self.content.iter().any(RunContent::is_textual) {
            self.content.extend(content_from_text(middle));
            return;
        }

        let mut content = SmallVec::with_capacity(self.content.len() + 1);
        let mut offset = 0;
        let mut written = false;
        for item in self.content.drain(..) {
            if !item.is_textual() {
                content.push(item);
                continue;
            }
            let len = item.as_text().len();
            let (a, b) = (offset, offset + len);
            offset = b;

            let overlaps = a < end && b > start;
            let anchor = !written && (overlaps || (start == end && b >= start));
            if !anchor && !overlaps {
                content.push(item);
                continue;
            }

            let head = start.saturating_sub(a).min(len);
            let tail = end.saturating_sub(a).min(len);
            if anchor {
                written = true;
                if let RunContent::Text(s) = &item {
                    let joined = format!("{}{middle}{}", &s[..head], &s[tail..]);
                    content.extend(content_from_text(&joined));
                    continue;
                }
                content.extend(slice_item(&item, 0, head));
                content.extend(content_from_text(middle));
            } else {
                content.extend(slice_item(&item, 0, head));
            }
            content.extend(slice_item(&item, tail, len));
        }
        self.content = content;
    }

    /// Content items in document order.
    pub fn content(&self) -> &[RunContent] {
        &self.content
    }

    /// Whether the run carries formatting of its own.
    pub fn has_properties(&self) -> bool {
        self.properties.has_properties()
    }

    /// Make the text bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        self.properties.verbatim = None;
        self.properties.bold = Some(bold);
        self
    }

    /// Make the text italic.
    pub fn italic(&mut self, italic: bool) -> &mut Self {
        self.properties.verbatim = None;
        self.properties.italic = Some(italic);
        self
    }

    /// Set font size in half-points (e.g., 24 = 12pt).
    pub fn font_size(&mut self, size: u32) -> &mut Self {
        self.properties.verbatim = None;
        self.properties.font_size = Some(size);
        self
    }

    /// Set font name.
    pub fn font_name(&mut self, name: &str) -> &mut Self {
        self.properties.verbatim = None;
        self.properties.font_name = Some(name.to_string());
        self
    }

    /// Set text color using hex RGB (e.g., "2E5495").
    pub fn color(&mut self, color: &str) -> &mut Self {
        self.properties.verbatim = None;
        self.properties.color = Some(color.to_string());
        self
    }

    /// Append a page break.
    pub fn add_page_break(&mut self) -> &mut Self {
        self.content.push(RunContent::PageBreak);
        self
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        match self.open_tag {
            Some(ref tag) => xml.push_str(tag),
            None => xml.push_str("<w:r>"),
        }

        self.properties.to_xml(xml)?;

        for item in &self.content {
            match item {
                RunContent::Text(text) if !text.is_empty() => {
                    write!(
                        xml,
                        "<w:t xml:space=\"preserve\">{}</w:t>",
                        escape_text(text)
                    )?;
                },
                RunContent::Text(_) => {},
                RunContent::Tab => xml.push_str("<w:tab/>"),
                RunContent::Break => xml.push_str("<w:br/>"),
                RunContent::NoBreakHyphen => xml.push_str("<w:noBreakHyphen/>"),
                RunContent::PageBreak => xml.push_str("<w:br w:type=\"page\"/>"),
                RunContent::PositionalTab(source) | RunContent::Raw(source) => {
                    xml.push_str(source)
                },
            }
        }

        xml.push_str("</w:r>");
        Ok(())
    }
}

/// Run properties.
///
/// `verbatim` holds the `w:rPr` element of a loaded run; when present it is
/// written back unchanged and the typed fields are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RunProperties {
    pub(crate) bold: Option<bool>,
    pub(crate) italic: Option<bool>,
    pub(crate) font_size: Option<u32>,
    pub(crate) font_name: Option<String>,
    pub(crate) color: Option<String>,
    pub(crate) verbatim: Option<String>,
}

impl RunProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.verbatim.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.font_size.is_some()
            || self.font_name.is_some()
            || self.color.is_some()
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        if let Some(ref source) = self.verbatim {
            xml.push_str(source);
            return Ok(());
        }
        if !self.has_properties() {
            return Ok(());
        }

        xml.push_str("<w:rPr>");
        if let Some(ref font_name) = self.font_name {
            let font_name = escape_xml(font_name);
            write!(
                xml,
                "<w:rFonts w:ascii=\"{font_name}\" w:hAnsi=\"{font_name}\" w:cs=\"{font_name}\"/>"
            )?;
        }
        if let Some(bold) = self.bold {
            xml.push_str(if bold { "<w:b/>" } else { "<w:b w:val=\"0\"/>" });
        }
        if let Some(italic) = self.italic {
            xml.push_str(if italic { "<w:i/>" } else { "<w:i w:val=\"0\"/>" });
        }
        if let Some(ref color) = self.color {
            write!(xml, "<w:color w:val=\"{}\"/>", escape_xml(color))?;
        }
        if let Some(size) = self.font_size {
            write!(xml, "<w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>")?;
        }
        xml.push_str("</w:rPr>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(run: &MutableRun) -> String {
        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_text_maps_tabs_and_breaks() {
        let run = MutableRun::with_text("a\tb\nc");
        assert_eq!(run.text(), "a\tb\nc");
        assert_eq!(
            run.content(),
            &[
                RunContent::Text("a".into()),
                RunContent::Tab,
                RunContent::Text("b".into()),
                RunContent::Break,
                RunContent::Text("c".into()),
            ]
        );
    }

    #[test]
    fn test_set_text_keeps_properties_and_raw_content() {
        let mut run = MutableRun::new();
        run.properties.verbatim = Some("<w:rPr><w:b/></w:rPr>".into());
        run.content.push(RunContent::Raw("<w:lastRenderedPageBreak/>".into()));
        run.content.push(RunContent::Text("[IP-servidor]".into()));
        run.content.push(RunContent::PageBreak);

        run.set_text("192.168.1.100");

        assert_eq!(run.text(), "192.168.1.100");
        assert_eq!(run.content().len(), 3);
        assert_eq!(
            run.content()[0],
            RunContent::Raw("<w:lastRenderedPageBreak/>".into())
        );
        assert_eq!(run.content()[2], RunContent::PageBreak);
        assert_eq!(
            run.properties.verbatim.as_deref(),
            Some("<w:rPr><w:b/></w:rPr>")
        );
    }

    #[test]
    fn test_set_text_leaves_drawing_between_text_in_place() {
        let mut run = MutableRun::new();
        run.content.push(RunContent::Text("a".into()));
        run.content.push(RunContent::Raw("<w:drawing/>".into()));
        run.content.push(RunContent::Text("[x]".into()));

        run.set_text("aVALOR");

        assert_eq!(
            run.content(),
            &[
                RunContent::Text("a".into()),
                RunContent::Raw("<w:drawing/>".into()),
                RunContent::Text("VALOR".into()),
            ]
        );
    }

    #[test]
    fn test_set_text_keeps_rendered_page_break_marker() {
        let mut run = MutableRun::new();
        run.content.push(RunContent::Text("Servidor: ".into()));
        run.content.push(RunContent::Raw("<w:lastRenderedPageBreak/>".into()));
        run.content.push(RunContent::Text("[IP-servidor] activo".into()));

        run.set_text("Servidor: 192.168.1.100 activo");

        assert_eq!(run.text(), "Servidor: 192.168.1.100 activo");
        assert_eq!(run.content()[0], RunContent::Text("Servidor: ".into()));
        assert_eq!(
            run.content()[1],
            RunContent::Raw("<w:lastRenderedPageBreak/>".into())
        );
        assert_eq!(
            run.content()[2],
            RunContent::Text("192.168.1.100 activo".into())
        );
    }

    #[test]
    fn test_set_text_spanning_items_drops_covered_ones() {
        let mut run = MutableRun::new();
        run.content.push(RunContent::Text("[IP".into()));
        run.content.push(RunContent::NoBreakHyphen);
        run.content.push(RunContent::Text("servidor]:".into()));
        run.content.push(RunContent::Tab);
        run.content.push(RunContent::Text("22".into()));
        assert_eq!(run.text(), "[IP-servidor]:\t22");

        run.set_text("10.0.0.1:\t22");

        assert_eq!(run.text(), "10.0.0.1:\t22");
        assert_eq!(
            run.content(),
            &[
                RunContent::Text("10.0.0.1".into()),
                RunContent::Text(":".into()),
                RunContent::Tab,
                RunContent::Text("22".into()),
            ]
        );
    }

    #[test]
    fn test_set_text_appends_after_untouched_items() {
        let mut run = MutableRun::new();
        run.content.push(RunContent::Text("v1".into()));
        run.content.push(RunContent::Tab);

        run.set_text("v1\tfin");

        assert_eq!(
            run.content(),
            &[
                RunContent::Text("v1".into()),
                RunContent::Tab,
                RunContent::Text("fin".into()),
            ]
        );
    }

    #[test]
    fn test_hyphen_and_positional_tab_read_as_text() {
        let mut run = MutableRun::new();
        run.content.push(RunContent::Text("a".into()));
        run.content.push(RunContent::NoBreakHyphen);
        run.content.push(RunContent::PositionalTab(
            "<w:ptab w:relativeTo=\"margin\" w:alignment=\"right\" w:leader=\"none\"/>".into(),
        ));
        run.content.push(RunContent::Text("b".into()));
        assert_eq!(run.text(), "a-\tb");
        assert_eq!(
            render(&run),
            "<w:r><w:t xml:space=\"preserve\">a</w:t><w:noBreakHyphen/>\
             <w:ptab w:relativeTo=\"margin\" w:alignment=\"right\" w:leader=\"none\"/>\
             <w:t xml:space=\"preserve\">b</w:t></w:r>"
        );
    }

    #[test]
    fn test_carriage_return_becomes_break() {
        let run = MutableRun::with_text("a\rb");
        assert_eq!(
            run.content(),
            &[
                RunContent::Text("a".into()),
                RunContent::Break,
                RunContent::Text("b".into()),
            ]
        );
        assert_eq!(run.text(), "a\nb");
    }

    #[test]
    fn test_set_text_with_same_text_is_a_no_op() {
        let mut run = MutableRun::new();
        run.content.push(RunContent::Text("a".into()));
        run.content.push(RunContent::Text("b".into()));
        run.set_text("ab");
        assert_eq!(run.content().len(), 2);
    }

    #[test]
    fn test_set_text_on_empty_run() {
        let mut run = MutableRun::new();
        run.add_page_break();
        run.set_text("x");
        assert_eq!(run.content(), &[RunContent::PageBreak, RunContent::Text("x".into())]);
    }

    #[test]
    fn test_to_xml_typed_properties() {
        let mut run = MutableRun::with_text("R&D <1>");
        run.bold(true).font_name("Consolas").font_size(20).color("2E5495");
        let xml = render(&run);
        assert_eq!(
            xml,
            "<w:r><w:rPr><w:rFonts w:ascii=\"Consolas\" w:hAnsi=\"Consolas\" w:cs=\"Consolas\"/>\
             <w:b/><w:color w:val=\"2E5495\"/><w:sz w:val=\"20\"/><w:szCs w:val=\"20\"/></w:rPr>\
             <w:t xml:space=\"preserve\">R&amp;D &lt;1&gt;</w:t></w:r>"
        );
    }

    #[test]
    fn test_to_xml_verbatim() {
        let mut run = MutableRun::with_text("hola");
        run.open_tag = Some("<w:r w:rsidR=\"00A1\">".into());
        run.properties.verbatim = Some("<w:rPr><w:i/></w:rPr>".into());
        assert_eq!(
            render(&run),
            "<w:r w:rsidR=\"00A1\"><w:rPr><w:i/></w:rPr><w:t xml:space=\"preserve\">hola</w:t></w:r>"
        );
    }

    #[test]
    fn test_setter_replaces_verbatim_properties() {
        let mut run = MutableRun::with_text("x");
        run.properties.verbatim = Some("<w:rPr><w:i/></w:rPr>".into());
        run.bold(true);
        assert!(run.properties.verbatim.is_none());
        assert!(render(&run).contains("<w:b/>"));
    }
}
