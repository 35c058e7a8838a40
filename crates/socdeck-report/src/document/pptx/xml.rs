use std::borrow::Cow;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::DocumentError;
use crate::layout::Rect;

pub(super) const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(super) const NS_R: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(super) const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Replace characters XML 1.0 cannot carry with a space.
pub(super) fn xml_safe(raw: &str) -> Cow<'_, str> {
    fn forbidden(c: char) -> bool {
        matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}')
            || c == '\u{FFFE}'
            || c == '\u{FFFF}'
    }
    if raw.chars().any(forbidden) {
        Cow::Owned(
            raw.chars()
                .map(|c| if forbidden(c) { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(raw)
    }
}

fn start_tag<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for &(key, value) in attrs {
        start.push_attribute((key, xml_safe(value).as_ref()));
    }
    start
}

/// Thin event-writer wrapper producing a standalone UTF-8 XML part.
pub(super) struct XmlBuilder {
    writer: Writer<Vec<u8>>,
}

impl XmlBuilder {
    pub(super) fn new() -> Result<Self, DocumentError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    pub(super) fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocumentError> {
        self.writer.write_event(Event::Start(start_tag(name, attrs)))?;
        Ok(())
    }

    pub(super) fn close(&mut self, name: &str) -> Result<(), DocumentError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub(super) fn empty(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<(), DocumentError> {
        self.writer.write_event(Event::Empty(start_tag(name, attrs)))?;
        Ok(())
    }

    pub(super) fn text(&mut self, text: &str) -> Result<(), DocumentError> {
        let text = xml_safe(text);
        self.writer.write_event(Event::Text(BytesText::new(&text)))?;
        Ok(())
    }

    /// `<name attrs>text</name>`
    pub(super) fn leaf(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> Result<(), DocumentError> {
        self.open(name, attrs)?;
        self.text(text)?;
        self.close(name)
    }

    pub(super) fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    /// `<a:solidFill><a:srgbClr val=".."/></a:solidFill>`
    pub(super) fn solid_fill(&mut self, color: &str) -> Result<(), DocumentError> {
        self.open("a:solidFill", &[])?;
        self.empty("a:srgbClr", &[("val", color)])?;
        self.close("a:solidFill")
    }

    /// `<{tag}><a:off/><a:ext/></{tag}>` for `a:xfrm` or `p:xfrm`.
    pub(super) fn xfrm(&mut self, tag: &str, rect: &Rect) -> Result<(), DocumentError> {
        let (x, y, cx, cy) = rect.to_emu();
        let (x, y, cx, cy) = (x.to_string(), y.to_string(), cx.to_string(), cy.to_string());
        self.open(tag, &[])?;
        self.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
        self.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        self.close(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let mut b = XmlBuilder::new().unwrap();
        b.leaf("a:t", &[("title", "\"quoted\" & <odd>")], "Fish & Chips <3")
            .unwrap();
        let xml = String::from_utf8(b.finish()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(xml.contains("Fish &amp; Chips &lt;3"));
        assert!(xml.contains("&quot;quoted&quot; &amp; &lt;odd&gt;"));
    }

    #[test]
    fn control_characters_become_spaces() {
        let mut b = XmlBuilder::new().unwrap();
        b.leaf("a:t", &[("name", "Tab\tok\u{1}")], "Neu\u{B}eröffnung\u{1}!\nzeile\u{FFFF}")
            .unwrap();
        let xml = String::from_utf8(b.finish()).unwrap();
        assert!(xml.contains("Neu eröffnung !\nzeile "));
        assert!(xml.contains("name=\"Tab\tok \""));
    }

    #[test]
    fn clean_text_is_borrowed() {
        assert!(matches!(xml_safe("plain\ttext\r\n"), Cow::Borrowed(_)));
    }
}
