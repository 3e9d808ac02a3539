//! Package writer: Document -> OPC package

use super::{core_props, styles};
use crate::document::{Alignment, Block, Document, Run};
use crate::error::Result;
use crate::opc::{
    rel_types, well_known, Package, Part, PartUri, Relationships, CORE_PROPERTIES, MAIN_DOCUMENT,
    STYLES,
};
use crate::xml::{self, check_text};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Build the complete package for `doc` in memory.
///
/// Fails with `Encoding` before producing anything if some text cannot be
/// represented in XML.
pub(crate) fn build_package(doc: &Document) -> Result<Package> {
    let document_xml = serialize_document_xml(doc.blocks())?;
    let styles_xml = styles::serialize_default_styles()?;
    let core_xml = core_props::serialize_core_properties(doc.core_properties())?;

    let doc_uri = PartUri::new(well_known::DOCUMENT)?;
    let styles_uri = PartUri::new(well_known::STYLES)?;
    let core_uri = PartUri::new(well_known::CORE_PROPS)?;

    let mut doc_rels = Relationships::new();
    doc_rels.add(rel_types::STYLES, "styles.xml");

    let mut package = Package::new();
    package.add_part(Part::new(doc_uri, MAIN_DOCUMENT, document_xml).with_relationships(doc_rels));
    package.add_part(Part::new(styles_uri, STYLES, styles_xml));
    package.add_part(Part::new(core_uri, CORE_PROPERTIES, core_xml));

    let rels = package.relationships_mut();
    rels.add(rel_types::OFFICE_DOCUMENT, "word/document.xml");
    rels.add(rel_types::CORE_PROPERTIES, "docProps/core.xml");

    log::debug!("built package for {} blocks", doc.block_count());
    Ok(package)
}

/// Serialize blocks to document.xml content
fn serialize_document_xml(blocks: &[Block]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        Some("yes"),
    )))?;

    let mut doc_start = BytesStart::new("w:document");
    for (attr, value) in xml::document_namespaces() {
        doc_start.push_attribute((attr, value));
    }
    writer.write_event(Event::Start(doc_start))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for block in blocks {
        match block {
            Block::Heading(h) => {
                write_paragraph(&mut writer, Some(&h.level().style_id()), None, h.runs())?
            }
            Block::Paragraph(p) => write_paragraph(&mut writer, None, p.alignment(), p.runs())?,
        }
    }

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner())
}

fn write_paragraph<W: Write>(
    writer: &mut Writer<W>,
    style: Option<&str>,
    alignment: Option<Alignment>,
    runs: &[Run],
) -> Result<()> {
    let start = BytesStart::new("w:p");

    if style.is_none() && alignment.is_none() && runs.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;

    if style.is_some() || alignment.is_some() {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        if let Some(style) = style {
            let mut elem = BytesStart::new("w:pStyle");
            elem.push_attribute(("w:val", style));
            writer.write_event(Event::Empty(elem))?;
        }
        if let Some(alignment) = alignment {
            let mut elem = BytesStart::new("w:jc");
            elem.push_attribute(("w:val", alignment.as_ooxml()));
            writer.write_event(Event::Empty(elem))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }

    for run in runs {
        write_run(writer, run)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_run<W: Write>(writer: &mut Writer<W>, run: &Run) -> Result<()> {
    check_text(run.text(), "run text")?;

    writer.write_event(Event::Start(BytesStart::new("w:r")))?;

    // rPr children only for flags that are on, in schema order
    let format = run.format();
    if !format.is_plain() {
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if format.bold {
            writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
        }
        if format.italic {
            writer.write_event(Event::Empty(BytesStart::new("w:i")))?;
        }
        if let Some(color) = format.color {
            let mut elem = BytesStart::new("w:color");
            elem.push_attribute(("w:val", color.to_hex().as_str()));
            writer.write_event(Event::Empty(elem))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }

    write_run_text(writer, run.text())?;

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

/// Write run text, turning `\t` into `w:tab` and line breaks into `w:br`
fn write_run_text<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("w:t")))?;
        return Ok(());
    }

    let mut segment = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\t' | '\n' | '\r' => {
                write_text_segment(writer, &segment)?;
                segment.clear();
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                let name = if c == '\t' { "w:tab" } else { "w:br" };
                writer.write_event(Event::Empty(BytesStart::new(name)))?;
            }
            c => segment.push(c),
        }
    }

    write_text_segment(writer, &segment)
}

fn write_text_segment<W: Write>(writer: &mut Writer<W>, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Ok(());
    }

    let mut start = BytesStart::new("w:t");
    if needs_space_preserve(segment) {
        start.push_attribute(("xml:space", "preserve"));
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::from_escaped(escape(segment))))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    Ok(())
}

/// Leading, trailing or repeated whitespace would be collapsed without `xml:space`
fn needs_space_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text
            .chars()
            .zip(text.chars().skip(1))
            .any(|(a, b)| a.is_whitespace() && b.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Rgb, RunFormat};
    use crate::error::Error;

    fn body_of(doc: &Document) -> String {
        let xml = serialize_document_xml(doc.blocks()).unwrap();
        let xml = String::from_utf8(xml).unwrap();
        let start = xml.find("<w:body>").unwrap() + "<w:body>".len();
        let end = xml.find("</w:body>").unwrap();
        xml[start..end].to_string()
    }

    #[test]
    fn test_plain_run_has_no_rpr() {
        let mut doc = Document::new();
        doc.add_text_paragraph("plain");
        assert_eq!(body_of(&doc), "<w:p><w:r><w:t>plain</w:t></w:r></w:p>");
    }

    #[test]
    fn test_each_flag_emits_exactly_its_child() {
        let cases = [
            (RunFormat::new().bold(), "<w:rPr><w:b/></w:rPr>"),
            (RunFormat::new().italic(), "<w:rPr><w:i/></w:rPr>"),
            (
                RunFormat::new().color(Rgb::new(0x1F, 0x4E, 0x79)),
                r#"<w:rPr><w:color w:val="1F4E79"/></w:rPr>"#,
            ),
            (
                RunFormat::new().bold().italic(),
                "<w:rPr><w:b/><w:i/></w:rPr>",
            ),
        ];
        for (format, expected) in cases {
            let mut doc = Document::new();
            doc.add_paragraph().append_run("x", format);
            assert_eq!(
                body_of(&doc),
                format!("<w:p><w:r>{}<w:t>x</w:t></w:r></w:p>", expected)
            );
        }
    }

    #[test]
    fn test_heading_style_and_alignment() {
        let mut doc = Document::new();
        doc.add_heading("Introduction", 1).unwrap();
        doc.add_paragraph().set_alignment(Some(Alignment::Justify));
        assert_eq!(
            body_of(&doc),
            concat!(
                r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Introduction</w:t></w:r></w:p>"#,
                r#"<w:p><w:pPr><w:jc w:val="both"/></w:pPr></w:p>"#
            )
        );
    }

    #[test]
    fn test_empty_paragraph_and_run() {
        let mut doc = Document::new();
        doc.add_paragraph();
        doc.add_paragraph().append_run("", RunFormat::new());
        assert_eq!(body_of(&doc), "<w:p/><w:p><w:r><w:t/></w:r></w:p>");
    }

    #[test]
    fn test_escapes_reserved_characters() {
        let mut doc = Document::new();
        doc.add_text_paragraph(r#"p < 0.001 & "q" > 'r'"#);
        assert_eq!(
            body_of(&doc),
            "<w:p><w:r><w:t>p &lt; 0.001 &amp; &quot;q&quot; &gt; &apos;r&apos;</w:t></w:r></w:p>"
        );
    }

    #[test]
    fn test_space_preserve() {
        assert!(needs_space_preserve("  leading"));
        assert!(needs_space_preserve("trailing "));
        assert!(needs_space_preserve("two  spaces"));
        assert!(!needs_space_preserve("single spaces only"));

        let mut doc = Document::new();
        doc.add_text_paragraph(" in the treatment group");
        assert_eq!(
            body_of(&doc),
            r#"<w:p><w:r><w:t xml:space="preserve"> in the treatment group</w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn test_tabs_and_breaks() {
        let mut doc = Document::new();
        doc.add_text_paragraph("a\tb\r\nc\n");
        assert_eq!(
            body_of(&doc),
            "<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t><w:br/></w:r></w:p>"
        );
    }

    #[test]
    fn test_unrepresentable_text_fails() {
        let mut doc = Document::new();
        doc.add_text_paragraph("form feed \u{C}");
        assert!(matches!(build_package(&doc), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_package_layout() {
        let doc = Document::new();
        let package = build_package(&doc).unwrap();

        let uris: Vec<_> = package.parts().map(|p| p.uri().as_str()).collect();
        assert_eq!(
            uris,
            ["/word/document.xml", "/word/styles.xml", "/docProps/core.xml"]
        );
        assert_eq!(
            package.main_document_part().unwrap().content_type(),
            MAIN_DOCUMENT
        );
        assert!(package.part_by_rel_type(rel_types::CORE_PROPERTIES).is_some());

        let main = package.main_document_part().unwrap();
        let styles = package.related_part(main, rel_types::STYLES).unwrap();
        assert_eq!(styles.uri().as_str(), "/word/styles.xml");
    }
}
