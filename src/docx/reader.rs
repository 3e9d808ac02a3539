//! Package reader: OPC package -> Document

use super::core_props::parse_core_properties;
use super::styles::StyleMap;
use super::{ReadOptions, UnsupportedPolicy};
use crate::document::{
    Alignment, Block, CoreProperties, Document, Heading, Paragraph, Rgb, Run, RunFormat,
};
use crate::error::{Error, Result};
use crate::opc::{is_main_document, rel_types, Package, Part};
use crate::xml::{get_attr, get_w_val, parse_bool, read_text, skip_element};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Reconstruct a document from a package
pub(crate) fn read_document(package: &Package, options: &ReadOptions) -> Result<Document> {
    let main = package.main_document_part()?;
    if !is_main_document(main.content_type()) {
        return Err(Error::MalformedPackage(format!(
            "{} has content type '{}', not a WordprocessingML main document",
            main.uri(),
            main.content_type()
        )));
    }

    let styles = match package.related_part(main, rel_types::STYLES) {
        Some(part) => in_part(part, StyleMap::from_xml)?,
        None => {
            log::debug!("no styles part, headings resolve by style id only");
            StyleMap::default()
        }
    };

    let ctx = Context {
        styles: &styles,
        policy: options.unsupported,
    };
    let blocks = in_part(main, |xml| parse_document_xml(xml, &ctx))?;

    let core = package
        .part_by_rel_type(rel_types::CORE_PROPERTIES)
        .or_else(|| package.related_part(main, rel_types::CORE_PROPERTIES));
    let core_properties = match core {
        Some(part) => in_part(part, parse_core_properties)?,
        None => {
            log::debug!("no core properties part");
            CoreProperties::default()
        }
    };

    log::debug!("read {} blocks from {}", blocks.len(), main.uri());
    Ok(Document::from_parts(core_properties, blocks))
}

/// Run a part parser, attributing XML-level failures to the part
fn in_part<T>(part: &Part, parse: impl FnOnce(&str) -> Result<T>) -> Result<T> {
    let name = part.uri().as_str();
    let xml = part.data_as_str().map_err(|e| Error::from(e).in_part(name))?;
    parse(xml).map_err(|e| e.in_part(name))
}

struct Context<'a> {
    styles: &'a StyleMap,
    policy: UnsupportedPolicy,
}

impl Context<'_> {
    /// Apply the unsupported-content policy to `feature`
    fn unsupported(&self, feature: &str) -> Result<()> {
        match self.policy {
            UnsupportedPolicy::Reject => Err(Error::UnsupportedFeature(feature.to_string())),
            UnsupportedPolicy::Skip => {
                log::debug!("skipping unsupported {}", feature);
                Ok(())
            }
        }
    }
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn unexpected_eof(inside: &str) -> Error {
    Error::SchemaViolation(format!("unexpected end of part inside <w:{}>", inside))
}

fn parse_document_xml(xml: &str, ctx: &Context) -> Result<Vec<Block>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut seen_root = false;
    let mut blocks = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"document" if !seen_root => seen_root = true,
                _ if !seen_root => {
                    return Err(Error::SchemaViolation(format!(
                        "root element is <{}>, expected w:document",
                        element_name(&e)
                    )))
                }
                b"body" if blocks.is_none() => blocks = Some(parse_body(&mut reader, ctx)?),
                _ => skip_element(&mut reader, &e)?,
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"document" if !seen_root => {
                    seen_root = true;
                    break;
                }
                _ if !seen_root => {
                    return Err(Error::SchemaViolation(format!(
                        "root element is <{}>, expected w:document",
                        element_name(&e)
                    )))
                }
                b"body" if blocks.is_none() => blocks = Some(Vec::new()),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(Error::SchemaViolation("part has no root element".to_string()));
    }
    blocks.ok_or_else(|| Error::SchemaViolation("w:document has no w:body".to_string()))
}

fn parse_body<R: BufRead>(reader: &mut Reader<R>, ctx: &Context) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => blocks.push(parse_paragraph(reader, ctx)?),
                b"tbl" => {
                    ctx.unsupported("table")?;
                    skip_element(reader, &e)?;
                }
                _ => {
                    log::trace!("ignoring <{}> in body", element_name(&e));
                    skip_element(reader, &e)?;
                }
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => blocks.push(Block::Paragraph(Paragraph::new())),
                b"tbl" => ctx.unsupported("table")?,
                _ => {}
            },
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("body")),
            _ => {}
        }
        buf.clear();
    }

    Ok(blocks)
}

/// Parse a `w:p` after its start tag into a heading or a paragraph
fn parse_paragraph<R: BufRead>(reader: &mut Reader<R>, ctx: &Context) -> Result<Block> {
    let mut style = None;
    let mut alignment = None;
    let mut runs = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"pPr" => parse_paragraph_properties(reader, &mut style, &mut alignment)?,
                b"r" => runs.extend(parse_run(reader, ctx)?),
                b"hyperlink" => parse_hyperlink(reader, ctx, &mut runs)?,
                b"ins" | b"del" | b"moveFrom" | b"moveTo" => {
                    ctx.unsupported("tracked changes")?;
                    skip_element(reader, &e)?;
                }
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"r" {
                    return Err(empty_run());
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("p")),
            _ => {}
        }
        buf.clear();
    }

    let level = style.as_deref().and_then(|id| ctx.styles.heading_level(id));
    match level {
        Some(level) => {
            let mut heading = Heading::new(level);
            for run in runs {
                heading.push_run(run);
            }
            Ok(Block::Heading(heading))
        }
        None => {
            let mut paragraph = Paragraph::new();
            paragraph.set_alignment(alignment);
            for run in runs {
                paragraph.push_run(run);
            }
            Ok(Block::Paragraph(paragraph))
        }
    }
}

fn parse_paragraph_properties<R: BufRead>(
    reader: &mut Reader<R>,
    style: &mut Option<String>,
    alignment: &mut Option<Alignment>,
) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match &event {
            Event::Start(e) | Event::Empty(e) => {
                match e.local_name().as_ref() {
                    b"pStyle" => *style = get_w_val(e),
                    b"jc" => {
                        *alignment = get_w_val(e).and_then(|v| {
                            let parsed = Alignment::from_ooxml(&v);
                            if parsed.is_none() {
                                log::trace!("unmodelled justification '{}'", v);
                            }
                            parsed
                        })
                    }
                    _ => {}
                }
                if let Event::Start(e) = &event {
                    skip_element(reader, e)?;
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("pPr")),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Hyperlinks are transparent: their runs join the enclosing paragraph
fn parse_hyperlink<R: BufRead>(
    reader: &mut Reader<R>,
    ctx: &Context,
    runs: &mut Vec<Run>,
) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => runs.extend(parse_run(reader, ctx)?),
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"r" {
                    return Err(empty_run());
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("hyperlink")),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn empty_run() -> Error {
    Error::SchemaViolation("w:r has no text content".to_string())
}

/// Parse a `w:r` after its start tag.
///
/// Returns `None` when the run held only content that was skipped.
fn parse_run<R: BufRead>(reader: &mut Reader<R>, ctx: &Context) -> Result<Option<Run>> {
    let mut text = String::new();
    let mut format = RunFormat::default();
    let mut has_text = false;
    let mut skipped = false;
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match &event {
            Event::Start(e) | Event::Empty(e) => {
                let is_start = matches!(event, Event::Start(_));
                let mut consumed = false;

                match e.local_name().as_ref() {
                    b"rPr" => {
                        if is_start {
                            format = parse_run_properties(reader)?;
                            consumed = true;
                        }
                    }
                    b"t" => {
                        has_text = true;
                        if is_start {
                            text.push_str(&read_text(reader, e)?);
                            consumed = true;
                        }
                    }
                    b"tab" => {
                        has_text = true;
                        text.push('\t');
                    }
                    b"cr" => {
                        has_text = true;
                        text.push('\n');
                    }
                    b"br" => match get_attr(e, "type").as_deref() {
                        None | Some("textWrapping") => {
                            has_text = true;
                            text.push('\n');
                        }
                        Some(kind) => {
                            log::trace!("ignoring {} break", kind);
                            skipped = true;
                        }
                    },
                    b"drawing" | b"pict" | b"object" => {
                        ctx.unsupported("image")?;
                        skipped = true;
                    }
                    b"fldChar" | b"instrText" => {
                        ctx.unsupported("field")?;
                        skipped = true;
                    }
                    _ => {}
                }

                if is_start && !consumed {
                    skip_element(reader, e)?;
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("r")),
            _ => {}
        }
        buf.clear();
    }

    match (has_text, skipped) {
        (true, _) => Ok(Some(Run::with_format(text, format))),
        (false, true) => Ok(None),
        (false, false) => Err(empty_run()),
    }
}

fn parse_run_properties<R: BufRead>(reader: &mut Reader<R>) -> Result<RunFormat> {
    let mut format = RunFormat::default();
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match &event {
            Event::Start(e) | Event::Empty(e) => {
                match e.local_name().as_ref() {
                    b"b" => format.bold = parse_bool(e),
                    b"i" => format.italic = parse_bool(e),
                    b"color" => format.color = parse_color(e)?,
                    _ => {}
                }
                if let Event::Start(e) = &event {
                    skip_element(reader, e)?;
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("rPr")),
            _ => {}
        }
        buf.clear();
    }

    Ok(format)
}

fn parse_color(e: &BytesStart) -> Result<Option<Rgb>> {
    match get_w_val(e).as_deref() {
        None => Err(Error::SchemaViolation("w:color without w:val".to_string())),
        Some("auto") => Ok(None),
        Some(val) => val
            .parse::<Rgb>()
            .map(Some)
            .map_err(|_| Error::SchemaViolation(format!("invalid w:color value '{}'", val))),
    }
}
