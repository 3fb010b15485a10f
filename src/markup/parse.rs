//! Lenient page parsing on top of `quick-xml`
//!
//! Pages are expected to be well nested, but may use the usual HTML
//! shortcuts: void elements without a closing slash, valueless
//! attributes, named entities, and unescaped `<script>`/`<style>` bodies.
//! Stray end tags are ignored.

use super::{Document, Element, NodeId, NodeKind};
use crate::error::{MarkupError, MarkupResult};
use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

/// Elements that never have content or an end tag
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose body is kept verbatim
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Parse page markup into a [`Document`]
pub fn parse(source: &str) -> MarkupResult<Document> {
    let mut doc = Document::new();
    let mut open: Vec<NodeId> = vec![doc.root()];

    let mut offset = 0;
    while let Some(resume) = parse_from(source, offset, &mut doc, &mut open)? {
        offset = resume;
    }

    if open.len() > 1 {
        log::debug!("{} element(s) left open at end of page", open.len() - 1);
    }

    Ok(doc)
}

/// Parse `source[offset..]` into `doc`
///
/// Returns the offset to resume at after a raw-text element, whose body
/// is cut out of the source directly, or `None` at the end of input.
fn parse_from(
    source: &str,
    offset: usize,
    doc: &mut Document,
    open: &mut Vec<NodeId>,
) -> MarkupResult<Option<usize>> {
    let mut reader = Reader::from_str(&source[offset..]);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.check_comments = false;

    loop {
        let position = offset as u64 + reader.buffer_position();
        let event = reader.read_event().map_err(|e| MarkupError::Syntax {
            position: offset as u64 + reader.error_position(),
            message: e.to_string(),
        })?;

        match event {
            Event::Start(e) => {
                let element = element_from(&e, position)?;
                let tag = element.tag.clone();
                let id = doc.append_element(innermost(open), element);

                if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                    let body_start = offset + reader.buffer_position() as usize;
                    let (body_end, resume) = raw_text_end(source, body_start, &tag);
                    let body = &source[body_start..body_end];
                    if !body.is_empty() {
                        doc.append(id, NodeKind::RawText(body.to_string()));
                    }
                    return Ok(Some(resume));
                } else if !VOID_ELEMENTS.contains(&tag.as_str()) {
                    open.push(id);
                }
            }
            Event::Empty(e) => {
                let element = element_from(&e, position)?;
                doc.append_element(innermost(open), element);
            }
            Event::End(e) => {
                let tag = lowercase_name(e.name().as_ref(), position)?;
                // Close the nearest matching element and everything opened inside it
                let matching = open
                    .iter()
                    .rposition(|id| doc.element(*id).is_some_and(|el| el.tag == tag));
                match matching {
                    Some(index) if index > 0 => open.truncate(index),
                    _ => log::trace!("Ignoring stray </{}> at byte {}", tag, position),
                }
            }
            Event::Text(e) => {
                let raw = std::str::from_utf8(&e).map_err(|_| MarkupError::Encoding { position })?;
                let text = unescape_html(raw);
                if !text.is_empty() {
                    doc.append(innermost(open), NodeKind::Text(text.into_owned()));
                }
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|_| MarkupError::Encoding { position })?
                    .to_string();
                doc.append(innermost(open), NodeKind::Text(text));
            }
            Event::Comment(e) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|_| MarkupError::Encoding { position })?
                    .to_string();
                doc.append(innermost(open), NodeKind::Comment(text));
            }
            Event::DocType(e) => {
                let raw = std::str::from_utf8(&e).map_err(|_| MarkupError::Encoding { position })?;
                doc.set_doctype(Some(raw.trim().to_string()));
            }
            Event::Eof => return Ok(None),
            // XML declarations and processing instructions have no place in a page
            _ => {}
        }
    }
}

/// End of a raw-text body starting at `from`, and the offset just past its end tag
fn raw_text_end(source: &str, from: usize, tag: &str) -> (usize, usize) {
    let closing = format!("</{}", tag);
    // ASCII lowercasing keeps byte offsets intact
    let rest = source[from..].to_ascii_lowercase();
    match rest.find(&closing) {
        Some(index) => {
            let body_end = from + index;
            let resume = source[body_end..]
                .find('>')
                .map_or(source.len(), |gt| body_end + gt + 1);
            (body_end, resume)
        }
        None => (source.len(), source.len()),
    }
}

fn innermost(open: &[NodeId]) -> NodeId {
    open[open.len() - 1]
}

fn lowercase_name(name: &[u8], position: u64) -> MarkupResult<String> {
    std::str::from_utf8(name)
        .map(str::to_ascii_lowercase)
        .map_err(|_| MarkupError::Encoding { position })
}

fn element_from(start: &BytesStart<'_>, position: u64) -> MarkupResult<Element> {
    let mut element = Element::new(lowercase_name(start.name().as_ref(), position)?);

    for attr in start.html_attributes() {
        let attr = attr.map_err(|e| MarkupError::Syntax {
            position,
            message: e.to_string(),
        })?;
        let name = lowercase_name(attr.key.as_ref(), position)?;
        let raw = std::str::from_utf8(&attr.value).map_err(|_| MarkupError::Encoding { position })?;
        element.set_attr(&name, &unescape_html(raw));
    }

    Ok(element)
}

/// Unescape character references one at a time
///
/// A bare `&` or an unknown entity stays literal text, the way browsers
/// read it, without affecting the references around it.
fn unescape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let resolved = reference_len(tail).and_then(|len| {
            unescape_with(&tail[..len], resolve_html_entity)
                .ok()
                .map(|text| (len, text))
        });
        match resolved {
            Some((len, text)) => {
                out.push_str(&text);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Length of the `&name;` or `&#...;` reference opening `s`, delimiters included
fn reference_len(s: &str) -> Option<usize> {
    let body = &s[1..];
    let end = body.find(|c: char| !(c.is_ascii_alphanumeric() || c == '#'))?;
    (end > 0 && body[end..].starts_with(';')).then_some(end + 2)
}

fn resolve_html_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "middot" => "\u{b7}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "times" => "\u{d7}",
        _ => return None,
    })
}
