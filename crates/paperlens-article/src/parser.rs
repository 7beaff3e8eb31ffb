//! Build an [`Element`] tree from XML events

use crate::element::Element;
use crate::error::ArticleError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use tracing::debug;

/// Parse an in-memory XML document
pub(crate) fn parse_str(xml: &str) -> Result<Element, ArticleError> {
    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error(reader.buffer_position() as u64, e))?;
        builder.position = reader.buffer_position() as u64;
        if builder.feed(event)? {
            break;
        }
    }

    builder.finish()
}

/// Parse an XML document from a buffered reader
pub(crate) fn parse_reader<R: BufRead>(input: R) -> Result<Element, ArticleError> {
    let mut reader = Reader::from_reader(input);
    let mut builder = TreeBuilder::default();
    let mut buf = Vec::new();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => return Err(xml_error(reader.buffer_position() as u64, e)),
        };
        builder.position = reader.buffer_position() as u64;
        if builder.feed(event)? {
            break;
        }
        buf.clear();
    }

    builder.finish()
}

fn xml_error(position: u64, err: quick_xml::Error) -> ArticleError {
    ArticleError::Xml {
        position,
        message: err.to_string(),
    }
}

/// Stack of open elements; finished children are attached to their parent
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Element>,
    root: Option<Element>,
    /// Reader offset just past the current event
    position: u64,
}

impl TreeBuilder {
    /// Consume one event. Returns `true` at end of input.
    fn feed(&mut self, event: Event<'_>) -> Result<bool, ArticleError> {
        match event {
            Event::Start(e) => self.open(&e)?,
            Event::Empty(e) => {
                self.open(&e)?;
                self.close();
            }
            Event::End(e) => {
                if self.stack.is_empty() {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Err(ArticleError::UnexpectedEnd(name));
                }
                self.close();
            }
            // Line endings are normalized to `\n` in character data
            Event::Text(e) => {
                let text = e.xml10_content().map_err(|err| self.error(err))?;
                self.push_text(&text)?;
            }
            Event::CData(e) => {
                let text = e.xml10_content().map_err(|err| self.error(err))?;
                self.push_text(&text)?;
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                match resolve_entity(&entity) {
                    Some(resolved) => self.push_text(&resolved)?,
                    None => {
                        debug!(entity = %entity, "keeping unresolved entity reference");
                        self.push_text(&format!("&{};", entity))?;
                    }
                }
            }
            Event::Eof => return Ok(true),
            // Declarations, comments, PIs and DOCTYPE carry no article text
            _ => {}
        }
        Ok(false)
    }

    fn error(&self, err: impl Into<quick_xml::Error>) -> ArticleError {
        xml_error(self.position, err.into())
    }

    fn open(&mut self, start: &BytesStart<'_>) -> Result<(), ArticleError> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        if self.stack.is_empty() && self.root.is_some() {
            return Err(ArticleError::MultipleRoots(tag));
        }

        let mut element = Element::new(tag);
        for attr in start.attributes() {
            let attr = attr.map_err(|err| self.error(err))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|err| self.error(err))?;
            element.attributes.push((key, value.into_owned()));
        }

        self.stack.push(element);
        Ok(())
    }

    fn close(&mut self) {
        let Some(element) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => self.root = Some(element),
        }
    }

    fn push_text(&mut self, text: &str) -> Result<(), ArticleError> {
        if text.is_empty() {
            return Ok(());
        }
        let Some(current) = self.stack.last_mut() else {
            // Only whitespace may appear outside the document element
            if text.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r')) {
                return Ok(());
            }
            return Err(ArticleError::Xml {
                position: self.position,
                message: "text outside the document element".to_string(),
            });
        };
        let slot = match current.children.last_mut() {
            Some(last_child) => &mut last_child.tail,
            None => &mut current.text,
        };
        slot.get_or_insert_with(String::new).push_str(text);
        Ok(())
    }

    fn finish(self) -> Result<Element, ArticleError> {
        if let Some(open) = self.stack.last() {
            return Err(ArticleError::Unclosed(open.tag.clone()));
        }
        self.root.ok_or(ArticleError::NoRoot)
    }
}

/// Resolve predefined XML entities and numeric character references
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()?
    } else {
        return None;
    };

    char::from_u32(code).map(|c| c.to_string())
}
