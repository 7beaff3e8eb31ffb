//! Document tree types
//!
//! An [`Element`] mirrors the classic XML tree model: every node carries the
//! text that appears before its first child and the tail text that follows
//! its own closing tag. Extraction functions rely on that layout to keep
//! sibling text in document order.

use crate::error::ArticleError;
use crate::parser;
use std::io::BufRead;

/// A node in a parsed XML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name as written in the source (e.g. `sec`, `xlink:href`)
    pub tag: String,

    /// Text before the first child element
    pub text: Option<String>,

    /// Text after this element's closing tag, before the next sibling
    pub tail: Option<String>,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the leading text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the tail text
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Add an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Parse an XML document held in memory and return its root element
    pub fn parse(xml: &str) -> Result<Self, ArticleError> {
        parser::parse_str(xml)
    }

    /// Parse an XML document from a buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ArticleError> {
        parser::parse_reader(reader)
    }

    /// Leading text, or `""` when absent
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Look up an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given tag
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All direct children with the given tag
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Follow a relative path of direct-child tags and return the first match
    ///
    /// Each step collects every matching child of every element selected by
    /// the previous step, so `["caption", "title"]` finds the first `title`
    /// under any `caption` child, in document order.
    pub fn find_path(&self, path: &[&str]) -> Option<&Element> {
        let mut current: Vec<&Element> = vec![self];
        for &tag in path {
            current = current
                .into_iter()
                .flat_map(|element| element.children.iter())
                .filter(|child| child.tag == tag)
                .collect();
            if current.is_empty() {
                return None;
            }
        }
        current.into_iter().next()
    }

    /// Pre-order iterator over every element below this one (self excluded)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant with the given tag, in document order
    pub fn find_descendant(&self, tag: &str) -> Option<&Element> {
        self.descendants().find(|element| element.tag == tag)
    }

    /// All descendants with the given tag, in document order
    pub fn find_descendants<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |element| element.tag == tag)
    }

    /// Every piece of text inside this element, concatenated without separators
    ///
    /// Includes the tails of descendants but not this element's own tail.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.collect_inner_text(&mut out);
        out
    }

    fn collect_inner_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_inner_text(out);
            if let Some(tail) = &child.tail {
                out.push_str(tail);
            }
        }
    }

    /// True if any direct `child_tag` child has inner text exactly equal to `text`
    pub fn has_child_text(&self, child_tag: &str, text: &str) -> bool {
        self.find_all(child_tag).any(|child| child.inner_text() == text)
    }
}

/// Depth-first, document-order walk over an element's descendants
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
