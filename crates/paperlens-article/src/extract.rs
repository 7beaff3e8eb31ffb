//! Plain-text views over a JATS-style article tree
//!
//! Every function here is a read-only walk. Missing elements never produce
//! errors; each view falls back to a fixed string instead.

use crate::element::Element;

/// Returned by [`article_title`] when the document has no `article-title`
pub const ARTICLE_TITLE_FALLBACK: &str = "Artitle Title";

/// Returned by [`abstract_text`] when no abstract can be located
pub const ABSTRACT_FALLBACK: &str = "Abstract";

/// Title of the section that holds figure entries
pub const FIGURES_SECTION_TITLE: &str = "Figures";

/// Section title used when a caller does not name one
pub const DEFAULT_SECTION_TITLE: &str = "Introduction";

/// Prefix written before each titled section by [`main_content`]
pub const SECTION_TITLE_PREFIX: &str = "Section Title: ";

/// Flatten an element and everything below it into one string
///
/// Leading text comes first (a single space when absent), then each child's
/// flattened text followed by that child's tail. Every appended piece is
/// preceded by one space.
pub fn element_text(element: &Element) -> String {
    let mut out = String::new();
    write_element_text(element, &mut out);
    out
}

fn write_element_text(element: &Element, out: &mut String) {
    match &element.text {
        Some(text) => out.push_str(text),
        None => out.push(' '),
    }
    for child in &element.children {
        out.push(' ');
        write_element_text(child, out);
        if let Some(tail) = &child.tail {
            out.push(' ');
            out.push_str(tail);
        }
    }
}

/// Direct text of the first `article-title` anywhere below `root`
pub fn article_title(root: &Element) -> String {
    match root.find_descendant("article-title") {
        Some(title) => title.text_or_empty().to_string(),
        None => ARTICLE_TITLE_FALLBACK.to_string(),
    }
}

/// The article abstract
///
/// Prefers the direct text of the first `p` inside an `abstract` element.
/// Otherwise flattens the first `sec` titled exactly "Abstract".
pub fn abstract_text(root: &Element) -> String {
    let paragraph = root
        .find_descendants("abstract")
        .flat_map(|abstract_el| abstract_el.find_all("p"))
        .next();
    if let Some(p) = paragraph {
        return p.text_or_empty().to_string();
    }

    if let Some(sec) = find_titled_section(root, "Abstract") {
        return element_text(sec);
    }

    ABSTRACT_FALLBACK.to_string()
}

/// Flattened text of the first section whose title matches, ignoring case
///
/// Nested sections are searched too. Returns an empty string when nothing
/// matches. Sections whose `title` has no text never match.
pub fn section_text(root: &Element, section_title: &str) -> String {
    let wanted = section_title.to_lowercase();
    root.find_descendants("sec")
        .find(|sec| {
            sec.find("title")
                .and_then(|title| title.text.as_deref())
                .is_some_and(|text| text.to_lowercase() == wanted)
        })
        .map(element_text)
        .unwrap_or_default()
}

/// One `"<title> <caption>"` line per figure, then per table
///
/// Figures come from the direct `fig` children of the section titled
/// "Figures". Tables are every `table-wrap` in the document.
pub fn figure_and_table_captions(root: &Element) -> String {
    let mut captions = Vec::new();

    if let Some(figures) = find_titled_section(root, FIGURES_SECTION_TITLE) {
        captions.extend(figures.find_all("fig").map(caption_line));
    }

    captions.extend(root.find_descendants("table-wrap").map(caption_line));

    captions.join("\n")
}

fn caption_line(entry: &Element) -> String {
    let title = stripped_text(entry.find_path(&["caption", "title"]));
    let caption = stripped_text(entry.find_path(&["caption", "p"]));
    format!("{} {}", title, caption)
}

fn stripped_text(element: Option<&Element>) -> &str {
    element
        .and_then(|e| e.text.as_deref())
        .map(str::trim)
        .unwrap_or("")
}

/// Text of every section except "Figures", in document order
///
/// Each titled section is introduced by a `Section Title: <title>` line.
/// The title also appears again inside the flattened section text, and a
/// nested section is emitted both within its parent and on its own.
pub fn main_content(root: &Element) -> String {
    let mut out = String::new();

    for sec in root.find_descendants("sec") {
        if let Some(title) = sec.find("title") {
            let title_text = title.text_or_empty();
            if title.text.as_deref() == Some(FIGURES_SECTION_TITLE) {
                continue;
            }
            out.push('\n');
            out.push_str(SECTION_TITLE_PREFIX);
            out.push_str(title_text);
            out.push('\n');
        }
        write_element_text(sec, &mut out);
        out.push('\n');
    }

    out
}

/// First `sec` with a `title` child whose full text equals `title`
fn find_titled_section<'a>(root: &'a Element, title: &str) -> Option<&'a Element> {
    root.find_descendants("sec")
        .find(|sec| sec.has_child_text("title", title))
}
