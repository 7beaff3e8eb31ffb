//! Owned article documents and prompt assembly

use crate::element::Element;
use crate::error::ArticleError;
use crate::extract;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// A parsed article with accessors for each text view
#[derive(Debug, Clone)]
pub struct Article {
    root: Element,
}

/// Every text view of an article at once
#[derive(Debug, Clone, Serialize)]
pub struct ArticleSummary {
    /// Article title (or its fallback)
    pub title: String,

    /// Abstract text (or its fallback)
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Figure and table captions, one per line
    pub captions: String,

    /// All non-figure sections
    pub main_content: String,
}

impl Article {
    /// Wrap an already parsed root element
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parse an article from XML text
    pub fn parse(xml: &str) -> Result<Self, ArticleError> {
        Element::parse(xml).map(Self::new)
    }

    /// Read and parse an article from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArticleError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "parsing article");
        let file = File::open(path)?;
        Element::from_reader(BufReader::new(file)).map(Self::new)
    }

    /// Root element of the document
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Article title
    pub fn title(&self) -> String {
        extract::article_title(&self.root)
    }

    /// Article abstract
    pub fn abstract_text(&self) -> String {
        extract::abstract_text(&self.root)
    }

    /// Text of the first section matching `title`, ignoring case
    pub fn section(&self, title: &str) -> String {
        extract::section_text(&self.root, title)
    }

    /// Figure and table captions
    pub fn captions(&self) -> String {
        extract::figure_and_table_captions(&self.root)
    }

    /// All sections except "Figures"
    pub fn main_content(&self) -> String {
        extract::main_content(&self.root)
    }

    /// Collect every view
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            title: self.title(),
            abstract_text: self.abstract_text(),
            captions: self.captions(),
            main_content: self.main_content(),
        }
    }

    /// Assemble the paper into a single block of prompt text
    pub fn paper_prompt(&self) -> String {
        self.summary().to_prompt()
    }
}

impl ArticleSummary {
    /// Render the summary as labelled prompt text
    pub fn to_prompt(&self) -> String {
        format!(
            "Title: {}\n\nAbstract: {}\n\nFigures/Tables Captions:\n{}\n\nMain Content:\n{}",
            self.title, self.abstract_text, self.captions, self.main_content
        )
    }
}

impl From<Element> for Article {
    fn from(root: Element) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const XML: &str = "<article><front><article-meta><title-group>\
        <article-title>On Widgets</article-title></title-group>\
        <abstract><p>Widgets matter.</p></abstract></article-meta></front>\
        <body><sec><title>Intro</title><p>Hi.</p></sec></body></article>";

    #[test]
    fn test_article_views() {
        let article = Article::parse(XML).unwrap();
        assert_eq!(article.title(), "On Widgets");
        assert_eq!(article.abstract_text(), "Widgets matter.");
        assert_eq!(article.section("intro"), "  Intro Hi.");
        assert_eq!(article.captions(), "");
    }

    #[test]
    fn test_paper_prompt_layout() {
        let article = Article::parse(XML).unwrap();
        let prompt = article.paper_prompt();
        assert!(prompt.starts_with("Title: On Widgets\n\nAbstract: Widgets matter.\n\n"));
        assert!(prompt.contains("Figures/Tables Captions:\n\n\nMain Content:\n"));
        assert!(prompt.ends_with("Section Title: Intro\n  Intro Hi.\n"));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(XML.as_bytes()).unwrap();
        let article = Article::from_path(file.path()).unwrap();
        assert_eq!(article.title(), "On Widgets");
    }

    #[test]
    fn test_from_missing_path() {
        let result = Article::from_path("/nonexistent/article.xml");
        assert!(matches!(result, Err(ArticleError::Io(_))));
    }

    #[test]
    fn test_summary_serializes_abstract_key() {
        let article = Article::parse(XML).unwrap();
        let value = serde_json::to_value(article.summary()).unwrap();
        assert_eq!(value["abstract"], "Widgets matter.");
        assert_eq!(value["title"], "On Widgets");
    }
}
