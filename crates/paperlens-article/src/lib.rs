//! Paperlens Article Extraction
//!
//! Plain-text views over scientific articles written in the JATS tag
//! vocabulary (`article-title`, `abstract`, `sec`, `fig`, `table-wrap`, ...).
//!
//! # Architecture
//!
//! ```text
//! XML → parser → Element tree → extract::* → String
//! ```
//!
//! The tree keeps leading text and tail text on every element, so the
//! flattened output preserves document order between siblings.
//!
//! # Examples
//!
//! ```
//! use paperlens_article::{Article, extract};
//!
//! let article = Article::parse(
//!     "<article><front><article-title>Foo</article-title></front>\
//!      <body><sec><title>Introduction</title><p>Hello</p></sec></body></article>",
//! ).unwrap();
//!
//! assert_eq!(article.title(), "Foo");
//! assert_eq!(extract::section_text(article.root(), "introduction"), "  Introduction Hello");
//! ```

#![warn(missing_docs)]

mod article;
mod element;
mod error;
mod parser;

pub mod extract;

pub use article::{Article, ArticleSummary};
pub use element::{Descendants, Element};
pub use error::ArticleError;
pub use extract::{
    abstract_text, article_title, element_text, figure_and_table_captions, main_content,
    section_text,
};
