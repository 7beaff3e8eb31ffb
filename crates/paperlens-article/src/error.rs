//! Error types for article parsing

use thiserror::Error;

/// Errors that can occur while turning XML into a document tree
#[derive(Error, Debug)]
pub enum ArticleError {
    /// The XML reader rejected the input
    #[error("XML parse error at byte {position}: {message}")]
    Xml {
        /// Byte offset where the reader stopped
        position: u64,
        /// Reader error message
        message: String,
    },

    /// A closing tag appeared with no open element
    #[error("Unexpected closing tag </{0}>")]
    UnexpectedEnd(String),

    /// The document ended while an element was still open
    #[error("Unclosed element <{0}> at end of document")]
    Unclosed(String),

    /// The document contained no element at all
    #[error("Document has no root element")]
    NoRoot,

    /// A second top-level element followed the document element
    #[error("Multiple root elements: found <{0}> after the document element")]
    MultipleRoots(String),

    /// I/O error while reading the document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
