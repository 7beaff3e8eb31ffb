//! Extract command implementation.

use crate::cli::{ExtractArgs, Part};
use crate::error::Result;
use crate::output::Formatter;
use paperlens_article::Article;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, formatter: &Formatter) -> Result<()> {
    let article = Article::from_path(&args.file)?;
    println!("{}", render_part(&article, args.part, &args.section, formatter)?);
    Ok(())
}

/// Render one part of an article.
pub fn render_part(
    article: &Article,
    part: Part,
    section: &str,
    formatter: &Formatter,
) -> Result<String> {
    match part {
        Part::All => formatter.format_summary(&article.summary()),
        Part::Title => formatter.format_part("title", &article.title()),
        Part::Abstract => formatter.format_part("abstract", &article.abstract_text()),
        Part::Section => formatter.format_part(section, &article.section(section)),
        Part::Captions => formatter.format_part("captions", &article.captions()),
        Part::Main => formatter.format_part("main", &article.main_content()),
    }
}
