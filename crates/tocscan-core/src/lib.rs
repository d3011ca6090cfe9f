//! # tocscan-core
//!
//! Infers the table of contents of a plain-text, book-length document with no
//! structural markup. Given the full article text, the engine returns the most
//! plausible sequence of chapter headings, each a line of the text with a
//! byte-offset cursor, together with a compact template describing the
//! pattern those headings share.
//!
//! ## How it works
//!
//! - **Candidate generation** over several numeral systems (Han, Roman,
//!   Arabic, full-width) and over purely lexical leading-token families.
//! - **Beauty scoring** in [0, 1] balancing chapter-size regularity, title
//!   validity and numeric monotonicity/coverage.
//! - **Template synthesis** into a glob-like or regex-literal string, which is
//!   re-applied to the article and re-scored before the winner is returned.
//!
//! ## Quick Start
//!
//! ```rust
//! let mut article = String::new();
//! for n in ["一", "二", "三", "四", "五"] {
//!     article.push_str(&format!("第{n}章 山中来信\n"));
//!     article.push_str(&"这一段正文只是为了撑开第二天之前的距离。\n".repeat(8));
//! }
//!
//! let toc = tocscan_core::infer(&article).expect("headings found");
//! assert_eq!(toc.content.len(), 5);
//! assert_eq!(toc.template, "第*章 山中来信");
//! ```
//!
//! The result is advisory: when no heading family clears the scoring
//! thresholds, [`infer`] returns `None` and the caller decides what to do.
//!
//! Input must be LF-normalized UTF-8; [`load_article`] reads and normalizes a
//! file in one step, [`normalize_newlines`] does the same for text already in
//! memory.

pub mod article;
pub mod beauty;
pub mod candidates;
pub mod config;
pub mod error;
pub mod numerals;
pub mod select;
pub mod template;
pub mod tokenizer;
pub mod types;

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use tracing::debug;

pub use error::{Result, TocError};
pub use types::{InferredToc, TocEntry};

/// Infer the table of contents of an LF-normalized article.
///
/// Returns `None` when no heading family scores above the acceptance
/// threshold. All intermediate state is scoped to this call.
pub fn infer(article: &str) -> Option<InferredToc> {
    let ctx = article::ArticleContext::build(article);
    debug!(lines = ctx.lines.len(), chars = ctx.chars, "article context built");
    let patterns = candidates::generate(&ctx);
    select::select(&ctx, patterns)
}

/// Normalize `\r\n` and lone `\r` line endings to `\n`, borrowing when the
/// text is already clean.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Read a file as UTF-8 and normalize its line endings.
pub fn load_article<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| TocError::NonUtf8 {
        path: path.to_path_buf(),
    })?;
    Ok(normalize_newlines(&text).into_owned())
}
