//! Common types for inferred tables of contents.

use serde::{Deserialize, Serialize};

/// One inferred heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading text with surrounding whitespace stripped
    pub title: String,

    /// Byte offset of the untrimmed line start within the article
    pub cursor: usize,

    /// Chapter number, when the entry came from a numeral pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
}

/// The best TOC found for an article, with the template its headings share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredToc {
    /// Headings in document order, cursors strictly increasing
    pub content: Vec<TocEntry>,

    /// Glob-like or `/regex/flags` template describing the heading family
    pub template: String,

    /// Combined score in [0, 1]
    pub beauty: f64,
}

/// How a pattern family was discovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatternKind {
    /// Born from a numeral parser; carries the parser's index into the table.
    Number {
        /// Index into [`crate::numerals::PARSERS`]
        parser: usize,
    },
    /// Born from a shared leading-token family.
    Prefix {
        /// The keyword-uniqueness sub-score the pattern was born with
        uniqueness: f64,
    },
}

/// Canonical dedup identity of a pattern: originating parser (if any) plus the
/// literal prefix/suffix pair it was committed with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternKey {
    /// Index of the numeral parser, absent for prefix patterns
    pub parser: Option<usize>,
    /// Literal text before the variable part
    pub prefix: String,
    /// Literal text the variable part must be followed by
    pub suffix: String,
}

/// A discovered heading family, scored but not yet re-applied to the article.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Discovery path and its path-specific payload
    pub kind: PatternKind,
    /// User-visible template string
    pub template: String,
    /// Canonical dedup identity
    pub key: PatternKey,
    /// Smaller is preferred on beauty ties
    pub priority: u32,
    /// Scalar in [0, 1]
    pub beauty: f64,
}
