//! One-pass article context builder.

use std::collections::{HashMap, HashSet};

use crate::config::MAX_TITLE_LENGTH;
use crate::numerals::{NumeralHit, PARSERS};
use crate::tokenizer::tokenize;

/// One line of the article, with everything later stages need.
#[derive(Debug, Clone)]
pub struct LineRecord {
    /// Trimmed line text, the candidate title form
    pub title: String,
    /// Byte offset of the untrimmed line start within the article
    pub cursor: usize,
    /// Character count of the trimmed line
    pub char_len: usize,
    /// Tokens of the trimmed line, in source order
    pub tokens: Vec<String>,
    /// One slot per numeral parser: the first numeral run found on this line.
    /// Lines at or above the title length limit carry empty slots.
    pub numerals: Vec<Option<NumeralHit>>,
}

/// Everything the candidate generator and selector read about an article.
#[derive(Debug)]
pub struct ArticleContext {
    /// Total consumed cursor, in bytes
    pub chars: usize,
    /// Line records in document order
    pub lines: Vec<LineRecord>,
    /// Token → number of distinct lines the token appears on
    pub token_lines: HashMap<String, usize>,
}

impl ArticleContext {
    /// Build the context in a single pass. The caller has already normalized
    /// line endings to `\n`.
    pub fn build(article: &str) -> Self {
        let mut lines = Vec::new();
        let mut token_lines: HashMap<String, usize> = HashMap::new();
        let mut cursor = 0usize;

        for raw in article.split('\n') {
            let title = raw.trim();
            let tokens = tokenize(title);

            let mut seen: HashSet<&str> = HashSet::new();
            for token in &tokens {
                if seen.insert(token) {
                    *token_lines.entry(token.clone()).or_insert(0) += 1;
                }
            }

            let char_len = title.chars().count();
            let numerals = if char_len < MAX_TITLE_LENGTH {
                PARSERS.iter().map(|parser| parser.extract(title)).collect()
            } else {
                vec![None; PARSERS.len()]
            };

            lines.push(LineRecord {
                title: title.to_string(),
                cursor,
                char_len,
                tokens,
                numerals,
            });
            cursor += raw.len() + 1;
        }

        ArticleContext {
            chars: cursor,
            lines,
            token_lines,
        }
    }
}
