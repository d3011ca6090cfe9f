//! Candidate pattern generation.
//!
//! Two independent paths feed the selector: numeral families grouped by the
//! literal text around the number, and lexical families sharing a run of
//! leading tokens. Both score their candidates before committing them, so the
//! selector only ever sees patterns that cleared the admission threshold.
//! The pattern list lives in the generator, scoped to one call.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::article::ArticleContext;
use crate::beauty::{numeric_beauty, size_beauty, title_beauty, Entry};
use crate::config::{
    BEAUTY_MIN_1, FACTOR_TEXT_PREFIX, KEYWORD_UNIQUE_FACTOR, MAX_CONTENTS_LENGTH, MIN_CONTENTS,
    PREFIX_MIN_RATIO,
};
use crate::numerals::PARSERS;
use crate::template::{glob_template, numeral_regex_template};
use crate::tokenizer::starts_with_letter;
use crate::tokenizer::tokenize;
use crate::types::{Pattern, PatternKey, PatternKind};

/// Generate all candidate patterns for the article, in insertion order.
pub fn generate(ctx: &ArticleContext) -> Vec<Pattern> {
    let mut generator = Generator {
        ctx,
        patterns: Vec::new(),
    };
    generator.numeral_patterns();
    let numeral_count = generator.patterns.len();
    generator.prefix_patterns();
    debug!(
        numeral = numeral_count,
        prefix = generator.patterns.len() - numeral_count,
        "generated candidate patterns"
    );
    generator.patterns
}

/// A numeral match tied back to its line.
#[derive(Debug, Clone, Copy)]
struct Located<'a> {
    line: usize,
    infix: &'a str,
    suffix: &'a str,
    number: i64,
}

struct Generator<'a> {
    ctx: &'a ArticleContext,
    patterns: Vec<Pattern>,
}

impl<'a> Generator<'a> {
    // ---- numeral path ----

    fn numeral_patterns(&mut self) {
        let ctx = self.ctx;
        for parser_idx in 0..PARSERS.len() {
            let mut order: Vec<&'a str> = Vec::new();
            let mut groups: HashMap<&'a str, Vec<Located<'a>>> = HashMap::new();

            for (line_idx, line) in ctx.lines.iter().enumerate() {
                let Some(hit) = line.numerals[parser_idx] else {
                    continue;
                };
                let prefix = line.title[..hit.start].trim_start();
                let group = groups.entry(prefix).or_insert_with(|| {
                    order.push(prefix);
                    Vec::new()
                });
                group.push(Located {
                    line: line_idx,
                    infix: &line.title[hit.start..hit.end],
                    suffix: &line.title[hit.end..],
                    number: hit.number,
                });
            }

            for prefix in order {
                let matches = &groups[prefix];
                if matches.len() >= MIN_CONTENTS {
                    self.commit_numeral_pattern(parser_idx, prefix, "", matches);
                }

                // Suffix extensions: every growing token prefix of a match's
                // suffix opens a bucket.
                let mut bucket_order: Vec<String> = Vec::new();
                let mut buckets: HashMap<String, Vec<Located<'a>>> = HashMap::new();
                for &located in matches {
                    let mut key = String::new();
                    for token in tokenize(located.suffix) {
                        key.push_str(&token);
                        let bucket = buckets.entry(key.clone()).or_insert_with(|| {
                            bucket_order.push(key.clone());
                            Vec::new()
                        });
                        bucket.push(located);
                    }
                }
                for key in bucket_order {
                    let bucket = &buckets[&key];
                    if bucket.len() >= MIN_CONTENTS {
                        self.commit_numeral_pattern(parser_idx, prefix, &key, bucket);
                    }
                }
            }
        }
    }

    fn commit_numeral_pattern(
        &mut self,
        parser_idx: usize,
        prefix: &str,
        suffix: &str,
        matches: &[Located<'a>],
    ) {
        let entries = self.entries_for(matches);
        let numeric = numeric_beauty(&entries);
        if numeric < BEAUTY_MIN_1 {
            return;
        }
        let shape = size_beauty(&entries, self.ctx.chars) * title_beauty(&entries);
        let beauty = numeric * shape;
        if beauty < BEAUTY_MIN_1 {
            return;
        }

        let lcp = matches
            .iter()
            .map(|m| m.suffix)
            .reduce(common_prefix)
            .unwrap_or("");

        // The template's character class covers the parser's own charsets plus
        // whatever optional characters the observed numerals actually used.
        let parser = &PARSERS[parser_idx];
        let mut charset: BTreeSet<char> = parser
            .required
            .iter()
            .flat_map(|set| set.chars())
            .collect();
        for located in matches {
            for c in located.infix.chars() {
                if parser.optional.contains(c) {
                    charset.insert(c);
                }
            }
        }

        let key = PatternKey {
            parser: Some(parser_idx),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        };
        let kind = PatternKind::Number { parser: parser_idx };
        self.patterns.push(Pattern {
            kind,
            template: glob_template(prefix, lcp),
            key: key.clone(),
            priority: 10 * parser.priority,
            beauty,
        });
        self.patterns.push(Pattern {
            kind,
            template: numeral_regex_template(prefix, &charset, lcp),
            key,
            priority: 10 * parser.priority + 1,
            beauty,
        });
    }

    fn entries_for(&self, matches: &[Located<'a>]) -> Vec<Entry<'a>> {
        matches
            .iter()
            .map(|m| {
                let line = &self.ctx.lines[m.line];
                Entry {
                    title: &line.title,
                    cursor: line.cursor,
                    number: Some(m.number),
                }
            })
            .collect()
    }

    // ---- prefix path ----

    fn prefix_patterns(&mut self) {
        let ctx = self.ctx;
        let mut order: Vec<&'a str> = Vec::new();
        let mut groups: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (line_idx, line) in ctx.lines.iter().enumerate() {
            let Some(first) = line.tokens.first().map(String::as_str) else {
                continue;
            };
            let group = groups.entry(first).or_insert_with(|| {
                order.push(first);
                Vec::new()
            });
            group.push(line_idx);
        }

        let too_generic = MAX_CONTENTS_LENGTH as f64 / PREFIX_MIN_RATIO;
        for first in order {
            let lines = &groups[first];
            if lines.len() as f64 > too_generic || lines.len() < MIN_CONTENTS {
                continue;
            }
            let token_lines = ctx.token_lines.get(first).copied().unwrap_or(0);
            let denominator = token_lines as f64
                * if starts_with_letter(first) {
                    FACTOR_TEXT_PREFIX
                } else {
                    1.0
                };
            if denominator <= 0.0 || (lines.len() as f64) / denominator < PREFIX_MIN_RATIO {
                continue;
            }
            self.extend_prefix(&[first.to_string()], lines, denominator);
        }
    }

    /// Grow the fixed token prefix while some next token keeps the family
    /// large and selective; a family that cannot grow goes keyword hunting.
    fn extend_prefix(&mut self, prefix_tokens: &[String], lines: &[usize], denominator: f64) {
        let ctx = self.ctx;
        let position = prefix_tokens.len();
        let mut order: Vec<&'a str> = Vec::new();
        let mut groups: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for &line_idx in lines {
            let Some(token) = ctx.lines[line_idx].tokens.get(position).map(String::as_str) else {
                continue;
            };
            let group = groups.entry(token).or_insert_with(|| {
                order.push(token);
                Vec::new()
            });
            group.push(line_idx);
        }

        let mut extended = false;
        for token in order {
            let group = &groups[token];
            if group.len() >= MIN_CONTENTS && group.len() as f64 / denominator >= PREFIX_MIN_RATIO {
                extended = true;
                let mut next = prefix_tokens.to_vec();
                next.push(token.to_string());
                self.extend_prefix(&next, group, denominator);
            }
        }
        if !extended {
            self.keyword_patterns(prefix_tokens, lines, denominator);
        }
    }

    /// At a terminal prefix, look for a keyword the line bodies share and
    /// anchor the template on it.
    fn keyword_patterns(&mut self, prefix_tokens: &[String], lines: &[usize], denominator: f64) {
        let ctx = self.ctx;
        let skip = prefix_tokens.len();
        let mut order: Vec<&'a str> = Vec::new();
        let mut buckets: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for &line_idx in lines {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in ctx.lines[line_idx].tokens.iter().skip(skip).map(String::as_str) {
                if seen.insert(token) {
                    let bucket = buckets.entry(token).or_insert_with(|| {
                        order.push(token);
                        Vec::new()
                    });
                    bucket.push(line_idx);
                }
            }
        }

        let prefix = prefix_tokens.concat();
        for token in order {
            let bucket = &buckets[token];
            if bucket.len() < MIN_CONTENTS {
                continue;
            }
            let ratio = bucket.len() as f64 / denominator;
            if ratio < PREFIX_MIN_RATIO {
                continue;
            }

            // Longest common text following the keyword across the bucket.
            let mut lcp: Option<&str> = None;
            for &line_idx in bucket {
                let line = &ctx.lines[line_idx];
                let Some(found) = line.tokens.iter().skip(skip).position(|t| t == token) else {
                    continue;
                };
                let consumed: usize = line
                    .tokens
                    .iter()
                    .take(skip + found + 1)
                    .map(String::len)
                    .sum();
                let after = &line.title[consumed..];
                lcp = Some(match lcp {
                    None => after,
                    Some(prev) => common_prefix(prev, after),
                });
            }

            let suffix = format!("{token}{}", lcp.unwrap_or(""));
            let subset: Vec<usize> = lines
                .iter()
                .copied()
                .filter(|&line_idx| ctx.lines[line_idx].title.contains(&suffix))
                .collect();
            assert!(
                subset.len() >= bucket.len(),
                "keyword {token:?} selected fewer lines than its bucket"
            );

            let uniqueness = ratio.powf(KEYWORD_UNIQUE_FACTOR / 10.0);
            let entries: Vec<Entry<'_>> = subset
                .iter()
                .map(|&line_idx| {
                    let line = &ctx.lines[line_idx];
                    Entry {
                        title: &line.title,
                        cursor: line.cursor,
                        number: None,
                    }
                })
                .collect();
            let shape = title_beauty(&entries) * size_beauty(&entries, ctx.chars);
            let beauty = uniqueness * shape;
            if beauty < BEAUTY_MIN_1 {
                continue;
            }

            self.patterns.push(Pattern {
                kind: PatternKind::Prefix { uniqueness },
                template: glob_template(&prefix, &suffix),
                key: PatternKey {
                    parser: None,
                    prefix: prefix.clone(),
                    suffix,
                },
                priority: 10,
                beauty,
            });
        }
    }
}

/// Longest common prefix of two strings, on character boundaries.
fn common_prefix<'s>(a: &'s str, b: &str) -> &'s str {
    let mut end = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        end += ca.len_utf8();
    }
    &a[..end]
}
