//! Final pattern selection.
//!
//! Deduplicate the generated patterns, keep the best few of each kind,
//! re-apply their templates to the whole article and re-score what they
//! actually catch. The winner must clear the final threshold.

use std::collections::HashSet;

use tracing::debug;

use crate::article::ArticleContext;
use crate::beauty::{numeric_beauty, size_beauty, title_beauty, Entry};
use crate::config::{BEAUTY_MIN_2, MAX_TITLE_LENGTH, TEMPLATE_COUNT_1};
use crate::template;
use crate::types::{InferredToc, Pattern, PatternKind, TocEntry};

/// Rank the candidates and return the best TOC, if any clears the threshold.
pub fn select(ctx: &ArticleContext, patterns: Vec<Pattern>) -> Option<InferredToc> {
    // Dedup by the visible template string; the first committed pattern wins.
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique: Vec<&Pattern> = Vec::new();
    for pattern in &patterns {
        if seen.insert(&pattern.template) {
            unique.push(pattern);
        }
    }

    let (mut numeral, mut prefix): (Vec<&Pattern>, Vec<&Pattern>) = unique
        .into_iter()
        .partition(|p| matches!(p.kind, PatternKind::Number { .. }));
    numeral.sort_by(|a, b| b.beauty.total_cmp(&a.beauty));
    prefix.sort_by(|a, b| b.beauty.total_cmp(&a.beauty));
    numeral.truncate(TEMPLATE_COUNT_1);
    prefix.truncate(TEMPLATE_COUNT_1);

    let mut finalists: Vec<(Rescored<'_>, &Pattern)> = Vec::new();
    for pattern in numeral.into_iter().chain(prefix) {
        let rescored = rescore(ctx, pattern);
        debug!(
            template = %pattern.template,
            beauty = rescored.beauty,
            entries = rescored.entries.len(),
            "re-scored finalist"
        );
        finalists.push((rescored, pattern));
    }

    finalists.sort_by(|a, b| {
        b.0.beauty
            .total_cmp(&a.0.beauty)
            .then(a.1.priority.cmp(&b.1.priority))
    });

    let (winner, pattern) = finalists.into_iter().next()?;
    if winner.beauty < BEAUTY_MIN_2 {
        return None;
    }

    Some(InferredToc {
        content: winner
            .entries
            .iter()
            .map(|e| TocEntry {
                title: e.title.to_string(),
                cursor: e.cursor,
                number: e.number,
            })
            .collect(),
        template: pattern.template.clone(),
        beauty: winner.beauty,
    })
}

struct Rescored<'a> {
    entries: Vec<Entry<'a>>,
    beauty: f64,
}

/// Re-apply one template to the article and score the catch.
fn rescore<'a>(ctx: &'a ArticleContext, pattern: &Pattern) -> Rescored<'a> {
    let matcher = template::compile(&pattern.template);

    let mut entries: Vec<Entry<'a>> = Vec::new();
    for line in &ctx.lines {
        if line.char_len > MAX_TITLE_LENGTH || !matcher.is_match(&line.title) {
            continue;
        }
        let number = match pattern.kind {
            PatternKind::Number { parser } => line.numerals[parser].map(|hit| hit.number),
            PatternKind::Prefix { .. } => None,
        };
        entries.push(Entry {
            title: &line.title,
            cursor: line.cursor,
            number,
        });
    }

    let shape = size_beauty(&entries, ctx.chars) * title_beauty(&entries);
    let quality = match pattern.kind {
        PatternKind::Number { .. } => numeric_beauty(&entries),
        PatternKind::Prefix { uniqueness } => uniqueness,
    };

    Rescored {
        entries,
        beauty: shape * quality,
    }
}
