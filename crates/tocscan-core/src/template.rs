//! Template synthesis and compilation.
//!
//! Templates travel as plain strings in two dialects: a glob form where a
//! space matches a whitespace run, `*` any run and `?` any character, and a
//! regex-literal form `/body/flags`. Both compile to the same matcher shape.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use regex::Regex;

/// A compiled template. A regex literal with a broken body compiles to
/// [`Matcher::Never`] and the surrounding computation carries on.
#[derive(Debug)]
pub enum Matcher {
    /// Anchored regex over the trimmed line
    Regex(Regex),
    /// Matches nothing
    Never,
}

impl Matcher {
    /// Test a trimmed line against the template.
    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Matcher::Regex(re) => re.is_match(line),
            Matcher::Never => false,
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Synthesize the user-visible glob `{prefix}*{suffix}`. Components that
/// collide with the glob metacharacters force the regex-literal form instead.
pub fn glob_template(prefix: &str, suffix: &str) -> String {
    if prefix.contains(['/', '*']) || suffix.contains(['/', '*']) {
        format!("/{}.*{}/u", regex::escape(prefix), regex::escape(suffix))
    } else {
        collapse_whitespace(&format!("{prefix}*{suffix}"))
    }
}

/// Synthesize the explicit regex form of a numeral pattern, with the numeral
/// charset compacted into character ranges.
pub fn numeral_regex_template(prefix: &str, charset: &BTreeSet<char>, suffix: &str) -> String {
    format!(
        "/^\\s*{}[{}]+{}/u",
        regex::escape(prefix),
        charset_ranges(charset),
        regex::escape(suffix)
    )
}

/// Emit a character class body, fusing runs of consecutive code points.
fn charset_ranges(charset: &BTreeSet<char>) -> String {
    let chars: Vec<char> = charset.iter().copied().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        let mut j = i;
        while j + 1 < chars.len() && chars[j + 1] as u32 == chars[j] as u32 + 1 {
            j += 1;
        }
        if j - i >= 2 {
            push_class_char(&mut out, chars[i]);
            out.push('-');
            push_class_char(&mut out, chars[j]);
        } else {
            for &c in &chars[i..=j] {
                push_class_char(&mut out, c);
            }
        }
        i = j + 1;
    }
    out
}

fn push_class_char(out: &mut String, c: char) {
    if matches!(c, '\\' | ']' | '^' | '-') {
        out.push('\\');
    }
    out.push(c);
}

/// Compile a template string into a matcher.
///
/// `/body/flags` parses as a regex literal (the `u` flag is implied by the
/// engine, `i` folds case); anything else translates as a glob anchored at
/// `^\s*`.
pub fn compile(template: &str) -> Matcher {
    if let Some(rest) = template.strip_prefix('/') {
        if let Some(close) = rest.rfind('/') {
            let body = &rest[..close];
            let flags = &rest[close + 1..];
            let mut pattern = String::with_capacity(body.len() + 4);
            if flags.contains('i') {
                pattern.push_str("(?i)");
            }
            pattern.push_str(body);
            return match Regex::new(&pattern) {
                Ok(re) => Matcher::Regex(re),
                Err(_) => Matcher::Never,
            };
        }
    }

    let mut pattern = String::with_capacity(template.len() + 8);
    pattern.push_str("^\\s*(?:");
    for c in template.chars() {
        match c {
            ' ' => pattern.push_str("\\s+"),
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            '.' | '^' | '$' | '|' | '(' | ')' | '[' | ']' | '{' | '}' | '+' | '\\' => {
                let _ = write!(pattern, "\\u{{{:04X}}}", c as u32);
            }
            other => pattern.push(other),
        }
    }
    pattern.push(')');
    match Regex::new(&pattern) {
        Ok(re) => Matcher::Regex(re),
        Err(_) => Matcher::Never,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_template_collapses_whitespace() {
        assert_eq!(glob_template("Chapter  ", ". "), "Chapter *. ");
        assert_eq!(glob_template("第", "章 "), "第*章 ");
    }

    #[test]
    fn test_glob_template_falls_back_to_regex_literal() {
        let template = glob_template("1/2 ", "");
        assert!(template.starts_with('/') && template.ends_with("/u"));
        assert!(compile(&template).is_match("1/2 IV"));
    }

    #[test]
    fn test_compile_glob() {
        let matcher = compile("第*章 ");
        assert!(matcher.is_match("第一章 起点"));
        assert!(matcher.is_match("  第十二章 转折"));
        assert!(!matcher.is_match("第一节 起点"));
    }

    #[test]
    fn test_compile_glob_escapes_metacharacters() {
        let matcher = compile("Chapter *. ");
        assert!(matcher.is_match("Chapter IV. Dawn"));
        assert!(!matcher.is_match("Chapter IVx Dawn"));
    }

    #[test]
    fn test_compile_question_mark() {
        let matcher = compile("?. ");
        assert!(matcher.is_match("1. intro"));
        assert!(!matcher.is_match("10. intro"));
    }

    #[test]
    fn test_compile_regex_literal() {
        let matcher = compile("/^\\s*Chapter [IVXLCDM]+/u");
        assert!(matcher.is_match("Chapter XIV"));
        assert!(!matcher.is_match("Chapitre XIV"));
    }

    #[test]
    fn test_compile_regex_literal_case_fold() {
        let matcher = compile("/^chapter/iu");
        assert!(matcher.is_match("CHAPTER ONE"));
    }

    #[test]
    fn test_broken_regex_literal_never_matches() {
        let matcher = compile("/((/u");
        assert!(!matcher.is_match("(("));
    }

    #[test]
    fn test_charset_ranges_fuse_consecutive_codepoints() {
        let charset: BTreeSet<char> = "0123456789".chars().collect();
        assert_eq!(charset_ranges(&charset), "0-9");

        let charset: BTreeSet<char> = "IVXLCDM".chars().collect();
        // sparse codepoints stay literal
        assert_eq!(charset_ranges(&charset), "CDILMVX");
    }
}
