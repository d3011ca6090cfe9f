//! Script-run tokenizer.
//!
//! A token is a maximal run of letters in one script, a maximal run of digit
//! characters, or exactly one other character. Concatenating the tokens of a
//! line reproduces its trimmed text.

/// Letter scripts that form multi-character tokens. Characters outside these
/// scripts (CJK ideographs, kana, punctuation, whitespace) tokenize one by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    Cyrillic,
    Greek,
    Georgian,
    Armenian,
    Arabic,
    Tibetan,
}

/// Classify a letter into one of the tokenizer's scripts.
#[inline]
pub fn letter_script(c: char) -> Option<Script> {
    if !c.is_alphabetic() {
        return None;
    }
    let code = c as u32;
    match code {
        0x0041..=0x005A | 0x0061..=0x007A | 0x00C0..=0x024F | 0x1E00..=0x1EFF => {
            Some(Script::Latin)
        }
        0x0400..=0x04FF | 0x0500..=0x052F => Some(Script::Cyrillic),
        0x0370..=0x03FF | 0x1F00..=0x1FFF => Some(Script::Greek),
        0x10A0..=0x10FF => Some(Script::Georgian),
        0x0530..=0x058F => Some(Script::Armenian),
        0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF | 0xFB50..=0xFDFF
        | 0xFE70..=0xFEFF => Some(Script::Arabic),
        0x0F00..=0x0FFF => Some(Script::Tibetan),
        _ => None,
    }
}

/// Whether a token's first character is a letter of a known script.
#[inline]
pub fn starts_with_letter(token: &str) -> bool {
    token.chars().next().is_some_and(|c| letter_script(c).is_some())
}

/// Split a line into tokens. Surrounding whitespace is trimmed first; interior
/// whitespace survives as single-character tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    let line = line.trim();
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(script) = letter_script(c) {
            let mut token = String::new();
            token.push(c);
            while let Some(&next) = chars.peek() {
                if letter_script(next) == Some(script) {
                    token.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(token);
        } else if c.is_numeric() {
            let mut token = String::new();
            token.push(c);
            while let Some(&next) = chars.peek() {
                if next.is_numeric() {
                    token.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(token);
        } else {
            tokens.push(c.to_string());
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_and_digits() {
        assert_eq!(tokenize("Chapter 12."), vec!["Chapter", " ", "12", "."]);
    }

    #[test]
    fn test_cjk_one_char_per_token() {
        assert_eq!(tokenize("第一章"), vec!["第", "一", "章"]);
    }

    #[test]
    fn test_mixed_scripts_split() {
        assert_eq!(tokenize("Глава one"), vec!["Глава", " ", "one"]);
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(tokenize("  Note:  "), vec!["Note", ":"]);
    }

    #[test]
    fn test_concatenation_reproduces_trimmed_line() {
        let line = "第3節 The End — конец.";
        assert_eq!(tokenize(line).concat(), line.trim());
    }

    #[test]
    fn test_starts_with_letter() {
        assert!(starts_with_letter("Chapter"));
        assert!(starts_with_letter("Глава"));
        assert!(!starts_with_letter("第"));
        assert!(!starts_with_letter("12"));
        assert!(!starts_with_letter("§"));
    }
}
