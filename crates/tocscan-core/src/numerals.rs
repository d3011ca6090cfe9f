//! Numeral extraction across Han, Roman and Arabic systems.
//!
//! Nine parsers share one record shape: character sets, a pre-compiled regex
//! over them, a decoder, a group tag and a priority. The priority-2 parsers
//! carry two required charsets and only fire when a run mixes both, catching
//! numberings the single-charset parsers cannot claim.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Numeral family a parser belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralGroup {
    Han,
    Roman,
    Numeric,
}

/// Decoded values above this are garbage input, not chapter numbers.
const MAX_DECODED: i64 = 1 << 62;

const ROMAN_UPPER: &str = "IVXLCDM";
const ROMAN_LOWER: &str = "ivxlcdm";
const ROMAN_UNICODE: &str = "ⅠⅡⅢⅣⅤⅥⅦⅧⅨⅩⅪⅫⅬⅭⅮⅯⅰⅱⅲⅳⅴⅵⅶⅷⅸⅹⅺⅻⅼⅽⅾⅿ";
const HAN_COMMON: &str = "一二三四五六七八九十百千";
const HAN_FORMAL: &str = "壹贰貳叁參肆伍陆陸柒捌玖拾佰仟";
/// Zeros and the colloquial two are allowed inside any Han numeral run but
/// never establish one on their own.
const HAN_OPTIONAL: &str = "〇零两兩０";
const ARABIC: &str = "0123456789";
const ARABIC_FULLWIDTH: &str = "０１２３４５６７８９";

/// A numeral run located on a line: byte range plus decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumeralHit {
    /// Byte offset of the run start within the line
    pub start: usize,
    /// Byte offset one past the run end
    pub end: usize,
    /// Decoded value
    pub number: i64,
}

/// Immutable configuration of one numeral system.
pub struct NumeralParser {
    /// Short identifier used in logs
    pub name: &'static str,
    /// Character sets that must each contribute at least one character
    pub required: &'static [&'static str],
    /// Characters permitted in a run without being required
    pub optional: &'static str,
    /// Numeral family
    pub group: NumeralGroup,
    /// Smaller is preferred; 2 marks the mixed-charset catch-alls
    pub priority: u32,
    decode: fn(&str) -> Option<i64>,
    regex: &'static LazyLock<Regex>,
}

impl NumeralParser {
    /// Find the first decodable numeral run on the line.
    ///
    /// Runs that do not cover every required charset are skipped; once a run
    /// qualifies, a decode failure (overflow) means the line has no number.
    pub fn extract(&self, line: &str) -> Option<NumeralHit> {
        for m in self.regex.find_iter(line) {
            let infix = m.as_str();
            if !self
                .required
                .iter()
                .all(|set| infix.chars().any(|c| set.contains(c)))
            {
                continue;
            }
            let number = (self.decode)(infix)?;
            return Some(NumeralHit {
                start: m.start(),
                end: m.end(),
                number,
            });
        }
        None
    }
}

fn class_pattern(required: &[&str], optional: &str, word_bounded: bool) -> String {
    let mut class = String::new();
    for set in required.iter().copied().chain([optional]) {
        for c in set.chars() {
            if matches!(c, '\\' | ']' | '^' | '-') {
                class.push('\\');
            }
            class.push(c);
        }
    }
    if word_bounded {
        format!(r"\b[{class}]+\b")
    } else {
        format!("[{class}]+")
    }
}

fn charset_regex(required: &'static [&'static str], optional: &'static str, word_bounded: bool) -> Regex {
    Regex::new(&class_pattern(required, optional, word_bounded)).expect("valid charset regex")
}

static RE_ROMAN_UPPER: LazyLock<Regex> = LazyLock::new(|| charset_regex(&[ROMAN_UPPER], "", true));
static RE_ROMAN_LOWER: LazyLock<Regex> = LazyLock::new(|| charset_regex(&[ROMAN_LOWER], "", true));
static RE_ROMAN_MIXED: LazyLock<Regex> =
    LazyLock::new(|| charset_regex(&[ROMAN_UPPER, ROMAN_LOWER], "", true));
static RE_ROMAN_UNICODE: LazyLock<Regex> =
    LazyLock::new(|| charset_regex(&[ROMAN_UNICODE], "", false));
static RE_HAN_COMMON: LazyLock<Regex> =
    LazyLock::new(|| charset_regex(&[HAN_COMMON], HAN_OPTIONAL, false));
static RE_HAN_FORMAL: LazyLock<Regex> =
    LazyLock::new(|| charset_regex(&[HAN_FORMAL], HAN_OPTIONAL, false));
static RE_HAN_MIXED: LazyLock<Regex> =
    LazyLock::new(|| charset_regex(&[HAN_COMMON, HAN_FORMAL], HAN_OPTIONAL, false));
static RE_ARABIC: LazyLock<Regex> = LazyLock::new(|| charset_regex(&[ARABIC], "", false));
static RE_ARABIC_FULLWIDTH: LazyLock<Regex> =
    LazyLock::new(|| charset_regex(&[ARABIC_FULLWIDTH], "", false));

/// The configured parser set, in evaluation order.
pub static PARSERS: &[NumeralParser] = &[
    NumeralParser {
        name: "roman-upper",
        required: &[ROMAN_UPPER],
        optional: "",
        group: NumeralGroup::Roman,
        priority: 1,
        decode: decode_roman,
        regex: &RE_ROMAN_UPPER,
    },
    NumeralParser {
        name: "roman-lower",
        required: &[ROMAN_LOWER],
        optional: "",
        group: NumeralGroup::Roman,
        priority: 1,
        decode: decode_roman,
        regex: &RE_ROMAN_LOWER,
    },
    NumeralParser {
        name: "roman-mixed",
        required: &[ROMAN_UPPER, ROMAN_LOWER],
        optional: "",
        group: NumeralGroup::Roman,
        priority: 2,
        decode: decode_roman,
        regex: &RE_ROMAN_MIXED,
    },
    NumeralParser {
        name: "roman-unicode",
        required: &[ROMAN_UNICODE],
        optional: "",
        group: NumeralGroup::Roman,
        priority: 1,
        decode: decode_roman,
        regex: &RE_ROMAN_UNICODE,
    },
    NumeralParser {
        name: "han-common",
        required: &[HAN_COMMON],
        optional: HAN_OPTIONAL,
        group: NumeralGroup::Han,
        priority: 1,
        decode: decode_han,
        regex: &RE_HAN_COMMON,
    },
    NumeralParser {
        name: "han-formal",
        required: &[HAN_FORMAL],
        optional: HAN_OPTIONAL,
        group: NumeralGroup::Han,
        priority: 1,
        decode: decode_han,
        regex: &RE_HAN_FORMAL,
    },
    NumeralParser {
        name: "han-mixed",
        required: &[HAN_COMMON, HAN_FORMAL],
        optional: HAN_OPTIONAL,
        group: NumeralGroup::Han,
        priority: 2,
        decode: decode_han,
        regex: &RE_HAN_MIXED,
    },
    NumeralParser {
        name: "arabic",
        required: &[ARABIC],
        optional: "",
        group: NumeralGroup::Numeric,
        priority: 1,
        decode: decode_arabic,
        regex: &RE_ARABIC,
    },
    NumeralParser {
        name: "arabic-fullwidth",
        required: &[ARABIC_FULLWIDTH],
        optional: "",
        group: NumeralGroup::Numeric,
        priority: 1,
        decode: decode_arabic,
        regex: &RE_ARABIC_FULLWIDTH,
    },
];

#[inline]
fn han_digit(c: char) -> Option<i64> {
    match c {
        '〇' | '零' | '０' => Some(0),
        '一' | '壹' => Some(1),
        '二' | '贰' | '貳' | '两' | '兩' => Some(2),
        '三' | '叁' | '參' => Some(3),
        '四' | '肆' => Some(4),
        '五' | '伍' => Some(5),
        '六' | '陆' | '陸' => Some(6),
        '七' | '柒' => Some(7),
        '八' | '捌' => Some(8),
        '九' | '玖' => Some(9),
        _ => None,
    }
}

#[inline]
fn han_unit(c: char) -> Option<i64> {
    match c {
        '十' | '拾' => Some(10),
        '百' | '佰' => Some(100),
        '千' | '仟' => Some(1000),
        _ => None,
    }
}

/// Positional Han decoder. Digits accumulate into `current`; a unit closes the
/// accumulated digits (an empty accumulator counts as one, so 十 is 10).
fn decode_han(s: &str) -> Option<i64> {
    let mut result: i64 = 0;
    let mut current: i64 = 0;
    let mut seen = false;

    for c in s.chars() {
        if let Some(unit) = han_unit(c) {
            result = result.checked_add(current.max(1).checked_mul(unit)?)?;
            current = 0;
        } else if let Some(digit) = han_digit(c) {
            current = current.checked_mul(10)?.checked_add(digit)?;
        } else {
            return None;
        }
        seen = true;
        if result > MAX_DECODED || current > MAX_DECODED {
            return None;
        }
    }

    if !seen {
        return None;
    }
    let value = result.checked_add(current)?;
    (value <= MAX_DECODED).then_some(value)
}

#[inline]
fn roman_value(c: char) -> Option<i64> {
    match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Roman decoder over runs of identical letters. Every run is first added;
/// when a run outranks the one before it, the earlier run was subtractive and
/// is cancelled twice over.
fn decode_roman(s: &str) -> Option<i64> {
    let normalized: String = s.nfkc().collect::<String>().to_uppercase();

    let mut runs: Vec<(i64, i64)> = Vec::new();
    for c in normalized.chars() {
        let value = roman_value(c)?;
        match runs.last_mut() {
            Some((v, len)) if *v == value => *len += 1,
            _ => runs.push((value, 1)),
        }
    }
    if runs.is_empty() {
        return None;
    }

    let mut total: i64 = 0;
    let mut prev: Option<(i64, i64)> = None;
    for (value, len) in runs {
        total = total.checked_add(value.checked_mul(len)?)?;
        if let Some((prev_value, prev_len)) = prev {
            if value > prev_value {
                total = total.checked_sub(2i64.checked_mul(prev_value.checked_mul(prev_len)?)?)?;
            }
        }
        prev = Some((value, len));
        if total.abs() > MAX_DECODED {
            return None;
        }
    }

    (0..=MAX_DECODED).contains(&total).then_some(total)
}

/// Arabic decoder: NFKC folds full-width digits to ASCII before parsing.
fn decode_arabic(s: &str) -> Option<i64> {
    let normalized: String = s.nfkc().collect();
    let value: i64 = normalized.parse().ok()?;
    (0..=MAX_DECODED).contains(&value).then_some(value)
}
