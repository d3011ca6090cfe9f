//! Engine tuning constants.
//!
//! These are compile-time knobs; none are overridable through arguments.

/// Hard cap on the number of entries a candidate TOC may carry.
pub const MAX_CONTENTS_LENGTH: usize = 2000;

/// Minimum number of entries for a TOC (or a keyword bucket) to be considered.
pub const MIN_CONTENTS: usize = 3;

/// Maximum length of a heading line, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Base of the mild bonus for longer TOCs in the size score.
pub const FACTOR_CONTENTS_SIZE: f64 = 4.0;

/// Penalty base for headings excluded from the central gap mass, and for a
/// central mass that covers too little of the article.
pub const FACTOR_OUTLINER: f64 = 8.0;

/// Penalty base for gap spread around the cluster means.
pub const FACTOR_VARIANCE_SIZE: f64 = 5.0;

/// Log2 width used to expand the central gap mass; also the multiplier above
/// which a trailing gap counts as an appendix and is dropped.
pub const OUTLINER_DISTANCE: u32 = 3;

/// Penalty base for invalid titles.
pub const FACTOR_TITLE_INVALID: f64 = 8.0;

/// Extra occurrences of the same title tolerated before invalidation.
pub const TOC_DUPLICATE_TOLERATE: usize = 1;

/// Penalty base favoring numberings that reach higher chapter numbers.
pub const FACTOR_NUMBER_MAX: f64 = 5.0;

/// Penalty base for holes in the numbering.
pub const FACTOR_NUMBER_HOLES: f64 = 5.0;

/// Penalty base for entries that fall off the longest non-decreasing run.
pub const FACTOR_NUMBER_INVALID: f64 = 5.0;

/// Extra selectivity demanded of prefix families that start with a letter.
pub const FACTOR_TEXT_PREFIX: f64 = 3.0;

/// Exponent, in tenths, applied to a keyword's uniqueness ratio.
pub const KEYWORD_UNIQUE_FACTOR: f64 = 4.0;

/// Admission threshold for candidate patterns.
pub const BEAUTY_MIN_1: f64 = 0.1;

/// Threshold the final re-scored winner must clear.
pub const BEAUTY_MIN_2: f64 = 0.1;

/// Minimum share of a token's lines a prefix family must cover.
pub const PREFIX_MIN_RATIO: f64 = 0.45;

/// How many top patterns of each kind survive into re-scoring.
pub const TEMPLATE_COUNT_1: usize = 10;
