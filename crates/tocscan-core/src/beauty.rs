//! Beauty scorers over a candidate TOC.
//!
//! Three independent functions, each in [0, 1] with 0 as a disqualifier:
//! chapter-size regularity, title validity, and numeric quality. Scores
//! combine multiplicatively, so every factor must stay composable and
//! monotone on its own.

use std::collections::{HashMap, HashSet};

use crate::config::{
    FACTOR_CONTENTS_SIZE, FACTOR_NUMBER_HOLES, FACTOR_NUMBER_INVALID, FACTOR_NUMBER_MAX,
    FACTOR_OUTLINER, FACTOR_TITLE_INVALID, FACTOR_VARIANCE_SIZE, MAX_CONTENTS_LENGTH,
    MAX_TITLE_LENGTH, MIN_CONTENTS, OUTLINER_DISTANCE, TOC_DUPLICATE_TOLERATE,
};

/// Minimal view of a candidate TOC entry, borrowed from the article context.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    /// Trimmed title text
    pub title: &'a str,
    /// Byte offset of the line start
    pub cursor: usize,
    /// Decoded chapter number, if any
    pub number: Option<i64>,
}

/// A score outside [0, 1] or non-finite means a broken factor, never valid
/// input. Aborting beats returning a poisoned ranking.
fn checked(score: f64) -> f64 {
    assert!(
        score.is_finite() && (0.0..=1.0).contains(&score),
        "score factor out of range: {score}"
    );
    score
}

/// Inter-heading gaps: preamble, body gaps, and the trailing gap, with a
/// dominant trailing gap (appendix, postscript) dropped. The returned vector
/// excludes the preamble.
fn gap_profile(entries: &[Entry<'_>], chars: usize) -> Vec<f64> {
    let Some(last) = entries.last() else {
        return Vec::new();
    };

    let mut gaps: Vec<f64> = Vec::with_capacity(entries.len() + 1);
    gaps.push(entries[0].cursor as f64);
    for pair in entries.windows(2) {
        let gap = pair[1].cursor as i64 - pair[0].cursor as i64 - pair[0].title.len() as i64;
        gaps.push(gap.max(0) as f64);
    }
    let tail = (chars as i64 - last.cursor as i64 - last.title.len() as i64).max(0) as f64;

    let prior_max = gaps.iter().copied().fold(0.0f64, f64::max);
    if f64::from(OUTLINER_DISTANCE) * prior_max >= tail {
        gaps.push(tail);
    }

    gaps.remove(0);
    gaps
}

/// Linear interpolation into a sorted slice at a fractional index.
fn at(sorted: &[f64], x: f64) -> f64 {
    let x = x.clamp(0.0, (sorted.len() - 1) as f64);
    let i = x.floor() as usize;
    let j = x.ceil() as usize;
    if i == j {
        sorted[i]
    } else {
        sorted[i] + (sorted[j] - sorted[i]) * (x - i as f64)
    }
}

/// First index whose value is >= `value`.
fn bound(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|&x| x < value)
}

/// Chapter-size regularity.
///
/// The sorted gap distribution is summarized by a [left, center, right)
/// window: quartile seeds widened by `OUTLINER_DISTANCE` bits, then the
/// center boundary is re-bounded at half the rounded average of the two
/// interior means (at most 10 steps). Penalties apply for headings left
/// outside the window, for a window that covers too little of the article,
/// and for spread within each half.
pub fn size_beauty(entries: &[Entry<'_>], chars: usize) -> f64 {
    if entries.is_empty() || entries.len() > MAX_CONTENTS_LENGTH {
        return 0.0;
    }

    let mut gaps = gap_profile(entries, chars);
    if gaps.len() < MIN_CONTENTS {
        return 0.0;
    }
    gaps.sort_by(f64::total_cmp);
    let n = gaps.len();

    let mut acc = Vec::with_capacity(n + 1);
    acc.push(0.0f64);
    for (i, gap) in gaps.iter().enumerate() {
        acc.push(acc[i] + gap);
    }
    let sum = |i: usize, j: usize| acc[j] - acc[i];

    let scale = f64::powi(2.0, OUTLINER_DISTANCE as i32);
    let low = ((at(&gaps, 0.25 * (n - 1) as f64) / scale).floor() - 1.0).max(1.0);
    let high = (at(&gaps, 0.75 * (n - 1) as f64) * scale).ceil() + 1.0;

    let left = bound(&gaps, low);
    let right = bound(&gaps, high);
    if right <= left {
        return 0.0;
    }
    let mut center = bound(&gaps, ((low + high) / 2.0).ceil()).clamp(left, right);
    for _ in 0..10 {
        if center == left || center == right {
            break;
        }
        let left_mean = sum(left, center) / (center - left) as f64;
        let right_mean = sum(center, right) / (right - center) as f64;
        let mid = ((left_mean + right_mean) / 2.0).ceil() / 2.0;
        let next = bound(&gaps, mid).clamp(left, right);
        if next == center {
            break;
        }
        center = next;
    }

    let central_sum = sum(left, right);
    if central_sum <= 0.0 {
        return 0.0;
    }

    // Normalized total absolute deviation from the mean, squared.
    let rate = |i: usize, j: usize| -> f64 {
        if i >= j {
            return 0.0;
        }
        let total = sum(i, j);
        if total <= 0.0 {
            return 0.0;
        }
        let mean = total / (j - i) as f64;
        let cut = bound(&gaps, mean).clamp(i, j);
        let deviation =
            ((cut - i) as f64 * mean - sum(i, cut)) + (sum(cut, j) - (j - cut) as f64 * mean);
        let normalized = deviation / total;
        normalized * normalized
    };

    let n_f = n as f64;
    let span = (right - left) as f64;
    let score = (1.0 / FACTOR_CONTENTS_SIZE).powf(1.0 / n_f)
        * (1.0 / FACTOR_OUTLINER).powf(n_f / span - 1.0)
        * (1.0 / FACTOR_OUTLINER).powf(chars as f64 / central_sum - 1.0)
        * (1.0 / FACTOR_VARIANCE_SIZE).powf(rate(left, center))
        * (1.0 / FACTOR_VARIANCE_SIZE).powf(rate(center, right));
    checked(score)
}

/// Title validity: a title is valid while it stays under the length limit and
/// has not been seen more than `TOC_DUPLICATE_TOLERATE` times before.
pub fn title_beauty(entries: &[Entry<'_>]) -> f64 {
    let n = entries.len();
    if n < MIN_CONTENTS || n > MAX_CONTENTS_LENGTH {
        return 0.0;
    }

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    let mut valid = 0usize;
    for entry in entries {
        let earlier = occurrences.entry(entry.title).or_insert(0);
        if *earlier <= TOC_DUPLICATE_TOLERATE && entry.title.chars().count() <= MAX_TITLE_LENGTH {
            valid += 1;
        }
        *earlier += 1;
    }
    if valid == 0 {
        return 0.0;
    }

    let invalid_ratio = n as f64 / valid as f64 - 1.0;
    checked((1.0 / FACTOR_TITLE_INVALID).powf(invalid_ratio.sqrt()))
}

/// Numeric quality over the entries' decoded numbers. Entries without a
/// number count against the sequence but never join it.
pub fn numeric_beauty(entries: &[Entry<'_>]) -> f64 {
    let n = entries.len();
    if n < MIN_CONTENTS {
        return 0.0;
    }

    let numbers: Vec<i64> = entries.iter().filter_map(|e| e.number).collect();
    let seq = longest_non_decreasing(&numbers);
    let (Some(&first), Some(&max)) = (seq.first(), seq.last()) else {
        return 0.0;
    };
    if max <= 0 {
        return 0.0;
    }

    let min = first.min(1);
    let distinct = seq.iter().collect::<HashSet<_>>().len() as i64;
    let holes = max - min + 1 - distinct;
    let reachable = max - holes;
    if reachable <= 0 {
        return 0.0;
    }

    let score = (1.0 / FACTOR_NUMBER_MAX).powf(1.0 / max as f64)
        * (1.0 / FACTOR_NUMBER_INVALID).powf(n as f64 / seq.len() as f64 - 1.0)
        * (1.0 / FACTOR_NUMBER_HOLES).powf(max as f64 / reachable as f64 - 1.0);
    checked(score)
}

/// Longest non-decreasing subsequence, patience-style: binary search over run
/// tails, parent links for reconstruction.
fn longest_non_decreasing(values: &[i64]) -> Vec<i64> {
    let mut tails: Vec<usize> = Vec::new();
    let mut parent: Vec<Option<usize>> = vec![None; values.len()];

    for (i, &value) in values.iter().enumerate() {
        let pos = tails.partition_point(|&t| values[t] <= value);
        if pos > 0 {
            parent[i] = Some(tails[pos - 1]);
        }
        if pos == tails.len() {
            tails.push(i);
        } else {
            tails[pos] = i;
        }
    }

    let mut seq = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        seq.push(values[i]);
        cursor = parent[i];
    }
    seq.reverse();
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(cursor: usize, title: &str) -> Entry<'_> {
        Entry {
            title,
            cursor,
            number: None,
        }
    }

    fn numbered(n: i64) -> Entry<'static> {
        Entry {
            title: "t",
            cursor: 0,
            number: Some(n),
        }
    }

    #[test]
    fn test_gap_profile_excludes_preamble_and_floors_at_zero() {
        let entries = [entry(100, "aaaa"), entry(102, "bbbb"), entry(300, "cccc")];
        let gaps = gap_profile(&entries, 500);
        // 102-100-4 floors to 0; preamble 100 excluded; tail 500-300-4=196
        assert_eq!(gaps, vec![0.0, 194.0, 196.0]);
    }

    #[test]
    fn test_gap_profile_drops_dominant_tail() {
        let entries = [entry(0, "aa"), entry(100, "aa"), entry(200, "aa")];
        // tail = 5000-200-2 = 4798 > 3 * 98
        let gaps = gap_profile(&entries, 5000);
        assert_eq!(gaps.len(), 2);
        // moderate tail stays: 490-200-2 = 288 <= 3 * 98
        let gaps = gap_profile(&entries, 490);
        assert_eq!(gaps.len(), 3);
    }

    #[test]
    fn test_size_beauty_rejects_thin_profiles() {
        let entries = [entry(0, "a"), entry(50, "b")];
        assert_eq!(size_beauty(&entries, 100), 0.0);
    }

    #[test]
    fn test_size_beauty_regular_chapters_score_high() {
        let entries: Vec<Entry<'_>> = (0..20).map(|i| entry(i * 500, "heading")).collect();
        let score = size_beauty(&entries, 20 * 500);
        assert!(score > 0.5, "regular spacing scored {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn test_size_beauty_irregular_worse_than_regular() {
        let regular: Vec<Entry<'_>> = (0..12).map(|i| entry(i * 400, "heading")).collect();
        let mut cursor = 0;
        let irregular: Vec<Entry<'_>> = [13, 900, 40, 700, 22, 1333, 60, 410, 95, 777, 31, 388]
            .iter()
            .map(|&gap| {
                cursor += gap;
                entry(cursor, "heading")
            })
            .collect();
        let r = size_beauty(&regular, 4800);
        let i = size_beauty(&irregular, cursor + 400);
        assert!(i < r, "irregular {i} should score below regular {r}");
    }

    #[test]
    fn test_title_beauty_tolerates_one_duplicate() {
        let all_fresh = [entry(0, "a"), entry(1, "b"), entry(2, "c"), entry(3, "d")];
        assert_eq!(title_beauty(&all_fresh), 1.0);

        let one_dup = [entry(0, "a"), entry(1, "a"), entry(2, "b"), entry(3, "c")];
        assert_eq!(title_beauty(&one_dup), 1.0);

        let two_dups = [
            entry(0, "a"),
            entry(1, "a"),
            entry(2, "a"),
            entry(3, "b"),
            entry(4, "c"),
        ];
        let score = title_beauty(&two_dups);
        assert!(score < 1.0 && score > 0.0);
    }

    #[test]
    fn test_title_beauty_rejects_tiny_contents() {
        assert_eq!(title_beauty(&[entry(0, "a"), entry(1, "b")]), 0.0);
    }

    #[test]
    fn test_numeric_beauty_perfect_run() {
        let entries: Vec<Entry<'_>> = (1..=20).map(numbered).collect();
        let score = numeric_beauty(&entries);
        assert!(score > 0.8, "clean 1..20 numbering scored {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn test_numeric_beauty_counts_holes() {
        let full: Vec<Entry<'_>> = (1..=10).map(numbered).collect();
        let holed: Vec<Entry<'_>> = [1, 2, 3, 4, 5, 7, 8, 9, 10].map(numbered).to_vec();
        assert!(numeric_beauty(&holed) < numeric_beauty(&full));
        assert!(numeric_beauty(&holed) > 0.0);
    }

    #[test]
    fn test_numeric_beauty_penalizes_off_sequence_entries() {
        // LIS of 1,2,3,2,3,4,5 keeps 6 of 7 entries
        let wobbly: Vec<Entry<'_>> = [1, 2, 3, 2, 3, 4, 5].map(numbered).to_vec();
        let clean: Vec<Entry<'_>> = [1, 2, 3, 3, 4, 5].map(numbered).to_vec();
        assert!(numeric_beauty(&wobbly) < numeric_beauty(&clean));
        assert!(numeric_beauty(&wobbly) > 0.0);
    }

    #[test]
    fn test_numeric_beauty_disqualifiers() {
        assert_eq!(numeric_beauty(&[numbered(1), numbered(2)]), 0.0);
        let no_numbers = [entry(0, "a"), entry(1, "b"), entry(2, "c")];
        assert_eq!(numeric_beauty(&no_numbers), 0.0);
        let zeros: Vec<Entry<'_>> = [0, 0, 0].map(numbered).to_vec();
        assert_eq!(numeric_beauty(&zeros), 0.0);
    }

    #[test]
    fn test_longest_non_decreasing_reconstruction() {
        assert_eq!(
            longest_non_decreasing(&[1, 2, 3, 2, 3, 4, 5]),
            vec![1, 2, 3, 3, 4, 5]
        );
        assert_eq!(longest_non_decreasing(&[5, 4, 3]), vec![3]);
        assert_eq!(longest_non_decreasing(&[]), Vec::<i64>::new());
    }
}
