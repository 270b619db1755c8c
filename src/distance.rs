//! [Levenshtein edit distance](https://en.wikipedia.org/wiki/Levenshtein_distance) between contours.

use crate::contour::Contour;

/// Computes the edit distance between two symbol sequences, i.e the minimum number
/// of single symbol insertions, deletions and substitutions turning `a` into `b`.
///
/// All three operations cost 1. Only the previous row of the dynamic
/// programming table is kept, indexed by the shorter of the two sequences.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    // The distance is symmetric, so let the row run along the shorter sequence.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    // row[j] holds distance(i, j) for the current i, starting with distance(0, j) = j
    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, long_symbol) in long.iter().enumerate() {
        // distance(i, 0) for the previous i, i.e the diagonal for j = 1
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, short_symbol) in short.iter().enumerate() {
            let cost = if long_symbol == short_symbol { 0 } else { 1 };
            let substitution = diagonal + cost;
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }
    row[short.len()]
}

/// Edit distance between two contours, symbol by symbol.
pub fn contour_distance(a: &Contour, b: &Contour) -> usize {
    edit_distance(a.steps(), b.steps())
}
