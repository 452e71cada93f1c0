//! Fuzzy token matching
//!
//! Token-level similarity built on Levenshtein distance. Whole-text substring
//! containment is checked first; per-word edit distance is the typo fallback.

/// Levenshtein distance between two strings, counted in `char`s
///
/// Insertion, deletion and substitution each cost 1. Uses a single rolling
/// row sized by the shorter input.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let (long, short) = if a_len >= b_len { (a, b) } else { (b, a) };
    let long_len = a_len.max(b_len);

    // Only the shorter side is materialized; the longer one streams
    let short: Vec<char> = short.chars().collect();
    if short.is_empty() {
        return long_len;
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();

    for (i, lc) in long.chars().enumerate() {
        // row[j] from the previous iteration, i.e. the diagonal cell
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diagonal + usize::from(lc != *sc);
            row[j + 1] = substitution.min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }

    row[short.len()]
}

/// Similarity of a query token against a normalized text, in `[0, 1]`
///
/// Returns 0 when either side is empty and 1 when `text` contains `token`.
/// Otherwise returns the best `1 - distance / max_len` over the
/// space-separated words of `text`.
pub fn fuzzy_score(token: &str, text: &str) -> f64 {
    if token.is_empty() || text.is_empty() {
        return 0.0;
    }

    if text.contains(token) {
        return 1.0;
    }

    let token_len = token.chars().count();
    let mut best = 0.0_f64;

    for word in text.split(' ') {
        let max_len = token_len.max(word.chars().count());
        if max_len == 0 {
            continue;
        }

        let similarity = 1.0 - edit_distance(token, word) as f64 / max_len as f64;
        if similarity > best {
            best = similarity;
            if best >= 1.0 {
                break;
            }
        }
    }

    best
}
