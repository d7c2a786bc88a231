use crate::model::{CatalogEntry, PATH_SEPARATOR, QUALIFIER_BRACKET};

/// Decides whether `query` matches `entry` under the anchored
/// non-consecutive subsequence rule.
///
/// Comparison is case-insensitive. A bare query is compared against the
/// leaf name only; a query containing the path separator is compared
/// against the full path. A double space in the query is shorthand for the
/// qualifier bracket, so `name  group` compares against the display label
/// `name [group]` and can disambiguate across groups.
pub fn matches(query: &str, entry: &CatalogEntry) -> bool {
    let query = query.to_lowercase();
    if query.is_empty() {
        return true;
    }

    let query = query.replace("  ", &QUALIFIER_BRACKET.to_string());
    let candidate = if query.contains(QUALIFIER_BRACKET) {
        entry.lower_label()
    } else if query.contains(PATH_SEPARATOR) {
        entry.lower_path()
    } else {
        entry.lower_leaf()
    };

    subsequence_find(&query, candidate, true)
}

/// Checks whether each character of `needle` occurs in `haystack` in order,
/// not necessarily consecutively: `"m2"` is found in `"move2d"` but not in
/// `"matchmove"`. With `anchored` the first characters must also coincide,
/// which trades false negatives for far fewer noisy matches on short
/// queries.
pub fn subsequence_find(needle: &str, haystack: &str, anchored: bool) -> bool {
    if haystack.is_empty() {
        return needle.is_empty();
    }

    let mut needle_chars = needle.chars();
    let mut hay_chars = haystack.chars();

    if anchored {
        let Some(first) = needle_chars.next() else {
            return true;
        };
        match hay_chars.next() {
            Some(hay) if hay == first => {}
            _ => return false,
        }
    }

    for atom in needle_chars {
        loop {
            match hay_chars.next() {
                Some(hay) if hay == atom => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }

    true
}
