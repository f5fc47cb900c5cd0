//! Client-side substring search

use unicode_normalization::UnicodeNormalization;

/// Records that expose text fields to the search box
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-folded, NFC-composed form used on both sides of a comparison
pub fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

fn matches<T: Searchable>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .into_iter()
        .any(|field| fold(field).contains(needle))
}

/// Positions of the items matching `query`, in input order.
/// A blank query matches everything.
pub fn filter_indices<T: Searchable>(items: &[T], query: &str) -> Vec<usize> {
    let needle = fold(query.trim());
    if needle.is_empty() {
        return (0..items.len()).collect();
    }
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches(*item, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Items matching `query`, in input order
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    filter_indices(items, query)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}
