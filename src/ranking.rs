//! Relevance and value based ordering for list screens.
//!
//! Anything that can be shown in a ranking list implements [Rankable]. The
//! functions here are generic over that capability and never look at the
//! concrete entity type.

use std::{borrow::Cow, cmp::Reverse};

/// An item that can be listed, sorted by value and searched by text.
pub trait Rankable {
    /// The primary text shown for the item, e.g. the shop name.
    fn display_name(&self) -> String;

    /// The secondary text shown for the item, e.g. an address or a spend total.
    fn display_value(&self) -> String;

    /// The number used to order items when there is no search query.
    fn sort_value(&self) -> i64;

    /// How well the item matches `query`, higher is better.
    ///
    /// Scores may be negative.
    fn fuzzy_score(&self, query: &str) -> i64;
}

/// Order `items` by descending relevance to `query`.
///
/// Items with equal scores keep their original relative order. When `query`
/// is blank or `items` is empty the input is handed back as is, without
/// copying or reordering.
pub fn rank_by_query<'a, T>(items: &'a [T], query: &str) -> Cow<'a, [T]>
where
    T: Rankable + Clone,
{
    if query.trim().is_empty() || items.is_empty() {
        return Cow::Borrowed(items);
    }

    let mut scored: Vec<(i64, &T)> = items
        .iter()
        .map(|item| (item.fuzzy_score(query), item))
        .collect();

    // `sort_by_key` is stable, so ties keep their input order.
    scored.sort_by_key(|(score, _)| Reverse(*score));

    Cow::Owned(scored.into_iter().map(|(_, item)| item.clone()).collect())
}

/// Order `items` by descending [Rankable::sort_value], keeping ties in their
/// original order.
pub fn sort_by_value<T: Rankable>(items: &mut [T]) {
    items.sort_by_key(|item| Reverse(item.sort_value()));
}

/// Score how well `text` matches `query`, ignoring case.
///
/// The score is the Jaro-Winkler similarity scaled to `0..=100`, plus a bonus
/// of 100 when `text` starts with the query or 50 when it contains it
/// elsewhere. A blank query scores 0.
pub fn fuzzy_score(text: &str, query: &str) -> i64 {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return 0;
    }

    let text = text.to_lowercase();
    let similarity = (strsim::jaro_winkler(&text, &query) * 100.0).round() as i64;

    let bonus = if text.starts_with(&query) {
        100
    } else if text.contains(&query) {
        50
    } else {
        0
    };

    similarity + bonus
}
