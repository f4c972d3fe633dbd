//! Fuzzy ranked search over the cached inventory
//!
//! Scoring is delegated to `nucleo`. Every searchable field of an item is
//! scored and the best field wins. Ranked results are re-sorted by score,
//! optionally re-sorted by popularity for kiosks, and only then filtered, so
//! the relative order of results never depends on which filters are active.

mod filter;

use nucleo::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo::{Matcher, Utf32Str};
use std::borrow::Cow;

use crate::inventory::InventoryItem;

pub use filter::*;

/// Text fields the search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKey {
    Name,
    /// Reads `long_name`
    SpecificName,
    SerialNumber,
    ModelNumber,
    Brand,
    QrCode,
    /// Reads the joined `kit_contents`
    Kit,
}

impl SearchKey {
    /// The fixed key set used by every search
    pub const ALL: [SearchKey; 7] = [
        SearchKey::Name,
        SearchKey::SpecificName,
        SearchKey::SerialNumber,
        SearchKey::ModelNumber,
        SearchKey::Brand,
        SearchKey::QrCode,
        SearchKey::Kit,
    ];

    /// Text of this field on `item`, if any
    pub fn text<'a>(&self, item: &'a InventoryItem) -> Option<Cow<'a, str>> {
        let text = match self {
            SearchKey::Name => item.name.as_deref().map(Cow::Borrowed),
            SearchKey::SpecificName => item.long_name.as_deref().map(Cow::Borrowed),
            SearchKey::SerialNumber => item.serial_number.as_deref().map(Cow::Borrowed),
            SearchKey::ModelNumber => item.model_number.as_deref().map(Cow::Borrowed),
            SearchKey::Brand => item.brand.as_deref().map(Cow::Borrowed),
            SearchKey::QrCode => item.qr_code.as_deref().map(Cow::Borrowed),
            SearchKey::Kit => item.kit_contents.as_ref().map(|c| Cow::Owned(c.join(", "))),
        };
        text.filter(|t| !t.is_empty())
    }
}

/// Score taken off a match that needed one swapped pair of characters
const TYPO_PENALTY: u32 = 16;

/// A compiled query: the literal text plus, when typos are allowed, every
/// variant with one adjacent pair of characters swapped
struct QueryPatterns {
    needle: String,
    patterns: Vec<(Pattern, u32)>,
}

impl QueryPatterns {
    fn new(query: &str, allow_typo: bool) -> Self {
        let literal = |text: &str| {
            Pattern::new(text, CaseMatching::Ignore, Normalization::Smart, AtomKind::Fuzzy)
        };

        let mut patterns = vec![(literal(query), 0)];
        if allow_typo {
            let chars: Vec<char> = query.chars().collect();
            let mut seen = vec![query.to_string()];
            for i in 1..chars.len() {
                let (a, b) = (chars[i - 1], chars[i]);
                if a == b || a.is_whitespace() || b.is_whitespace() {
                    continue;
                }
                let mut swapped = chars.clone();
                swapped.swap(i - 1, i);
                let variant: String = swapped.into_iter().collect();
                if !seen.contains(&variant) {
                    patterns.push((literal(&variant), TYPO_PENALTY));
                    seen.push(variant);
                }
            }
        }

        Self { needle: query.to_lowercase(), patterns }
    }
}

/// Search tuning
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of ranked results kept before filtering
    pub limit: usize,

    /// Minimum score a match needs
    pub threshold: u32,

    /// Fuzzy matching that also accepts one swapped pair of adjacent
    /// characters; case-insensitive substring matching otherwise
    pub allow_typo: bool,

    /// Order by checkout count instead of relevance
    pub kiosk: bool,

    /// Fields to search
    pub keys: Vec<SearchKey>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 1000,
            threshold: 0,
            allow_typo: true,
            kiosk: false,
            keys: SearchKey::ALL.to_vec(),
        }
    }
}

impl SearchOptions {
    /// Set kiosk ordering
    pub fn with_kiosk(mut self, kiosk: bool) -> Self {
        self.kiosk = kiosk;
        self
    }

    /// Set the result cap
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// A ranked match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<'a> {
    pub item: &'a InventoryItem,
    pub score: u32,
}

/// Ranks candidates against a query
pub struct Searcher {
    matcher: Matcher,
    options: SearchOptions,
    buf: Vec<char>,
}

impl Searcher {
    /// Create a searcher
    pub fn new(options: SearchOptions) -> Self {
        Self {
            matcher: Matcher::default(),
            options,
            buf: Vec::new(),
        }
    }

    /// Options in use
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Rank `items` against `query`; an empty query keeps every item with score 0
    pub fn rank<'a>(&mut self, query: &str, items: &'a [InventoryItem]) -> Vec<SearchResult<'a>> {
        let query = query.trim();
        let mut results: Vec<SearchResult<'a>> = if query.is_empty() {
            items.iter().map(|item| SearchResult { item, score: 0 }).collect()
        } else {
            let query = QueryPatterns::new(query, self.options.allow_typo);
            let threshold = self.options.threshold;
            items
                .iter()
                .filter_map(|item| {
                    self.score_item(&query, item)
                        .filter(|score| *score >= threshold)
                        .map(|score| SearchResult { item, score })
                })
                .collect()
        };

        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(self.options.limit);

        if self.options.kiosk {
            results.sort_by(|a, b| {
                let checked = |r: &SearchResult<'_>| r.item.num_times_checked.unwrap_or(0);
                checked(b).cmp(&checked(a))
            });
        }

        results
    }

    /// Rank, then drop results the filters exclude
    pub fn search<'a>(
        &mut self,
        query: &str,
        items: &'a [InventoryItem],
        filters: &InventoryFilters,
    ) -> Vec<SearchResult<'a>> {
        let mut results = self.rank(query, items);
        results.retain(|result| filters.matches(result.item));
        results
    }

    fn score_item(&mut self, query: &QueryPatterns, item: &InventoryItem) -> Option<u32> {
        let mut best: Option<u32> = None;
        for key in &self.options.keys {
            let Some(text) = key.text(item) else { continue };
            if !self.options.allow_typo {
                best = best.max(text.to_lowercase().contains(&query.needle).then_some(1));
                continue;
            }
            for (pattern, penalty) in &query.patterns {
                let haystack = Utf32Str::new(&text, &mut self.buf);
                let score = pattern
                    .score(haystack, &mut self.matcher)
                    .map(|score| score.saturating_sub(*penalty));
                best = best.max(score);
            }
        }
        best
    }
}

/// One-shot search with a fresh matcher
pub fn search<'a>(
    query: &str,
    items: &'a [InventoryItem],
    filters: &InventoryFilters,
    options: SearchOptions,
) -> Vec<SearchResult<'a>> {
    Searcher::new(options).search(query, items, filters)
}
