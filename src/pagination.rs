//! Incremental rendering of long result lists
//!
//! The controller owns the full result sequence and an explicit cursor. The
//! first page is handed out on [`IncrementalList::reset`]; further pages are
//! handed out when a scroll position comes within the threshold of the bottom
//! of the scroll container. Nothing here depends on how rows are drawn.

use log::trace;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default distance from the bottom that loads the next page
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 5.0;

/// Geometry of the scroll container at the time of a scroll event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top
    pub offset: f64,
    /// Visible height
    pub viewport: f64,
    /// Total scrollable height
    pub content: f64,
}

impl ScrollMetrics {
    /// Whether the visible bottom edge is within `threshold` of the end
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.offset + self.viewport >= self.content - threshold
    }
}

/// Paginates a materialized result list into a viewport
#[derive(Debug, Clone)]
pub struct IncrementalList<T> {
    header: Option<T>,
    items: Vec<T>,
    cursor: usize,
    page_size: usize,
    threshold: f64,
}

impl<T> Default for IncrementalList<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_SCROLL_THRESHOLD)
    }
}

impl<T> IncrementalList<T> {
    /// Create an empty list
    pub fn new(page_size: usize, threshold: f64) -> Self {
        Self {
            header: None,
            items: Vec::new(),
            cursor: 0,
            page_size: page_size.max(1),
            threshold,
        }
    }

    /// Replace the results, dropping everything rendered so far, and
    /// return the first page
    pub fn reset(&mut self, header: Option<T>, items: Vec<T>) -> &[T] {
        self.header = header;
        self.items = items;
        self.cursor = 0;
        self.next_page()
    }

    /// Forget all results
    pub fn clear(&mut self) {
        self.header = None;
        self.items.clear();
        self.cursor = 0;
    }

    /// Handle a scroll event; returns the rows to append, empty when the
    /// position is not near the bottom or everything is already rendered
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> &[T] {
        if !metrics.near_bottom(self.threshold) {
            return &[];
        }
        self.next_page()
    }

    /// Advance the cursor by one page and return the newly rendered rows
    pub fn next_page(&mut self) -> &[T] {
        let start = self.cursor;
        let end = (start + self.page_size).min(self.items.len());
        self.cursor = end;
        trace!("Rendering rows {}..{} of {}", start, end, self.items.len());
        &self.items[start..end]
    }

    /// The synthetic header row, if any
    pub fn header(&self) -> Option<&T> {
        self.header.as_ref()
    }

    /// Rows rendered so far, header excluded
    pub fn rendered(&self) -> &[T] {
        &self.items[..self.cursor]
    }

    /// Every result, rendered or not
    pub fn all(&self) -> &[T] {
        &self.items
    }

    /// Number of rendered rows, header excluded
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of results
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether every result has been rendered
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTTOM: ScrollMetrics = ScrollMetrics { offset: 596.0, viewport: 400.0, content: 1000.0 };
    const MIDDLE: ScrollMetrics = ScrollMetrics { offset: 100.0, viewport: 400.0, content: 1000.0 };

    fn list(n: usize) -> IncrementalList<usize> {
        let mut list = IncrementalList::default();
        list.reset(None, (0..n).collect());
        list
    }

    #[test]
    fn test_first_page_on_reset() {
        let mut list = IncrementalList::default();
        let first = list.reset(Some(usize::MAX), (0..45).collect()).to_vec();
        assert_eq!(first, (0..20).collect::<Vec<_>>());
        assert_eq!(list.header(), Some(&usize::MAX));
        assert_eq!(list.cursor(), 20);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(BOTTOM.near_bottom(5.0));
        assert!(ScrollMetrics { offset: 595.0, ..BOTTOM }.near_bottom(5.0));
        assert!(!ScrollMetrics { offset: 594.0, ..BOTTOM }.near_bottom(5.0));
    }

    #[test]
    fn test_scroll_appends_next_chunk_only_near_bottom() {
        let mut list = list(45);

        assert!(list.on_scroll(MIDDLE).is_empty());
        assert_eq!(list.cursor(), 20);

        assert_eq!(list.on_scroll(BOTTOM).to_vec(), (20..40).collect::<Vec<_>>());
        assert_eq!(list.on_scroll(BOTTOM).to_vec(), (40..45).collect::<Vec<_>>());
        assert!(list.on_scroll(BOTTOM).is_empty());
        assert!(list.is_exhausted());
    }

    #[test]
    fn test_never_more_than_pages_times_size_and_no_duplicates() {
        for total in [0, 1, 19, 20, 21, 57, 100] {
            let mut list = list(total);
            for k in 0..8 {
                assert_eq!(list.rendered().len(), (20 * (k + 1)).min(total));
                let mut seen = list.rendered().to_vec();
                seen.dedup();
                assert_eq!(seen.len(), list.rendered().len());
                list.on_scroll(BOTTOM);
            }
        }
    }

    #[test]
    fn test_reset_discards_previous_rows() {
        let mut list = list(60);
        list.on_scroll(BOTTOM);
        assert_eq!(list.cursor(), 40);

        let first = list.reset(None, vec![7, 8, 9]).to_vec();
        assert_eq!(first, vec![7, 8, 9]);
        assert_eq!(list.rendered(), &[7, 8, 9]);
        assert_eq!(list.header(), None);
    }
}
