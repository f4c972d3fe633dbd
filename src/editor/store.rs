//! State shared by the editor's handlers

use crate::config::ClientOptions;
use crate::inventory::{Certification, InventoryItem};
use crate::pagination::{IncrementalList, ScrollMetrics};
use crate::render::{DisplayNode, Renderer};
use crate::search::{InventoryFilters, SearchOptions, Searcher};

/// The query and filters of the last search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub filters: InventoryFilters,
}

impl SearchRequest {
    pub fn new(query: &str, filters: InventoryFilters) -> Self {
        Self { query: query.to_string(), filters }
    }
}

/// Cached server state plus the current editable result list
pub struct SessionStore {
    inventory: Vec<InventoryItem>,
    certifications: Vec<Certification>,
    last_search: SearchRequest,
    searcher: Searcher,
    results: IncrementalList<DisplayNode>,
}

impl SessionStore {
    pub fn new(options: &ClientOptions) -> Self {
        let search_options = SearchOptions::default().with_limit(options.search_limit);
        Self {
            inventory: Vec::new(),
            certifications: Vec::new(),
            last_search: SearchRequest::default(),
            searcher: Searcher::new(search_options),
            results: IncrementalList::new(options.page_size, options.scroll_threshold),
        }
    }

    /// The cached inventory snapshot
    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn certifications(&self) -> &[Certification] {
        &self.certifications
    }

    /// Look an item up in the cached snapshot
    pub fn find(&self, uuid: &str) -> Option<&InventoryItem> {
        self.inventory.iter().find(|item| item.uuid == uuid)
    }

    /// Replace the cached snapshot with a fresh one from the server
    pub fn replace_inventory(&mut self, items: Vec<InventoryItem>) {
        self.inventory = items;
    }

    pub fn replace_certifications(&mut self, certifications: Vec<Certification>) {
        self.certifications = certifications;
    }

    pub fn last_search(&self) -> &SearchRequest {
        &self.last_search
    }

    /// Search the cached inventory and restart pagination; returns the
    /// first page of rows
    pub fn search(&mut self, request: SearchRequest) -> &[DisplayNode] {
        self.last_search = request;
        self.rerun_search()
    }

    /// Repeat the last search against the current snapshot
    pub fn rerun_search(&mut self) -> &[DisplayNode] {
        let renderer = Renderer::editable(&self.certifications);
        let rows: Vec<DisplayNode> = self
            .searcher
            .search(&self.last_search.query, &self.inventory, &self.last_search.filters)
            .into_iter()
            .map(|result| renderer.render(result.item))
            .collect();
        self.results.reset(None, rows)
    }

    /// Forward a scroll event to the result list
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> &[DisplayNode] {
        self.results.on_scroll(metrics)
    }

    pub fn results(&self) -> &IncrementalList<DisplayNode> {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Location, Role};

    fn item(uuid: &str, name: &str, role: Role) -> InventoryItem {
        InventoryItem {
            name: Some(name.to_string()),
            role: Some(role),
            quantity_total: Some(1),
            locations: vec![Location { room: "Main".to_string(), ..Location::empty() }],
            ..InventoryItem::empty(uuid)
        }
    }

    #[test]
    fn test_search_renders_editable_rows_and_paginates() {
        let mut store = SessionStore::new(&ClientOptions::default());
        store.replace_inventory((0..30).map(|i| item(&i.to_string(), "Clamp", Role::Tool)).collect());

        let first = store.search(SearchRequest::new("clamp", InventoryFilters::none())).len();
        assert_eq!(first, 20);
        assert!(matches!(store.results().rendered()[0], DisplayNode::Editable(_)));

        let bottom = ScrollMetrics { offset: 1000.0, viewport: 500.0, content: 1500.0 };
        assert_eq!(store.on_scroll(bottom).len(), 10);
        assert!(store.results().is_exhausted());
    }

    #[test]
    fn test_rerun_uses_new_snapshot() {
        let mut store = SessionStore::new(&ClientOptions::default());
        store.replace_inventory(vec![item("a", "Drill", Role::Tool)]);
        store.search(SearchRequest::new("", InventoryFilters::none().with_role(Role::Material)));
        assert!(store.results().is_empty());

        store.replace_inventory(vec![item("a", "Drill", Role::Tool), item("b", "Dowel", Role::Material)]);
        let uuids: Vec<_> = store.rerun_search().iter().filter_map(|n| n.uuid()).collect();
        assert_eq!(uuids, vec!["b"]);
        assert_eq!(store.find("a").map(|i| i.display_name()), Some("Drill"));
    }
}
