//! Inclusion filters applied after ranking

use crate::inventory::{InventoryItem, Role};

/// Filter options from the search bar; empty values impose no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilters {
    /// Exclude items with a total quantity of zero
    pub stock: bool,

    /// Room code an item must have a location in
    pub room: Option<String>,

    /// Role an item must have
    pub role: Option<Role>,
}

impl InventoryFilters {
    /// Filters that match everything
    pub fn none() -> Self {
        Self::default()
    }

    /// Require stock on hand
    pub fn in_stock(mut self) -> Self {
        self.stock = true;
        self
    }

    /// Restrict to a room; an empty code clears the restriction
    pub fn with_room(mut self, room: &str) -> Self {
        self.room = Some(room.to_string()).filter(|r| !r.is_empty());
        self
    }

    /// Restrict to a role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Whether no option is set
    pub fn is_empty(&self) -> bool {
        !self.stock && self.room.is_none() && self.role.is_none()
    }

    /// Decide whether `item` passes every active filter
    pub fn matches(&self, item: &InventoryItem) -> bool {
        matches(item, self)
    }
}

/// Decide whether `item` passes every active filter in `filters`
pub fn matches(item: &InventoryItem, filters: &InventoryFilters) -> bool {
    if filters.stock && item.quantity_total == Some(0) {
        return false;
    }

    if let Some(room) = filters.room.as_deref().filter(|r| !r.is_empty()) {
        if !item.locations.iter().any(|loc| loc.room == room) {
            return false;
        }
    }

    if let Some(role) = &filters.role {
        if item.role.as_ref() != Some(role) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Location;

    fn item(role: Role, quantity: i64, rooms: &[&str]) -> InventoryItem {
        InventoryItem {
            name: Some("thing".to_string()),
            role: Some(role),
            quantity_total: Some(quantity),
            quantity_available: Some(quantity),
            locations: rooms
                .iter()
                .map(|room| Location { room: room.to_string(), ..Location::empty() })
                .collect(),
            ..InventoryItem::empty("id")
        }
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = InventoryFilters::none();
        assert!(filters.is_empty());
        for candidate in [
            item(Role::Tool, 0, &[]),
            item(Role::Kit, -3, &["Cage"]),
            InventoryItem::empty("blank"),
        ] {
            assert!(matches(&candidate, &filters));
        }
    }

    #[test]
    fn test_stock_filter_excludes_zero_only() {
        let filters = InventoryFilters::none().in_stock();
        assert!(!filters.matches(&item(Role::Material, 0, &["Main"])));
        assert!(filters.matches(&item(Role::Material, 3, &["Main"])));
        assert!(filters.matches(&item(Role::Material, -1, &["Main"])));
    }

    #[test]
    fn test_room_filter_checks_any_location() {
        let filters = InventoryFilters::none().with_room("Cage");
        assert!(filters.matches(&item(Role::Tool, 1, &["Main", "Cage"])));
        assert!(!filters.matches(&item(Role::Tool, 1, &["Main"])));

        assert!(InventoryFilters::none().with_room("").is_empty());
    }

    #[test]
    fn test_role_filter() {
        let filters = InventoryFilters::none().with_role(Role::Material);
        assert!(filters.matches(&item(Role::Material, 1, &["Main"])));
        assert!(!filters.matches(&item(Role::Tool, 1, &["Main"])));
        assert!(!filters.matches(&InventoryItem::empty("no-role")));
    }
}
