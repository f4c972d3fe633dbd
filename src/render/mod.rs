//! View models for search results
//!
//! Rendering is a pure mapping from an inventory record to a display value.
//! The catalog variant is what the public pages and kiosks show; the editable
//! variant is the staff list in the inventory editor.

mod quantity;

use std::fmt;

use crate::inventory::{Certification, InventoryItem, Role};

pub use quantity::*;

/// Phrase staff must type before an item is deleted
pub const DELETE_CONFIRMATION: &str = "delete";

/// Whether the typed text confirms a delete
pub fn confirms_delete(input: &str) -> bool {
    input == DELETE_CONFIRMATION
}

/// External cart the kiosk controls write to
pub trait Cart {
    fn add_to_cart(&mut self, uuid: &str);
    fn remove_from_cart(&mut self, uuid: &str);
}

/// Which result variant to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Public catalog, with cart controls when `kiosk` is set
    Catalog { kiosk: bool },
    /// Staff editor list
    Editable,
}

/// Material symbol shown for the item's role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleIcon {
    /// `category`
    Material,
    /// `build`
    Tool,
}

impl RoleIcon {
    pub fn symbol(&self) -> &'static str {
        match self {
            RoleIcon::Material => "category",
            RoleIcon::Tool => "build",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RoleIcon::Material => "Material",
            RoleIcon::Tool => "Tool",
        }
    }
}

/// Column titles of the catalog header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogHeader {
    pub kiosk: bool,
}

impl CatalogHeader {
    pub const COLUMNS: [&'static str; 5] = ["Name", "Type", "Location", "Quantity", "Details"];
}

/// Where a catalog item lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationBadge {
    pub room: String,
    /// Container and specific spot, when known
    pub area: Option<String>,
    /// Shows the "In Overstock" badge
    pub overstock: bool,
}

/// One optional line of the expandable detail panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

impl fmt::Display for DetailLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Public catalog row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub uuid: String,
    pub name: String,
    /// Kit contents replace the role icon for kits
    pub kit_contents: Option<Vec<String>>,
    pub icon: Option<RoleIcon>,
    pub location: Option<LocationBadge>,
    pub quantity: Option<QuantityLabel>,
    pub details: Vec<DetailLine>,
    /// Kiosk increment/decrement buttons
    pub cart_controls: bool,
}

impl CatalogRow {
    /// Build the row for `item`
    pub fn new(item: &InventoryItem, kiosk: bool) -> Self {
        let (kit_contents, icon) = if item.is_kit() {
            (Some(item.kit_contents.clone().unwrap_or_default()), None)
        } else if item.role == Some(Role::Material) {
            (None, Some(RoleIcon::Material))
        } else {
            (None, Some(RoleIcon::Tool))
        };

        let location = item.locations.first().map(|loc| {
            let area = [loc.container.as_str(), loc.specific.as_str()]
                .iter()
                .filter(|part| !part.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            LocationBadge {
                room: loc.room.clone(),
                area: Some(area).filter(|a| !a.is_empty()),
                overstock: item.in_overstock == Some(true),
            }
        });

        let details = [
            ("Serial Number", &item.serial_number),
            ("Model Number", &item.model_number),
            ("Specific Name", &item.long_name),
            ("Brand", &item.brand),
            ("QR Code(s)", &item.qr_code),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| DetailLine { label, value: v.to_string() })
        })
        .collect();

        Self {
            uuid: item.uuid.clone(),
            name: item.display_name().to_string(),
            kit_contents,
            icon,
            location,
            quantity: QuantityLabel::of(item),
            details,
            cart_controls: kiosk,
        }
    }

    /// Whether the detail panel has anything to show
    pub fn expandable(&self) -> bool {
        !self.details.is_empty()
    }

    /// Kiosk "+" button; returns false when the row has no cart controls
    pub fn increment(&self, cart: &mut dyn Cart) -> bool {
        if self.cart_controls {
            cart.add_to_cart(&self.uuid);
        }
        self.cart_controls
    }

    /// Kiosk "-" button; returns false when the row has no cart controls
    pub fn decrement(&self, cart: &mut dyn Cart) -> bool {
        if self.cart_controls {
            cart.remove_from_cart(&self.uuid);
        }
        self.cart_controls
    }
}

/// Staff editor row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableRow {
    pub uuid: String,
    pub name: String,
    pub role: &'static str,
    /// `Quantity: ...`
    pub quantity: String,
    /// Every location, comma separated
    pub locations: String,
    /// `{code}: {description}`
    pub access_type: String,
    /// Certification names, comma separated, or `N/A`
    pub certifications: String,
}

impl EditableRow {
    /// Build the row for `item`, resolving certification names from `certifications`
    pub fn new(item: &InventoryItem, certifications: &[Certification]) -> Self {
        let role = item.role.as_ref().map_or("Unknown", Role::label);

        let quantity = match QuantityLabel::of(item) {
            Some(label) => format!("Quantity: {}", label),
            None => "Quantity: Unknown".to_string(),
        };

        let locations = item
            .locations
            .iter()
            .map(|loc| loc.summary())
            .collect::<Vec<_>>()
            .join(", ");

        let access_type = match &item.access_type {
            Some(access) => format!("{}: {}", access.code(), access.description()),
            None => "Unknown".to_string(),
        };

        let certifications = match &item.certifications {
            Some(ids) => ids
                .iter()
                .map(|id| {
                    certifications
                        .iter()
                        .find(|c| &c.uuid == id)
                        .map_or("Unknown", |c| c.name.as_str())
                })
                .collect::<Vec<_>>()
                .join(", "),
            None => "N/A".to_string(),
        };

        Self {
            uuid: item.uuid.clone(),
            name: item.display_name().to_string(),
            role,
            quantity,
            locations,
            access_type,
            certifications,
        }
    }
}

/// A rendered result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNode {
    Header(CatalogHeader),
    Catalog(CatalogRow),
    Editable(EditableRow),
}

impl DisplayNode {
    /// Identifier of the item behind the node; `None` for headers
    pub fn uuid(&self) -> Option<&str> {
        match self {
            DisplayNode::Header(_) => None,
            DisplayNode::Catalog(row) => Some(&row.uuid),
            DisplayNode::Editable(row) => Some(&row.uuid),
        }
    }
}

/// Maps records to display nodes for one mode
pub struct Renderer<'a> {
    mode: RenderMode,
    certifications: &'a [Certification],
}

impl<'a> Renderer<'a> {
    /// Renderer for the public catalog
    pub fn catalog(kiosk: bool) -> Self {
        Self { mode: RenderMode::Catalog { kiosk }, certifications: &[] }
    }

    /// Renderer for the staff editor
    pub fn editable(certifications: &'a [Certification]) -> Self {
        Self { mode: RenderMode::Editable, certifications }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// The synthetic header row, catalog mode only
    pub fn header(&self) -> Option<DisplayNode> {
        match self.mode {
            RenderMode::Catalog { kiosk } => Some(DisplayNode::Header(CatalogHeader { kiosk })),
            RenderMode::Editable => None,
        }
    }

    /// Render one record
    pub fn render(&self, item: &InventoryItem) -> DisplayNode {
        match self.mode {
            RenderMode::Catalog { kiosk } => DisplayNode::Catalog(CatalogRow::new(item, kiosk)),
            RenderMode::Editable => DisplayNode::Editable(EditableRow::new(item, self.certifications)),
        }
    }

    /// Render a sequence of records, preserving order
    pub fn render_all<'i, I>(&self, items: I) -> Vec<DisplayNode>
    where
        I: IntoIterator<Item = &'i InventoryItem>,
    {
        items.into_iter().map(|item| self.render(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{AccessType, Location};

    #[derive(Default)]
    struct RecordingCart {
        added: Vec<String>,
        removed: Vec<String>,
    }

    impl Cart for RecordingCart {
        fn add_to_cart(&mut self, uuid: &str) {
            self.added.push(uuid.to_string());
        }

        fn remove_from_cart(&mut self, uuid: &str) {
            self.removed.push(uuid.to_string());
        }
    }

    fn item() -> InventoryItem {
        InventoryItem {
            name: Some("Heat Gun".to_string()),
            role: Some(Role::Tool),
            access_type: Some(AccessType::CheckoutTakeHome),
            quantity_total: Some(5),
            quantity_available: Some(3),
            locations: vec![
                Location { room: "Electronics".to_string(), container: "Cabinet A".to_string(), specific: String::new() },
                Location { room: "Backstock".to_string(), container: String::new(), specific: "top".to_string() },
            ],
            serial_number: Some("HG-1".to_string()),
            brand: Some(String::new()),
            certifications: Some(vec!["c1".to_string(), "gone".to_string()]),
            ..InventoryItem::empty("heat-gun")
        }
    }

    #[test]
    fn test_editable_row() {
        let certs = vec![Certification { uuid: "c1".to_string(), name: "Electronics".to_string() }];
        let row = EditableRow::new(&item(), &certs);

        assert_eq!(row.name, "Heat Gun");
        assert_eq!(row.role, "Tool");
        assert_eq!(row.quantity, "Quantity: 3/5");
        assert_eq!(row.locations, "Electronics Cabinet A, Backstock top");
        assert_eq!(row.access_type, "2: Can check out and take home");
        assert_eq!(row.certifications, "Electronics, Unknown");
    }

    #[test]
    fn test_editable_row_without_certifications() {
        let mut item = item();
        item.certifications = None;
        item.quantity_total = Some(-2);
        item.quantity_available = Some(-2);
        let row = EditableRow::new(&item, &[]);
        assert_eq!(row.certifications, "N/A");
        assert_eq!(row.quantity, "Quantity: Medium");
    }

    #[test]
    fn test_catalog_row_details_skip_empty_fields() {
        let row = CatalogRow::new(&item(), false);

        assert_eq!(row.icon, Some(RoleIcon::Tool));
        assert_eq!(row.details.len(), 1);
        assert_eq!(row.details[0].to_string(), "Serial Number: HG-1");
        assert!(row.expandable());

        let location = row.location.unwrap();
        assert_eq!(location.room, "Electronics");
        assert_eq!(location.area.as_deref(), Some("Cabinet A"));
        assert!(!location.overstock);
    }

    #[test]
    fn test_catalog_row_for_kit() {
        let mut kit = item();
        kit.role = Some(Role::Kit);
        kit.kit_contents = Some(vec!["multimeter".to_string()]);
        kit.serial_number = None;
        kit.in_overstock = Some(true);

        let row = CatalogRow::new(&kit, false);
        assert_eq!(row.icon, None);
        assert_eq!(row.kit_contents, Some(vec!["multimeter".to_string()]));
        assert!(!row.expandable());
        assert!(row.location.unwrap().overstock);
    }

    #[test]
    fn test_cart_controls_only_in_kiosk() {
        let mut cart = RecordingCart::default();

        let public = CatalogRow::new(&item(), false);
        assert!(!public.increment(&mut cart));

        let kiosk = CatalogRow::new(&item(), true);
        assert!(kiosk.increment(&mut cart));
        assert!(kiosk.increment(&mut cart));
        assert!(kiosk.decrement(&mut cart));

        assert_eq!(cart.added, vec!["heat-gun", "heat-gun"]);
        assert_eq!(cart.removed, vec!["heat-gun"]);
    }

    #[test]
    fn test_renderer_modes() {
        let catalog = Renderer::catalog(true);
        assert_eq!(catalog.header(), Some(DisplayNode::Header(CatalogHeader { kiosk: true })));
        assert!(matches!(catalog.render(&item()), DisplayNode::Catalog(_)));

        let editable = Renderer::editable(&[]);
        assert_eq!(editable.header(), None);
        let nodes = editable.render_all(&[item(), InventoryItem::empty("x")]);
        assert_eq!(nodes.iter().map(|n| n.uuid().unwrap()).collect::<Vec<_>>(), vec!["heat-gun", "x"]);
    }

    #[test]
    fn test_delete_confirmation_is_exact() {
        assert!(confirms_delete("delete"));
        assert!(!confirms_delete("Delete"));
        assert!(!confirms_delete(" delete"));
        assert!(!confirms_delete(""));
    }
}
