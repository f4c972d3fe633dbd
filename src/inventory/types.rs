//! Types for inventory records

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Tool, material or kit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// `T`
    Tool,
    /// `M`
    Material,
    /// `K`
    Kit,
    /// Any code the server sends that this client does not know
    Other(String),
}

impl Role {
    /// Wire code of the role
    pub fn code(&self) -> &str {
        match self {
            Role::Tool => "T",
            Role::Material => "M",
            Role::Kit => "K",
            Role::Other(code) => code,
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Role::Tool => "Tool",
            Role::Material => "Material",
            Role::Kit => "Kit",
            Role::Other(_) => "Unknown",
        }
    }

    /// Whether the role is one of the three known codes
    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Other(_))
    }
}

impl From<String> for Role {
    fn from(code: String) -> Self {
        match code.as_str() {
            "T" => Role::Tool,
            "M" => Role::Material,
            "K" => Role::Kit,
            _ => Role::Other(code),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.code().to_string()
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Role::from(s.to_string()) {
            Role::Other(code) => Err(format!("unknown role code {:?}", code)),
            role => Ok(role),
        }
    }
}

/// Who may use an item and how
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum AccessType {
    /// 0: cannot be checked out
    InSpace,
    /// 1: checked out for use in the space
    CheckoutInSpace,
    /// 2: checked out and taken home
    CheckoutTakeHome,
    /// 3: taken home without checking out
    TakeHome,
    /// 4: checkout needs staff approval
    NeedsApproval,
    /// 5: staff only
    StaffOnly,
    /// Out of range value sent by the server
    Other(i64),
}

impl AccessType {
    /// Numeric code
    pub fn code(&self) -> i64 {
        match self {
            AccessType::InSpace => 0,
            AccessType::CheckoutInSpace => 1,
            AccessType::CheckoutTakeHome => 2,
            AccessType::TakeHome => 3,
            AccessType::NeedsApproval => 4,
            AccessType::StaffOnly => 5,
            AccessType::Other(code) => *code,
        }
    }

    /// Fixed description shown to staff
    pub fn description(&self) -> &'static str {
        match self {
            AccessType::InSpace => "In the space",
            AccessType::CheckoutInSpace => "Can check out for use in the space",
            AccessType::CheckoutTakeHome => "Can check out and take home",
            AccessType::TakeHome => "Can take home without checking out",
            AccessType::NeedsApproval => "Needs approval to check out",
            AccessType::StaffOnly => "Staff only use",
            AccessType::Other(_) => "Unknown",
        }
    }

    /// Whether the code is within 0..=5
    pub fn is_known(&self) -> bool {
        !matches!(self, AccessType::Other(_))
    }
}

impl From<i64> for AccessType {
    fn from(code: i64) -> Self {
        match code {
            0 => AccessType::InSpace,
            1 => AccessType::CheckoutInSpace,
            2 => AccessType::CheckoutTakeHome,
            3 => AccessType::TakeHome,
            4 => AccessType::NeedsApproval,
            5 => AccessType::StaffOnly,
            other => AccessType::Other(other),
        }
    }
}

impl From<AccessType> for i64 {
    fn from(access: AccessType) -> Self {
        access.code()
    }
}

/// Qualitative stock level encoded by a negative `quantity_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockLevel {
    Low,
    Medium,
    High,
}

impl StockLevel {
    /// Decode a sentinel quantity; `None` for counts and undefined negatives
    pub fn from_sentinel(quantity: i64) -> Option<Self> {
        match quantity {
            -1 => Some(StockLevel::Low),
            -2 => Some(StockLevel::Medium),
            -3 => Some(StockLevel::High),
            _ => None,
        }
    }

    /// The sentinel value stored on the wire
    pub fn sentinel(&self) -> i64 {
        match self {
            StockLevel::Low => -1,
            StockLevel::Medium => -2,
            StockLevel::High => -3,
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StockLevel::Low => "Low",
            StockLevel::Medium => "Medium",
            StockLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// A literal count or one of the qualitative sentinels
pub fn is_valid_quantity(quantity: i64) -> bool {
    quantity >= 0 || StockLevel::from_sentinel(quantity).is_some()
}

/// Rooms an item can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Main,
    Laser3D,
    Studio,
    Cage,
    Welding,
    Electronics,
    Composite,
    OutdoorStorage,
    Backstock,
    DeepStorage,
    Other,
}

impl Room {
    /// Every room, in the order the editor lists them
    pub const ALL: [Room; 11] = [
        Room::Main,
        Room::Laser3D,
        Room::Studio,
        Room::Cage,
        Room::Welding,
        Room::Electronics,
        Room::Composite,
        Room::OutdoorStorage,
        Room::Backstock,
        Room::DeepStorage,
        Room::Other,
    ];

    /// Code stored in `Location::room`
    pub fn code(&self) -> &'static str {
        match self {
            Room::Main => "Main",
            Room::Laser3D => "Laser3D",
            Room::Studio => "Studio",
            Room::Cage => "Cage",
            Room::Welding => "Welding",
            Room::Electronics => "Electronics",
            Room::Composite => "Composite",
            Room::OutdoorStorage => "Outdoor Storage",
            Room::Backstock => "Backstock",
            Room::DeepStorage => "Deep Storage",
            Room::Other => "Other",
        }
    }

    /// Label shown in room pickers
    pub fn label(&self) -> &'static str {
        match self {
            Room::Main => "Main Makerspace",
            Room::Laser3D => "3D Printer & Laser Cutter Room",
            Room::Studio => "Studio",
            Room::Cage => "The Cage",
            Room::Welding => "Welding Area",
            Room::Electronics => "Electronics Benches",
            Room::Composite => "Composite Room",
            Room::OutdoorStorage => "Outdoor Storage",
            Room::Backstock => "Backstock",
            Room::DeepStorage => "Deep Storage",
            Room::Other => "Other",
        }
    }

    /// Look a room up by its code
    pub fn from_code(code: &str) -> Option<Room> {
        Room::ALL.iter().copied().find(|room| room.code() == code)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The server has sent certifications both as a list of ids and as an
/// `{id: timestamp_added}` map; both read as a list of ids.
fn certification_ids<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        List(Vec<String>),
        Map(BTreeMap<String, serde_json::Value>),
    }

    Ok(match Option::<Wire>::deserialize(deserializer)? {
        Some(Wire::List(ids)) => Some(ids),
        Some(Wire::Map(map)) => Some(map.into_keys().collect()),
        None => None,
    })
}

/// One place an item is kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Room code, see [`Room`]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub room: String,

    /// Shelf, drawer or bin
    #[serde(default, deserialize_with = "null_as_empty")]
    pub container: String,

    /// Free text position inside the container
    #[serde(default, deserialize_with = "null_as_empty")]
    pub specific: String,
}

impl Location {
    /// An unfilled location entry
    pub fn empty() -> Self {
        Self::default()
    }

    /// `room[ container][ specific]`
    pub fn summary(&self) -> String {
        let mut text = self.room.clone();
        for part in [&self.container, &self.specific] {
            if !part.is_empty() {
                text.push(' ');
                text.push_str(part);
            }
        }
        text
    }
}

/// An inventory record, possibly an incomplete draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Stable identifier
    pub uuid: String,

    /// Short name of the item
    #[serde(default)]
    pub name: Option<String>,

    /// Brand, exact type and so on
    #[serde(default)]
    pub long_name: Option<String>,

    #[serde(default)]
    pub role: Option<Role>,

    #[serde(default)]
    pub access_type: Option<AccessType>,

    /// Count, or a negative [`StockLevel`] sentinel
    #[serde(default)]
    pub quantity_total: Option<i64>,

    /// Mirrors `quantity_total` unless partially checked out
    #[serde(default)]
    pub quantity_available: Option<i64>,

    #[serde(default)]
    pub locations: Vec<Location>,

    #[serde(default)]
    pub reorder_url: Option<String>,

    #[serde(default)]
    pub serial_number: Option<String>,

    /// Identifiers of the items in a kit
    #[serde(default)]
    pub kit_contents: Option<Vec<String>>,

    #[serde(default)]
    pub keywords: Option<String>,

    /// Certifications required to use the item
    #[serde(default, deserialize_with = "certification_ids")]
    pub certifications: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_overstock: Option<bool>,

    /// Historical checkout count, used for kiosk ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_times_checked: Option<u64>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

impl InventoryItem {
    /// A draft with every field empty and a single empty location
    pub fn empty(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: None,
            long_name: None,
            role: None,
            access_type: None,
            quantity_total: None,
            quantity_available: None,
            locations: vec![Location::empty()],
            reorder_url: None,
            serial_number: None,
            kit_contents: None,
            keywords: None,
            certifications: None,
            model_number: None,
            brand: None,
            qr_code: None,
            in_overstock: None,
            num_times_checked: None,
        }
    }

    /// Display name, empty when unset
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Whether the item is a kit
    pub fn is_kit(&self) -> bool {
        self.role == Some(Role::Kit)
    }

    /// Check the fields the server requires before an item may be saved
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();

        if is_blank(&self.name) {
            missing.push("name");
        }
        if !self.role.as_ref().map_or(false, Role::is_known) {
            missing.push("role");
        }
        if !self.access_type.as_ref().map_or(false, AccessType::is_known) {
            missing.push("access_type");
        }
        if !self.quantity_total.map_or(false, is_valid_quantity) {
            missing.push("quantity_total");
        }
        if self.locations.is_empty() || self.locations.iter().any(|loc| loc.room.is_empty()) {
            missing.push("locations.room");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Whether [`validate`](Self::validate) passes
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Certification reference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub uuid: String,
    pub name: String,
}

/// Request for staff to restock an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockRequest {
    /// The requesting user
    pub user_uuid: String,
    pub reason: String,
    /// Free text quantity ("2 boxes")
    pub quantity: String,
    /// Free text item description
    pub item: String,
}

impl RestockRequest {
    /// Reject requests the restock form would not submit
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.user_uuid.trim().is_empty() {
            missing.push("user_uuid");
        }
        if self.quantity.trim().is_empty() {
            missing.push("quantity");
        }
        if self.item.trim().is_empty() {
            missing.push("item");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}
