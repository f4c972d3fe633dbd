//! Typed form fields and how raw control values are applied to a draft

use crate::inventory::{is_valid_quantity, AccessType, InventoryItem, Location, Role, Room};

/// Sub-field of a location entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationField {
    Room,
    Container,
    Specific,
}

/// Address of an editable control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name,
    LongName,
    Role,
    AccessType,
    QuantityTotal,
    ReorderUrl,
    SerialNumber,
    /// Comma separated item identifiers
    KitContents,
    Keywords,
    Location { index: usize, field: LocationField },
}

impl FieldKey {
    /// Shorthand for a location sub-field
    pub fn location(index: usize, field: LocationField) -> Self {
        FieldKey::Location { index, field }
    }

    /// Whether an empty value is refused
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FieldKey::Name
                | FieldKey::Role
                | FieldKey::AccessType
                | FieldKey::QuantityTotal
                | FieldKey::Location { field: LocationField::Room, .. }
        )
    }

    /// Whether the control holds an integer
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKey::AccessType | FieldKey::QuantityTotal)
    }
}

/// Why a change was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No item is being edited
    NotEditing,
    /// A required field was cleared
    RequiredEmpty,
    /// The value is not one the field accepts
    InvalidValue,
}

/// Result of applying a control value to the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The draft changed and a save was scheduled
    Applied,
    /// The draft is unchanged and no save was scheduled
    Rejected(Rejection),
    /// A numeric control held something that is not a number; the control
    /// should show `control_value` and the draft is unchanged
    Reset { control_value: String },
}

impl ChangeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ChangeOutcome::Applied)
    }
}

/// Highest number of locations an item may have
pub const MAX_LOCATIONS: usize = 64;

fn optional_text(raw: &str) -> Option<String> {
    Some(raw.to_string()).filter(|s| !s.is_empty())
}

/// Apply `raw` to `draft` at `key`
pub fn apply_change(draft: &mut InventoryItem, key: FieldKey, raw: &str) -> ChangeOutcome {
    if key.is_required() && raw.is_empty() {
        return ChangeOutcome::Rejected(Rejection::RequiredEmpty);
    }

    let number = if key.is_numeric() {
        match raw.trim().parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => return ChangeOutcome::Reset { control_value: "0".to_string() },
        }
    } else {
        None
    };

    match key {
        FieldKey::Name => draft.name = Some(raw.to_string()),
        FieldKey::LongName => draft.long_name = optional_text(raw),
        FieldKey::ReorderUrl => draft.reorder_url = optional_text(raw),
        FieldKey::SerialNumber => draft.serial_number = optional_text(raw),
        FieldKey::Keywords => draft.keywords = optional_text(raw),
        FieldKey::KitContents => {
            draft.kit_contents = optional_text(raw)
                .map(|s| s.split(',').map(|id| id.trim().to_string()).collect());
        }
        FieldKey::Role => match raw.parse::<Role>() {
            Ok(role) => draft.role = Some(role),
            Err(_) => return ChangeOutcome::Rejected(Rejection::InvalidValue),
        },
        FieldKey::AccessType => {
            let access = AccessType::from(number.unwrap_or_default());
            if !access.is_known() {
                return ChangeOutcome::Rejected(Rejection::InvalidValue);
            }
            draft.access_type = Some(access);
        }
        FieldKey::QuantityTotal => {
            let quantity = number.unwrap_or_default();
            if !is_valid_quantity(quantity) {
                return ChangeOutcome::Rejected(Rejection::InvalidValue);
            }
            draft.quantity_total = Some(quantity);
        }
        FieldKey::Location { index, field } => {
            if index >= MAX_LOCATIONS {
                return ChangeOutcome::Rejected(Rejection::InvalidValue);
            }
            if field == LocationField::Room && Room::from_code(raw).is_none() {
                return ChangeOutcome::Rejected(Rejection::InvalidValue);
            }
            if draft.locations.len() <= index {
                draft.locations.resize_with(index + 1, Location::empty);
            }
            let location = &mut draft.locations[index];
            match field {
                LocationField::Room => location.room = raw.to_string(),
                LocationField::Container => location.container = raw.to_string(),
                LocationField::Specific => location.specific = raw.to_string(),
            }
        }
    }

    ChangeOutcome::Applied
}

/// Add or remove a required certification; returns whether the draft changed
pub fn apply_certification(draft: &mut InventoryItem, cert_uuid: &str, checked: bool) -> bool {
    if checked {
        let certs = draft.certifications.get_or_insert_with(Vec::new);
        if certs.iter().any(|c| c == cert_uuid) {
            return false;
        }
        certs.push(cert_uuid.to_string());
        true
    } else {
        match draft.certifications.as_mut() {
            Some(certs) if certs.iter().any(|c| c == cert_uuid) => {
                certs.retain(|c| c != cert_uuid);
                true
            }
            _ => false,
        }
    }
}
