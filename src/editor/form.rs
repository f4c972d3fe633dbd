//! The edit form as a view model

use crate::inventory::{Certification, InventoryItem, Room};

use super::field::{FieldKey, LocationField};

/// One location block of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEditor {
    pub index: usize,
    pub room: String,
    pub container: String,
    pub specific: String,
}

impl LocationEditor {
    /// Key a control in this block reports changes with
    pub fn key(&self, field: LocationField) -> FieldKey {
        FieldKey::location(self.index, field)
    }

    /// Room picker entries as `(code, label, selected)`
    pub fn room_options(&self) -> Vec<(&'static str, &'static str, bool)> {
        Room::ALL
            .iter()
            .map(|room| (room.code(), room.label(), room.code() == self.room))
            .collect()
    }
}

/// One certification checkbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationToggle {
    pub uuid: String,
    pub name: String,
    pub checked: bool,
}

/// Every control of the edit form, populated from a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub uuid: String,
    pub name: String,
    pub long_name: String,
    pub role: String,
    pub access_type: String,
    pub quantity_total: String,
    pub reorder_url: String,
    pub serial_number: String,
    pub kit_contents: String,
    pub keywords: String,
    pub locations: Vec<LocationEditor>,
    pub certifications: Vec<CertificationToggle>,
}

impl EditForm {
    /// Populate the form from `draft`; unset fields show as empty
    pub fn new(draft: &InventoryItem, certifications: &[Certification]) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        let locations = draft
            .locations
            .iter()
            .enumerate()
            .map(|(index, loc)| LocationEditor {
                index,
                room: loc.room.clone(),
                container: loc.container.clone(),
                specific: loc.specific.clone(),
            })
            .collect();

        let certifications = certifications
            .iter()
            .map(|cert| CertificationToggle {
                uuid: cert.uuid.clone(),
                name: cert.name.clone(),
                checked: draft
                    .certifications
                    .as_ref()
                    .map_or(false, |ids| ids.contains(&cert.uuid)),
            })
            .collect();

        Self {
            uuid: draft.uuid.clone(),
            name: text(&draft.name),
            long_name: text(&draft.long_name),
            role: draft.role.as_ref().map(|r| r.code().to_string()).unwrap_or_default(),
            access_type: draft.access_type.map(|a| a.code().to_string()).unwrap_or_default(),
            quantity_total: draft.quantity_total.map(|q| q.to_string()).unwrap_or_default(),
            reorder_url: text(&draft.reorder_url),
            serial_number: text(&draft.serial_number),
            kit_contents: draft.kit_contents.as_ref().map(|k| k.join(",")).unwrap_or_default(),
            keywords: text(&draft.keywords),
            locations,
            certifications,
        }
    }

    /// Current value of the control at `key`
    pub fn value(&self, key: FieldKey) -> Option<&str> {
        let value = match key {
            FieldKey::Name => &self.name,
            FieldKey::LongName => &self.long_name,
            FieldKey::Role => &self.role,
            FieldKey::AccessType => &self.access_type,
            FieldKey::QuantityTotal => &self.quantity_total,
            FieldKey::ReorderUrl => &self.reorder_url,
            FieldKey::SerialNumber => &self.serial_number,
            FieldKey::KitContents => &self.kit_contents,
            FieldKey::Keywords => &self.keywords,
            FieldKey::Location { index, field } => {
                let loc = self.locations.get(index)?;
                match field {
                    LocationField::Room => &loc.room,
                    LocationField::Container => &loc.container,
                    LocationField::Specific => &loc.specific,
                }
            }
        };
        Some(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{AccessType, Location, Role};

    #[test]
    fn test_form_from_draft() {
        let draft = InventoryItem {
            name: Some("Sewing Machine".to_string()),
            role: Some(Role::Tool),
            access_type: Some(AccessType::NeedsApproval),
            quantity_total: Some(-1),
            locations: vec![Location { room: "Studio".to_string(), ..Location::empty() }],
            kit_contents: Some(vec!["a".to_string(), "b".to_string()]),
            certifications: Some(vec!["c2".to_string()]),
            ..InventoryItem::empty("sm")
        };
        let certs = vec![
            Certification { uuid: "c1".to_string(), name: "Laser".to_string() },
            Certification { uuid: "c2".to_string(), name: "Sewing".to_string() },
        ];

        let form = EditForm::new(&draft, &certs);
        assert_eq!(form.value(FieldKey::Role), Some("T"));
        assert_eq!(form.value(FieldKey::AccessType), Some("4"));
        assert_eq!(form.value(FieldKey::QuantityTotal), Some("-1"));
        assert_eq!(form.value(FieldKey::KitContents), Some("a,b"));
        assert_eq!(form.value(FieldKey::LongName), Some(""));
        assert_eq!(form.value(FieldKey::location(0, LocationField::Room)), Some("Studio"));
        assert_eq!(form.value(FieldKey::location(1, LocationField::Room)), None);
        assert_eq!(
            form.certifications.iter().map(|c| c.checked).collect::<Vec<_>>(),
            vec![false, true]
        );

        let selected: Vec<_> = form.locations[0]
            .room_options()
            .into_iter()
            .filter(|(_, _, selected)| *selected)
            .map(|(code, _, _)| code)
            .collect();
        assert_eq!(selected, vec!["Studio"]);
    }
}
