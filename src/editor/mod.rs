//! Inventory editor session
//!
//! An [`EditSession`] owns everything the staff editor works with: the
//! cached inventory, the certification list, the current search and its
//! paginated rows, at most one draft, and the autosave timer. It is driven
//! from a single task; every handler leaves the store fully formed before it
//! awaits the network.
//!
//! Autosave fits into an event loop through a timer future that does not
//! borrow the session:
//!
//! ```no_run
//! # use make_inventory::editor::{EditSession, FieldKey};
//! # use make_inventory::inventory::InventoryClient;
//! # async fn run(mut session: EditSession<InventoryClient>, mut edits: tokio::sync::mpsc::Receiver<(FieldKey, String)>) {
//! loop {
//!     tokio::select! {
//!         Some((key, value)) = edits.recv() => {
//!             session.on_field_change(key, &value);
//!         }
//!         _ = session.autosave_timer() => {
//!             session.autosave().await;
//!         }
//!     }
//! }
//! # }
//! ```

mod debounce;
mod field;
mod form;
mod store;

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::fmt;
use std::future::Future;
use uuid::Uuid;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::inventory::{InventoryApi, InventoryItem};
use crate::pagination::ScrollMetrics;
use crate::render::{confirms_delete, DisplayNode};
use crate::search::InventoryFilters;

pub use debounce::*;
pub use field::*;
pub use form::*;
pub use store::*;

/// Save indicator shown next to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Nothing edited yet
    Idle,
    /// Edits waiting for the autosave timer
    Pending,
    Saving,
    /// Confirmed by the server at this time
    Saved(DateTime<Local>),
    /// The draft fails validation and was not sent
    MissingRequiredFields,
    /// The server or network refused the save
    Error(String),
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::Idle => Ok(()),
            SaveStatus::Pending => f.write_str("Unsaved changes"),
            SaveStatus::Saving => f.write_str("Saving..."),
            SaveStatus::Saved(at) => write!(f, "{}", at.format("%-I:%M %p")),
            SaveStatus::MissingRequiredFields => f.write_str("Missing required fields"),
            SaveStatus::Error(_) => f.write_str("Error saving"),
        }
    }
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation phrase did not match; nothing was sent
    Cancelled,
    /// The server refused; nothing changed locally
    Failed(String),
}

/// Staff editor state machine
pub struct EditSession<A: InventoryApi> {
    api: A,
    store: SessionStore,
    /// The open draft; `None` while idle
    draft: Option<InventoryItem>,
    debouncer: Debouncer,
    status: SaveStatus,
}

impl<A: InventoryApi> EditSession<A> {
    pub fn new(api: A, options: &ClientOptions) -> Self {
        Self {
            api,
            store: SessionStore::new(options),
            draft: None,
            debouncer: Debouncer::new(options.autosave_delay),
            status: SaveStatus::Idle,
        }
    }

    /// Fetch certifications and the inventory, then run an empty search
    pub async fn load(&mut self) -> Result<&[DisplayNode], Error> {
        let certifications = self.api.get_certifications().await?;
        self.store.replace_certifications(certifications);
        let items = self.api.get_inventory().await?;
        self.store.replace_inventory(items);
        Ok(self.store.rerun_search())
    }

    /// Re-fetch the inventory and repeat the last search
    pub async fn refresh(&mut self) -> Result<&[DisplayNode], Error> {
        let items = self.api.get_inventory().await?;
        debug!("Refreshed inventory ({} items)", items.len());
        self.store.replace_inventory(items);
        Ok(self.store.rerun_search())
    }

    /// Search the cached inventory; returns the first page
    pub fn search(&mut self, query: &str, filters: InventoryFilters) -> &[DisplayNode] {
        self.store.search(SearchRequest::new(query, filters))
    }

    /// Forward a scroll event to the result list
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> &[DisplayNode] {
        self.store.on_scroll(metrics)
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn status(&self) -> &SaveStatus {
        &self.status
    }

    /// The open draft
    pub fn draft(&self) -> Option<&InventoryItem> {
        self.draft.as_ref()
    }

    /// Identifier of the open draft
    pub fn editing_uuid(&self) -> Option<&str> {
        self.draft().map(|d| d.uuid.as_str())
    }

    /// The form for the open draft
    pub fn form(&self) -> Option<EditForm> {
        self.draft().map(|draft| EditForm::new(draft, self.store.certifications()))
    }

    /// Open an empty draft under a fresh identifier.
    /// A save still pending for the previous draft is written first.
    pub async fn start_new(&mut self) -> &InventoryItem {
        let uuid = Uuid::new_v4().to_string();
        self.open(InventoryItem::empty(uuid)).await
    }

    /// Open a copy of the cached item, or an empty draft carrying `uuid`
    /// when it is not in the snapshot.
    /// A save still pending for the previous draft is written first.
    pub async fn start_edit(&mut self, uuid: &str) -> &InventoryItem {
        let draft = self
            .store
            .find(uuid)
            .cloned()
            .unwrap_or_else(|| InventoryItem::empty(uuid));
        self.open(draft).await
    }

    async fn open(&mut self, draft: InventoryItem) -> &InventoryItem {
        self.flush().await;
        debug!("Editing {}", draft.uuid);
        self.status = SaveStatus::Idle;
        self.draft.insert(draft)
    }

    fn schedule_save(&mut self) {
        self.debouncer.schedule();
        self.status = SaveStatus::Pending;
    }

    /// Apply a control value to the draft; accepted changes schedule a save
    pub fn on_field_change(&mut self, key: FieldKey, raw: &str) -> ChangeOutcome {
        let Some(draft) = self.draft.as_mut() else {
            return ChangeOutcome::Rejected(Rejection::NotEditing);
        };

        let outcome = apply_change(draft, key, raw);
        if outcome.is_applied() {
            self.schedule_save();
        } else {
            debug!("Ignored change to {:?}: {:?}", key, outcome);
        }
        outcome
    }

    /// Check or uncheck a required certification
    pub fn toggle_certification(&mut self, cert_uuid: &str, checked: bool) -> ChangeOutcome {
        let Some(draft) = self.draft.as_mut() else {
            return ChangeOutcome::Rejected(Rejection::NotEditing);
        };

        if apply_certification(draft, cert_uuid, checked) {
            self.schedule_save();
        }
        ChangeOutcome::Applied
    }

    /// Add an empty location block; returns its index, or `None` when idle
    /// or at [`MAX_LOCATIONS`].
    /// Nothing is saved until the block's room is chosen.
    pub fn add_location(&mut self) -> Option<usize> {
        let draft = self.draft.as_mut()?;
        if draft.locations.len() >= MAX_LOCATIONS {
            return None;
        }
        draft.locations.push(crate::inventory::Location::empty());
        Some(draft.locations.len() - 1)
    }

    /// Remove a location block and schedule a save; returns the rebuilt form
    pub fn delete_location(&mut self, index: usize) -> Option<EditForm> {
        let draft = self.draft.as_mut()?;
        if index >= draft.locations.len() {
            return None;
        }
        draft.locations.remove(index);
        self.schedule_save();
        self.form()
    }

    /// Whether edits are waiting for the autosave timer
    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Completes when the autosave timer fires; never completes when no
    /// save is pending. Holds no borrow of the session.
    pub fn autosave_timer(&self) -> impl Future<Output = ()> + Send + 'static {
        self.debouncer.wait()
    }

    /// Wait out the autosave timer and save; `None` when nothing was pending
    pub async fn autosave(&mut self) -> Option<&SaveStatus> {
        if !self.debouncer.is_pending() {
            return None;
        }
        self.debouncer.wait().await;
        if self.debouncer.take_due() {
            Some(self.persist().await)
        } else {
            None
        }
    }

    /// Save immediately if a save is pending
    pub async fn flush(&mut self) -> Option<&SaveStatus> {
        if self.debouncer.cancel() {
            Some(self.persist().await)
        } else {
            None
        }
    }

    /// Validate and write the draft, then refresh the snapshot and the list
    pub async fn persist(&mut self) -> &SaveStatus {
        self.debouncer.cancel();

        let Some(draft) = self.draft.as_mut() else {
            return &self.status;
        };
        draft.quantity_available = draft.quantity_total;
        let item = draft.clone();

        if let Err(e) = item.validate() {
            debug!("Not saving {}: {}", item.uuid, e);
            self.status = SaveStatus::MissingRequiredFields;
            return &self.status;
        }

        self.status = SaveStatus::Saving;
        self.status = match self.api.update_item(&item).await {
            Ok(()) => {
                info!("Saved {}", item.uuid);
                SaveStatus::Saved(Local::now())
            }
            Err(e) => {
                warn!("Saving {} failed: {}", item.uuid, e);
                SaveStatus::Error(e.to_string())
            }
        };

        let saved = matches!(self.status, SaveStatus::Saved(_));
        let refreshed = self.refresh().await.map(|_| ());
        match refreshed {
            Ok(()) if saved => self.adopt_server_copy(&item.uuid),
            Ok(()) => {}
            Err(e) => warn!("Refresh after save failed: {}", e),
        }

        &self.status
    }

    /// Replace the open draft with the server's copy of `uuid`, if both exist
    fn adopt_server_copy(&mut self, uuid: &str) {
        let Some(server) = self.store.find(uuid).cloned() else {
            return;
        };
        if let Some(draft) = self.draft.as_mut().filter(|d| d.uuid == uuid) {
            *draft = server;
        }
    }

    /// Delete an item once `confirmation` matches the delete phrase
    pub async fn delete_item(&mut self, uuid: &str, confirmation: &str) -> DeleteOutcome {
        if !confirms_delete(confirmation) {
            debug!("Delete of {} cancelled", uuid);
            return DeleteOutcome::Cancelled;
        }

        if let Err(e) = self.api.delete_item(uuid).await {
            warn!("Deleting {} failed: {}", uuid, e);
            return DeleteOutcome::Failed(e.to_string());
        }

        if self.editing_uuid() == Some(uuid) {
            self.debouncer.cancel();
            self.draft = None;
            self.status = SaveStatus::Idle;
        }

        if let Err(e) = self.refresh().await {
            warn!("Refresh after delete failed: {}", e);
        }
        DeleteOutcome::Deleted
    }
}
