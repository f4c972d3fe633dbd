//! MAKE Inventory Rust Client Library
//!
//! A Rust client for the MAKE makerspace server, covering the inventory
//! catalog, the staff inventory editor, workshop listings and API key
//! validation. The engine behind the pages (filtering, ranked search,
//! row rendering, paginated lists and the autosaving editor) is plain data
//! and runs without a browser.

pub mod auth;
pub mod config;
pub mod editor;
pub mod error;
pub mod fetch;
pub mod inventory;
pub mod pagination;
pub mod render;
pub mod search;
pub mod workshops;

use reqwest::Client;
use std::sync::Arc;

use crate::auth::{Auth, KeyStore};
use crate::config::ClientOptions;
use crate::editor::EditSession;
use crate::inventory::InventoryClient;
use crate::workshops::WorkshopsClient;

/// The main entry point for the MAKE client
pub struct MakeClient {
    /// The base URL of the MAKE server
    pub url: String,
    /// API key for inventory changes
    pub api_key: Option<String>,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
}

impl MakeClient {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```
    /// use make_inventory::MakeClient;
    ///
    /// let make = MakeClient::new("https://make.example.edu");
    /// ```
    pub fn new(url: &str) -> Self {
        Self::new_with_options(url, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use make_inventory::{MakeClient, config::ClientOptions};
    /// use std::time::Duration;
    ///
    /// let options = ClientOptions::default().with_autosave_delay(Duration::from_millis(250));
    /// let make = MakeClient::new_with_options("https://make.example.edu", options);
    /// ```
    pub fn new_with_options(url: &str, options: ClientOptions) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            api_key: None,
            http_client: Client::new(),
            options,
        }
    }

    /// Use `api_key` for inventory changes
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Client for the inventory routes
    pub fn inventory(&self) -> InventoryClient {
        InventoryClient::new(
            &self.url,
            self.api_key.as_deref(),
            self.http_client.clone(),
            self.options.clone(),
        )
    }

    /// Client for the workshop routes
    pub fn workshops(&self) -> WorkshopsClient {
        WorkshopsClient::new(&self.url, self.http_client.clone(), self.options.clone())
    }

    /// API key validation backed by `store`
    pub fn auth(&self, store: Arc<dyn KeyStore>) -> Auth {
        Auth::new(&self.url, self.http_client.clone(), store, self.options.clone())
    }

    /// A staff editor session over the inventory routes
    ///
    /// # Example
    ///
    /// ```no_run
    /// use make_inventory::MakeClient;
    ///
    /// # async fn run() -> Result<(), make_inventory::error::Error> {
    /// let mut editor = MakeClient::new("https://make.example.edu")
    ///     .with_api_key("staff-key")
    ///     .editor();
    /// editor.load().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn editor(&self) -> EditSession<InventoryClient> {
        EditSession::new(self.inventory(), &self.options)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::editor::{EditSession, FieldKey, LocationField, SaveStatus};
    pub use crate::error::Error;
    pub use crate::inventory::{InventoryApi, InventoryItem};
    pub use crate::search::InventoryFilters;
    pub use crate::MakeClient;
}
