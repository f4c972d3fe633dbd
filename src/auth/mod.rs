//! API key validation for the admin pages

mod types;
mod session;

use log::{info, warn};
use reqwest::Client;
use std::sync::Arc;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;
pub use session::*;

/// Validates API keys and remembers the accepted one
pub struct Auth {
    /// The base URL of the MAKE server
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Where accepted keys are kept
    store: Arc<dyn KeyStore>,

    /// Client options
    options: ClientOptions,
}

impl Auth {
    /// Create a new Auth client
    pub fn new(url: &str, client: Client, store: Arc<dyn KeyStore>, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            client,
            store,
            options,
        }
    }

    /// Ask the server which scopes `api_key` has.
    /// Any non-success answer means the key is invalid.
    pub async fn get_api_key_scopes(&self, api_key: &str) -> Result<ApiKeyScopes, Error> {
        let url = self.options.endpoint(&self.url, "/misc/get_api_key_scopes");
        let body = ApiKeyScopeRequest { api_key: api_key.to_string() };

        let result = Fetch::post(&self.client, &url)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .json(&body)?
            .execute::<ApiKeyScopes>()
            .await;

        match result {
            Ok(scopes) => Ok(scopes),
            Err(Error::Api { status, .. }) => {
                warn!("API key rejected with status {}", status);
                Err(Error::unauthorized("Invalid API key"))
            }
            Err(e) => Err(e),
        }
    }

    /// Validate `candidate`, or the stored key when none is given, and store
    /// it once the server confirms inventory scope
    pub async fn authenticate(&self, candidate: Option<&str>) -> Result<AuthenticatedKey, Error> {
        let api_key = match candidate.filter(|k| !k.is_empty()) {
            Some(key) => key.to_string(),
            None => self
                .store
                .load()?
                .ok_or_else(|| Error::auth("No API key provided"))?,
        };

        let scopes = self.get_api_key_scopes(&api_key).await?;
        if !scopes.can_edit_inventory() {
            return Err(Error::unauthorized("API key does not have proper scope"));
        }

        self.store.save(&api_key)?;
        info!("Authenticated with scopes {:?}", scopes.scopes);

        Ok(AuthenticatedKey { api_key, scopes })
    }

    /// Forget the stored key
    pub fn sign_out(&self) -> Result<(), Error> {
        self.store.clear()
    }

    /// The key store in use
    pub fn store(&self) -> &Arc<dyn KeyStore> {
        &self.store
    }
}
