//! Configuration options for the MAKE inventory client

use std::time::Duration;
use url::Url;

use crate::error::Error;

/// Configuration options for the client and the admin engine
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Versioned path prefix of the REST API
    pub api_path: String,

    /// Value sent in the `X-Client-Info` header
    pub client_info: String,

    /// Quiet period before an edited draft is written back
    pub autosave_delay: Duration,

    /// Number of rows appended per pagination step
    pub page_size: usize,

    /// Distance from the bottom, in pixels, that triggers the next page
    pub scroll_threshold: f64,

    /// Upper bound on ranked search results
    pub search_limit: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            api_path: "/api/v2".to_string(),
            client_info: concat!("make-inventory/", env!("CARGO_PKG_VERSION")).to_string(),
            autosave_delay: Duration::from_millis(100),
            page_size: 20,
            scroll_threshold: 5.0,
            search_limit: 1000,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the API path prefix
    pub fn with_api_path(mut self, value: &str) -> Self {
        self.api_path = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Set the autosave debounce delay
    pub fn with_autosave_delay(mut self, value: Duration) -> Self {
        self.autosave_delay = value;
        self
    }

    /// Set the pagination chunk size
    pub fn with_page_size(mut self, value: usize) -> Self {
        self.page_size = value.max(1);
        self
    }

    /// Set the scroll threshold in pixels
    pub fn with_scroll_threshold(mut self, value: f64) -> Self {
        self.scroll_threshold = value;
        self
    }

    /// Set the search result cap
    pub fn with_search_limit(mut self, value: usize) -> Self {
        self.search_limit = value;
        self
    }

    /// Build the full URL for an API route
    pub(crate) fn endpoint(&self, base_url: &str, route: &str) -> String {
        format!("{}{}{}", base_url.trim_end_matches('/'), self.api_path, route)
    }

    /// Build the URL for an API route followed by one percent-encoded path segment
    pub(crate) fn endpoint_with_segment(&self, base_url: &str, route: &str, segment: &str) -> Result<String, Error> {
        let mut url = Url::parse(&self.endpoint(base_url, route))?;
        url.path_segments_mut()
            .map_err(|_| Error::general(format!("Cannot append a path to {}", base_url)))?
            .push(segment);
        Ok(url.into())
    }
}
