//! HTTP request helper shared by the API clients

use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Method, header::{HeaderMap, HeaderValue}};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use url::Url;

use crate::error::Error;

/// Header carrying the admin API key on write requests
pub const API_KEY_HEADER: &str = "api-key";

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    timeout: Option<Duration>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            timeout: None,
            body: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(_) => warn!("Dropping header {} with invalid value", name),
        }
        self
    }

    /// Attach the admin API key
    pub fn api_key(self, key: &str) -> Self {
        self.header(API_KEY_HEADER, key)
    }

    /// Set a per-request timeout
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder, Error> {
        let url = Url::parse(&self.url)?;

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Send the request and turn any non-success status into `Error::Api`
    async fn send_checked(&self) -> Result<reqwest::Response, Error> {
        debug!("{} {}", self.method, self.url);
        let response = self.build()?.send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("{} {} failed with status {}", self.method, self.url, status);
            return Err(Error::Api { status: status.as_u16(), message: text });
        }

        Ok(response)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let response = self.send_checked().await?;
        let result = response.json::<T>().await?;
        Ok(result)
    }

    /// Execute the request, ignoring the body of a successful response
    pub async fn execute_empty(&self) -> Result<u16, Error> {
        let response = self.send_checked().await?;
        Ok(response.status().as_u16())
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/thing"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let client = Client::new();
        let result = Fetch::get(&client, &format!("{}/thing", server.uri()))
            .execute::<serde_json::Value>()
            .await;

        match result {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "down");
            }
            other => panic!("Expected Error::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_api_key_header_and_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/write"))
            .and(header(API_KEY_HEADER, "secret"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new();
        let status = Fetch::post(&client, &format!("{}/write", server.uri()))
            .api_key("secret")
            .json(&json!({ "a": 1 }))
            .unwrap()
            .execute_empty()
            .await
            .unwrap();

        assert_eq!(status, 201);
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported() {
        let client = Client::new();
        let result = Fetch::get(&client, "not a url").execute_empty().await;
        assert!(matches!(result, Err(Error::Url(_))));
    }
}
