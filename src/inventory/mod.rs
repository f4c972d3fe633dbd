//! Inventory records and the REST calls that read and write them

mod types;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::sync::Arc;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;

/// The inventory operations the admin engine depends on
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Fetch the full inventory snapshot
    async fn get_inventory(&self) -> Result<Vec<InventoryItem>, Error>;

    /// Create or replace an item
    async fn update_item(&self, item: &InventoryItem) -> Result<(), Error>;

    /// Delete an item by identifier
    async fn delete_item(&self, uuid: &str) -> Result<(), Error>;

    /// Fetch certification reference data
    async fn get_certifications(&self) -> Result<Vec<Certification>, Error>;
}

/// Client for the inventory routes
#[derive(Clone)]
pub struct InventoryClient {
    /// The base URL of the MAKE server
    url: String,

    /// API key sent on admin writes
    api_key: Option<String>,

    /// HTTP client used for requests
    client: Client,

    /// Client options
    options: ClientOptions,
}

impl InventoryClient {
    /// Create a new InventoryClient
    pub fn new(url: &str, api_key: Option<&str>, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            api_key: api_key.map(str::to_string),
            client,
            options,
        }
    }

    fn get_url(&self, route: &str) -> String {
        self.options.endpoint(&self.url, route)
    }

    fn require_key(&self) -> Result<&str, Error> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::auth("An API key is required for inventory changes"))
    }

    /// Fetch the full inventory snapshot
    pub async fn get_inventory(&self) -> Result<Vec<InventoryItem>, Error> {
        let url = self.get_url("/inventory/get_inventory");

        let items = Fetch::get(&self.client, &url)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .execute::<Vec<InventoryItem>>()
            .await?;

        debug!("Fetched {} inventory items", items.len());
        Ok(items)
    }

    /// Create or replace an item
    pub async fn update_item(&self, item: &InventoryItem) -> Result<(), Error> {
        let url = self.get_url("/inventory/update_inventory_item");
        let key = self.require_key()?;

        Fetch::post(&self.client, &url)
            .header("X-Client-Info", &self.options.client_info)
            .api_key(key)
            .timeout(self.options.request_timeout)
            .json(item)?
            .execute_empty()
            .await?;

        info!("Saved inventory item {}", item.uuid);
        Ok(())
    }

    /// Delete an item by identifier
    pub async fn delete_item(&self, uuid: &str) -> Result<(), Error> {
        let url = self
            .options
            .endpoint_with_segment(&self.url, "/inventory/delete_inventory_item", uuid)?;
        let key = self.require_key()?;

        Fetch::delete(&self.client, &url)
            .header("X-Client-Info", &self.options.client_info)
            .api_key(key)
            .timeout(self.options.request_timeout)
            .execute_empty()
            .await?;

        info!("Deleted inventory item {}", uuid);
        Ok(())
    }

    /// Ask staff to restock something
    pub async fn add_restock_request(&self, request: &RestockRequest) -> Result<(), Error> {
        request.validate()?;
        let url = self.get_url("/inventory/add_restock_request");

        Fetch::post(&self.client, &url)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .json(request)?
            .execute_empty()
            .await?;

        info!("Submitted restock request for {:?}", request.item);
        Ok(())
    }

    /// Fetch certification reference data
    pub async fn get_certifications(&self) -> Result<Vec<Certification>, Error> {
        let url = self.get_url("/certifications/get_certifications");

        let certifications = Fetch::get(&self.client, &url)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .execute::<Vec<Certification>>()
            .await?;

        Ok(certifications)
    }
}

#[async_trait]
impl InventoryApi for InventoryClient {
    async fn get_inventory(&self) -> Result<Vec<InventoryItem>, Error> {
        InventoryClient::get_inventory(self).await
    }

    async fn update_item(&self, item: &InventoryItem) -> Result<(), Error> {
        InventoryClient::update_item(self, item).await
    }

    async fn delete_item(&self, uuid: &str) -> Result<(), Error> {
        InventoryClient::delete_item(self, uuid).await
    }

    async fn get_certifications(&self) -> Result<Vec<Certification>, Error> {
        InventoryClient::get_certifications(self).await
    }
}

#[async_trait]
impl<T: InventoryApi + ?Sized> InventoryApi for Arc<T> {
    async fn get_inventory(&self) -> Result<Vec<InventoryItem>, Error> {
        (**self).get_inventory().await
    }

    async fn update_item(&self, item: &InventoryItem) -> Result<(), Error> {
        (**self).update_item(item).await
    }

    async fn delete_item(&self, uuid: &str) -> Result<(), Error> {
        (**self).delete_item(uuid).await
    }

    async fn get_certifications(&self) -> Result<Vec<Certification>, Error> {
        (**self).get_certifications().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, key: Option<&str>) -> InventoryClient {
        InventoryClient::new(&server.uri(), key, Client::new(), ClientOptions::default())
    }

    #[tokio::test]
    async fn test_get_inventory() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/inventory/get_inventory"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "uuid": "a",
                    "name": "Bandsaw",
                    "role": "T",
                    "access_type": 0,
                    "quantity_total": 1,
                    "quantity_available": 1,
                    "locations": [{ "room": "Main", "container": "", "specific": "" }]
                },
                {
                    "uuid": "b",
                    "name": "Plywood",
                    "role": "M",
                    "access_type": 3,
                    "quantity_total": -2,
                    "quantity_available": -2,
                    "locations": [{ "room": "Backstock", "container": null, "specific": null }]
                }
            ])))
            .mount(&server)
            .await;

        let items = client(&server, None).get_inventory().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].display_name(), "Bandsaw");
        assert_eq!(items[1].quantity_total, Some(-2));
    }

    #[tokio::test]
    async fn test_update_item_sends_key_and_body() {
        let server = MockServer::start().await;
        let mut item = InventoryItem::empty("c");
        item.name = Some("Clamp".to_string());

        Mock::given(method("POST"))
            .and(path("/api/v2/inventory/update_inventory_item"))
            .and(header("api-key", "admin-key"))
            .and(body_json(serde_json::to_value(&item).unwrap()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server, Some("admin-key")).update_item(&item).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_item_without_key_never_sends() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server, None).update_item(&InventoryItem::empty("d")).await;
        assert!(matches!(result, Err(Error::Auth(_))));
    }

    #[tokio::test]
    async fn test_delete_item_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v2/inventory/delete_inventory_item/e"))
            .and(header("api-key", "admin-key"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let err = client(&server, Some("admin-key")).delete_item("e").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_delete_item_encodes_uuid() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v2/inventory/delete_inventory_item/a%2Fb%3Fc"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server, Some("admin-key")).delete_item("a/b?c").await.unwrap();
    }

    #[tokio::test]
    async fn test_restock_request() {
        let server = MockServer::start().await;
        let request = RestockRequest {
            user_uuid: "user-1".to_string(),
            reason: "Empty bin".to_string(),
            quantity: "2 spools".to_string(),
            item: "PLA".to_string(),
        };

        Mock::given(method("POST"))
            .and(path("/api/v2/inventory/add_restock_request"))
            .and(body_json(json!({
                "user_uuid": "user-1",
                "reason": "Empty bin",
                "quantity": "2 spools",
                "item": "PLA"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, None);
        client.add_restock_request(&request).await.unwrap();

        let blank = RestockRequest { item: String::new(), ..request };
        assert!(matches!(
            client.add_restock_request(&blank).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_get_certifications() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/certifications/get_certifications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "uuid": "c1", "name": "Laser Cutter" }
            ])))
            .mount(&server)
            .await;

        let certs = client(&server, None).get_certifications().await.unwrap();
        assert_eq!(certs, vec![Certification { uuid: "c1".to_string(), name: "Laser Cutter".to_string() }]);
    }
}
