//! Workshop listings and RSVPs

mod types;
mod card;

use log::info;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;
pub use card::*;

/// Client for the workshop routes
#[derive(Clone)]
pub struct WorkshopsClient {
    /// The base URL of the MAKE server
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Client options
    options: ClientOptions,
}

/// Error body the workshop routes send on rejection
#[derive(Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Replace a JSON `{"detail": ...}` body with just the detail text
fn with_detail(err: Error) -> Error {
    match err {
        Error::Api { status, message } => {
            let message = serde_json::from_str::<ErrorDetail>(&message)
                .map(|d| d.detail)
                .unwrap_or(message);
            Error::Api { status, message }
        }
        other => other,
    }
}

impl WorkshopsClient {
    /// Create a new WorkshopsClient
    pub fn new(url: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            client,
            options,
        }
    }

    fn get_url(&self, route: &str) -> String {
        self.options.endpoint(&self.url, route)
    }

    /// Workshops with the RSVP position of `user_uuid`; anonymous when `None`
    pub async fn get_workshops_for_user(&self, user_uuid: Option<&str>) -> Result<Vec<Workshop>, Error> {
        let url = self.options.endpoint_with_segment(
            &self.url,
            "/workshops/get_workshops_for_user",
            user_uuid.unwrap_or(""),
        )?;

        let workshops = Fetch::get(&self.client, &url)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .execute::<Vec<Workshop>>()
            .await?;

        Ok(workshops)
    }

    async fn post_rsvp(&self, route: &str, workshop_uuid: &str, user_uuid: &str) -> Result<(), Error> {
        if user_uuid.is_empty() {
            return Err(Error::auth("You must be logged in to RSVP to a workshop"));
        }

        let url = self.get_url(route);
        let body = RsvpRequest {
            workshop_uuid: workshop_uuid.to_string(),
            user_uuid: user_uuid.to_string(),
        };

        Fetch::post(&self.client, &url)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .json(&body)?
            .execute_empty()
            .await
            .map_err(with_detail)?;

        Ok(())
    }

    /// Sign `user_uuid` up, or add them to the waitlist
    pub async fn rsvp(&self, workshop_uuid: &str, user_uuid: &str) -> Result<(), Error> {
        self.post_rsvp("/workshops/rsvp_to_workshop", workshop_uuid, user_uuid).await?;
        info!("RSVP'd to workshop {}", workshop_uuid);
        Ok(())
    }

    /// Withdraw an RSVP
    pub async fn cancel_rsvp(&self, workshop_uuid: &str, user_uuid: &str) -> Result<(), Error> {
        self.post_rsvp("/workshops/cancel_rsvp_to_workshop", workshop_uuid, user_uuid).await?;
        info!("Cancelled RSVP to workshop {}", workshop_uuid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> WorkshopsClient {
        WorkshopsClient::new(&server.uri(), Client::new(), ClientOptions::default())
    }

    #[tokio::test]
    async fn test_get_workshops_for_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/workshops/get_workshops_for_user/user-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "uuid": "w1",
                    "title": "Intro to Welding",
                    "timestamp_start": 1741975200,
                    "timestamp_end": 1741982400,
                    "instructors": "Alex",
                    "description": "Basics",
                    "required_quizzes": ["Welding"],
                    "capacity": 8,
                    "signups": 8,
                    "position": 2
                },
                {
                    "uuid": "w2",
                    "title": "Laser Cutting",
                    "timestamp_start": 1741975200,
                    "timestamp_end": 1741982400,
                    "capacity": 4
                }
            ])))
            .mount(&server)
            .await;

        let workshops = client(&server).get_workshops_for_user(Some("user-1")).await.unwrap();
        assert_eq!(workshops.len(), 2);
        assert!(workshops[0].is_registered());
        assert!(workshops[0].is_full());
        assert_eq!(workshops[1].position, -1);
        assert!(!workshops[1].is_registered());
    }

    #[tokio::test]
    async fn test_user_uuid_is_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/workshops/get_workshops_for_user/u%2F1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let workshops = client(&server).get_workshops_for_user(Some("u/1")).await.unwrap();
        assert!(workshops.is_empty());
    }

    #[tokio::test]
    async fn test_rsvp_and_cancel() {
        let server = MockServer::start().await;
        let body = json!({ "workshop_uuid": "w1", "user_uuid": "u1" });

        Mock::given(method("POST"))
            .and(path("/api/v2/workshops/rsvp_to_workshop"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v2/workshops/cancel_rsvp_to_workshop"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client.rsvp("w1", "u1").await.unwrap();
        client.cancel_rsvp("w1", "u1").await.unwrap();
    }

    #[tokio::test]
    async fn test_rsvp_error_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/workshops/rsvp_to_workshop"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "detail": "Missing required quizzes" })),
            )
            .mount(&server)
            .await;

        match client(&server).rsvp("w1", "u1").await {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing required quizzes");
            }
            other => panic!("Expected Error::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rsvp_requires_user() {
        let server = MockServer::start().await;
        let result = client(&server).rsvp("w1", "").await;
        assert!(matches!(result, Err(Error::Auth(_))));
    }
}
