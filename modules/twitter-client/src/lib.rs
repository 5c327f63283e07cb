//! Pure Twitter v1.1 REST API client.
//!
//! Covers the three user-context endpoints needed to announce activity:
//! verifying credentials, reading the account's own timeline, and posting a
//! status. Requests are signed with OAuth 1.0a.
//!
//! # Example
//!
//! ```rust,ignore
//! use twitter_client::{Credentials, TwitterClient};
//!
//! let client = TwitterClient::new(credentials);
//! let me = client.verify_credentials().await?;
//! let recent = client.user_timeline(&me.screen_name).await?;
//! client.update_status("hello || https://example.com").await?;
//! ```

pub mod error;
pub mod oauth;
pub mod types;

pub use error::{Result, TwitterError, STATUS_DUPLICATE, STATUS_TOO_LONG};
pub use oauth::{Credentials, OAuthSigner};
pub use types::{ApiErrorDetail, Tweet, User};

use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::debug;

use oauth::encode_params;
use types::ApiErrorBody;

const BASE_URL: &str = "https://api.twitter.com";

pub struct TwitterClient {
    client: reqwest::Client,
    base_url: String,
    signer: OAuthSigner,
}

impl TwitterClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_http_client(reqwest::Client::new(), credentials)
    }

    /// Build on a preconfigured `reqwest::Client` (timeouts, proxies).
    pub fn with_http_client(client: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
            signer: OAuthSigner::new(credentials),
        }
    }

    /// Point the client at a different API root (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Resolve the account the credentials belong to.
    pub async fn verify_credentials(&self) -> Result<User> {
        self.get("/1.1/account/verify_credentials.json", &[]).await
    }

    /// The most recent statuses posted by `screen_name` (API default count).
    pub async fn user_timeline(&self, screen_name: &str) -> Result<Vec<Tweet>> {
        let params = vec![("screen_name".to_string(), screen_name.to_string())];
        self.get("/1.1/statuses/user_timeline.json", &params).await
    }

    /// Post a new status.
    pub async fn update_status(&self, status: &str) -> Result<Tweet> {
        let params = vec![("status".to_string(), status.to_string())];
        self.post_form("/1.1/statuses/update.json", &params).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let auth = self.signer.sign("GET", &url, params)?;
        debug!(endpoint, "GET");

        let full_url = if params.is_empty() {
            url
        } else {
            format!("{}?{}", url, encode_params(params))
        };

        let resp = self
            .client
            .get(&full_url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;
        handle_response(resp).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let auth = self.signer.sign("POST", &url, params)?;
        debug!(endpoint, "POST");

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(encode_params(params))
            .send()
            .await?;
        handle_response(resp).await
    }
}

async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    let bytes = resp.bytes().await?;

    if status.is_success() {
        return Ok(serde_json::from_slice(&bytes)?);
    }

    let body: ApiErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
    let message = if body.errors.is_empty() {
        String::from_utf8_lossy(&bytes).into_owned()
    } else {
        body.errors
            .iter()
            .map(|e| format!("{} (code {})", e.message, e.code))
            .collect::<Vec<_>>()
            .join("; ")
    };

    Err(TwitterError::Api {
        status: status.as_u16(),
        message,
        errors: body.errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TwitterClient {
        TwitterClient::new(Credentials {
            consumer_key: "ck".into(),
            consumer_secret: "cs".into(),
            access_token: "at".into(),
            access_token_secret: "ats".into(),
        })
        .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn verify_credentials_returns_user() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/1.1/account/verify_credentials.json"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id_str": "12",
                "screen_name": "alice_dev",
                "name": "Alice"
            })))
            .mount(&server)
            .await;

        let user = client(&server).verify_credentials().await.unwrap();
        assert_eq!(user.screen_name, "alice_dev");
    }

    #[tokio::test]
    async fn user_timeline_passes_screen_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/1.1/statuses/user_timeline.json"))
            .and(query_param("screen_name", "alice_dev"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id_str": "1", "text": "alice opened an issue in acme/widget: Bug || https://t.co/x" }
            ])))
            .mount(&server)
            .await;

        let tweets = client(&server).user_timeline("alice_dev").await.unwrap();
        assert_eq!(tweets.len(), 1);
        assert!(tweets[0].text.starts_with("alice opened"));
    }

    #[tokio::test]
    async fn update_status_sends_encoded_form() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1.1/statuses/update.json"))
            .and(body_string("status=a%20%7C%7C%20b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id_str": "99",
                "text": "a || b"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tweet = client(&server).update_status("a || b").await.unwrap();
        assert_eq!(tweet.id_str, "99");
    }

    #[tokio::test]
    async fn error_codes_are_decoded() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1.1/statuses/update.json"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "errors": [{ "code": 187, "message": "Status is a duplicate." }]
            })))
            .mount(&server)
            .await;

        let err = client(&server).update_status("again").await.unwrap_err();
        assert!(err.has_code(STATUS_DUPLICATE));
        assert!(!err.has_code(STATUS_TOO_LONG));
        assert!(err.to_string().contains("Status is a duplicate."));
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_as_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/1.1/account/verify_credentials.json"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client(&server).verify_credentials().await.unwrap_err();
        match err {
            TwitterError::Api {
                status,
                message,
                errors,
            } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
                assert!(errors.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
