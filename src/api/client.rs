//
//  planning-tool
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport for Zephyr Scale and Jira
//!
//! This module provides the HTTP transport shared by every API call. It picks
//! the base URL and authentication scheme for the target [`Host`], serializes
//! query parameters and JSON bodies, decodes JSON responses, and turns non-2xx
//! responses into classified [`ApiError`]s.
//!
//! ## Features
//!
//! - Per-host base URL and auth scheme (bearer vs. basic)
//! - `Accept: application/json` on every call, `Content-Type: application/json`
//!   on every non-multipart call
//! - JSON and raw-bytes responses, multipart uploads
//! - Configurable request timeout; timeouts surface as transient errors
//! - Custom User-Agent header

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::api::common::{classify_response, ApiError, ApiResult, Page, PageSource, Paginator};
use crate::auth::Credentials;

const JSON: &str = "application/json";

/// The service a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    /// Zephyr Scale, bearer token.
    TestManagement,
    /// Jira, basic auth with the API token as password.
    IssueTracker,
}

/// Tunables for the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Per-request timeout. Applies to the whole round trip.
    pub timeout: Duration,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Authenticated HTTP transport for both services.
///
/// One network round trip per call; no caching and no retries. Connection
/// reuse is whatever `reqwest` provides.
///
/// # Example
///
/// ```rust,no_run
/// use planning_tool::api::client::{Host, HttpTransport, TransportOptions};
/// use planning_tool::auth::Credentials;
///
/// # async fn example() -> planning_tool::api::common::ApiResult<()> {
/// let credentials = Credentials::new(
///     "jira-token",
///     "observer",
///     "zephyr-token",
///     "https://rubinobs.atlassian.net/rest/api/2/",
///     "https://api.zephyrscale.smartbear.com/v2/",
/// )?;
/// let transport = HttpTransport::new(credentials, &TransportOptions::default())?;
/// let cycle: serde_json::Value = transport
///     .get(Host::TestManagement, "testcycles/BLOCK-R21", &[])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpTransport {
    http: Client,
    credentials: Credentials,
}

impl HttpTransport {
    pub fn new(credentials: Credentials, options: &TransportOptions) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(format!("zapi/{}", crate::VERSION))
            .timeout(options.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(Self { http, credentials })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resolves `path` against the base URL of `host`.
    pub fn url(&self, host: Host, path: &str) -> ApiResult<Url> {
        self.credentials
            .base_for(host)
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::invalid(format!("invalid request path '{}': {}", path, e)))
    }

    fn request(
        &self,
        method: Method,
        host: Host,
        path: &str,
    ) -> ApiResult<(String, RequestBuilder)> {
        let url = self.url(host, path)?;
        let endpoint = format!("{} {}", method, path.trim_start_matches('/'));
        let request = self
            .credentials
            .scheme_for(host)
            .apply_to_request(self.http.request(method, url))
            .header(ACCEPT, JSON);
        Ok((endpoint, request))
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(endpoint, e))?;
        let status = response.status();

        debug!(endpoint, status = status.as_u16(), "Response received");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_response(status, endpoint, &text));
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> ApiResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_transport(endpoint, e))?;

        // Some update endpoints answer 2xx with no body.
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };

        serde_json::from_slice(body).map_err(|e| ApiError::Validation {
            status: None,
            endpoint: Some(endpoint.to_string()),
            message: format!("unexpected response body: {}", e),
        })
    }

    /// Makes an HTTP GET request and decodes the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        host: Host,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let (endpoint, request) = self.request(Method::GET, host, path)?;
        let request = request.header(CONTENT_TYPE, JSON).query(query);
        let response = self.send(&endpoint, request).await?;
        Self::decode(&endpoint, response).await
    }

    /// Makes an HTTP GET request and returns the raw body, for binary downloads.
    pub async fn get_bytes(&self, host: Host, path: &str) -> ApiResult<Vec<u8>> {
        let (endpoint, request) = self.request(Method::GET, host, path)?;
        let response = self.send(&endpoint, request.header(CONTENT_TYPE, JSON)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_transport(&endpoint, e))?;
        Ok(bytes.to_vec())
    }

    /// Makes an HTTP POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        host: Host,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let (endpoint, request) = self.request(Method::POST, host, path)?;
        let response = self.send(&endpoint, request.json(body)).await?;
        Self::decode(&endpoint, response).await
    }

    /// Makes an HTTP PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        host: Host,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let (endpoint, request) = self.request(Method::PUT, host, path)?;
        let response = self.send(&endpoint, request.json(body)).await?;
        Self::decode(&endpoint, response).await
    }

    /// Uploads a file as `multipart/form-data` under the `file` field.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        host: Host,
        path: &str,
        file_bytes: Vec<u8>,
        filename: &str,
    ) -> ApiResult<T> {
        let (endpoint, request) = self.request(Method::POST, host, path)?;
        let part = Part::bytes(file_bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        let response = self.send(&endpoint, request.multipart(form)).await?;
        Self::decode(&endpoint, response).await
    }

    /// Lazy cursor over a Zephyr Scale list endpoint.
    pub fn pages<T>(
        &self,
        path: impl Into<String>,
        query: Vec<(&'static str, String)>,
        page_size: u32,
    ) -> Paginator<EndpointPages<'_, T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let source = EndpointPages {
            transport: self,
            path: path.into(),
            query,
            _item: PhantomData,
        };
        Paginator::new(source, page_size)
    }
}

/// [`PageSource`] backed by a Zephyr Scale list endpoint.
///
/// Adds `startAt` and `maxResults` to the fixed query of the listing.
pub struct EndpointPages<'a, T> {
    transport: &'a HttpTransport,
    path: String,
    query: Vec<(&'static str, String)>,
    _item: PhantomData<fn() -> T>,
}

#[async_trait]
impl<'a, T> PageSource for EndpointPages<'a, T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Item = T;

    async fn fetch_page(&self, start_at: u32, max_results: u32) -> ApiResult<Page<T>> {
        let mut query = self.query.clone();
        query.push(("startAt", start_at.to_string()));
        query.push(("maxResults", max_results.to_string()));
        self.transport
            .get(Host::TestManagement, &self.path, &query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::{json, Value};

    fn transport(server: &ServerGuard, timeout: Duration) -> HttpTransport {
        let credentials = Credentials::new(
            "jira-token",
            "observer",
            "zephyr-token",
            format!("{}/rest/api/2", server.url()),
            format!("{}/v2", server.url()),
        )
        .unwrap();
        HttpTransport::new(credentials, &TransportOptions { timeout }).unwrap()
    }

    #[test]
    fn test_url_joins_under_base_path() {
        let server = Server::new();
        let transport = transport(&server, Duration::from_secs(5));
        let url = transport
            .url(Host::TestManagement, "/testcycles/BLOCK-R21")
            .unwrap();
        assert_eq!(url.path(), "/v2/testcycles/BLOCK-R21");
    }

    #[tokio::test]
    async fn test_get_sends_json_headers_and_user_agent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/projects/10036")
            .match_header("authorization", "Bearer zephyr-token")
            .match_header("accept", "application/json")
            .match_header("content-type", "application/json")
            .match_header("user-agent", Matcher::Regex("^zapi/".into()))
            .with_status(200)
            .with_body(r#"{"id": 10036, "key": "BLOCK"}"#)
            .create_async()
            .await;

        let transport = transport(&server, Duration::from_secs(5));
        let body: Value = transport
            .get(Host::TestManagement, "projects/10036", &[])
            .await
            .unwrap();

        assert_eq!(body["key"], "BLOCK");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_success_body_decodes_as_null() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("PUT", "/v2/testcycles/BLOCK-R21")
            .with_status(200)
            .create_async()
            .await;

        let transport = transport(&server, Duration::from_secs(5));
        let body: Value = transport
            .put(Host::TestManagement, "testcycles/BLOCK-R21", &json!({"name": "x"}))
            .await
            .unwrap();

        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_bad_request_carries_vendor_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/rest/api/2/issue/OBS-1/comment")
            .with_status(400)
            .with_body(r#"{"errorMessages": [], "errors": {"body": "Comment body can not be empty!"}}"#)
            .create_async()
            .await;

        let transport = transport(&server, Duration::from_secs(5));
        let err = transport
            .post::<Value, _>(Host::IssueTracker, "issue/OBS-1/comment", &json!({"body": ""}))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.http_status(), Some(400));
        assert!(err.vendor_message().contains("Comment body can not be empty!"));
        assert_eq!(err.endpoint(), Some("POST issue/OBS-1/comment"));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_validation_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/statuses/1")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let transport = transport(&server, Duration::from_secs(5));
        let err = transport
            .get::<Value>(Host::TestManagement, "statuses/1", &[])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_get_bytes_returns_body_verbatim() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/attachments/7")
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body(vec![0u8, 159, 146, 150])
            .create_async()
            .await;

        let transport = transport(&server, Duration::from_secs(5));
        let bytes = transport
            .get_bytes(Host::TestManagement, "attachments/7")
            .await
            .unwrap();

        assert_eq!(bytes, vec![0u8, 159, 146, 150]);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transient() {
        let credentials = Credentials::new(
            "jira-token",
            "observer",
            "zephyr-token",
            "http://127.0.0.1:9/rest/api/2/",
            "http://127.0.0.1:9/v2/",
        )
        .unwrap();
        let transport =
            HttpTransport::new(credentials, &TransportOptions { timeout: Duration::from_secs(2) })
                .unwrap();

        let err = transport
            .get::<Value>(Host::TestManagement, "statuses/1", &[])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transient);
        assert!(err.retriable());
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Accepts connections and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let credentials = Credentials::new(
            "jira-token",
            "observer",
            "zephyr-token",
            format!("http://{}/rest/api/2/", addr),
            format!("http://{}/v2/", addr),
        )
        .unwrap();
        let options = TransportOptions {
            timeout: Duration::from_millis(300),
        };
        let transport = HttpTransport::new(credentials, &options).unwrap();

        let err = transport
            .get::<Value>(Host::TestManagement, "testcycles/BLOCK-R21", &[])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transient);
        assert!(err.retriable());
        assert!(err.to_string().contains("timed out"), "{}", err);
    }
}
