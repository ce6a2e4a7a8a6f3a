//! Thin async client for the JetBrains Space HTTP API.
//!
//! Every operation issues exactly one request with bearer authentication and
//! hands back the decoded JSON. List operations return the rows found under
//! the response's `data` field; single-entity operations return the body as
//! received.
//!
//! The client never inspects the HTTP status: an error answer from Space is
//! decoded and returned like any other body, so callers must look at the
//! payload for remote-side errors. Only transport failures and non-JSON
//! bodies surface as [`ApiError`].

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod pagination;

pub use client::{ClientConfig, DEFAULT_LIST_LIMIT};
pub use error::{ApiError, Result};
pub use models::{
    ChannelTarget, MessageContent, NewInvitation, NewMergeRequest, NewProfile, NewProject,
    ParticipantRole, ProfileIdentifier, ProjectKey, ReviewQuery, ReviewSort, ReviewState,
};
pub use pagination::Page;

use client::ResolvedUrls;
use pagination::DataEnvelope;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// A single outgoing call: method, resolved URL, query and JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    urls: ResolvedUrls,
    authorization: HeaderValue,
    list_limit: u32,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url, token))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let urls = config.resolve()?;
        let authorization = bearer_header(&config.token)?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            urls,
            authorization,
            list_limit: config.list_limit,
        })
    }

    /// Organization root, e.g. `https://acme.jetbrains.space`.
    pub fn base_url(&self) -> &Url {
        &self.urls.base
    }

    /// API root, `<base_url>/api/http`.
    pub fn api_url(&self) -> &Url {
        &self.urls.api
    }

    pub fn list_limit(&self) -> u32 {
        self.list_limit
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, Option::<&()>::None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, Option::<&()>::None)
            .await
    }

    /// Sends a request to `path` relative to the API root. A query string in
    /// `path` is kept.
    pub async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.resolve_path(path)?;
        let mut request = ApiRequest::new(method, url);
        if let Some(body) = body {
            request = request.json(body)?;
        }
        self.fetch(request).await
    }

    /// Sends the request and decodes the whole body into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let bytes = self.execute(request).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends the request and returns the rows under `data`.
    pub async fn fetch_list(&self, request: ApiRequest) -> Result<Vec<Value>> {
        let envelope: DataEnvelope = self.fetch(request).await?;
        Ok(envelope.into_data())
    }

    /// Sends the request and returns the raw response body. The status code
    /// is logged but never turned into an error.
    pub async fn execute(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let ApiRequest {
            method,
            url,
            query,
            body,
        } = request;

        debug!(method = %method, url = %url, "Sending request");

        let mut req = self
            .client
            .request(method.clone(), url.clone())
            .headers(self.default_headers());

        if !query.is_empty() {
            req = req.query(&query);
        }

        if let Some(body) = &body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(method = %method, url = %url, status = status.as_u16(), "Space answered with a non-success status");
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// URL under the API root built from raw path segments.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        Self::join_segments(&self.urls.api, segments)
    }

    /// URL under the organization root built from raw path segments.
    pub fn site_endpoint(&self, segments: &[&str]) -> Result<Url> {
        Self::join_segments(&self.urls.base, segments)
    }

    pub(crate) fn list_query(&self, page: Page) -> Result<Vec<(String, String)>> {
        page.query(self.list_limit)
    }

    fn join_segments(root: &Url, segments: &[&str]) -> Result<Url> {
        let mut url = root.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::configuration(format!("'{root}' cannot hold a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn resolve_path(&self, path: &str) -> Result<Url> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut url = self.endpoint(&segments)?;
        url.set_query(query);
        Ok(url)
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers
    }
}

fn bearer_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
        .map_err(|_| ApiError::configuration("token contains characters not allowed in a header"))?;
    value.set_sensitive(true);
    Ok(value)
}
