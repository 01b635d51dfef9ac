//! REST client for the CMS backend.
//!
//! [`CmsApi`] speaks the uniform resource surface
//! (`GET/POST /{path}`, `GET/PUT/DELETE /{path}/{id}`) for any
//! [`Resource`], plus the login endpoint.  It never retries: every failure
//! is returned to the screen that issued the call.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart;
use serde::Deserialize;
use serde_json::Value;

use cms_core::attachment::Attachment;
use cms_core::envelope::{error_message, normalize_listing, normalize_record, Page};
use cms_core::payload::{MultipartForm, Payload};
use cms_core::resource::Resource;
use cms_core::session::Credentials;

use crate::config::{normalize_base_url, ClientConfig};
use crate::error::ClientError;

/// Header carrying a per-submission key so the backend can drop duplicates.
pub const IDEMPOTENCY_KEY: &str = "Idempotency-Key";

/// A fresh value for [`IDEMPOTENCY_KEY`].  Callers keep it for every
/// attempt at the same submission.
pub fn new_idempotency_key() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "auth/login";

/// HTTP client for one CMS backend.
#[derive(Debug, Clone)]
pub struct CmsApi {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

impl CmsApi {
    /// Create a client for `config.api_url` with the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.api_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: normalize_base_url(api_url),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Exchange credentials for a bearer token (`POST /auth/login`).
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        tracing::debug!(email, "Signing in");
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(&body)
            .send()
            .await?;

        let value = Self::parse_response(response).await?;
        let login: LoginResponse = normalize_record(value)?;
        Ok(login.token)
    }

    /// Fetch one page of `R` (`GET /{path}?page=&limit=`).
    ///
    /// `credentials` is attached when present; resources whose lists are
    /// public are called with `None`.  `extra` is appended to the query
    /// string as-is.
    pub async fn list<R: Resource>(
        &self,
        credentials: Option<&Credentials>,
        page: u32,
        limit: u32,
        extra: &[(String, String)],
    ) -> Result<Page<R::Record>, ClientError> {
        tracing::debug!(resource = R::PATH, page, limit, "Loading listing");

        let mut request = self
            .client
            .get(self.url(R::PATH))
            .query(&[("page", page.to_string()), ("limit", limit.to_string())])
            .query(extra);
        if let Some(credentials) = credentials {
            request = request.header(AUTHORIZATION, credentials.bearer());
        }

        let value = Self::parse_response(request.send().await?).await?;
        Ok(normalize_listing(value, R::LIST_KEY)?)
    }

    /// Fetch one record (`GET /{path}/{id}`).
    pub async fn fetch<R: Resource>(
        &self,
        credentials: &Credentials,
        id: &str,
    ) -> Result<R::Record, ClientError> {
        tracing::debug!(resource = R::PATH, id, "Fetching record");

        let response = self
            .client
            .get(self.record_url::<R>(id))
            .header(AUTHORIZATION, credentials.bearer())
            .send()
            .await?;

        let value = Self::parse_response(response).await?;
        Ok(normalize_record(value)?)
    }

    /// Create a record (`POST /{path}`).  Returns the response body.
    pub async fn create<R: Resource>(
        &self,
        credentials: &Credentials,
        idempotency_key: &str,
        payload: Payload,
    ) -> Result<Value, ClientError> {
        let request = self.client.post(self.url(R::PATH));
        self.send_mutation(R::PATH, request, credentials, idempotency_key, Some(payload))
            .await
    }

    /// Replace a record (`PUT /{path}/{id}`).  Returns the response body.
    pub async fn update<R: Resource>(
        &self,
        credentials: &Credentials,
        id: &str,
        idempotency_key: &str,
        payload: Payload,
    ) -> Result<Value, ClientError> {
        let request = self.client.put(self.record_url::<R>(id));
        self.send_mutation(R::PATH, request, credentials, idempotency_key, Some(payload))
            .await
    }

    /// Delete a record (`DELETE /{path}/{id}`).
    pub async fn delete<R: Resource>(
        &self,
        credentials: &Credentials,
        id: &str,
        idempotency_key: &str,
    ) -> Result<(), ClientError> {
        let request = self.client.delete(self.record_url::<R>(id));
        self.send_mutation(R::PATH, request, credentials, idempotency_key, None)
            .await?;
        Ok(())
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    fn record_url<R: Resource>(&self, id: &str) -> String {
        format!("{}/{}/{}", self.api_url, R::PATH, id)
    }

    /// Attach the bearer token, the idempotency key and the body, then
    /// send.
    async fn send_mutation(
        &self,
        resource: &'static str,
        request: reqwest::RequestBuilder,
        credentials: &Credentials,
        key: &str,
        payload: Option<Payload>,
    ) -> Result<Value, ClientError> {
        let request = request
            .header(AUTHORIZATION, credentials.bearer())
            .header(IDEMPOTENCY_KEY, key);

        let request = match payload {
            Some(Payload::Json(map)) => request.json(&map),
            Some(Payload::Multipart(form)) => request.multipart(to_multipart(form)?),
            None => request,
        };

        tracing::debug!(resource, idempotency_key = key, "Sending mutation");
        let response = request.send().await?;
        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code.  On failure the
    /// body's `message` is extracted when it parses.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Backend {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response)
    }

    /// Read a successful body as JSON.  Empty bodies become `null` and
    /// non-JSON bodies are kept as a string.
    async fn parse_response(response: reqwest::Response) -> Result<Value, ClientError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

/// Convert a core multipart body into a reqwest form.
fn to_multipart(form: MultipartForm) -> Result<multipart::Form, ClientError> {
    let mut out = multipart::Form::new();
    for (name, value) in form.texts {
        out = out.text(name, value);
    }
    for Attachment {
        field,
        file_name,
        content_type,
        bytes,
    } in form.files
    {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&content_type)?;
        out = out.part(field, part);
    }
    Ok(out)
}
