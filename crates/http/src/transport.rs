//! Raw HTTP transport
//!
//! [`ApiRequest`] describes a call as plain data so that it can be rebuilt
//! and dispatched more than once (the authentication pipeline re-sends a
//! request after refreshing the token). [`Transport`] turns that description
//! into a `reqwest` request against the configured base URL.

use crate::config::ClientConfig;
use crate::error::ClientError;
use bytes::Bytes;
use reqwest::{Client, ClientBuilder, Method, Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Body of an [`ApiRequest`]
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(JsonValue),
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
    Multipart(MultipartBody),
}

/// Multipart payload with a single file part and optional text fields
#[derive(Debug, Clone)]
pub struct MultipartBody {
    file_field: String,
    file_name: String,
    mime: String,
    contents: Bytes,
    fields: Vec<(String, String)>,
}

impl MultipartBody {
    /// Multipart body carrying `contents` under the form field `file_field`
    pub fn file(
        file_field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        contents: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_field: file_field.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            contents: contents.into(),
            fields: Vec::new(),
        }
    }

    /// Add a text field
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    fn to_form(&self) -> Result<reqwest::multipart::Form, ClientError> {
        let part = reqwest::multipart::Part::bytes(self.contents.to_vec())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime)?;
        let form = self
            .fields
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });
        Ok(form.part(self.file_field.clone(), part))
    }
}

/// A backend call described as data
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: RequestBody,
    session_recovery: bool,
    bearer: Option<String>,
}

impl ApiRequest {
    /// Request with no body; takes part in session recovery
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            session_recovery: true,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a form-encoded body
    #[must_use]
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = RequestBody::Form(
            fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );
        self
    }

    /// Attach a multipart body
    #[must_use]
    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body);
        self
    }

    /// Pass a 401 straight back to the caller instead of refreshing the session
    #[must_use]
    pub fn without_session_recovery(mut self) -> Self {
        self.session_recovery = false;
        self
    }

    /// Authenticate with `token` instead of the stored one. Such requests do
    /// not take part in session recovery.
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self.session_recovery = false;
        self
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn body(&self) -> &RequestBody {
        &self.body
    }

    pub const fn recovers_session(&self) -> bool {
        self.session_recovery
    }

    pub fn bearer_override(&self) -> Option<&str> {
        self.bearer.as_deref()
    }
}

/// HTTP transport bound to one backend
#[derive(Clone, Debug)]
pub struct Transport {
    client: Client,
    base_url: String,
    include_credentials: bool,
}

impl Transport {
    /// Build a transport from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.normalized_base_url()?;

        #[cfg(not(target_arch = "wasm32"))]
        let client = {
            let mut builder = ClientBuilder::new()
                .user_agent(config.user_agent.clone())
                .cookie_store(config.include_credentials);
            if let Some(timeout) = config.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        #[cfg(target_arch = "wasm32")]
        let client = ClientBuilder::new()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url,
            include_credentials: config.include_credentials,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether cookies accompany requests (needed by the refresh endpoint)
    pub const fn includes_credentials(&self) -> bool {
        self.include_credentials
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send `request` once, attaching `token` as a bearer credential when present
    pub async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<Response, ClientError> {
        let mut builder = self
            .client
            .request(request.method().clone(), self.url(request.path()));

        #[cfg(target_arch = "wasm32")]
        if self.include_credentials {
            builder = builder.fetch_credentials_include();
        }

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        builder = match request.body() {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
            RequestBody::Multipart(body) => builder.multipart(body.to_form()?),
        };

        debug!(
            method = %request.method(),
            path = request.path(),
            authenticated = token.is_some(),
            "dispatching request"
        );
        let response = builder.send().await?;
        debug!(
            method = %request.method(),
            path = request.path(),
            status = response.status().as_u16(),
            "response received"
        );
        Ok(response)
    }
}

/// Decode a successful JSON response or turn an error status into a [`ClientError`]
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        Ok(serde_json::from_str(&body)?)
    } else {
        Err(ClientError::from_status(status, &body))
    }
}
