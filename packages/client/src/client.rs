//! The document store client.
//!
//! Every operation comes in two shapes. The `try_*` methods return a
//! [`Result`] that tells a missing document apart from a rejected
//! conditional write or a dropped connection. The plain methods collapse any
//! failure into `false` (writes) or an empty string (reads) and never fail.
//!
//! Parameters always come in the order `location`, `data` (for verbs that
//! send a body), `authenticated`, `headers`.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::config::{validate_database_url, AuthMode, Options};
use crate::error::{Error, Result};
use crate::etag::ETAG_HEADER;
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::location::{redact, resolve_url, AuthSuffix};
use crate::types::{find_header, Document, Headers, HttpRequest, HttpResponse, Method};

const CONTENT_TYPE: &str = "content-type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for a path-addressed JSON document store.
///
/// Configuration is fixed at construction. A client whose database URL is
/// missing or not `https://` is disabled: every operation fails immediately
/// without touching the network.
///
/// Clones share the executor, and no operation mutates the client, so one
/// instance can serve concurrent callers.
///
/// # Example
///
/// ```ignore
/// use docstore_client::{etag, DocumentStore, Headers, Options};
///
/// let store = DocumentStore::new(Options::new("https://x.example/db").with_identity_token("tok1"))?;
///
/// store.write("users/1", r#"{"name":"a"}"#, true, &Headers::new()).await;
///
/// let doc = store.try_read("users/1", true, &etag::request_etag(Headers::new())).await?;
/// let headers = etag::require_etag_match(Headers::new(), doc.etag.as_deref().unwrap_or_default());
/// let saved = store.write("users/1", r#"{"name":"b"}"#, true, &headers).await;
/// ```
#[derive(Clone)]
pub struct DocumentStore {
    executor: Arc<dyn HttpExecutor>,
    base_url: String,
    auth_mode: AuthMode,
    auth_suffix: AuthSuffix,
    disabled: bool,
}

impl DocumentStore {
    /// Create a client that talks to the store through reqwest.
    ///
    /// Fails only if the HTTP client itself cannot be built; a bad database
    /// URL yields a disabled client instead.
    pub fn new(options: Options) -> Result<Self> {
        Ok(Self::with_executor(options, ReqwestExecutor::new()?))
    }

    /// Create a client with a custom executor.
    pub fn with_executor(options: Options, executor: impl HttpExecutor + 'static) -> Self {
        let disabled = match validate_database_url(&options.database_url) {
            Ok(_) => false,
            Err(e) => {
                warn!("{}; client disabled", e);
                true
            }
        };

        let auth_mode = options.auth_mode();
        let auth_suffix = AuthSuffix::from_mode(&auth_mode);

        Self {
            executor: Arc::new(executor),
            base_url: options.database_url,
            auth_mode,
            auth_suffix,
            disabled,
        }
    }

    /// True when the database URL failed validation
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The database URL this client was configured with
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The credential scheme resolved at construction
    pub fn auth_mode(&self) -> &AuthMode {
        &self.auth_mode
    }

    /// The URL an operation on `location` targets.
    pub fn resolve_url(&self, location: &str, authenticated: bool) -> String {
        resolve_url(&self.base_url, location, authenticated, &self.auth_suffix)
    }

    /// GET the document at `location`.
    ///
    /// The body must be well-formed JSON; it is returned as sent.
    pub async fn try_read(
        &self,
        location: &str,
        authenticated: bool,
        headers: &Headers,
    ) -> Result<Document> {
        let response = self
            .exchange(Method::GET, location, None, authenticated, headers)
            .await?;
        let body = response.json_text().map_err(|e| {
            warn!("Malformed document at {}: {}", location, e);
            e
        })?;

        Ok(Document {
            body: body.to_string(),
            etag: response.header(ETAG_HEADER).map(str::to_owned),
        })
    }

    /// PUT `data` at `location`, replacing whatever is there.
    pub async fn try_write(
        &self,
        location: &str,
        data: &str,
        authenticated: bool,
        headers: &Headers,
    ) -> Result<Document> {
        self.exchange(Method::PUT, location, Some(data), authenticated, headers)
            .await
            .map(into_document)
    }

    /// PATCH the children named in `data` at `location`.
    pub async fn try_update(
        &self,
        location: &str,
        data: &str,
        authenticated: bool,
        headers: &Headers,
    ) -> Result<Document> {
        self.exchange(Method::PATCH, location, Some(data), authenticated, headers)
            .await
            .map(into_document)
    }

    /// POST `data` as a new child of `location`. The store picks the child
    /// key; see [`Document::generated_key`].
    pub async fn try_push(
        &self,
        location: &str,
        data: &str,
        authenticated: bool,
        headers: &Headers,
    ) -> Result<Document> {
        self.exchange(Method::POST, location, Some(data), authenticated, headers)
            .await
            .map(into_document)
    }

    /// DELETE the document at `location`.
    pub async fn try_delete(
        &self,
        location: &str,
        authenticated: bool,
        headers: &Headers,
    ) -> Result<Document> {
        self.exchange(Method::DELETE, location, None, authenticated, headers)
            .await
            .map(into_document)
    }

    /// The document at `location` as a JSON string, or `""` on any failure.
    pub async fn read(&self, location: &str, authenticated: bool, headers: &Headers) -> String {
        self.try_read(location, authenticated, headers)
            .await
            .map(|document| document.body)
            .unwrap_or_default()
    }

    /// PUT `data` at `location`; `false` on any failure.
    pub async fn write(
        &self,
        location: &str,
        data: &str,
        authenticated: bool,
        headers: &Headers,
    ) -> bool {
        self.try_write(location, data, authenticated, headers)
            .await
            .is_ok()
    }

    /// PATCH `data` into `location`; `false` on any failure.
    pub async fn update(
        &self,
        location: &str,
        data: &str,
        authenticated: bool,
        headers: &Headers,
    ) -> bool {
        self.try_update(location, data, authenticated, headers)
            .await
            .is_ok()
    }

    /// POST `data` below `location`; `false` on any failure.
    pub async fn push(
        &self,
        location: &str,
        data: &str,
        authenticated: bool,
        headers: &Headers,
    ) -> bool {
        self.try_push(location, data, authenticated, headers)
            .await
            .is_ok()
    }

    /// DELETE `location`; `false` on any failure.
    pub async fn delete(&self, location: &str, authenticated: bool, headers: &Headers) -> bool {
        self.try_delete(location, authenticated, headers)
            .await
            .is_ok()
    }

    /// Run one exchange and keep only 200 responses.
    async fn exchange(
        &self,
        method: Method,
        location: &str,
        body: Option<&str>,
        authenticated: bool,
        headers: &Headers,
    ) -> Result<HttpResponse> {
        if self.disabled {
            return Err(Error::Disabled);
        }
        if authenticated && !self.auth_suffix.is_available() {
            return Err(Error::MissingCredential);
        }

        let request = HttpRequest {
            method,
            url: self.resolve_url(location, authenticated),
            headers: with_protocol_headers(headers, body.is_some()),
            body: body.map(str::to_owned),
        };

        debug!("{} {}", method, redact(&request.url));

        let response = self.executor.execute(&request).await.map_err(|e| {
            warn!("{} {} failed: {}", method, redact(&request.url), e);
            e
        })?;

        if response.status != 200 {
            debug!(
                "{} {} returned {}",
                method,
                redact(&request.url),
                response.status
            );
            return Err(Error::from_response(&response));
        }

        Ok(response)
    }
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("base_url", &self.base_url)
            .field("auth_mode", &self.auth_mode)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// Caller headers plus the headers the protocol needs. A header the caller
/// already set is left alone.
fn with_protocol_headers(headers: &Headers, has_body: bool) -> Headers {
    let mut merged = headers.clone();
    if has_body && find_header(&merged, CONTENT_TYPE).is_none() {
        merged.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
    }
    merged
}

fn into_document(response: HttpResponse) -> Document {
    let etag = response.header(ETAG_HEADER).map(str::to_owned);
    let body = match response.json_text() {
        Ok(text) => text.to_string(),
        Err(_) => response.body_text,
    };
    Document { body, etag }
}
