use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

/// Header name to value. Lookups through [`find_header`] ignore ASCII case.
pub type Headers = HashMap<String, String>;

/// Look up a header by name, ignoring ASCII case.
pub fn find_header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// HTTP methods the document store understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    GET,
    PUT,
    PATCH,
    POST,
    DELETE,
}

impl Method {
    /// The method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::POST => "POST",
            Method::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::PUT => http::Method::PUT,
            Method::PATCH => http::Method::PATCH,
            Method::POST => http::Method::POST,
            Method::DELETE => http::Method::DELETE,
        }
    }
}

/// A fully resolved request, ready to hand to an executor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpRequest {
    pub method: Method,

    /// Absolute URL including the `.json` or authentication suffix
    pub url: String,

    pub headers: Headers,

    /// JSON payload, already serialized
    pub body: Option<String>,
}

impl HttpRequest {
    /// Create a request with no headers and no body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Add a header, replacing one stored under the same key
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attach a serialized JSON payload
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a request header, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// HTTP response as seen by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,

    pub headers: Headers,

    /// Raw body text; may be empty or not JSON at all
    pub body_text: String,
}

impl HttpResponse {
    /// Look up a response header, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// The body with surrounding whitespace trimmed, provided it is one
    /// well-formed JSON value. The text itself is returned untouched, so key
    /// order and number precision survive.
    pub fn json_text(&self) -> Result<&str, serde_json::Error> {
        let raw: &RawValue = serde_json::from_str(&self.body_text)?;
        Ok(raw.get().trim())
    }
}

/// A successful answer from the store.
///
/// `body` holds the response text exactly as the store sent it, minus
/// surrounding whitespace, so an empty object reads back as `"{}"` and never
/// as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub body: String,
    pub etag: Option<String>,
}

impl Document {
    /// Deserialize the document into a concrete type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// The child key the store assigned to a pushed document.
    pub fn generated_key(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        value.get("name")?.as_str().map(str::to_owned)
    }
}
