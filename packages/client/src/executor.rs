//! HTTP execution abstraction.
//!
//! The client hands fully resolved requests to an [`HttpExecutor`]. The
//! production implementation uses reqwest; tests swap in an in-memory store.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::error::Error;
use crate::types::{Headers, HttpRequest, HttpResponse};

/// Trait for executing one HTTP exchange.
///
/// Any status code is a successful exchange; `Err` is reserved for requests
/// that never produced a response.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Production HTTP executor using reqwest.
///
/// No timeout is configured. Callers needing one build their own
/// [`reqwest::Client`] and pass it to [`ReqwestExecutor::with_client`].
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Create an executor with a default reqwest client.
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Create an executor around a caller-configured reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let method: http::Method = request.method.into();

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::try_from(name.as_str())?;
            let header_value = HeaderValue::try_from(value.as_str())?;
            headers.insert(header_name, header_value);
        }

        let mut req_builder = self.client.request(method, &request.url).headers(headers);

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let response = req_builder.send().await?;

        let status = response.status().as_u16();

        let mut resp_headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                resp_headers.insert(name.to_string(), v.to_string());
            }
        }

        let body_text = response.text().await?;

        Ok(HttpResponse {
            status,
            headers: resp_headers,
            body_text,
        })
    }
}
