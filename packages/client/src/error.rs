use crate::etag::ETAG_HEADER;
use crate::types::HttpResponse;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client was constructed with an unusable database URL.
    #[error("Client is disabled: database URL failed validation")]
    Disabled,

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("Authenticated request without a configured credential")]
    MissingCredential,

    #[error("Document not found")]
    NotFound,

    /// The store rejected a conditional write; `etag` is the current tag if
    /// the store reported one.
    #[error("Entity tag mismatch (current: {})", .etag.as_deref().unwrap_or("unknown"))]
    Conflict { etag: Option<String> },

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}

impl Error {
    /// Classify a response whose status is not 200.
    pub fn from_response(response: &HttpResponse) -> Self {
        match response.status {
            404 => Error::NotFound,
            412 => Error::Conflict {
                etag: response.header(ETAG_HEADER).map(str::to_owned),
            },
            status => Error::Status {
                status,
                body: response.body_text.clone(),
            },
        }
    }

    /// True when the exchange never produced a usable HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_)
                | Error::Http(_)
                | Error::InvalidHeaderName(_)
                | Error::InvalidHeaderValue(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Headers;

    fn response(status: u16, headers: Headers) -> HttpResponse {
        HttpResponse {
            status,
            headers,
            body_text: r#"{"error":"nope"}"#.to_string(),
        }
    }

    #[test]
    fn not_found_is_classified() {
        let error = Error::from_response(&response(404, Headers::new()));
        assert!(matches!(error, Error::NotFound));
    }

    #[test]
    fn precondition_failure_carries_current_tag() {
        let mut headers = Headers::new();
        headers.insert("ETag".to_string(), "abc".to_string());
        let error = Error::from_response(&response(412, headers));
        match error {
            Error::Conflict { etag } => assert_eq!(etag.as_deref(), Some("abc")),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn other_statuses_keep_the_body() {
        let error = Error::from_response(&response(401, Headers::new()));
        match error {
            Error::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("nope"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(!Error::NotFound.is_transport());
        assert!(Error::Transport("reset".to_string()).is_transport());
    }
}
