//! Client configuration.
//!
//! [`Options`] mirrors the JSON configuration document a deployment hands to
//! the client:
//!
//! ```json
//! { "databaseUrl": "https://x.example/db", "authentication": "tok1", "tokenAuthentication": false }
//! ```
//!
//! The credential scheme is derived from it once as an [`AuthMode`].

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Root of the document tree. Must be an `https://` URL.
    pub database_url: String,

    /// Credential attached to authenticated requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,

    /// Send the credential as an access token instead of an identity token.
    pub token_authentication: bool,
}

impl Options {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    pub fn with_identity_token(mut self, token: impl Into<String>) -> Self {
        self.authentication = Some(token.into());
        self.token_authentication = false;
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.authentication = Some(token.into());
        self.token_authentication = true;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// The credential scheme these options select. An empty credential counts
    /// as no credential.
    pub fn auth_mode(&self) -> AuthMode {
        match self.authentication.as_deref() {
            None | Some("") => AuthMode::None,
            Some(credential) if self.token_authentication => {
                AuthMode::AccessToken(credential.to_string())
            }
            Some(credential) => AuthMode::IdentityToken(credential.to_string()),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("database_url", &self.database_url)
            .field("authentication", &self.authentication.as_ref().map(|_| "<redacted>"))
            .field("token_authentication", &self.token_authentication)
            .finish()
    }
}

/// How authenticated requests carry their credential
#[derive(Clone, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    None,
    /// `?auth=<credential>`
    IdentityToken(String),
    /// `?access_token=<credential>`
    AccessToken(String),
}

impl AuthMode {
    pub fn credential(&self) -> Option<&str> {
        match self {
            AuthMode::None => None,
            AuthMode::IdentityToken(credential) | AuthMode::AccessToken(credential) => {
                Some(credential)
            }
        }
    }
}

impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::None => f.write_str("None"),
            AuthMode::IdentityToken(_) => f.write_str("IdentityToken(<redacted>)"),
            AuthMode::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
        }
    }
}

/// Check that `database_url` is usable as the root of the document tree.
pub fn validate_database_url(database_url: &str) -> Result<Url, Error> {
    if database_url.trim().is_empty() {
        return Err(Error::InvalidUrl {
            message: "database URL is empty".to_string(),
        });
    }

    let url = Url::parse(database_url).map_err(|e| Error::InvalidUrl {
        message: format!("{database_url}: {e}"),
    })?;

    if url.scheme() != "https" {
        return Err(Error::InvalidUrl {
            message: format!("{database_url}: scheme must be https, got {}", url.scheme()),
        });
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::InvalidUrl {
            message: format!("{database_url}: missing host"),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_document() {
        let options = Options::from_json_str(
            r#"{"databaseUrl":"https://x.example/db","authentication":"tok1","tokenAuthentication":true}"#,
        )
        .unwrap();

        assert_eq!(options.database_url, "https://x.example/db");
        assert_eq!(options.auth_mode(), AuthMode::AccessToken("tok1".to_string()));
    }

    #[test]
    fn missing_fields_default() {
        let options = Options::from_json_str("{}").unwrap();
        assert_eq!(options, Options::default());
        assert_eq!(options.auth_mode(), AuthMode::None);
    }

    #[test]
    fn auth_mode_selection() {
        let identity = Options::new("https://x.example").with_identity_token("t");
        assert_eq!(identity.auth_mode(), AuthMode::IdentityToken("t".to_string()));

        let access = Options::new("https://x.example").with_access_token("t");
        assert_eq!(access.auth_mode(), AuthMode::AccessToken("t".to_string()));

        let empty = Options::new("https://x.example").with_access_token("");
        assert_eq!(empty.auth_mode(), AuthMode::None);
        assert_eq!(empty.auth_mode().credential(), None);
    }

    #[test]
    fn debug_output_hides_credential() {
        let options = Options::new("https://x.example").with_identity_token("secret");
        assert!(!format!("{options:?}").contains("secret"));
        assert!(!format!("{:?}", options.auth_mode()).contains("secret"));
    }

    #[test]
    fn https_urls_validate() {
        let url = validate_database_url("https://x.example/db").unwrap();
        assert_eq!(url.host_str(), Some("x.example"));
    }

    #[test]
    fn rejects_unusable_urls() {
        for candidate in ["", "   ", "http://x.example/db", "ftp://x.example", "not a url"] {
            assert!(
                matches!(
                    validate_database_url(candidate),
                    Err(Error::InvalidUrl { .. })
                ),
                "{candidate:?} should be rejected"
            );
        }
    }
}
