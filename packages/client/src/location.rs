//! Mapping document locations onto request URLs.
//!
//! Every URL ends in exactly one suffix: `.json` for anonymous access, or
//! `.json?auth=<credential>` / `.json?access_token=<credential>` for
//! authenticated access.

use std::fmt;

use url::form_urlencoded;

use crate::config::AuthMode;

pub const JSON_SUFFIX: &str = ".json";
pub const IDENTITY_TOKEN_PARAM: &str = "auth";
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// The authenticated-request suffix, resolved once per client.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthSuffix(Option<String>);

impl AuthSuffix {
    pub fn from_mode(mode: &AuthMode) -> Self {
        let (param, credential) = match mode {
            AuthMode::None => return Self(None),
            AuthMode::IdentityToken(credential) => (IDENTITY_TOKEN_PARAM, credential),
            AuthMode::AccessToken(credential) => (ACCESS_TOKEN_PARAM, credential),
        };
        let encoded: String = form_urlencoded::byte_serialize(credential.as_bytes()).collect();
        Self(Some(format!("{JSON_SUFFIX}?{param}={encoded}")))
    }

    pub fn is_available(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Debug for AuthSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("AuthSuffix(<redacted>)"),
            None => f.write_str("AuthSuffix(None)"),
        }
    }
}

/// Build the URL for `location` below `base`.
///
/// Base and location are joined by a single `/`. Without an available
/// authentication suffix an authenticated request falls back to the plain
/// suffix; callers refuse such requests before sending them.
pub fn resolve_url(base: &str, location: &str, authenticated: bool, suffix: &AuthSuffix) -> String {
    let tail = match (authenticated, suffix.as_str()) {
        (true, Some(auth)) => auth,
        _ => JSON_SUFFIX,
    };
    format!(
        "{}/{}{}",
        base.trim_end_matches('/'),
        location.trim_matches('/'),
        tail
    )
}

/// The URL with its query string masked, for logging.
pub fn redact(url: &str) -> String {
    match url.split_once('?') {
        Some((path, _)) => format!("{path}?<redacted>"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://x.example/db";

    fn identity(token: &str) -> AuthSuffix {
        AuthSuffix::from_mode(&AuthMode::IdentityToken(token.to_string()))
    }

    #[test]
    fn anonymous_url_uses_plain_suffix() {
        let url = resolve_url(BASE, "users/1", false, &identity("tok1"));
        assert_eq!(url, "https://x.example/db/users/1.json");
    }

    #[test]
    fn authenticated_url_uses_identity_suffix() {
        let url = resolve_url(BASE, "users/1", true, &identity("tok1"));
        assert_eq!(url, "https://x.example/db/users/1.json?auth=tok1");
    }

    #[test]
    fn authenticated_url_uses_access_token_suffix() {
        let suffix = AuthSuffix::from_mode(&AuthMode::AccessToken("tok2".to_string()));
        let url = resolve_url(BASE, "users/1", true, &suffix);
        assert_eq!(url, "https://x.example/db/users/1.json?access_token=tok2");
    }

    #[test]
    fn both_branches_are_distinct() {
        let suffix = identity("tok1");
        let authed = resolve_url(BASE, "a", true, &suffix);
        let plain = resolve_url(BASE, "a", false, &suffix);
        assert_ne!(authed, plain);
        assert!(authed.ends_with("?auth=tok1"));
        assert!(plain.ends_with(".json"));
        assert!(!plain.contains('?'));
    }

    #[test]
    fn slashes_are_normalized() {
        let suffix = AuthSuffix::default();
        assert_eq!(
            resolve_url("https://x.example/db/", "/users/1/", false, &suffix),
            "https://x.example/db/users/1.json"
        );
        assert_eq!(
            resolve_url("https://x.example", "", false, &suffix),
            "https://x.example/.json"
        );
    }

    #[test]
    fn missing_credential_falls_back_to_plain_suffix() {
        let url = resolve_url(BASE, "a", true, &AuthSuffix::default());
        assert_eq!(url, "https://x.example/db/a.json");
    }

    #[test]
    fn credential_is_percent_encoded() {
        let url = resolve_url(BASE, "a", true, &identity("a b&c"));
        assert_eq!(url, "https://x.example/db/a.json?auth=a+b%26c");
    }

    #[test]
    fn redaction_hides_query() {
        assert_eq!(
            redact("https://x.example/db/a.json?auth=tok1"),
            "https://x.example/db/a.json?<redacted>"
        );
        assert_eq!(redact("https://x.example/a.json"), "https://x.example/a.json");
        assert!(!format!("{:?}", identity("tok1")).contains("tok1"));
    }
}
