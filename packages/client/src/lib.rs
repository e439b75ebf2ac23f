//! # docstore-client
//!
//! Client for hierarchical, path-addressed JSON document stores served over
//! HTTPS.
//!
//! Documents live at slash-delimited locations below a database URL. Each
//! operation maps onto one HTTP exchange:
//!
//! | Operation | Method | Body |
//! |-----------|--------|------|
//! | read      | GET    | none |
//! | write     | PUT    | JSON |
//! | update    | PATCH  | JSON |
//! | push      | POST   | JSON |
//! | delete    | DELETE | none |
//!
//! Anonymous requests address `<database>/<location>.json`. Authenticated
//! requests carry the credential in the query string, as `?auth=` for identity
//! tokens or `?access_token=` for access tokens.
//!
//! ## Example
//!
//! ```ignore
//! use docstore_client::{DocumentStore, Headers, Options};
//!
//! let store = DocumentStore::new(
//!     Options::new("https://x.example/db").with_identity_token("tok1"),
//! )?;
//!
//! // PUT https://x.example/db/users/1.json?auth=tok1
//! let saved: bool = store.write("users/1", r#"{"name":"a"}"#, true, &Headers::new()).await;
//!
//! // GET https://x.example/db/users/1.json
//! let body: String = store.read("users/1", false, &Headers::new()).await;
//! ```
//!
//! ## Optimistic concurrency
//!
//! [`etag::request_etag`] and [`etag::require_etag_match`] build the headers
//! for a read-modify-write cycle; a write whose tag is stale fails with
//! [`Error::Conflict`].

pub mod client;
pub mod config;
pub mod error;
pub mod etag;
pub mod executor;
pub mod location;
pub mod types;

pub use client::DocumentStore;
pub use config::{AuthMode, Options};
pub use error::{Error, Result};
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use types::{Document, Headers, HttpRequest, HttpResponse, Method};
