//! D2L Brightspace Valence API client.
//!
//! This crate signs requests with the Valence ID/key scheme, sends them
//! through a pluggable transport, walks bookmark-paginated endpoints and
//! talks to the legacy GUID (single sign-on) service.
//!
//! ## Overview
//!
//! Every request carries five query parameters:
//!
//! | name  | value                                    |
//! |-------|------------------------------------------|
//! | `x_a` | application id                           |
//! | `x_b` | user id                                  |
//! | `x_c` | signature computed with the app key      |
//! | `x_d` | signature computed with the user key     |
//! | `x_t` | unix timestamp in seconds                |
//!
//! Both signatures are URL-safe base64 HMAC-SHA256 digests of
//! `METHOD&path&timestamp`. The timestamp comes from the [`Context`]'s
//! clock, so tests can freeze it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use valence_brightspace::{Client, Config};
//! use valence_core::{Context, OsEnv, Result};
//! use valence_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Reads VALENCE_HOST, VALENCE_APP_ID, VALENCE_APP_KEY, ...
//!     let config = Config::default().from_env(&ctx);
//!     let client = Client::new(ctx, config)?;
//!
//!     let me = client.whoami().await?;
//!     println!("hello {} {}", me.first_name, me.last_name);
//!
//!     for course in client.get_my_enrollments().await? {
//!         println!("{}", course.org_unit.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Signing only
//!
//! ```
//! use http::Method;
//! use valence_brightspace::{Credential, RequestSigner};
//! use valence_core::time::FixedClock;
//! use valence_core::Context;
//!
//! let ctx = Context::new().with_clock(FixedClock::from_timestamp(1621814400).unwrap());
//! let signer = RequestSigner::new(Credential::new("https://lms.example.edu", "foo", "bar", "baz", "qux"));
//!
//! let url = signer
//!     .authenticated_uri(&ctx, "/d2l/api/lp/1.30/users/?orgDefinedId=S1", &Method::GET)
//!     .unwrap();
//! assert!(url.ends_with("&x_t=1621814400&orgDefinedId=S1"));
//! ```
//!
//! ## Pagination
//!
//! List endpoints are walked sequentially with [`Client::fetch_all_pages`]
//! (next-url pages) or [`Client::fetch_all_paged`] (paging-info pages). The
//! `*_best_effort` variants stop silently at the first failure and return
//! what they have; they cannot tell "no more data" from "request failed".
//!
//! ## Errors
//!
//! Every failure is a [`valence_core::Error`]. A rejected GUID is not a
//! failure: [`Client::validate_guid`] returns `Ok(false)`.

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{RequestSigner, SignedParameters};

mod client;
pub use client::{ApiRequest, Client, RequestBody};

pub mod pagination;
pub use pagination::{ObjectListPage, Page, PagedResultSet, PagingInfo};

mod guid;
pub use guid::{Guid, GuidStatus, XmlElement};

pub mod api;

pub use valence_core::Context;
