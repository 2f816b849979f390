//! Core components for talking to the D2L Brightspace Valence API.
//!
//! This crate provides the foundational types shared by the Valence crates:
//!
//! - [`Error`]: the single error type surfaced by every failed call, carrying
//!   a message, an optional HTTP status and the underlying cause.
//! - [`Context`]: a container for the pluggable capabilities a client needs,
//!   namely HTTP sending ([`HttpSend`]), environment access ([`Env`]) and the
//!   current time ([`time::Clock`]).
//! - [`hash`]: the HMAC-SHA256 signature engine used by the Valence ID/key
//!   authentication scheme.
//!
//! ## Example
//!
//! ```
//! use valence_core::hash::base64_url_hmac_sha256;
//!
//! let sig = base64_url_hmac_sha256(b"app-key", b"GET&/d2l/api/lp/1.30/users/&1621814400");
//! assert!(!sig.contains('='));
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Signature helpers
//! - [`time`]: Time types and the injectable clock
//! - [`utils`]: General utilities including secret redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};
