//! # birdnet
//!
//! Session lifecycle and authenticated actions for the X/Twitter private
//! web API.
//!
//! `birdnet` turns a credential (a raw `auth_token` or an exported cookie
//! set) into a working session, keeps the rotating `ct0` security token
//! consistent across sequential requests, and runs every action through one
//! request → response → outcome pipeline.
//!
//! ## Features
//!
//! - **Bounded initialization**: bootstrap, identity lookup, jittered retries
//! - **Token rotation**: every response's cookies are merged before the
//!   next request is built
//! - **Outcome taxonomy**: rule-table classification into success, already
//!   done, locked, auth error, invalid token, not found, rate limited
//! - **Browser shape**: Chrome header order, client hints and BoringSSL TLS
//! - **Proxy Support**: HTTP `CONNECT` tunnels with Basic auth
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use birdnet::{Client, Credential};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), birdnet::NetError> {
//!     let mut client = Client::builder(Credential::raw("0123abcd..."))
//!         .connect()
//!         .await?;
//!     println!("logged in as {}", client.username());
//!
//!     let outcome = client.retweet("https://x.com/jack/status/20").await;
//!     println!("retweet: {}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Credentials and token bootstrap
//! - [`session`] - Session state, executor, classifier and initializer
//! - [`actions`] - Likes, retweets, tweets, follows, polls, media, lookups
//! - [`cookies`] - Per-session cookie jar and cookie export parsing
//! - [`http`] - Request description, header order and HTTP/1.1 transport
//! - [`socket`] - DNS, TCP, proxy tunnel and TLS setup
//! - [`emulation`] - Browser header profile
//! - [`base`] - Error definitions
//!
//! ## Logging
//!
//! Events are emitted through `tracing`; install a subscriber in the
//! embedding binary to see them. Secrets are never logged.

pub mod actions;
pub mod auth;
pub mod base;
pub mod client;
pub mod config;
pub mod cookies;
pub mod emulation;
pub mod http;
pub mod session;
pub mod socket;

pub use auth::credential::Credential;
pub use base::neterror::NetError;
pub use client::{Client, ClientBuilder};
pub use config::{ApiConstants, ClientConfig};
pub use session::{Outcome, OutcomeKind, Session};
