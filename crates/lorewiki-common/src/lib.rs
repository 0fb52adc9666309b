//! lorewiki-common: the pieces of the wiki admin stack shared between the
//! editor and its hosts.
//!
//! - `api` - wire types for the remote wiki API
//! - `client` - `WikiClient`, the reqwest-backed API client
//! - `upload` - local image files and the `ImageHost` seam
//! - `session` - `SessionProvider`, the injected bearer token source
//! - `config` - on-disk configuration (`.toml` / `.json`)

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
#[cfg(feature = "telemetry")]
pub mod telemetry;
pub mod upload;

pub use crate::client::WikiClient;
pub use crate::config::Config;
pub use crate::error::{ApiError, ConfigError, LorewikiError, UploadError};
pub use crate::session::{SessionProvider, SessionToken, StaticSession};
pub use crate::upload::{ImageFile, ImageHost, UploadedImage};
