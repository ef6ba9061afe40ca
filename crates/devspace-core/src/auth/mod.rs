//! Authentication module for selecting sessions and caching tunnel credentials.
//!
//! This module provides:
//! - `Identity`, `Session`: account descriptors and the credentials they yield
//! - `AccountRegistry`: the host-provided account registry seam
//! - `auto_connect`, `resolve_session`: ordered, short-circuiting session selection
//! - `CredentialStore`: per-workspace bearer token files read by the tunnel process

pub mod credentials;
pub mod resolver;
pub mod session;

pub use credentials::CredentialStore;
pub use resolver::{auto_connect, resolve_session};
pub use session::{AccessDetails, AccountDetails, AccountMetadata, AccountRegistry, Identity, IdentityMetadata, Session};
