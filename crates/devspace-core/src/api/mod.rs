//! Remote API seam for the workspace service.
//!
//! The transport itself lives outside this crate. This module defines the
//! `RemoteClient` and `EnvironmentClient` contracts it must satisfy, the
//! `ClientFactory` that installs session credentials onto fresh clients, and
//! the `WorkspaceError` kinds surfaced by the core operations.

pub mod client;
pub mod error;

pub use client::{flatten_pages, ClientFactory, EnvironmentClient, EnvironmentStatus, Pages, RemoteClient};
pub use error::WorkspaceError;
