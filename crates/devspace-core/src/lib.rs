//! Core library for opening tunnel sessions into remote development workspaces.
//!
//! This crate provides:
//! - `auth`: session auto-selection across known identities and the on-disk
//!   bearer token cache consumed by the tunnel process
//! - `api`: the remote client seam, the credentialed client factory and error types
//! - `tunnel`: process environment synthesis for launching a tunnel
//! - `identity`: workspace identity resolution from a resource identifier
//! - `join`: streaming join of repositories with the workspaces bound to them
//! - `models`: workspace and repository records
//! - `config`: persisted configuration and storage locations

pub mod api;
pub mod auth;
pub mod config;
pub mod identity;
pub mod join;
pub mod models;
pub mod tunnel;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ClientFactory, EnvironmentClient, RemoteClient, WorkspaceError};
pub use auth::{AccountRegistry, CredentialStore, Identity, Session};
pub use config::Config;
pub use identity::{ConnectedWorkspace, WorkspaceContext, WorkspaceIdentityResolver};
pub use join::{join_repositories, WorkspaceLookup};
pub use models::{RepoRecord, Repository, WorkspaceId, WorkspaceSummary};
pub use tunnel::{AgentForwarder, TunnelEnvironmentBuilder};
