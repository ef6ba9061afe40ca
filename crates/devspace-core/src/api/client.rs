//! Remote client contracts and the credentialed client factory.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, Stream, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{resolve_session, AccessDetails, AccountMetadata, AccountRegistry};
use crate::models::{Repository, WorkspaceId, WorkspaceSummary};

/// A paginated listing: each item is one page of results
pub type Pages<'a, T> = BoxStream<'a, Result<Vec<T>>>;

/// Client for the remote workspace API.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Whether the client holds credentials the service accepts
    fn connected(&self) -> bool;

    fn region_code(&self) -> &str;

    /// Current bearer token, if credentialed
    fn token(&self) -> Option<&str>;

    fn set_credentials(&mut self, access: AccessDetails, metadata: AccountMetadata);

    fn list_workspaces(&self) -> Pages<'_, WorkspaceSummary>;

    fn list_repositories(&self) -> Pages<'_, Repository>;

    async fn get_workspace(&self, id: &WorkspaceId) -> Result<WorkspaceSummary>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentStatus {
    pub location: Option<String>,
}

/// Client for the agent running inside a managed workspace
#[async_trait]
pub trait EnvironmentClient: Send + Sync {
    /// Resource identifier of the workspace this process runs in
    fn arn(&self) -> Option<&str>;

    fn is_managed_workspace(&self) -> bool;

    async fn status(&self) -> Result<EnvironmentStatus>;
}

/// Flatten a paginated listing into a stream of items, preserving order
pub fn flatten_pages<'a, T>(pages: Pages<'a, T>) -> impl Stream<Item = Result<T>> + 'a
where
    T: Send + 'a,
{
    pages
        .map_ok(|page| stream::iter(page.into_iter().map(Ok::<T, anyhow::Error>)))
        .try_flatten()
}

/// Produces fresh remote clients carrying the best available session.
///
/// Each `create` builds a new raw client. When neither the active session nor
/// auto-connect yields credentials the client is returned uncredentialed, so
/// callers must check `connected()` before use.
pub struct ClientFactory<R: ?Sized, F> {
    registry: Arc<R>,
    constructor: F,
}

impl<R, F> ClientFactory<R, F>
where
    R: AccountRegistry + ?Sized,
{
    pub fn new(registry: Arc<R>, constructor: F) -> Self {
        Self { registry, constructor }
    }

    pub async fn create<C, Fut>(&self) -> Result<C>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<C>>,
        C: RemoteClient,
    {
        let mut client = (self.constructor)().await?;

        match resolve_session(self.registry.as_ref()).await {
            Some(session) => {
                client.set_credentials(session.access_details, session.account_details.metadata);
            }
            None => {
                debug!("No session available, returning uncredentialed client");
            }
        }

        Ok(client)
    }
}

// ============================================================================
// Tests
// ============================================================================
