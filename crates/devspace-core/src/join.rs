//! Annotate repository listings with the workspaces that reference them.
//!
//! The workspace side is drained fully into a lookup table before the first
//! repository is produced; the repository side stays lazy.

use std::collections::HashMap;

use anyhow::Result;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use tracing::debug;

use crate::api::{flatten_pages, RemoteClient};
use crate::models::{RepoRecord, Repository, WorkspaceSummary};

/// Workspaces keyed by `org.project.repository` of their first bound repository
#[derive(Debug, Default)]
pub struct WorkspaceLookup {
    by_repository: HashMap<String, WorkspaceSummary>,
}

impl WorkspaceLookup {
    /// Drain every page of the client's workspace listing.
    ///
    /// Workspaces without a bound repository are skipped. When two workspaces
    /// share a key the one listed later wins.
    pub async fn drain<C>(client: &C) -> Result<Self>
    where
        C: RemoteClient + ?Sized,
    {
        let workspaces: Vec<WorkspaceSummary> = flatten_pages(client.list_workspaces()).try_collect().await?;
        let lookup = Self::from_workspaces(workspaces);
        debug!(count = lookup.len(), "Built workspace lookup");
        Ok(lookup)
    }

    pub fn from_workspaces(workspaces: impl IntoIterator<Item = WorkspaceSummary>) -> Self {
        let mut by_repository = HashMap::new();
        for workspace in workspaces {
            if let Some(key) = workspace.repository_key() {
                by_repository.insert(key, workspace);
            }
        }
        Self { by_repository }
    }

    pub fn get(&self, repository: &Repository) -> Option<&WorkspaceSummary> {
        self.by_repository.get(&repository.key())
    }

    pub fn annotate(&self, repository: Repository) -> RepoRecord {
        let workspace = self.get(&repository).cloned();
        RepoRecord { repository, workspace }
    }

    pub fn len(&self) -> usize {
        self.by_repository.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_repository.is_empty()
    }
}

/// Left-join `repositories` with the client's workspaces.
///
/// The stream is single pass. Nothing is fetched until it is first polled;
/// calling this again runs a fresh workspace drain.
pub fn join_repositories<'a, C, S>(client: &'a C, repositories: S) -> impl Stream<Item = Result<RepoRecord>> + 'a
where
    C: RemoteClient + ?Sized,
    S: Stream<Item = Result<Repository>> + 'a,
{
    stream::once(async move {
        let lookup = WorkspaceLookup::drain(client).await?;
        Ok::<_, anyhow::Error>(repositories.map(move |item| item.map(|repo| lookup.annotate(repo))))
    })
    .try_flatten()
}

// ============================================================================
// Tests
// ============================================================================
