//! Resolve the workspace this process is running in.
//!
//! Inside a managed workspace the environment client exposes a resource
//! identifier such as `arn:devspace:us-west-2:123:org/acme/development-workspace/abc-123`.
//! The workspace id is taken from its final colon-delimited segment, and the
//! organization and project come from the execution context.

use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;
use tracing::debug;

use crate::api::{EnvironmentClient, RemoteClient, WorkspaceError};
use crate::models::{WorkspaceId, WorkspaceSummary};

/// Environment variable carrying the ambient organization name
pub const ORGANIZATION_ENV: &str = "DEVSPACE_ORGANIZATION_NAME";

/// Environment variable carrying the ambient project name
pub const PROJECT_ENV: &str = "DEVSPACE_PROJECT_NAME";

fn workspace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"development-workspace/([\w-]+)").expect("workspace pattern is valid")
    })
}

/// Extract the workspace id from a resource identifier
pub fn parse_workspace_arn(arn: &str) -> Result<String> {
    let segment = match arn.rsplit(':').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => return Err(WorkspaceError::invalid_arn(arn, "missing resource segment").into()),
    };

    workspace_pattern()
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| WorkspaceError::invalid_arn(arn, "no development-workspace id").into())
}

/// Organization and project the current process runs under
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceContext {
    pub organization_name: Option<String>,
    pub project_name: Option<String>,
}

impl WorkspaceContext {
    pub fn new(organization_name: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            organization_name: Some(organization_name.into()),
            project_name: Some(project_name.into()),
        }
    }

    pub fn from_env() -> Self {
        Self {
            organization_name: non_empty_var(ORGANIZATION_ENV),
            project_name: non_empty_var(PROJECT_ENV),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// A resolved workspace paired with the environment client that identified it
#[derive(Debug)]
pub struct ConnectedWorkspace<'e, E: ?Sized> {
    pub summary: WorkspaceSummary,
    pub environment: &'e E,
}

impl<E> ConnectedWorkspace<'_, E>
where
    E: EnvironmentClient + ?Sized,
{
    pub fn workspace_id(&self) -> WorkspaceId {
        self.summary.workspace_id()
    }

    /// Location reported by the workspace's own agent
    pub async fn location(&self) -> Result<Option<String>> {
        Ok(self.environment.status().await?.location)
    }
}

pub struct WorkspaceIdentityResolver {
    context: WorkspaceContext,
}

impl WorkspaceIdentityResolver {
    pub fn new(context: WorkspaceContext) -> Self {
        Self { context }
    }

    /// Fetch the summary of the workspace `environment` runs in.
    ///
    /// Returns `Ok(None)` outside a managed workspace. A malformed identifier
    /// or missing org/project context is an error.
    pub async fn resolve<'e, C, E>(
        &self,
        client: &C,
        environment: &'e E,
    ) -> Result<Option<ConnectedWorkspace<'e, E>>>
    where
        C: RemoteClient + ?Sized,
        E: EnvironmentClient + ?Sized,
    {
        if !environment.is_managed_workspace() {
            debug!("Not running inside a managed workspace");
            return Ok(None);
        }
        let Some(arn) = environment.arn() else {
            debug!("Environment client has no resource identifier");
            return Ok(None);
        };

        let id = parse_workspace_arn(arn)?;
        let organization_name = self
            .context
            .organization_name
            .clone()
            .ok_or_else(|| WorkspaceError::MissingContext(ORGANIZATION_ENV.to_string()))?;
        let project_name = self
            .context
            .project_name
            .clone()
            .ok_or_else(|| WorkspaceError::MissingContext(PROJECT_ENV.to_string()))?;

        let workspace_id = WorkspaceId {
            id,
            organization_name,
            project_name,
        };
        debug!(workspace = %workspace_id.id, "Resolving workspace");
        let summary = client.get_workspace(&workspace_id).await?;

        Ok(Some(ConnectedWorkspace { summary, environment }))
    }
}

// ============================================================================
// Tests
// ============================================================================
