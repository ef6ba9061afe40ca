//! Data models for remote workspaces and source repositories.
//!
//! - `WorkspaceId`: the org/project/id triple identifying a workspace
//! - `WorkspaceSummary`: a workspace as returned by the remote API
//! - `Repository`, `RepoRecord`: source repositories, optionally joined with a workspace

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceId {
    pub id: String,
    pub organization_name: String,
    pub project_name: String,
}

impl WorkspaceId {
    pub fn new(
        id: impl Into<String>,
        organization_name: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            organization_name: organization_name.into(),
            project_name: project_name.into(),
        }
    }

    /// Host alias the tunnel's ssh config uses for this workspace
    pub fn host_name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
}

/// A repository bound to a workspace at creation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundRepository {
    pub repository_name: String,
    pub branch_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSummary {
    pub id: String,
    pub org: Organization,
    pub project: Project,
    #[serde(default)]
    pub repositories: Vec<BoundRepository>,
    pub alias: Option<String>,
    pub status: Option<String>,
}

impl WorkspaceSummary {
    pub fn workspace_id(&self) -> WorkspaceId {
        WorkspaceId::new(&self.id, &self.org.name, &self.project.name)
    }

    /// Join key of the first bound repository, if any
    pub fn repository_key(&self) -> Option<String> {
        self.repositories
            .first()
            .map(|repo| join_key(&self.org.name, &self.project.name, &repo.repository_name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub project: Project,
    pub org: Organization,
}

impl Repository {
    pub fn new(name: impl Into<String>, org: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project: Project { name: project.into() },
            org: Organization { name: org.into() },
        }
    }

    pub fn key(&self) -> String {
        join_key(&self.org.name, &self.project.name, &self.name)
    }
}

/// A repository annotated with the workspace that references it, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    #[serde(flatten)]
    pub repository: Repository,
    pub workspace: Option<WorkspaceSummary>,
}

fn join_key(org: &str, project: &str, repo: &str) -> String {
    format!("{}.{}.{}", org, project, repo)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_key() {
        let repo = Repository::new("r1", "o", "p");
        assert_eq!(repo.key(), "o.p.r1");
    }

    #[test]
    fn test_workspace_repository_key_uses_first_binding() {
        let workspace = WorkspaceSummary {
            id: "ws-1".to_string(),
            org: Organization { name: "o".to_string() },
            project: Project { name: "p".to_string() },
            repositories: vec![
                BoundRepository { repository_name: "first".to_string(), branch_name: None },
                BoundRepository { repository_name: "second".to_string(), branch_name: None },
            ],
            alias: None,
            status: None,
        };
        assert_eq!(workspace.repository_key().as_deref(), Some("o.p.first"));
        assert_eq!(workspace.workspace_id(), WorkspaceId::new("ws-1", "o", "p"));
    }

    #[test]
    fn test_workspace_without_repositories_has_no_key() {
        let json = r#"{"id":"ws-2","org":{"name":"o"},"project":{"name":"p"}}"#;
        let workspace: WorkspaceSummary = serde_json::from_str(json).unwrap();
        assert!(workspace.repository_key().is_none());
    }

    #[test]
    fn test_host_name() {
        let id = WorkspaceId::new("abc-123", "o", "p");
        assert_eq!(id.host_name("devspace-"), "devspace-abc-123");
    }
}
