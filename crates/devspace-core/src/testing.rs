//! In-memory collaborators for unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use crate::api::{EnvironmentClient, EnvironmentStatus, Pages, RemoteClient};
use crate::auth::{AccessDetails, AccountDetails, AccountMetadata, AccountRegistry, Identity, Session};
use crate::models::{BoundRepository, Organization, Project, Repository, WorkspaceId, WorkspaceSummary};
use crate::tunnel::AgentForwarder;

pub fn session_for(label: &str) -> Session {
    Session {
        access_details: AccessDetails {
            access_token: format!("token-{}", label),
            secret: None,
        },
        account_details: AccountDetails {
            metadata: AccountMetadata {
                user_id: Some(label.to_string()),
                display_name: None,
            },
        },
    }
}

pub fn summary(id: &str, org: &str, project: &str, repositories: &[&str]) -> WorkspaceSummary {
    WorkspaceSummary {
        id: id.to_string(),
        org: Organization { name: org.to_string() },
        project: Project { name: project.to_string() },
        repositories: repositories
            .iter()
            .map(|name| BoundRepository {
                repository_name: name.to_string(),
                branch_name: None,
            })
            .collect(),
        alias: None,
        status: Some("RUNNING".to_string()),
    }
}

// ===== Account registry =====

#[derive(Debug)]
pub struct FakeRegistry {
    accounts: Vec<Identity>,
    succeeding: HashSet<String>,
    active: Option<Session>,
    attempts: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn new(accounts: Vec<Identity>) -> Self {
        Self {
            accounts,
            succeeding: HashSet::new(),
            active: None,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(mut self, labels: &[&str]) -> Self {
        self.succeeding = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_active(mut self, session: Session) -> Self {
        self.active = Some(session);
        self
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountRegistry for FakeRegistry {
    async fn list_accounts(&self) -> Vec<Identity> {
        self.accounts.clone()
    }

    async fn create_session(&self, identity: &Identity) -> Result<Session> {
        self.attempts.lock().unwrap().push(identity.label.clone());
        if self.succeeding.contains(&identity.label) {
            Ok(session_for(&identity.label))
        } else {
            Err(anyhow!("authentication rejected for {}", identity.label))
        }
    }

    async fn active_session(&self) -> Option<Session> {
        self.active.clone()
    }
}

// ===== Remote client =====

#[derive(Debug)]
pub struct FakeClient {
    region: String,
    token: Option<String>,
    workspaces: Vec<Vec<WorkspaceSummary>>,
    repositories: Vec<Vec<Repository>>,
    fail_workspace_listing: bool,
    connected_override: Option<bool>,
    credential_installs: usize,
    workspace_listings: AtomicUsize,
    lookups: AtomicUsize,
}

impl Default for FakeClient {
    fn default() -> Self {
        Self {
            region: "us-west-2".to_string(),
            token: None,
            workspaces: Vec::new(),
            repositories: Vec::new(),
            fail_workspace_listing: false,
            connected_override: None,
            credential_installs: 0,
            workspace_listings: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
        }
    }
}

impl FakeClient {
    pub fn connected_with(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            ..Self::default()
        }
    }

    pub fn with_workspaces(mut self, pages: Vec<Vec<WorkspaceSummary>>) -> Self {
        self.workspaces = pages;
        self
    }

    pub fn with_repositories(mut self, pages: Vec<Vec<Repository>>) -> Self {
        self.repositories = pages;
        self
    }

    pub fn failing_workspace_listing(mut self) -> Self {
        self.fail_workspace_listing = true;
        self
    }

    /// Report `connected` independently of whether a token is held
    pub fn with_connected_override(mut self, connected: bool) -> Self {
        self.connected_override = Some(connected);
        self
    }

    pub fn credential_installs(&self) -> usize {
        self.credential_installs
    }

    pub fn workspace_listings(&self) -> usize {
        self.workspace_listings.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteClient for FakeClient {
    fn connected(&self) -> bool {
        self.connected_override.unwrap_or(self.token.is_some())
    }

    fn region_code(&self) -> &str {
        &self.region
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_credentials(&mut self, access: AccessDetails, _metadata: AccountMetadata) {
        self.token = Some(access.access_token);
        self.credential_installs += 1;
    }

    fn list_workspaces(&self) -> Pages<'_, WorkspaceSummary> {
        self.workspace_listings.fetch_add(1, Ordering::SeqCst);
        if self.fail_workspace_listing {
            return stream::iter(vec![Err(anyhow!("listing failed"))]).boxed();
        }
        stream::iter(self.workspaces.clone().into_iter().map(Ok)).boxed()
    }

    fn list_repositories(&self) -> Pages<'_, Repository> {
        stream::iter(self.repositories.clone().into_iter().map(Ok)).boxed()
    }

    async fn get_workspace(&self, id: &WorkspaceId) -> Result<WorkspaceSummary> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.workspaces
            .iter()
            .flatten()
            .find(|w| w.workspace_id() == *id)
            .cloned()
            .ok_or_else(|| anyhow!("workspace {} not found", id.id))
    }
}

// ===== Environment client =====

#[derive(Debug)]
pub struct FakeEnvironment {
    arn: Option<String>,
    managed: bool,
    location: Option<String>,
}

impl FakeEnvironment {
    pub fn managed(arn: Option<&str>) -> Self {
        Self {
            arn: arn.map(str::to_string),
            managed: true,
            location: None,
        }
    }

    pub fn unmanaged(arn: Option<&str>) -> Self {
        Self {
            managed: false,
            ..Self::managed(arn)
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }
}

#[async_trait]
impl EnvironmentClient for FakeEnvironment {
    fn arn(&self) -> Option<&str> {
        self.arn.as_deref()
    }

    fn is_managed_workspace(&self) -> bool {
        self.managed
    }

    async fn status(&self) -> Result<EnvironmentStatus> {
        Ok(EnvironmentStatus {
            location: self.location.clone(),
        })
    }
}

// ===== Agent =====

#[derive(Debug)]
pub struct FakeAgent {
    socket: Option<String>,
    starts: AtomicUsize,
}

impl FakeAgent {
    pub fn new(socket: &str) -> Self {
        Self {
            socket: Some(socket.to_string()),
            starts: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            socket: None,
            starts: AtomicUsize::new(0),
        }
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentForwarder for FakeAgent {
    async fn start(&self) -> Result<String> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.socket.clone().ok_or_else(|| anyhow!("agent failed to start"))
    }
}
