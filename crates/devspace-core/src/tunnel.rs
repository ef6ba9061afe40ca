//! Process environment for launching a tunnel session into a workspace.
//!
//! The tunnel binary reads its bearer token from the file named by
//! `BEARER_TOKEN_LOCATION`, not from the environment, so the token is cached
//! before the environment is returned.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::api::{RemoteClient, WorkspaceError};
use crate::auth::CredentialStore;
use crate::models::WorkspaceId;

pub const REGION_VAR: &str = "DEVSPACE_REGION";
pub const TUNNEL_CLI_VAR: &str = "DEVSPACE_TUNNEL_CLI";
pub const ENDPOINT_VAR: &str = "DEVSPACE_ENDPOINT";
pub const TOKEN_LOCATION_VAR: &str = "BEARER_TOKEN_LOCATION";
pub const LOG_LOCATION_VAR: &str = "LOG_FILE_LOCATION";
pub const ORGANIZATION_VAR: &str = "ORGANIZATION_NAME";
pub const PROJECT_VAR: &str = "PROJECT_NAME";
pub const WORKSPACE_ID_VAR: &str = "WORKSPACE_ID";
pub const AGENT_SOCKET_VAR: &str = "SSH_AUTH_SOCK";

/// Local credential-forwarding agent
#[async_trait]
pub trait AgentForwarder: Send + Sync {
    /// Start the agent, or connect to a running one, and return its socket path
    async fn start(&self) -> Result<String>;
}

pub struct TunnelEnvironmentBuilder {
    store: CredentialStore,
    endpoint: String,
    agent: Arc<dyn AgentForwarder>,
    ambient: Option<HashMap<String, String>>,
}

impl TunnelEnvironmentBuilder {
    pub fn new(store: CredentialStore, endpoint: impl Into<String>, agent: Arc<dyn AgentForwarder>) -> Self {
        Self {
            store,
            endpoint: endpoint.into(),
            agent,
            ambient: None,
        }
    }

    /// Use a fixed base environment instead of the current process environment
    pub fn with_ambient(mut self, ambient: HashMap<String, String>) -> Self {
        self.ambient = Some(ambient);
        self
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Build the environment for a tunnel process connecting to `workspace`.
    ///
    /// Fails with `WorkspaceError::EnvironmentUnavailable` before any file is
    /// written if the client is not connected.
    pub async fn build_env<C>(
        &self,
        client: &C,
        tunnel_cli: &Path,
        workspace: &WorkspaceId,
        use_agent_socket: bool,
    ) -> Result<HashMap<String, String>>
    where
        C: RemoteClient + ?Sized,
    {
        if !client.connected() {
            return Err(WorkspaceError::EnvironmentUnavailable.into());
        }
        let token = client.token().ok_or(WorkspaceError::EnvironmentUnavailable)?;

        let token_path = self.store.cache(token, &workspace.id).await?;
        let log_path = self.store.log_location(&workspace.id);

        let mut vars = HashMap::from([
            (REGION_VAR.to_string(), client.region_code().to_string()),
            (TUNNEL_CLI_VAR.to_string(), tunnel_cli.display().to_string()),
            (ENDPOINT_VAR.to_string(), self.endpoint.clone()),
            (TOKEN_LOCATION_VAR.to_string(), token_path.display().to_string()),
            (LOG_LOCATION_VAR.to_string(), log_path.display().to_string()),
            (ORGANIZATION_VAR.to_string(), workspace.organization_name.clone()),
            (PROJECT_VAR.to_string(), workspace.project_name.clone()),
            (WORKSPACE_ID_VAR.to_string(), workspace.id.clone()),
        ]);

        if use_agent_socket {
            let socket = self.agent.start().await?;
            debug!(socket = %socket, "Forwarding credential agent");
            vars.insert(AGENT_SOCKET_VAR.to_string(), socket);
        }

        let mut env = self.ambient_environment();
        env.extend(vars);

        info!(workspace = %workspace.id, "Prepared tunnel environment");
        Ok(env)
    }

    fn ambient_environment(&self) -> HashMap<String, String> {
        match self.ambient {
            Some(ref ambient) => ambient.clone(),
            None => std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
