use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityMetadata {
    #[serde(default)]
    pub can_auto_connect: bool,
}

/// A locally known account. Owned by the account registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub label: String,
    #[serde(default)]
    pub metadata: IdentityMetadata,
}

impl Identity {
    pub fn new(label: impl Into<String>, can_auto_connect: bool) -> Self {
        Self {
            label: label.into(),
            metadata: IdentityMetadata { can_auto_connect },
        }
    }

    pub fn can_auto_connect(&self) -> bool {
        self.metadata.can_auto_connect
    }
}

/// Credential material installed onto a remote client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDetails {
    pub access_token: String,
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetadata {
    pub user_id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub metadata: AccountMetadata,
}

/// Result of authenticating an identity. Valid until the remote service rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_details: AccessDetails,
    pub account_details: AccountDetails,
}

/// Account registry provided by the host.
#[async_trait]
pub trait AccountRegistry: Send + Sync {
    async fn list_accounts(&self) -> Vec<Identity>;

    /// Authenticate `identity`. Failure of one identity is expected and recoverable.
    async fn create_session(&self, identity: &Identity) -> Result<Session>;

    async fn active_session(&self) -> Option<Session>;
}
