use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Workspace environment unavailable - client is not connected")]
    EnvironmentUnavailable,

    #[error("Invalid resource identifier: {0}")]
    InvalidArn(String),

    #[error("Missing workspace context: {0}")]
    MissingContext(String),
}

/// Maximum length of an identifier echoed back in error messages
const MAX_ARN_DISPLAY_LENGTH: usize = 200;

impl WorkspaceError {
    pub fn invalid_arn(arn: &str, reason: &str) -> Self {
        let shown = match arn.char_indices().nth(MAX_ARN_DISPLAY_LENGTH) {
            Some((idx, _)) => format!("{}...", &arn[..idx]),
            None => arn.to_string(),
        };
        WorkspaceError::InvalidArn(format!("{} ({})", shown, reason))
    }
}
