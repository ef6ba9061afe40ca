//! devspace - command-line helpers for preparing tunnel sessions into
//! remote development workspaces.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use devspace_core::identity::parse_workspace_arn;
use devspace_core::{Config, WorkspaceContext, WorkspaceId};

#[derive(Parser)]
#[command(name = "devspace", version, about = "Prepare tunnel sessions into remote workspaces")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the token, log and host alias used for a workspace
    Paths {
        workspace_id: String,
    },
    /// Extract the workspace id from a resource identifier
    ParseArn {
        arn: String,
    },
    /// Cache a bearer token read from stdin for a workspace
    CacheToken {
        workspace_id: String,
    },
    /// Remove the cached bearer token for a workspace
    ClearToken {
        workspace_id: String,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Command::Paths { workspace_id } => {
            let store = config.credential_store()?;
            let context = WorkspaceContext::from_env();
            let id = WorkspaceId::new(
                workspace_id,
                context.organization_name.unwrap_or_default(),
                context.project_name.unwrap_or_default(),
            );
            if !id.organization_name.is_empty() {
                println!("org:   {}/{}", id.organization_name, id.project_name);
            }
            println!("token: {}", store.location(&id.id).display());
            println!("log:   {}", store.log_location(&id.id).display());
            println!("host:  {}", id.host_name(config.host_name_prefix()));
            if store.read(&id.id).await?.is_none() {
                println!("(no token cached)");
            }
        }
        Command::ParseArn { arn } => {
            println!("{}", parse_workspace_arn(&arn)?);
        }
        Command::CacheToken { workspace_id } => {
            let mut token = String::new();
            io::stdin()
                .read_to_string(&mut token)
                .context("Failed to read token from stdin")?;
            let token = token.trim();
            if token.is_empty() {
                anyhow::bail!("No token provided on stdin");
            }
            let path = config.credential_store()?.cache(token, &workspace_id).await?;
            info!(workspace = %workspace_id, "Token cached");
            println!("{}", path.display());
        }
        Command::ClearToken { workspace_id } => {
            config.credential_store()?.clear(&workspace_id).await?;
            info!(workspace = %workspace_id, "Token cleared");
        }
    }

    Ok(())
}
