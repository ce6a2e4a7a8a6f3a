use anyhow::{Context, Result};
use clap::Subcommand;

use super::CommandContext;

#[derive(Subcommand, Debug, Clone)]
pub enum RepoCommands {
    /// Find repositories by project key.
    Find { project_key: String },
    /// Delete a repository.
    Delete { project: String, repository: String },
    /// Tell Space a mirrored repository changed.
    NotifyChange {
        project_key: String,
        repository: String,
    },
}

pub async fn execute(command: RepoCommands, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        RepoCommands::Find { project_key } => {
            let repos = ctx
                .client
                .find_repositories(&project_key)
                .await
                .with_context(|| format!("Failed to find repositories for {project_key}"))?;
            ctx.renderer.render_list(&repos, "No repositories found.")
        }
        RepoCommands::Delete {
            project,
            repository,
        } => {
            let response = ctx
                .client
                .delete_repository(&project, &repository)
                .await
                .with_context(|| format!("Failed to delete repository {project}/{repository}"))?;
            ctx.renderer.render(&response)
        }
        RepoCommands::NotifyChange {
            project_key,
            repository,
        } => ctx
            .client
            .notify_repository_change(&project_key, &repository)
            .await
            .with_context(|| format!("Failed to notify Space about {project_key}/{repository}")),
    }
}
