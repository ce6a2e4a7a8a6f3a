use anyhow::{Context, Result};
use clap::Subcommand;
use space_cli_api::NewProject;

use super::{CommandContext, PageArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommands {
    /// List projects.
    List(PageArgs),
    /// Create a project.
    Create {
        /// Project key, e.g. ABC.
        key: String,
        /// Display name.
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a project.
    Delete {
        /// Project identifier (`id:...` or `key:...`).
        project: String,
    },
    /// Grant project administration to a user.
    AddAdmin {
        project: String,
        /// Username of the new administrator.
        username: String,
    },
    /// Give a team member access to a project.
    AddTeam { project: String, team_id: String },
}

pub async fn execute(command: ProjectCommands, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        ProjectCommands::List(page) => {
            let projects = ctx
                .client
                .list_projects(page.page())
                .await
                .context("Failed to list projects")?;
            ctx.renderer.render_list(&projects, "No projects found.")
        }
        ProjectCommands::Create {
            key,
            name,
            description,
        } => {
            let mut project = NewProject::new(key.as_str(), name);
            project.description = description;
            let created = ctx
                .client
                .create_project(&project)
                .await
                .with_context(|| format!("Failed to create project {key}"))?;
            tracing::info!(key = %key, "Project created");
            ctx.renderer.render(&created)
        }
        ProjectCommands::Delete { project } => {
            let response = ctx
                .client
                .delete_project(&project)
                .await
                .with_context(|| format!("Failed to delete project {project}"))?;
            ctx.renderer.render(&response)
        }
        ProjectCommands::AddAdmin { project, username } => ctx
            .client
            .add_project_admin(&project, &username)
            .await
            .with_context(|| format!("Failed to add {username} as administrator of {project}")),
        ProjectCommands::AddTeam { project, team_id } => ctx
            .client
            .add_project_team(&project, &team_id)
            .await
            .with_context(|| format!("Failed to add team {team_id} to {project}")),
    }
}
