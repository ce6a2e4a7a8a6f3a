use anyhow::{Context, Result};
use clap::Subcommand;
use space_cli_api::{NewInvitation, NewProfile};

use super::{CommandContext, PageArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum UserCommands {
    /// List member profiles.
    List(PageArgs),
    /// Show a profile (`me`, `id:...` or `username:...`).
    Get { profile: String },
    /// Delete a profile.
    Delete { profile: String },
    /// Create a profile; Space mails an activation link.
    Create {
        username: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Email address (repeatable).
        #[arg(long = "email")]
        emails: Vec<String>,
        /// Create an external (guest) profile.
        #[arg(long)]
        guest: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TeamCommands {
    /// List teams.
    List(PageArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum MembershipCommands {
    /// List team memberships.
    List(PageArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum RoleCommands {
    /// List roles.
    List,
}

#[derive(Subcommand, Debug, Clone)]
pub enum InvitationCommands {
    /// Invite someone to the organization.
    Create {
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
}

pub async fn execute_user(command: UserCommands, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        UserCommands::List(page) => {
            let users = ctx
                .client
                .list_users(page.page())
                .await
                .context("Failed to list profiles")?;
            ctx.renderer.render_list(&users, "No profiles found.")
        }
        UserCommands::Get { profile } => {
            let user = ctx
                .client
                .get_user(&profile)
                .await
                .with_context(|| format!("Failed to fetch profile {profile}"))?;
            ctx.renderer.render(&user)
        }
        UserCommands::Delete { profile } => {
            let response = ctx
                .client
                .delete_user(&profile)
                .await
                .with_context(|| format!("Failed to delete profile {profile}"))?;
            ctx.renderer.render(&response)
        }
        UserCommands::Create {
            username,
            first_name,
            last_name,
            emails,
            guest,
        } => {
            let mut profile = NewProfile::new(username.as_str(), first_name, last_name);
            profile.emails = emails;
            profile.guest = guest.then_some(true);
            let created = ctx
                .client
                .create_profile(&profile)
                .await
                .with_context(|| format!("Failed to create profile {username}"))?;
            ctx.renderer.render(&created)
        }
    }
}

pub async fn execute_team(command: TeamCommands, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        TeamCommands::List(page) => {
            let teams = ctx
                .client
                .list_teams(page.page())
                .await
                .context("Failed to list teams")?;
            ctx.renderer.render_list(&teams, "No teams found.")
        }
    }
}

pub async fn execute_membership(
    command: MembershipCommands,
    ctx: &CommandContext<'_>,
) -> Result<()> {
    match command {
        MembershipCommands::List(page) => {
            let memberships = ctx
                .client
                .list_memberships(page.page())
                .await
                .context("Failed to list memberships")?;
            ctx.renderer.render_list(&memberships, "No memberships found.")
        }
    }
}

pub async fn execute_role(command: RoleCommands, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        RoleCommands::List => {
            let roles = ctx
                .client
                .list_roles()
                .await
                .context("Failed to list roles")?;
            ctx.renderer.render(&roles)
        }
    }
}

pub async fn execute_invitation(
    command: InvitationCommands,
    ctx: &CommandContext<'_>,
) -> Result<()> {
    match command {
        InvitationCommands::Create {
            email,
            first_name,
            last_name,
            team,
            role,
        } => {
            let mut invitation = NewInvitation::new(email.as_str(), first_name, last_name);
            invitation.team = team;
            invitation.role = role;
            let created = ctx
                .client
                .create_invitation(&invitation)
                .await
                .with_context(|| format!("Failed to invite {email}"))?;
            ctx.renderer.render(&created)
        }
    }
}
