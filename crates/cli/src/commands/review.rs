use anyhow::{Context, Result};
use clap::Subcommand;
use space_cli_api::{NewMergeRequest, ReviewQuery, ReviewSort, ReviewState};

use super::{CommandContext, PageArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum ReviewCommands {
    /// List code reviews of a project.
    List {
        project: String,
        /// Opened, Closed, RequiresAuthorAttention, NeedsReview or Merged.
        #[arg(long, default_value_t = ReviewState::Opened)]
        state: ReviewState,
        /// CreatedAtAsc, CreatedAtDesc, LastUpdatedAsc or LastUpdatedDesc.
        #[arg(long, default_value_t = ReviewSort::CreatedAtDesc)]
        sort: ReviewSort,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a code review (`id:...` or `number:...`).
    Get { project: String, review: String },
    /// Open a merge request.
    CreateMr {
        project: String,
        #[arg(long)]
        repository: String,
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
        #[arg(long)]
        title: String,
    },
    /// Add a participant; roles other than Author and Reviewer become Watcher.
    AddParticipant {
        project: String,
        review: String,
        user: String,
        #[arg(long)]
        role: Option<String>,
    },
}

pub async fn execute(command: ReviewCommands, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        ReviewCommands::List {
            project,
            state,
            sort,
            page,
        } => {
            let query = ReviewQuery { state, sort };
            let reviews = ctx
                .client
                .list_code_reviews(&project, &query, page.page())
                .await
                .with_context(|| format!("Failed to list code reviews for {project}"))?;
            ctx.renderer.render_list(&reviews, "No code reviews found.")
        }
        ReviewCommands::Get { project, review } => {
            let found = ctx
                .client
                .get_code_review(&project, &review)
                .await
                .with_context(|| format!("Failed to fetch code review {review}"))?;
            ctx.renderer.render(&found)
        }
        ReviewCommands::CreateMr {
            project,
            repository,
            source,
            target,
            title,
        } => {
            let merge_request = NewMergeRequest {
                repository,
                source_branch: source,
                target_branch: target,
                title,
            };
            let created = ctx
                .client
                .create_merge_request(&project, &merge_request)
                .await
                .with_context(|| format!("Failed to create merge request in {project}"))?;
            ctx.renderer.render(&created)
        }
        ReviewCommands::AddParticipant {
            project,
            review,
            user,
            role,
        } => ctx
            .client
            .add_review_participant(&project, &review, &user, role.as_deref())
            .await
            .with_context(|| format!("Failed to add {user} to review {review}")),
    }
}
