use anyhow::{Context, Result};
use clap::Subcommand;

use super::{CommandContext, PageArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum BlogCommands {
    /// List blog posts.
    List(PageArgs),
    /// Show a blog post.
    Get { post_id: String },
}

pub async fn execute(command: BlogCommands, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        BlogCommands::List(page) => {
            let posts = ctx
                .client
                .list_blog_posts(page.page())
                .await
                .context("Failed to list blog posts")?;
            ctx.renderer.render_list(&posts, "No blog posts found.")
        }
        BlogCommands::Get { post_id } => {
            let post = ctx
                .client
                .get_blog_post(&post_id)
                .await
                .with_context(|| format!("Failed to fetch blog post {post_id}"))?;
            ctx.renderer.render(&post)
        }
    }
}
