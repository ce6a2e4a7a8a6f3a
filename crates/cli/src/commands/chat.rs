use anyhow::{Context, Result};
use clap::Subcommand;

use super::{CommandContext, PageArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum ChannelCommands {
    /// List chat channels.
    List {
        /// Search term.
        #[arg(long, default_value = "")]
        query: String,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ChatCommands {
    /// Send a markdown message to a channel or a user.
    Send {
        message: String,
        /// Channel id.
        #[arg(long, conflicts_with = "username")]
        channel: Option<String>,
        /// Username for a direct message.
        #[arg(long)]
        username: Option<String>,
    },
}

pub async fn execute_channel(command: ChannelCommands, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        ChannelCommands::List { query, page } => {
            let channels = ctx
                .client
                .list_channels(&query, page.page())
                .await
                .context("Failed to list channels")?;
            ctx.renderer.render_list(&channels, "No channels found.")
        }
    }
}

pub async fn execute_chat(command: ChatCommands, ctx: &CommandContext<'_>) -> Result<()> {
    match command {
        ChatCommands::Send {
            message,
            channel,
            username,
        } => {
            let sent = ctx
                .client
                .send_message(&message, channel.as_deref(), username.as_deref())
                .await
                .context("Failed to send message")?;
            ctx.renderer.render(&sent)
        }
    }
}
