use clap::Args;
use space_cli_api::{ApiClient, Page};
use space_cli_output::OutputRenderer;

pub mod auth;
pub mod blog;
pub mod chat;
pub mod directory;
pub mod project;
pub mod repo;
pub mod review;

/// Everything a product command needs to talk to Space and print results.
pub struct CommandContext<'a> {
    pub client: ApiClient,
    pub renderer: &'a OutputRenderer,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Number of rows to skip.
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
    /// Page size (defaults to and is capped by the profile's list_limit).
    #[arg(long)]
    pub limit: Option<u32>,
}

impl PageArgs {
    pub fn page(&self) -> Page {
        Page {
            offset: self.offset,
            limit: self.limit,
        }
    }
}
