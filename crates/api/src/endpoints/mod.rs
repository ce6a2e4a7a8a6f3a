//! Endpoint catalog, one module per area of the Space HTTP API.
//!
//! Each operation is an inherent method on [`crate::ApiClient`].

mod blog;
mod chats;
mod code_reviews;
mod projects;
mod repositories;
mod team_directory;
