//! Request payloads and the identifier shapes Space expects on the wire.

use serde::Serialize;

use crate::error::{ApiError, Result};

/// Profile reference, tagged with the `className` discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "className")]
pub enum ProfileIdentifier {
    #[serde(rename = "ProfileIdentifier.Username")]
    Username { username: String },
}

impl ProfileIdentifier {
    pub fn username(username: impl Into<String>) -> Self {
        ProfileIdentifier::Username {
            username: username.into(),
        }
    }
}

/// Destination of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelTarget {
    ById(String),
    ByUsername(String),
}

impl ChannelTarget {
    /// Picks the target from optional caller input. Exactly one of the two
    /// must be given; empty strings count as missing.
    pub fn resolve(channel: Option<&str>, username: Option<&str>) -> Result<Self> {
        let channel = channel.filter(|c| !c.is_empty());
        let username = username.filter(|u| !u.is_empty());

        match (channel, username) {
            (Some(id), None) => Ok(ChannelTarget::ById(id.to_string())),
            (None, Some(name)) => Ok(ChannelTarget::ByUsername(name.to_string())),
            (None, None) => Err(ApiError::validation(
                "a message needs either a channel id or a username",
            )),
            (Some(_), Some(_)) => Err(ApiError::validation(
                "pass either a channel id or a username, not both",
            )),
        }
    }

    fn identifier(&self) -> ChannelIdentifier {
        match self {
            ChannelTarget::ById(id) => ChannelIdentifier::Id { id: id.clone() },
            ChannelTarget::ByUsername(username) => ChannelIdentifier::Profile {
                member: ProfileIdentifier::username(username.clone()),
            },
        }
    }
}

impl Serialize for ChannelTarget {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.identifier().serialize(serializer)
    }
}

#[derive(Serialize)]
#[serde(tag = "className")]
enum ChannelIdentifier {
    #[serde(rename = "ChannelIdentifier.Id")]
    Id { id: String },
    #[serde(rename = "ChannelIdentifier.Profile")]
    Profile { member: ProfileIdentifier },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "className")]
pub enum MessageContent {
    /// Markdown text.
    #[serde(rename = "ChatMessage.Text")]
    Text { text: String },
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendMessage {
    pub channel: ChannelTarget,
    pub content: MessageContent,
}

/// Code review participant role. Only `Author` and `Reviewer` are accepted
/// from callers; everything else lands on `Watcher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::IntoStaticStr)]
pub enum ParticipantRole {
    Author,
    Reviewer,
    Watcher,
}

impl ParticipantRole {
    pub fn coerce(role: Option<&str>) -> Self {
        match role {
            Some("Author") => ParticipantRole::Author,
            Some("Reviewer") => ParticipantRole::Reviewer,
            _ => ParticipantRole::Watcher,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct ParticipantBody {
    pub role: ParticipantRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectKey {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub key: ProjectKey,
    pub name: String,
    pub description: Option<String>,
}

impl NewProject {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: ProjectKey { key: key.into() },
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AdminBody {
    pub profile: ProfileIdentifier,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeamBody<'a> {
    pub team_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMergeRequest {
    pub repository: String,
    pub source_branch: String,
    pub target_branch: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvitation {
    pub invitee_email: String,
    pub invitee_first_name: String,
    pub invitee_last_name: String,
    pub team: Option<String>,
    pub role: Option<String>,
}

impl NewInvitation {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            invitee_email: email.into(),
            invitee_first_name: first_name.into(),
            invitee_last_name: last_name.into(),
            team: None,
            role: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<String>,
    /// `Some(true)` creates an external (guest) profile.
    pub guest: Option<bool>,
}

impl NewProfile {
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            emails: Vec::new(),
            guest: None,
        }
    }
}

/// Code review state filter.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum ReviewState {
    #[default]
    Opened,
    Closed,
    RequiresAuthorAttention,
    NeedsReview,
    Merged,
}

/// Code review ordering.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum ReviewSort {
    CreatedAtAsc,
    #[default]
    CreatedAtDesc,
    LastUpdatedAsc,
    LastUpdatedDesc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    pub state: ReviewState,
    pub sort: ReviewSort,
}
