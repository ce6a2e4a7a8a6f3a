use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::models::{ChannelTarget, MessageContent, SendMessage};
use crate::pagination::Page;
use crate::{ApiClient, ApiRequest};

impl ApiClient {
    /// `GET /chats/channels/all-channels`, filtered by a search term.
    pub async fn list_channels(&self, query: &str, page: Page) -> Result<Vec<Value>> {
        let url = self.endpoint(&["chats", "channels", "all-channels"])?;
        let request = ApiRequest::new(Method::GET, url)
            .query("query", query)
            .query_pairs(self.list_query(page)?);
        self.fetch_list(request).await
    }

    /// `POST /chats/messages/send-message`
    ///
    /// Exactly one of `channel` (a channel id) or `username` must be set;
    /// otherwise a validation error is returned and nothing is sent.
    pub async fn send_message(
        &self,
        message: &str,
        channel: Option<&str>,
        username: Option<&str>,
    ) -> Result<Value> {
        let target = ChannelTarget::resolve(channel, username)?;
        self.send_message_to(message, target).await
    }

    /// Sends a markdown message to an already resolved target.
    pub async fn send_message_to(&self, message: &str, target: ChannelTarget) -> Result<Value> {
        let url = self.endpoint(&["chats", "messages", "send-message"])?;
        let body = SendMessage {
            channel: target,
            content: MessageContent::Text {
                text: message.to_string(),
            },
        };
        self.fetch(ApiRequest::new(Method::POST, url).json(&body)?)
            .await
    }
}
