use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::pagination::Page;
use crate::{ApiClient, ApiRequest};

impl ApiClient {
    /// `GET /blog`
    pub async fn list_blog_posts(&self, page: Page) -> Result<Vec<Value>> {
        let request = ApiRequest::new(Method::GET, self.endpoint(&["blog"])?)
            .query_pairs(self.list_query(page)?);
        self.fetch_list(request).await
    }

    /// `GET /blog/{id}`
    pub async fn get_blog_post(&self, post_id: &str) -> Result<Value> {
        let url = self.endpoint(&["blog", post_id])?;
        self.fetch(ApiRequest::new(Method::GET, url)).await
    }
}
