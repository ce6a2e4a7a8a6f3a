use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::models::{NewMergeRequest, ParticipantBody, ParticipantRole, ReviewQuery};
use crate::pagination::Page;
use crate::{ApiClient, ApiRequest};

impl ApiClient {
    /// `GET /projects/{project}/code-reviews`
    pub async fn list_code_reviews(
        &self,
        project: &str,
        query: &ReviewQuery,
        page: Page,
    ) -> Result<Vec<Value>> {
        let url = self.endpoint(&["projects", project, "code-reviews"])?;
        let request = ApiRequest::new(Method::GET, url)
            .query_pairs(self.list_query(page)?)
            .query("state", query.state)
            .query("sort", query.sort);
        self.fetch_list(request).await
    }

    /// `GET /projects/{project}/code-reviews/{review}`
    pub async fn get_code_review(&self, project: &str, review: &str) -> Result<Value> {
        let url = self.endpoint(&["projects", project, "code-reviews", review])?;
        self.fetch(ApiRequest::new(Method::GET, url)).await
    }

    /// `POST /projects/{project}/code-reviews/merge-requests`
    pub async fn create_merge_request(
        &self,
        project: &str,
        merge_request: &NewMergeRequest,
    ) -> Result<Value> {
        let url = self.endpoint(&["projects", project, "code-reviews", "merge-requests"])?;
        self.fetch(ApiRequest::new(Method::POST, url).json(merge_request)?)
            .await
    }

    /// `POST /projects/{project}/code-reviews/{review}/participants/{user}`
    ///
    /// `role` is coerced with [`ParticipantRole::coerce`]: anything other
    /// than `Author` or `Reviewer` adds the user as a `Watcher`.
    pub async fn add_review_participant(
        &self,
        project: &str,
        review: &str,
        user: &str,
        role: Option<&str>,
    ) -> Result<()> {
        let role = ParticipantRole::coerce(role);
        let url = self.endpoint(&[
            "projects",
            project,
            "code-reviews",
            review,
            "participants",
            user,
        ])?;
        self.execute(ApiRequest::new(Method::POST, url).json(&ParticipantBody { role })?)
            .await?;

        let role: &'static str = role.into();
        debug!(project, review, user, role, "Review participant added");
        Ok(())
    }
}
