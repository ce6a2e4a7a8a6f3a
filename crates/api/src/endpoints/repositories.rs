use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::{ApiClient, ApiRequest};

const PUSH_NOTIFICATION_PATH: &str = "~external-push-notification";

impl ApiClient {
    /// `GET /projects/repositories/find?term={project_key}`
    pub async fn find_repositories(&self, project_key: &str) -> Result<Vec<Value>> {
        let url = self.endpoint(&["projects", "repositories", "find"])?;
        let request = ApiRequest::new(Method::GET, url).query("term", project_key);
        self.fetch_list(request).await
    }

    /// `DELETE /projects/{project}/repositories/{repository}`
    pub async fn delete_repository(&self, project_id: &str, repository: &str) -> Result<Value> {
        let url = self.endpoint(&["projects", project_id, "repositories", repository])?;
        self.fetch(ApiRequest::new(Method::DELETE, url)).await
    }

    /// Pings the organization's external push notification hook so Space
    /// re-reads a mirrored repository. Lives outside the API root; the
    /// response is discarded.
    pub async fn notify_repository_change(&self, project_key: &str, repository: &str) -> Result<()> {
        let url = self.site_endpoint(&[PUSH_NOTIFICATION_PATH, project_key, repository])?;
        let response = self.execute(ApiRequest::new(Method::GET, url)).await?;
        debug!(project_key, repository, bytes = response.len(), "Repository change hook pinged");
        Ok(())
    }
}
