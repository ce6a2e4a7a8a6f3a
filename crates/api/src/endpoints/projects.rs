use reqwest::Method;
use serde_json::Value;
use tracing::info;

use crate::error::Result;
use crate::models::{AdminBody, NewProject, ProfileIdentifier, TeamBody};
use crate::pagination::Page;
use crate::{ApiClient, ApiRequest};

impl ApiClient {
    /// `GET /projects`
    pub async fn list_projects(&self, page: Page) -> Result<Vec<Value>> {
        let request = ApiRequest::new(Method::GET, self.endpoint(&["projects"])?)
            .query_pairs(self.list_query(page)?);
        self.fetch_list(request).await
    }

    /// `POST /projects`
    pub async fn create_project(&self, project: &NewProject) -> Result<Value> {
        let request = ApiRequest::new(Method::POST, self.endpoint(&["projects"])?).json(project)?;
        self.fetch(request).await
    }

    /// `DELETE /projects/{id}`
    pub async fn delete_project(&self, project_id: &str) -> Result<Value> {
        let request = ApiRequest::new(Method::DELETE, self.endpoint(&["projects", project_id])?);
        self.fetch(request).await
    }

    /// `POST /projects/{id}/access/admins/profiles`
    ///
    /// The response body is only logged.
    pub async fn add_project_admin(&self, project_id: &str, username: &str) -> Result<()> {
        let url = self.endpoint(&["projects", project_id, "access", "admins", "profiles"])?;
        let body = AdminBody {
            profile: ProfileIdentifier::username(username),
        };
        let response = self.execute(ApiRequest::new(Method::POST, url).json(&body)?).await?;

        info!(
            endpoint = "add_project_admin",
            project_id,
            username,
            response = %String::from_utf8_lossy(&response),
            "Project administrator added"
        );
        Ok(())
    }

    /// `POST /projects/{id}/access/members/teams`
    ///
    /// The response body is only logged.
    pub async fn add_project_team(&self, project_id: &str, team_id: &str) -> Result<()> {
        let url = self.endpoint(&["projects", project_id, "access", "members", "teams"])?;
        let body = TeamBody { team_id };
        let response = self.execute(ApiRequest::new(Method::POST, url).json(&body)?).await?;

        info!(
            endpoint = "add_project_team",
            project_id,
            team_id,
            response = %String::from_utf8_lossy(&response),
            "Team added to project"
        );
        Ok(())
    }
}
