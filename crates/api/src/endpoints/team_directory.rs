use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::models::{NewInvitation, NewProfile};
use crate::pagination::Page;
use crate::{ApiClient, ApiRequest};

impl ApiClient {
    /// `GET /team-directory/profiles`
    pub async fn list_users(&self, page: Page) -> Result<Vec<Value>> {
        self.list_directory("profiles", page).await
    }

    /// `GET /team-directory/profiles/{id}`
    pub async fn get_user(&self, profile_id: &str) -> Result<Value> {
        let url = self.endpoint(&["team-directory", "profiles", profile_id])?;
        self.fetch(ApiRequest::new(Method::GET, url)).await
    }

    /// `DELETE /team-directory/profiles/{id}`
    pub async fn delete_user(&self, profile_id: &str) -> Result<Value> {
        let url = self.endpoint(&["team-directory", "profiles", profile_id])?;
        self.fetch(ApiRequest::new(Method::DELETE, url)).await
    }

    /// `POST /team-directory/profiles`. Space mails an activation link to
    /// the new profile.
    pub async fn create_profile(&self, profile: &NewProfile) -> Result<Value> {
        let url = self.endpoint(&["team-directory", "profiles"])?;
        self.fetch(ApiRequest::new(Method::POST, url).json(profile)?)
            .await
    }

    /// `GET /team-directory/teams`
    pub async fn list_teams(&self, page: Page) -> Result<Vec<Value>> {
        self.list_directory("teams", page).await
    }

    /// `GET /team-directory/memberships`
    pub async fn list_memberships(&self, page: Page) -> Result<Vec<Value>> {
        self.list_directory("memberships", page).await
    }

    /// `GET /team-directory/roles`, returned as the full response body.
    pub async fn list_roles(&self) -> Result<Value> {
        let url = self.endpoint(&["team-directory", "roles"])?;
        self.fetch(ApiRequest::new(Method::GET, url)).await
    }

    /// `POST /team-directory/invitations`
    pub async fn create_invitation(&self, invitation: &NewInvitation) -> Result<Value> {
        let url = self.endpoint(&["team-directory", "invitations"])?;
        self.fetch(ApiRequest::new(Method::POST, url).json(invitation)?)
            .await
    }

    async fn list_directory(&self, collection: &str, page: Page) -> Result<Vec<Value>> {
        let url = self.endpoint(&["team-directory", collection])?;
        let request = ApiRequest::new(Method::GET, url).query_pairs(self.list_query(page)?);
        self.fetch_list(request).await
    }
}
