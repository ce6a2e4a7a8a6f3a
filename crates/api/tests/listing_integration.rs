use serde_json::json;
use space_cli_api::{ApiClient, ClientConfig, Page, ReviewQuery, ReviewSort, ReviewState};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), "fake-token").unwrap()
}

#[tokio::test]
async fn test_list_projects_returns_data_rows() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/http/projects"))
        .and(query_param("$skip", "20"))
        .and(query_param("$top", "10"))
        .and(header("Authorization", "Bearer fake-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": "30",
            "totalCount": 42,
            "data": [
                {"id": "p1", "key": {"key": "ABC"}, "name": "Alphabet"},
                {"id": "p2", "key": {"key": "XYZ"}, "name": "Omega"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let projects = client_for(&mock_server)
        .list_projects(Page::new(20, 10))
        .await
        .unwrap();

    assert_eq!(
        projects,
        vec![
            json!({"id": "p1", "key": {"key": "ABC"}, "name": "Alphabet"}),
            json!({"id": "p2", "key": {"key": "XYZ"}, "name": "Omega"}),
        ]
    );
}

#[tokio::test]
async fn test_list_without_data_field_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/http/team-directory/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalCount": 0})))
        .mount(&mock_server)
        .await;

    let teams = client_for(&mock_server)
        .list_teams(Page::default())
        .await
        .unwrap();
    assert!(teams.is_empty());
}

#[tokio::test]
async fn test_default_limit_comes_from_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/http/team-directory/profiles"))
        .and(query_param("$skip", "0"))
        .and(query_param("$top", "250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "u1"}]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        ApiClient::from_config(ClientConfig::new(mock_server.uri(), "fake-token").with_list_limit(250))
            .unwrap();

    let users = client.list_users(Page::default()).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_limit_above_maximum_is_capped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/http/team-directory/memberships"))
        .and(query_param("$skip", "5"))
        .and(query_param("$top", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let memberships = client_for(&mock_server)
        .list_memberships(Page::new(5, 5000))
        .await
        .unwrap();
    assert!(memberships.is_empty());
}

#[tokio::test]
async fn test_zero_limit_fails_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .list_blog_posts(Page::new(0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, space_cli_api::ApiError::Validation { .. }));
}

#[tokio::test]
async fn test_list_code_reviews_sends_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/http/projects/key:ABC/code-reviews"))
        .and(query_param("state", "Merged"))
        .and(query_param("sort", "LastUpdatedAsc"))
        .and(query_param("$skip", "0"))
        .and(query_param("$top", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"review": {"id": "r1", "title": "Fix build"}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = ReviewQuery {
        state: ReviewState::Merged,
        sort: ReviewSort::LastUpdatedAsc,
    };
    let reviews = client_for(&mock_server)
        .list_code_reviews("key:ABC", &query, Page::new(0, 50))
        .await
        .unwrap();
    assert_eq!(reviews[0]["review"]["id"], "r1");
}

#[tokio::test]
async fn test_list_code_reviews_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/http/projects/p1/code-reviews"))
        .and(query_param("state", "Opened"))
        .and(query_param("sort", "CreatedAtDesc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    client_for(&mock_server)
        .list_code_reviews("p1", &ReviewQuery::default(), Page::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_channels_sends_search_term() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/http/chats/channels/all-channels"))
        .and(query_param("query", "release"))
        .and(query_param("$skip", "0"))
        .and(query_param("$top", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"channelId": "c1", "name": "release-train"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let channels = client_for(&mock_server)
        .list_channels("release", Page::default())
        .await
        .unwrap();
    assert_eq!(channels[0]["name"], "release-train");
}

#[tokio::test]
async fn test_find_repositories_by_project_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/http/projects/repositories/find"))
        .and(query_param("term", "ABC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"projectKey": {"key": "ABC"}, "repository": "backend"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repos = client_for(&mock_server)
        .find_repositories("ABC")
        .await
        .unwrap();
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0]["repository"], "backend");
}

#[tokio::test]
async fn test_list_blog_posts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/http/blog"))
        .and(query_param("$skip", "3"))
        .and(query_param("$top", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "b4"}, {"id": "b5"}, {"id": "b6"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let posts = client_for(&mock_server)
        .list_blog_posts(Page::new(3, 3))
        .await
        .unwrap();
    assert_eq!(posts.len(), 3);
}
