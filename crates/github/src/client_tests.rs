use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

const TOKEN: &str = "ghs_test_token";

fn owner() -> RepositoryOwner {
    RepositoryOwner::new("octo-org").unwrap()
}

fn repo() -> RepositoryName {
    RepositoryName::new("octo-repo").unwrap()
}

fn label(name: &str) -> LabelName {
    LabelName::new(name).unwrap()
}

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(TOKEN, &server.uri()).unwrap()
}

#[test]
fn test_new_rejects_unusable_api_url() {
    assert!(matches!(
        GitHubClient::new(TOKEN, "not a url"),
        Err(GitHubError::InvalidUrl { .. })
    ));
    assert!(matches!(
        GitHubClient::new(TOKEN, "mailto:octocat@example.com"),
        Err(GitHubError::InvalidUrl { .. })
    ));
}

#[test]
fn test_new_rejects_token_with_newline() {
    assert!(matches!(
        GitHubClient::new("bad\ntoken", DEFAULT_API_URL),
        Err(GitHubError::InvalidToken)
    ));
}

#[tokio::test]
async fn test_add_label_posts_single_label() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octo-org/octo-repo/issues/7/labels"))
        .and(header("authorization", "Bearer ghs_test_token"))
        .and(header("x-github-api-version", "2022-11-28"))
        .and(body_json(json!({ "labels": ["Type: Feature"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Type: Feature", "color": "0e8a16" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .add_label(&owner(), &repo(), IssueNumber::new(7), &label("Type: Feature"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_label_maps_rejection_to_domain_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octo-org/octo-repo/issues/7/labels"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Resource not accessible"))
        .mount(&server)
        .await;

    let err = client(&server)
        .add_label(&owner(), &repo(), IssueNumber::new(7), &label("Type: Feature"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LabelClientError::Rejected {
            status: 403,
            message: "Resource not accessible".to_string(),
        }
    );
}

#[tokio::test]
async fn test_remove_label_encodes_label_name() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/repos/octo-org/octo-repo/issues/7/labels/Type:%20Bugfix"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .remove_label(&owner(), &repo(), IssueNumber::new(7), &label("Type: Bugfix"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_absent_label_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Label does not exist"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .remove_label(&owner(), &repo(), IssueNumber::new(7), &label("Type: Chore"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_label_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client(&server)
        .remove_label(&owner(), &repo(), IssueNumber::new(7), &label("Type: Chore"))
        .await
        .unwrap_err();

    assert!(matches!(err, LabelClientError::Rejected { status: 502, .. }));
}

#[tokio::test]
async fn test_fetch_config_reads_raw_contents() {
    let server = MockServer::start().await;
    let yaml = "labeler:\n  feat:\n    pattern: feat\n    label: Feature\n";
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/octo-repo/contents/.github/botamic.yml"))
        .and(header("accept", RAW_MEDIA_TYPE))
        .respond_with(ResponseTemplate::new(200).set_body_string(yaml))
        .expect(1)
        .mount(&server)
        .await;

    let contents = client(&server)
        .fetch_config(&owner(), &repo(), ".github/botamic.yml")
        .await
        .unwrap();

    assert_eq!(contents.as_deref(), Some(yaml));
}

#[tokio::test]
async fn test_fetch_missing_config_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let contents = client(&server)
        .fetch_config(&owner(), &repo(), ".github/botamic.yml")
        .await
        .unwrap();

    assert!(contents.is_none());
}

#[tokio::test]
async fn test_fetch_config_failure_is_source_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_config(&owner(), &repo(), ".github/botamic.yml")
        .await
        .unwrap_err();

    assert!(err.message.contains("500"));
}

#[tokio::test]
async fn test_enterprise_base_path_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/repos/octo-org/octo-repo/issues/9/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    GitHubClient::new(TOKEN, &format!("{}/api/v3", server.uri()))
        .unwrap()
        .add_label(&owner(), &repo(), IssueNumber::new(9), &label("Type: Test"))
        .await
        .unwrap();
}
