//! Mock server helpers for the GitHub releases API

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::constants::*;
use super::fixtures::load_releases;

/// Serve the releases fixture at the releases endpoint
pub async fn mock_release_list(server: &MockServer) {
    mock_release_list_body(server, load_releases(&server.uri())).await;
}

/// Serve `body` at the releases endpoint
pub async fn mock_release_list_body(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(RELEASES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

/// Answer every request the way GitHub does once the rate limit is hit
pub async fn mock_rate_limited(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .set_body_raw(
                    r#"{"message":"API rate limit exceeded for 127.0.0.1.","documentation_url":"https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting"}"#,
                    "application/json",
                ),
        )
        .mount(server)
        .await;
}

/// Answer a release-by-tag lookup with GitHub's not-found response
pub async fn mock_release_tag_not_found(server: &MockServer, tag: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{}/tags/{}", RELEASES_PATH, tag)))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            r#"{"message":"Not Found","documentation_url":"https://docs.github.com/rest/releases/releases#get-a-release-by-tag-name"}"#,
            "application/json",
        ))
        .mount(server)
        .await;
}

/// Paths of every request the server received, in order
pub async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}
