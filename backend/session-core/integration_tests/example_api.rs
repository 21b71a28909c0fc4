use crate::helpers::api_client;

use session_core::error::ApiError;
use session_core::example_api::{ExampleApi, NewUser, PostQuery, UserPatch};
use session_core::session::SessionStore;

use common::RedactedToken;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// ============================================================================
// Example CRUD resources
// ============================================================================

fn example_api(server: &MockServer) -> ExampleApi {
    let session = SessionStore::new();
    session.set_token(RedactedToken::new("t1"));
    ExampleApi::new(api_client(server, session))
}

#[tokio::test]
async fn given_users_endpoint_when_get_users_then_list_decoded_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ada", "email": "ada@example.com" },
            { "id": 2, "name": "Bob", "email": "bob@example.com" }
        ])))
        .mount(&server)
        .await;

    let users = example_api(&server).get_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[1].name, "Bob");
}

#[tokio::test]
async fn given_missing_user_when_get_user_by_id_then_404_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = example_api(&server).get_user_by_id(42).await;

    assert_eq!(result.unwrap_err().status_code().map(|s| s.0), Some(404));
}

/// **VALUE**: Verifies that partial bodies omit unset fields instead of sending nulls.
///
/// **BUG THIS CATCHES**: `{"name": null}` on update would wipe the user's name server-side.
#[tokio::test]
async fn given_partial_patch_when_update_user_then_only_set_fields_sent() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/7"))
        .and(body_json(json!({ "email": "new@example.com" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 7, "name": "Ada", "email": "new@example.com" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let patch = UserPatch {
        email: Some("new@example.com".to_string()),
        ..UserPatch::default()
    };
    let user = example_api(&server).update_user(7, &patch).await.unwrap();

    assert_eq!(user.email, "new@example.com");
}

#[tokio::test]
async fn given_new_user_when_create_user_then_posted_and_created_user_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({ "name": "Cy", "email": "cy@example.com" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": 3, "name": "Cy", "email": "cy@example.com" })),
        )
        .mount(&server)
        .await;

    let new_user = NewUser {
        name: Some("Cy".to_string()),
        email: Some("cy@example.com".to_string()),
    };
    let user = example_api(&server).create_user(&new_user).await.unwrap();

    assert_eq!(user.id, 3);
}

#[tokio::test]
async fn given_user_when_delete_user_then_empty_response_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(example_api(&server).delete_user(3).await.is_ok());
}

#[tokio::test]
async fn given_filters_when_get_posts_then_query_string_carries_them() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("userId", "1"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 10, "title": "Hello", "body": "World", "userId": 1 }
        ])))
        .mount(&server)
        .await;

    let posts = example_api(&server)
        .get_posts(PostQuery {
            user_id: Some(1),
            limit: Some(5),
        })
        .await
        .unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].user_id, 1);
}

#[tokio::test]
async fn given_no_filters_when_get_posts_then_no_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(|request: &Request| {
            if request.url.query().is_some() {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200).set_body_json(json!([]))
            }
        })
        .mount(&server)
        .await;

    let result = example_api(&server).get_posts(PostQuery::default()).await;

    assert!(matches!(result, Ok(ref posts) if posts.is_empty()), "{result:?}");
}

#[tokio::test]
async fn given_unreachable_server_when_request_sent_then_network_error() {
    // Port 9 (discard) on localhost is not listening in test environments
    let session = SessionStore::new();
    let client = session_core::api_client::ApiClient::new("http://127.0.0.1:9", session).unwrap();

    let result = ExampleApi::new(client).get_users().await;

    assert!(matches!(result, Err(ApiError::Network { .. })));
}
