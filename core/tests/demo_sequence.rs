//! The console demo's scripted sequence, run through `ApiClient` and the
//! reqwest transport against the live mock server.

use user_api_core::{render_users, ApiClient, CreateUser, UpdateUser};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

#[tokio::test]
async fn demo_sequence() {
    let api = ApiClient::new(&start_server().await);

    let health = api.check_health().await.unwrap();
    assert_eq!(health["status"], "healthy");

    api.create_user(&CreateUser::new("alice", "alice@example.com"))
        .await
        .unwrap();
    api.create_user(&CreateUser::new("bob", "bob@example.com"))
        .await
        .unwrap();

    let users = api.get_users().await.unwrap();
    assert_eq!(users.len(), 2);
    let rendered = render_users(&users);
    assert!(rendered.contains("Username: alice"));
    assert!(rendered.contains("Username: bob"));

    let first = users[0].user_id;
    let update = UpdateUser {
        username: Some("alice_updated".to_string()),
        email: None,
    };
    let updated = api.update_user(first, &update).await.unwrap();
    assert_eq!(updated.username, "alice_updated");

    let users = api.get_users().await.unwrap();
    assert_eq!(users[0].username, "alice_updated");
    assert_eq!(users[1].username, "bob");

    let fetched = api.get_user(first).await.unwrap();
    assert_eq!(fetched.email, "alice@example.com");
    api.delete_user(first).await.unwrap();
    let err = api.get_user(first).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = ApiClient::new(&format!("http://{addr}"));
    let err = api.check_health().await.unwrap_err();
    assert!(matches!(err, user_api_core::ApiError::Transport(_)));
}
