//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every sans-IO
//! client operation over real HTTP using ureq. Validates that request
//! building and response parsing work end-to-end with the actual server.

use user_api_core::{
    ApiError, CreateUser, HttpMethod, HttpRequest, HttpResponse, RequestOptions, UpdateUser,
    UserClient,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match req.method {
        HttpMethod::Get | HttpMethod::Delete => {
            let mut builder = if req.method == HttpMethod::Get {
                agent.get(&req.url)
            } else {
                agent.delete(&req.url)
            };
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post | HttpMethod::Put => {
            let mut builder = if req.method == HttpMethod::Post {
                agent.post(&req.url)
            } else {
                agent.put(&req.url)
            };
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.send(req.body.unwrap_or_default().as_bytes())
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

#[test]
fn crud_lifecycle() {
    // Step 1: start mock server on a random port.
    let addr = start_server();
    let client = UserClient::new(&format!("http://{addr}/"));

    // Step 2: health.
    let health = client.parse_health(execute(client.build_health())).unwrap();
    assert_eq!(health["status"], "healthy");

    // Step 3: list — should be empty.
    let users = client.parse_list_users(execute(client.build_list_users())).unwrap();
    assert!(users.is_empty(), "expected empty list");

    // Step 4: create a user.
    let req = client
        .build_create_user(&CreateUser::new("alice", "alice@example.com"))
        .unwrap();
    let created = client.parse_user(execute(req)).unwrap();
    assert_eq!(created.username, "alice");
    assert!(created.user_id > 0);
    let id = created.user_id;

    // Step 5: duplicate email — server message surfaces verbatim.
    let req = client
        .build_create_user(&CreateUser::new("alice2", "alice@example.com"))
        .unwrap();
    let err = client.parse_user(execute(req)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Пользователь с email alice@example.com уже существует"
    );
    assert_eq!(err.status(), Some(400));

    // Step 6: get the created user.
    let fetched = client.parse_user(execute(client.build_get_user(id).unwrap())).unwrap();
    assert_eq!(fetched, created);

    // Step 7: update username only.
    let update = UpdateUser {
        username: Some("alice_updated".to_string()),
        email: None,
    };
    let req = client.build_update_user(id, &update).unwrap();
    let updated = client.parse_user(execute(req)).unwrap();
    assert_eq!(updated.username, "alice_updated");
    assert_eq!(updated.email, "alice@example.com");

    // Step 8: list — should have one item.
    let users = client.parse_list_users(execute(client.build_list_users())).unwrap();
    assert_eq!(users.len(), 1);

    // Step 9: delete.
    let req = client.build_delete_user(id).unwrap();
    let deleted = client.parse_delete_user(execute(req)).unwrap();
    assert_eq!(deleted["message"], "Пользователь удален");

    // Step 10: get after delete — server's 404 message.
    let err = client
        .parse_user(execute(client.build_get_user(id).unwrap()))
        .unwrap_err();
    assert!(matches!(err, ApiError::Request { status: 404, .. }));
    assert_eq!(err.to_string(), "Пользователь не найден");

    // Step 11: list — should be empty again.
    let users = client.parse_list_users(execute(client.build_list_users())).unwrap();
    assert!(users.is_empty(), "expected empty list after delete");

    // Step 12: a malformed id path is a JSON 404 from the server.
    let req = client.build_request("/users/abc", RequestOptions::default());
    let err = client.parse_user(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::Request { status: 404, .. }));
    assert_eq!(err.to_string(), "Endpoint не найден");
}
