use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use serde_json::{Value, json};
use server::{config::Config, state::AppState};
use tempfile::TempDir;
use tokio::net::TcpListener;

const PASSWORD: &str = "test-password";

struct TestServer {
    addr: SocketAddr,
    client: Client,
    state: Arc<AppState>,
    _dir: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("dictionary.json");
        Self::start_with(dir, data_path, false).await
    }

    async fn start_with(dir: TempDir, data_path: PathBuf, strict_writes: bool) -> Self {
        let config = Config {
            port: 0,
            data_path,
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
            admin_password: PASSWORD.to_string(),
            strict_writes,
        };
        let state = AppState::new(config);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(server::serve(
            listener,
            state.clone(),
            std::future::pending::<()>(),
        ));

        Self {
            addr,
            client: Client::new(),
            state,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    async fn post_entry(&self, body: Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/dictionary"))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn list(&self) -> Vec<Value> {
        self.client
            .get(self.url("/api/dictionary"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_end_to_end_add_list_and_view() {
    let server = TestServer::start().await;

    let res = server
        .post_entry(json!({ "name": "Foo", "description": "bar", "password": PASSWORD }))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["entry"], json!({ "name": "Foo", "description": "bar" }));
    assert!(body["message"].is_string());

    let entries = server.list().await;
    assert!(entries.contains(&json!({ "name": "Foo", "description": "bar" })));

    let res = server.client.get(server.url("/entry/foo")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("<h1>Foo</h1>"));
    assert!(html.contains("bar"));

    let res = server
        .client
        .get(server.url("/entry/unknown"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(
        res.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
}

#[tokio::test]
async fn test_empty_dictionary_lists_nothing() {
    let server = TestServer::start().await;

    assert!(server.list().await.is_empty());
}

#[tokio::test]
async fn test_wrong_password_is_forbidden_and_changes_nothing() {
    let server = TestServer::start().await;
    server
        .post_entry(json!({ "name": "Cat", "description": "a pet", "password": PASSWORD }))
        .await;
    let before = std::fs::read(server.state.store.path()).unwrap();

    for body in [
        json!({ "name": "Cat", "description": "hijacked", "password": "nope" }),
        json!({ "name": "Cat", "description": "hijacked" }),
    ] {
        let res = server.post_entry(body).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = res.json().await.unwrap();
        assert!(body["message"].is_string());
    }

    assert_eq!(std::fs::read(server.state.store.path()).unwrap(), before);
}

#[tokio::test]
async fn test_missing_fields_are_bad_request() {
    let server = TestServer::start().await;

    for body in [
        json!({ "name": "", "description": "text", "password": PASSWORD }),
        json!({ "name": "Cat", "description": "   ", "password": PASSWORD }),
        json!({ "description": "text", "password": PASSWORD }),
    ] {
        let res = server.post_entry(body).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert!(body["message"].is_string());
    }

    assert!(server.list().await.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let server = TestServer::start().await;

    let res = server
        .client
        .post(server.url("/api/dictionary"))
        .header(CONTENT_TYPE, "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_detail_lookup_is_case_insensitive_and_url_decoded() {
    let server = TestServer::start().await;
    server
        .post_entry(json!({
            "name": "Big Data",
            "description": "datasets too large for one machine",
            "password": PASSWORD,
        }))
        .await;

    for path in ["/entry/Big%20Data", "/entry/big%20data", "/entry/BIG%20DATA"] {
        let res = server.client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        let html = res.text().await.unwrap();
        assert!(html.contains("datasets too large for one machine"));
    }
}

#[tokio::test]
async fn test_upsert_overwrites_by_key() {
    let server = TestServer::start().await;

    for (name, description) in [("Cat", "a pet"), ("cat", "a small feline")] {
        let res = server
            .post_entry(json!({ "name": name, "description": description, "password": PASSWORD }))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    assert_eq!(
        server.list().await,
        vec![json!({ "name": "cat", "description": "a small feline" })]
    );
}

#[tokio::test]
async fn test_write_failure_still_reports_success_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("missing").join("dictionary.json");
    let server = TestServer::start_with(dir, data_path, false).await;

    let res = server
        .post_entry(json!({ "name": "Foo", "description": "bar", "password": PASSWORD }))
        .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(server.list().await.is_empty());
}

#[tokio::test]
async fn test_write_failure_is_server_error_when_strict() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("missing").join("dictionary.json");
    let server = TestServer::start_with(dir, data_path, true).await;

    let res = server
        .post_entry(json!({ "name": "Foo", "description": "bar", "password": PASSWORD }))
        .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().starts_with("Storage unavailable"));
}

#[tokio::test]
async fn test_unlock_checks_password() {
    let server = TestServer::start().await;

    let res = server
        .client
        .post(server.url("/api/unlock"))
        .json(&json!({ "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .post(server.url("/api/unlock"))
        .json(&json!({ "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_static_page_served() {
    let server = TestServer::start().await;

    let res = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("/script.js"));

    let res = server.client.get(server.url("/script.js")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!res.text().await.unwrap().contains(PASSWORD));
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;

    let res = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "OK");
}
