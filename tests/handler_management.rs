mod common;

use qrlink::domain::repositories::ShortLinkRepository;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_list_empty() {
    let (state, _repo) = common::memory_state();
    let server = common::test_server(state);

    let response = server.get("/").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["base_url"], common::BASE_URL);
    assert_eq!(body["links"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_newest_first() {
    let (state, repo) = common::memory_state();
    common::create_test_link(&repo, "First", "aaaaaaaa", "https://one.example.com").await;
    common::create_test_link(&repo, "Second", "bbbbbbbb", "https://two.example.com").await;
    let server = common::test_server(state);

    let body: Value = server.get("/").await.json();
    let links = body["links"].as_array().unwrap();

    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["short_code"], "bbbbbbbb");
    assert_eq!(links[1]["short_code"], "aaaaaaaa");
    assert_eq!(
        links[0]["short_url"],
        format!("{}/r/bbbbbbbb", common::BASE_URL)
    );
}

#[tokio::test]
async fn test_create_link() {
    let (state, repo) = common::memory_state();
    let server = common::test_server(state);

    let response = server
        .post("/")
        .form(&[
            ("intent", "create"),
            ("name", "Table menu"),
            ("targetUrl", "https://cafe.example/menu"),
        ])
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let link = &body["link"];
    let code = link["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert_eq!(link["name"], "Table menu");
    assert_eq!(link["target_url"], "https://cafe.example/menu");
    assert_eq!(link["click_count"], 0);
    assert_eq!(
        link["short_url"],
        format!("{}/r/{}", common::BASE_URL, code)
    );
    assert!(
        body["qr_code_image"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );

    assert!(repo.find_by_code(code).await.unwrap().is_some());
}

#[tokio::test]
async fn test_created_link_redirects_to_exact_target() {
    let (state, repo) = common::memory_state();
    let server = common::test_server(state);

    let body: Value = server
        .post("/")
        .form(&[
            ("intent", "create"),
            ("name", "Homepage"),
            ("targetUrl", "https://example.com"),
        ])
        .await
        .json();
    let code = body["link"]["short_code"].as_str().unwrap().to_string();

    let response = server.get(&format!("/r/{code}")).await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com");

    let link = repo.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(link.click_count, 1);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let (state, repo) = common::memory_state();
    let server = common::test_server(state);

    let cases: [&[(&str, &str)]; 4] = [
        &[("intent", "create"), ("targetUrl", "https://example.com")],
        &[("intent", "create"), ("name", "  "), ("targetUrl", "https://example.com")],
        &[("intent", "create"), ("name", "Menu")],
        &[("intent", "create"), ("name", "Menu"), ("targetUrl", "javascript:alert(1)")],
    ];

    for form in cases {
        let response = server.post("/").form(&form).await;

        assert_eq!(response.status_code(), 400, "{form:?}");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "validation_error");
    }

    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_name_too_long() {
    let (state, repo) = common::memory_state();
    let server = common::test_server(state);
    let name = "n".repeat(201);

    let response = server
        .post("/")
        .form(&[
            ("intent", "create"),
            ("name", name.as_str()),
            ("targetUrl", "https://example.com"),
        ])
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(
        body["error"]["details"]["name"][0]["message"],
        "Name must be at most 200 characters"
    );
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_name_at_limit() {
    let (state, _repo) = common::memory_state();
    let server = common::test_server(state);
    let name = "n".repeat(200);

    let response = server
        .post("/")
        .form(&[
            ("intent", "create"),
            ("name", name.as_str()),
            ("targetUrl", "https://example.com"),
        ])
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["link"]["name"], name.as_str());
}

#[tokio::test]
async fn test_invalid_action() {
    let (state, _repo) = common::memory_state();
    let server = common::test_server(state);

    for form in [&[("intent", "archive")][..], &[("name", "Menu")][..]] {
        let response = server.post("/").form(&form).await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["error"]["message"], "Invalid action");
    }
}

#[tokio::test]
async fn test_update_link_keeps_code_and_clicks() {
    let (state, repo) = common::memory_state();
    let link = common::create_test_link(&repo, "Menu", "AbCd1234", "https://old.example.com").await;
    repo.increment_clicks("AbCd1234").await.unwrap();
    let server = common::test_server(state);

    let id = link.id.to_string();
    let response = server
        .post("/")
        .form(&[
            ("intent", "update"),
            ("id", id.as_str()),
            ("targetUrl", "https://new.example.com"),
        ])
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["link"]["target_url"], "https://new.example.com");
    assert_eq!(body["link"]["short_code"], "AbCd1234");
    assert_eq!(body["link"]["click_count"], 1);
    assert!(body.get("qr_code_image").is_none());
}

#[tokio::test]
async fn test_update_unknown_id() {
    let (state, _repo) = common::memory_state();
    let server = common::test_server(state);

    let response = server
        .post("/")
        .form(&[
            ("intent", "update"),
            ("id", "999"),
            ("targetUrl", "https://example.com"),
        ])
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_update_rejects_bad_input() {
    let (state, repo) = common::memory_state();
    let link = common::create_test_link(&repo, "Menu", "AbCd1234", "https://old.example.com").await;
    let server = common::test_server(state);
    let id = link.id.to_string();

    let non_numeric = server
        .post("/")
        .form(&[
            ("intent", "update"),
            ("id", "abc"),
            ("targetUrl", "https://example.com"),
        ])
        .await;
    assert_eq!(non_numeric.status_code(), 400);

    let bad_url = server
        .post("/")
        .form(&[
            ("intent", "update"),
            ("id", id.as_str()),
            ("targetUrl", "not a url"),
        ])
        .await;
    assert_eq!(bad_url.status_code(), 400);

    let stored = repo.find_by_code("AbCd1234").await.unwrap().unwrap();
    assert_eq!(stored.target_url, "https://old.example.com");
}

#[tokio::test]
async fn test_delete_link() {
    let (state, repo) = common::memory_state();
    let link = common::create_test_link(&repo, "Menu", "AbCd1234", "https://example.com").await;
    let server = common::test_server(state);
    let id = link.id.to_string();

    let response = server
        .post("/")
        .form(&[("intent", "delete"), ("id", id.as_str())])
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    assert_eq!(server.get("/r/AbCd1234").await.status_code(), 404);
}

#[tokio::test]
async fn test_delete_unknown_id_is_success() {
    let (state, _repo) = common::memory_state();
    let server = common::test_server(state);

    let response = server
        .post("/")
        .form(&[("intent", "delete"), ("id", "424242")])
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_delete_requires_id() {
    let (state, _repo) = common::memory_state();
    let server = common::test_server(state);

    let response = server.post("/").form(&[("intent", "delete")]).await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_base_url_derived_from_headers() {
    let repository = Arc::new(qrlink::infrastructure::persistence::MemoryShortLinkRepository::new());
    let state = common::create_test_state(repository, None);
    let server = common::test_server(state);

    let response = server
        .get("/")
        .add_header("Host", "qr.local:8080")
        .add_header("X-Forwarded-Proto", "https")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["base_url"], "https://qr.local:8080");
}

#[tokio::test]
async fn test_create_storage_failure() {
    let state = common::create_test_state(
        Arc::new(common::UnavailableRepository),
        Some(common::BASE_URL),
    );
    let server = common::test_server(state);

    let response = server
        .post("/")
        .form(&[
            ("intent", "create"),
            ("name", "Menu"),
            ("targetUrl", "https://example.com"),
        ])
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "storage_unavailable");
}
