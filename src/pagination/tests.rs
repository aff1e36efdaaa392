//! Tests for pagination module

use super::*;
use crate::config::{ClientOptions, Defaults};
use crate::error::ErrorKind;
use crate::http::{Client, RequestOptions, Response};
use crate::types::Method;
use pretty_assertions::assert_eq;
use reqwest::header::HeaderMap;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, options: ClientOptions) -> Client {
    Client::with_defaults(
        options.api_endpoint(format!("{}/api", server.uri())),
        &Defaults::default(),
    )
    .unwrap()
}

fn next_link(server: &MockServer, page: u32) -> String {
    format!("<{}/api/items?page={page}>; rel=\"next\"", server.uri())
}

async fn mount_page(server: &MockServer, page: u32, body: Value, next: Option<u32>) {
    let mut response = ResponseTemplate::new(200).set_body_json(body);
    if let Some(next) = next {
        response = response.insert_header("Link", next_link(server, next).as_str());
    }

    let mock = Mock::given(method("GET")).and(path("/api/items"));
    let mock = if page == 1 {
        mock.and(query_param_is_missing("page"))
    } else {
        mock.and(query_param("page", page.to_string()))
    };
    mock.respond_with(response).expect(1).mount(server).await;
}

// ============================================================================
// Types
// ============================================================================

#[test]
fn test_pagination_state() {
    let mut state = PaginationState::new();
    assert!(!state.is_done());

    state.add_page(3);
    state.add_page(2);
    assert_eq!(state.pages, 2);
    assert_eq!(state.total_fetched, 5);

    state.finish(StopReason::NoNextLink);
    assert!(state.is_done());
    assert_eq!(state.stop, Some(StopReason::NoNextLink));
}

#[test]
fn test_stop_reason_display() {
    assert_eq!(StopReason::QuotaExhausted.to_string(), "rate limit exhausted");
    assert_eq!(StopReason::Disabled.as_str(), "disabled");
}

#[test]
fn test_append_page() {
    let page = Response::from_parts(
        Method::GET,
        "https://api.test/items",
        200,
        HeaderMap::new(),
        "[3, 4]".to_string(),
    );

    let mut data = json!([1, 2]);
    append_page(&mut data, &page);
    assert_eq!(data, json!([1, 2, 3, 4]));

    let mut object = json!({"id": 1});
    append_page(&mut object, &page);
    assert_eq!(object, json!({"id": 1}));
}

// ============================================================================
// Engine
// ============================================================================

#[tokio::test]
async fn test_single_fetch_when_disabled() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!([{"id": 1}]), Some(2)).await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2}])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientOptions::new().auto_paginate(false));
    let data = client.paginate("items", RequestOptions::new()).await.unwrap();

    assert_eq!(data, json!([{"id": 1}]));
}

#[tokio::test]
async fn test_three_pages_concatenated() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!([{"id": 1}, {"id": 2}]), Some(2)).await;
    mount_page(&server, 2, json!([{"id": 3}]), Some(3)).await;
    mount_page(&server, 3, json!([{"id": 4}]), None).await;

    let client = client_for(&server, ClientOptions::new().auto_paginate(true));
    let data = client.paginate("items", RequestOptions::new()).await.unwrap();

    assert_eq!(data, json!([{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4}]));
    assert!(client
        .last_response()
        .unwrap()
        .url
        .ends_with("/api/items?page=3"));
}

#[tokio::test]
async fn test_stops_when_quota_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}]))
                .insert_header("Link", next_link(&server, 2).as_str())
                .insert_header("X-RateLimit-Limit", "60")
                .insert_header("X-RateLimit-Remaining", "0"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2}])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientOptions::new().auto_paginate(true));
    let data = client.paginate("items", RequestOptions::new()).await.unwrap();

    assert_eq!(data, json!([{"id": 1}]));
    assert_eq!(client.rate_limit().remaining, Some(0));
}

#[tokio::test]
async fn test_custom_combiner() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!({"items": [1]}), Some(2)).await;
    mount_page(&server, 2, json!({"items": [2, 3]}), None).await;

    let client = client_for(&server, ClientOptions::new().auto_paginate(true));
    let mut calls = 0;
    let data = client
        .paginate_with("items", RequestOptions::new(), |data, page| {
            calls += 1;
            let more = page.data["items"].as_array().cloned().unwrap_or_default();
            if let Some(items) = data["items"].as_array_mut() {
                items.extend(more);
            }
        })
        .await
        .unwrap();

    assert_eq!(calls, 1);
    assert_eq!(data, json!({"items": [1, 2, 3]}));
}

#[tokio::test]
async fn test_non_array_pages_left_unchanged() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!({"id": 1}), Some(2)).await;
    mount_page(&server, 2, json!({"id": 2}), None).await;

    let client = client_for(&server, ClientOptions::new().auto_paginate(true));
    let data = client.paginate("items", RequestOptions::new()).await.unwrap();

    assert_eq!(data, json!({"id": 1}));
}

#[tokio::test]
async fn test_error_mid_loop_propagates() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!([1]), Some(2)).await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientOptions::new().auto_paginate(true));
    let err = client
        .paginate("items", RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::InternalServerError));
    assert_eq!(client.last_response().unwrap().status, 500);
}

// ============================================================================
// Page size
// ============================================================================

#[tokio::test]
async fn test_default_per_page_when_auto_paginating() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("per_page", DEFAULT_PER_PAGE.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientOptions::new().auto_paginate(true));
    client.paginate("items", RequestOptions::new()).await.unwrap();
}

#[tokio::test]
async fn test_configured_per_page_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let auto = client_for(
        &server,
        ClientOptions::new().auto_paginate(true).per_page(20),
    );
    auto.paginate("items", RequestOptions::new()).await.unwrap();

    let manual = client_for(
        &server,
        ClientOptions::new().auto_paginate(false).per_page(20),
    );
    manual.paginate("items", RequestOptions::new()).await.unwrap();
}

#[tokio::test]
async fn test_caller_per_page_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(
        &server,
        ClientOptions::new().auto_paginate(true).per_page(20),
    );
    client
        .paginate("items", RequestOptions::new().field("per_page", 5))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_no_per_page_without_auto_paginate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param_is_missing("per_page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientOptions::new().auto_paginate(false));
    client.paginate("items", RequestOptions::new()).await.unwrap();
}
