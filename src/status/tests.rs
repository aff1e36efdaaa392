//! Tests for the status module

use super::*;
use crate::config::{ClientOptions, Defaults};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Arc<Client> {
    Arc::new(
        Client::with_defaults(
            ClientOptions::new().api_endpoint(format!("{}/api", server.uri())),
            &Defaults::default(),
        )
        .unwrap(),
    )
}

async fn mount_location(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/locations/san-mateo-free-medical-clinic"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_search(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("keyword", "food"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[test_case(json!(null), false ; "null")]
#[test_case(json!(false), false ; "false")]
#[test_case(json!(true), true ; "true")]
#[test_case(json!(0), true ; "number")]
#[test_case(json!("  "), false ; "blank string")]
#[test_case(json!("ok"), true ; "string")]
#[test_case(json!([]), false ; "empty array")]
#[test_case(json!([1]), true ; "array")]
#[test_case(json!({}), false ; "empty object")]
#[test_case(json!({"id": 1}), true ; "object")]
fn test_is_present(value: Value, expected: bool) {
    assert_eq!(is_present(&value), expected);
}

#[test]
fn test_default_probes() {
    let probes = Probe::defaults();
    assert_eq!(probes.len(), 2);
    assert_eq!(probes[0].path, "locations/san-mateo-free-medical-clinic");
    assert_eq!(probes[1].options.fields.get("keyword"), Some(&json!("food")));
}

#[tokio::test]
async fn test_check_ok() {
    let server = MockServer::start().await;
    mount_location(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Clinic"})),
    )
    .await;
    mount_search(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])),
    )
    .await;

    let report = StatusChecker::new(client_for(&server)).check().await;

    assert!(report.is_ok());
    assert_eq!(report.status, "OK");
    assert_eq!(report.dependencies, vec!["SendGrid", "Memcachier"]);
    assert_eq!(report.checks.get("location"), Some(&true));
    assert_eq!(report.checks.get("search"), Some(&true));
    assert!(report.updated > 0);
}

#[tokio::test]
async fn test_check_empty_search_not_ok() {
    let server = MockServer::start().await;
    mount_location(&server, ResponseTemplate::new(200).set_body_json(json!({"id": 1}))).await;
    mount_search(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let report = StatusChecker::new(client_for(&server)).check().await;

    assert_eq!(report.status, "NOT OK");
    assert_eq!(report.checks.get("location"), Some(&true));
    assert_eq!(report.checks.get("search"), Some(&false));
}

#[tokio::test]
async fn test_check_error_not_ok() {
    let server = MockServer::start().await;
    mount_location(&server, ResponseTemplate::new(404)).await;
    mount_search(&server, ResponseTemplate::new(200).set_body_json(json!([1]))).await;

    let report = StatusChecker::new(client_for(&server)).check().await;

    assert!(!report.is_ok());
    assert_eq!(report.checks.get("location"), Some(&false));
}

#[tokio::test]
async fn test_custom_probes_and_dependencies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let checker = StatusChecker::new(client_for(&server))
        .with_probes(vec![Probe::new(
            "organizations",
            "organizations",
            RequestOptions::new(),
        )])
        .with_dependencies(vec!["Postgres".to_string()]);
    assert_eq!(checker.probes().len(), 1);

    let report = checker.check().await;
    assert!(report.is_ok());
    assert_eq!(report.dependencies, vec!["Postgres"]);
}

#[test]
fn test_report_serialization() {
    let report = StatusReport {
        dependencies: vec!["SendGrid".to_string()],
        status: STATUS_OK.to_string(),
        updated: 1_700_000_000,
        checks: BTreeMap::new(),
    };
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value,
        json!({"dependencies": ["SendGrid"], "status": "OK", "updated": 1_700_000_000, "checks": {}})
    );

    let parsed: StatusReport =
        serde_json::from_value(json!({"dependencies": [], "status": "NOT OK", "updated": 1}))
            .unwrap();
    assert!(!parsed.is_ok());
}
