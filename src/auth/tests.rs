//! Tests for the auth module

use super::*;
use crate::config::{ClientConfig, ClientOptions, Defaults};
use crate::types::QueryMap;

fn query_auth(token: Option<&str>, precedence: AuthPrecedence) -> Authenticator {
    Authenticator::new(
        token.map(ApiToken::from),
        TokenPlacement::default(),
        precedence,
    )
}

// ============================================================================
// Decision
// ============================================================================

#[test]
fn test_not_authenticated_without_token() {
    let auth = query_auth(None, AuthPrecedence::AuthWins);
    assert!(!auth.is_application_authenticated());
    assert!(auth.application_authentication().is_empty());
}

#[test]
fn test_not_authenticated_with_empty_token() {
    let auth = query_auth(Some(""), AuthPrecedence::AuthWins);
    assert!(!auth.is_application_authenticated());
    assert!(auth.application_authentication().is_empty());
}

#[test]
fn test_authenticated_payload() {
    let auth = query_auth(Some("secret"), AuthPrecedence::AuthWins);
    assert!(auth.is_application_authenticated());

    let payload = auth.application_authentication();
    assert_eq!(payload.len(), 1);
    assert_eq!(payload.get("api_token"), Some(&"secret".to_string()));
    assert!(auth.header().is_none());
}

#[test]
fn test_header_placement() {
    let auth = Authenticator::new(
        Some(ApiToken::from("secret")),
        TokenPlacement::Header {
            name: "X-Api-Token".to_string(),
        },
        AuthPrecedence::AuthWins,
    );
    assert!(auth.is_application_authenticated());
    assert!(auth.application_authentication().is_empty());
    assert_eq!(auth.header(), Some(("X-Api-Token", "secret")));
    assert!(auth.query_param().is_none());
}

// ============================================================================
// Merge precedence
// ============================================================================

#[test]
fn test_merge_adds_missing_key() {
    for precedence in [AuthPrecedence::AuthWins, AuthPrecedence::CallerWins] {
        let auth = query_auth(Some("secret"), precedence);
        let mut query = QueryMap::new();
        query.insert("keyword".to_string(), "food".to_string());
        auth.merge_query(&mut query);

        assert_eq!(query.get("keyword"), Some(&"food".to_string()));
        assert_eq!(query.get("api_token"), Some(&"secret".to_string()));
    }
}

#[test]
fn test_merge_collision_auth_wins() {
    let auth = query_auth(Some("secret"), AuthPrecedence::AuthWins);
    let mut query = QueryMap::new();
    query.insert("api_token".to_string(), "caller".to_string());
    auth.merge_query(&mut query);
    assert_eq!(query.get("api_token"), Some(&"secret".to_string()));
}

#[test]
fn test_merge_collision_caller_wins() {
    let auth = query_auth(Some("secret"), AuthPrecedence::CallerWins);
    let mut query = QueryMap::new();
    query.insert("api_token".to_string(), "caller".to_string());
    auth.merge_query(&mut query);
    assert_eq!(query.get("api_token"), Some(&"caller".to_string()));
}

#[test]
fn test_merge_noop_when_unauthenticated() {
    let auth = query_auth(None, AuthPrecedence::AuthWins);
    let mut query = QueryMap::new();
    auth.merge_query(&mut query);
    assert!(query.is_empty());
}

#[test]
fn test_from_config() {
    let config = ClientConfig::resolve(
        ClientOptions::new().api_token("from-config"),
        &Defaults::default(),
    );
    let auth = Authenticator::from_config(&config);
    assert!(auth.is_application_authenticated());
    assert_eq!(
        auth.application_authentication().get("api_token"),
        Some(&"from-config".to_string())
    );
}

// ============================================================================
// Redaction
// ============================================================================

const LONG_TOKEN: &str = "0123456789abcdef0123456789abcdefghijTAIL";

#[test]
fn test_redact_url_masks_token_param() {
    let auth = query_auth(Some(LONG_TOKEN), AuthPrecedence::AuthWins);
    let url = url::Url::parse(&format!(
        "https://api.test/search?keyword=food&api_token={LONG_TOKEN}"
    ))
    .unwrap();

    let redacted = auth.redact_url(&url).to_string();
    assert!(!redacted.contains(&LONG_TOKEN[..32]));
    assert!(redacted.contains("TAIL"));
    assert!(redacted.contains("keyword=food"));
    assert!(redacted.starts_with("https://api.test/search?"));
}

#[test]
fn test_redact_url_leaves_other_urls_alone() {
    let url = url::Url::parse("https://api.test/search?keyword=food").unwrap();

    let auth = query_auth(Some(LONG_TOKEN), AuthPrecedence::AuthWins);
    assert_eq!(auth.redact_url(&url), url);

    let unauthenticated = query_auth(None, AuthPrecedence::AuthWins);
    let with_param = url::Url::parse("https://api.test/a?api_token=x").unwrap();
    assert_eq!(unauthenticated.redact_url(&with_param), with_param);

    let header = Authenticator::new(
        Some(ApiToken::from(LONG_TOKEN)),
        TokenPlacement::Header {
            name: DEFAULT_TOKEN_HEADER.to_string(),
        },
        AuthPrecedence::AuthWins,
    );
    assert_eq!(header.redact_url(&with_param), with_param);
}
