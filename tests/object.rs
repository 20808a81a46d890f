mod common;

use common::TestResult;
use jose_jwt::{params, Algorithm, ClaimValue, JsonWebToken, Payload, RegisteredClaim, JWT};
use secrecy::ExposeSecret;
use serde_json::json;

fn wrap(token: JsonWebToken) -> Vec<JsonWebToken> {
    vec![token]
}

#[test]
fn moves_keep_everything() {
    let mut token = JsonWebToken::from_params([
        params::algorithm(Algorithm::HS256),
        params::secret("secret"),
    ]);
    token.add_claim("iss", "arun.muralidharan");

    let moved = wrap(token).remove(0);
    assert_eq!(moved.header().algorithm(), Algorithm::HS256);
    assert_eq!(
        moved.secret().map(|s| s.expose_secret().to_vec()),
        Some(b"secret".to_vec())
    );
    assert!(moved
        .payload()
        .has_claim_with_value("iss", "arun.muralidharan"));
}

#[test]
fn take_leaves_empty_token() {
    let mut token: JWT = JsonWebToken::builder()
        .algorithm(Algorithm::RS256)
        .secret("pem")
        .claim("sub", "admin")
        .build();

    let taken = std::mem::take(&mut token);
    assert_eq!(taken.algorithm(), Algorithm::RS256);
    assert_eq!(token.algorithm(), Algorithm::NONE);
    assert!(token.payload().is_empty());
    assert!(token.secret().is_none());
}

#[test]
fn clones_are_independent() {
    let mut a = JsonWebToken::new();
    a.add_claim("sub", "a");

    let mut b = a.clone();
    b.add_claim_with("sub", "b", true).add_header("kid", "1");

    assert!(a.payload().has_claim_with_value("sub", "a"));
    assert!(b.payload().has_claim_with_value("sub", "b"));
    assert!(!a.header().has_header("kid"));
}

#[test]
fn add_and_remove_claims() {
    let mut payload = Payload::new();

    assert!(payload.add_claim("aud", "rift.io"));
    assert!(!payload.add_claim("aud", "other"));
    assert!(!payload.add_claim("AUD", "other"));
    assert!(payload.has_claim_with_value("aud", "rift.io"));

    assert!(payload.add_claim_with("AUD", "other", true));
    assert!(!payload.has_claim("aud"));
    assert!(payload.has_claim_with_value("AUD", "other"));
    assert_eq!(payload.len(), 1);

    assert!(payload.remove_claim("AUD"));
    assert!(!payload.remove_claim("AUD"));
    assert!(payload.is_empty());
}

#[test]
fn registered_claim_names() {
    let mut token = JsonWebToken::new();
    token
        .add_claim(RegisteredClaim::Issuer, "arun.muralidharan")
        .add_claim(RegisteredClaim::Expiration, ClaimValue::timestamp(1513863371))
        .add_claim(RegisteredClaim::NotBefore, 1513862371);

    assert!(token.has_claim("iss"));
    assert_eq!(token.payload().expiration(), Some(1513863371));
    assert_eq!(token.payload().not_before(), Some(1513862371));
    assert_eq!(RegisteredClaim::JwtId.as_str(), "jti");

    token.remove_claim(RegisteredClaim::NotBefore);
    assert!(!token.has_claim("nbf"));
}

#[test]
fn typed_claim_values() -> TestResult {
    let mut payload = Payload::new();
    payload.add_claim("count", 3);
    payload.add_claim("admin", true);
    payload.add_claim("roles", vec!["a", "b"]);

    assert_eq!(payload.get_claim_value::<u32>("count")?, 3);
    assert!(payload.get_claim_value::<bool>("admin")?);
    assert_eq!(payload.get_claim_value::<Vec<String>>("roles")?, ["a", "b"]);
    assert_eq!(payload.get_claim_value::<Option<String>>("missing")?, None);
    assert!(payload.get_claim_value::<String>("count").is_err());

    // values compare by JSON type
    assert!(!payload.has_claim_with_value("count", "3"));
    Ok(())
}

#[test]
fn params_last_wins() {
    let token = JsonWebToken::from_params([
        params::algorithm(Algorithm::HS256),
        params::payload([("sub", "one")]),
        params::headers([("kid", "1")]),
        params::algorithm(Algorithm::HS512),
        params::payload([("iss", "two")]),
    ]);

    assert_eq!(token.algorithm(), Algorithm::HS512);
    assert!(!token.has_claim("sub"));
    assert!(token.has_claim("iss"));
    assert!(token.header().has_header("kid"));
}

#[test]
fn reserved_headers_are_fixed() {
    let mut token = JsonWebToken::builder()
        .algorithm(Algorithm::ES256)
        .header("alg", "HS256")
        .header("typ", "JOSE")
        .build();
    token.add_header("x5t", "thumb").remove_header("alg");

    assert_eq!(
        token.header().to_json(),
        json!({ "alg": "ES256", "typ": "JWT", "x5t": "thumb" })
    );
}

#[test]
fn display_is_header_dot_payload() {
    let mut token = JsonWebToken::new();
    token.set_algorithm(Algorithm::HS256).add_claim("sub", "admin");

    assert_eq!(
        token.to_string(),
        r#"{"alg":"HS256","typ":"JWT"}.{"sub":"admin"}"#
    );
    assert!(format!("{token:#}").contains('\n'));
}

#[test]
fn secret_is_redacted() {
    let token = JsonWebToken::builder().secret("hunter2").build();
    assert!(!format!("{token:?}").contains("hunter2"));
}
