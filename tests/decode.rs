mod common;

use common::{init_tracing, TestResult};
use jose_jwt::{
    base64, decode, decode_with_status, Algorithm, DecodeOptions, ErrorKind, RegisteredClaim, Stage,
};

const NONE_HEADER: &str = "eyJhbGciOiJOT05FIiwidHlwIjoiSldUIn0";

const HS256_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
    eyJpYXQiOjE1MTM4NjIzNzEsImlkIjoiYS1iLWMtZC1lLWYtMS0yLTMiLCJpc3MiOiJhcnVuLm11cmFsaWRoYXJhbiIsInN1YiI6ImFkbWluIn0.\
    jk7bRQKTLvs1RcuvMc2B_rt6WBYPoVPirYi_QRBPiuk";

const HS384_TOKEN: &str = "eyJhbGciOiJIUzM4NCIsInR5cCI6IkpXVCJ9.\
    eyJhdWQiOiJyaWZ0LmlvIiwiZXhwIjoxNTEzODYzMzcxLCJzdWIiOiJub3RoaW5nIG11Y2gifQ.\
    cGN4FZCe9Y2c1dA-jP71IXGnYbJRc4OaUTa5m7N7ybF5h6wBwxWQ-pdcxYchjDBL";

const HS512_TOKEN: &str = "eyJhbGciOiJIUzUxMiIsInR5cCI6IkpXVCJ9.\
    eyJhdWQiOiJyaWZ0LmlvIiwiZXhwIjoxNTEzODYzMzcxLCJzdWIiOiJub3RoaW5nIG11Y2gifQ.\
    vQ-1JSFN1kPjUI3URP6AFK5z8V7xLhyhw-76QWhQg9Xcy-IgrJ-bCTYLBjgaprrcEWwpSnBQnP3QnIxYK0HEaQ";

// header without `typ`
const NO_TYP_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.\
    eyJleHAiOjE1MzM0NjE1NTMsImlhdCI6MTUxMzg2MjM3MSwiaWQiOiJhLWItYy1kLWUtZi0xLTItMyIsImlzcyI6ImFydW4ubXVyYWxpZGhhcmFuIiwic3ViIjoiYWRtaW4ifQ.\
    pMWBLSWl1p4V958lfe_6ZhvgFMOQv9Eq5mlndVKFKkA";

// exp in 2113
const FAR_FUTURE: &str =
    "eyJhdWQiOiJyaWZ0LmlvIiwiZXhwIjo0NTEzODYzMzcxLCJzdWIiOiJub3RoaW5nIG11Y2gifQ";
const EXPIRED: &str =
    "eyJhdWQiOiJyaWZ0LmlvIiwiZXhwIjoxNTEzODYzMzcxLCJzdWIiOiJub3RoaW5nIG11Y2gifQ";

#[test]
fn none_without_final_dot() {
    let token = format!("{NONE_HEADER}.{EXPIRED}");
    let options = DecodeOptions::new().algorithms(["none", "HS256"]);

    let decoded = decode_with_status(&token, &options);
    assert_eq!(decoded.kind(), Some(ErrorKind::SignatureFormat));
}

#[test]
fn none_algorithm_is_reported() -> TestResult {
    init_tracing();

    let token = format!("{NONE_HEADER}.{FAR_FUTURE}.");
    let options = DecodeOptions::new().algorithms(["none"]).verify(true);

    let decoded = decode_with_status(&token, &options);
    assert_eq!(decoded.kind(), Some(ErrorKind::NoneAlgorithmUsed));
    assert!(decoded.is_ok());

    let jwt = decoded.token;
    assert_eq!(jwt.algorithm(), Algorithm::NONE);
    assert!(jwt.has_claim("aud"));
    assert!(jwt.has_claim("exp"));
    assert!(!jwt.has_claim("iss"));
    assert!(!jwt.has_claim("ISS"));
    assert_eq!(jwt.payload().get_claim_value::<u64>("exp")?, 4513863371);
    assert_eq!(jwt.payload().get_claim_value::<String>("sub")?, "nothing much");
    Ok(())
}

#[test]
fn none_token_is_ok_for_result_front_end() -> TestResult {
    let token = format!("{NONE_HEADER}.{FAR_FUTURE}.");
    let jwt = decode(&token, &DecodeOptions::new().algorithms([Algorithm::NONE]))?;

    assert_eq!(jwt.payload().audience(), ["rift.io"]);
    Ok(())
}

#[test]
fn algorithm_not_accepted() {
    let token = format!("{NONE_HEADER}.{EXPIRED}.");
    let options = DecodeOptions::new()
        .algorithms(["HS256"])
        .secret("")
        .verify(true);

    let decoded = decode_with_status(&token, &options);
    assert_eq!(decoded.kind(), Some(ErrorKind::InvalidAlgorithm));
}

#[test]
fn garbled_header() {
    let token = format!("ehbGciOiJOT05FIiwidHlwIjoiSldUIn0.{EXPIRED}.");
    let options = DecodeOptions::new().algorithms(["HS256"]).secret("");

    assert_eq!(
        decode_with_status(&token, &options).kind(),
        Some(ErrorKind::JsonParse)
    );
}

#[test]
fn empty_header() {
    let token = format!(".{EXPIRED}.");
    let options = DecodeOptions::new().algorithms(["HS256"]).secret("");

    assert_eq!(
        decode_with_status(&token, &options).kind(),
        Some(ErrorKind::JsonParse)
    );
}

#[test]
fn garbled_payload() {
    let token = format!(
        "{NONE_HEADER}.eyfhuWcikiJyaWZ0LmlvIiwiZXhwIsexNTEzODYzMzcxLCJzdWIiOiJub3RoaW5nIG11Y2gifQ."
    );
    let options = DecodeOptions::new().algorithms(["none"]);

    assert_eq!(
        decode_with_status(&token, &options).kind(),
        Some(ErrorKind::JsonParse)
    );
}

#[test]
fn hs256_without_verification() -> TestResult {
    let options = DecodeOptions::new()
        .algorithms(["none", "HS256"])
        .verify(false)
        .secret("secret");
    let jwt = decode(HS256_TOKEN, &options)?;

    assert_eq!(jwt.algorithm(), Algorithm::HS256);
    assert!(jwt.has_claim("iss"));
    assert!(jwt.payload().has_claim_with_value("iss", "arun.muralidharan"));
    assert!(jwt.has_claim(RegisteredClaim::IssuedAt));
    assert!(!jwt.has_claim("IAT"));
    assert!(jwt
        .payload()
        .has_claim_with_value(RegisteredClaim::IssuedAt, 1513862371));
    assert!(!jwt
        .payload()
        .has_claim_with_value(RegisteredClaim::IssuedAt, 1513862372));
    Ok(())
}

#[test]
fn key_required_when_verifying() {
    let options = DecodeOptions::new()
        .algorithms(["none", "HS256"])
        .verify(true);

    assert_eq!(
        decode_with_status(HS256_TOKEN, &options).kind(),
        Some(ErrorKind::KeyNotPresent)
    );
}

#[test]
fn empty_key_is_no_key() {
    let options = DecodeOptions::new().algorithms(["HS256"]).secret("");

    assert_eq!(
        decode(HS256_TOKEN, &options).unwrap_err().kind(),
        ErrorKind::KeyNotPresent
    );
}

#[test]
fn hs384_verified() -> TestResult {
    let options = DecodeOptions::new()
        .algorithms(["none", "HS384"])
        .secret("0123456789abcdefghijklmnopqrstuvwxyz")
        .now(1513863000);
    let jwt = decode(HS384_TOKEN, &options)?;

    assert!(jwt.has_claim("sub"));
    assert!(jwt.payload().has_claim_with_value("sub", "nothing much"));
    Ok(())
}

#[test]
fn hs512_verified() -> TestResult {
    let options = DecodeOptions::new()
        .algorithms(["none", "HS384", "HS512"])
        .secret("00112233445566778899")
        .now(1513863000);
    let jwt = decode(HS512_TOKEN, &options)?;

    assert!(jwt.payload().has_claim_with_value("sub", "nothing much"));
    assert_eq!(jwt.header().algorithm(), Algorithm::HS512);
    Ok(())
}

#[test]
fn wrong_hmac_key() {
    let options = DecodeOptions::new()
        .algorithms(["HS512"])
        .secret("0011223344556677889")
        .now(1513863000);

    assert_eq!(
        decode(HS512_TOKEN, &options).unwrap_err().kind(),
        ErrorKind::InvalidSignature
    );
}

#[test]
fn missing_typ_only_matters_when_verifying() -> TestResult {
    let options = DecodeOptions::new()
        .algorithms(["none", "HS256"])
        .verify(false);
    let jwt = decode(NO_TYP_TOKEN, &options)?;
    assert_eq!(jwt.header().typ(), "JWT");

    let options = options.verify(true).secret("secret").now(1513862371);
    assert_eq!(
        decode(NO_TYP_TOKEN, &options).unwrap_err().kind(),
        ErrorKind::TypHeaderMissing
    );
    Ok(())
}

#[test]
fn foreign_typ_is_rejected() -> TestResult {
    let header = base64::encode_url(r#"{"alg":"HS256","typ":"JOSE"}"#);
    let token = format!("{header}.{FAR_FUTURE}.c2ln");

    let options = DecodeOptions::new().algorithms(["HS256"]).secret("secret");
    let err = decode(&token, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypMismatch);
    assert_eq!(err.stage(), Some(Stage::HeaderDecode));

    // lower case is the same media type
    let header = base64::encode_url(r#"{"alg":"HS256","typ":"jwt"}"#);
    let token = format!("{header}.{FAR_FUTURE}.c2ln");
    assert_eq!(
        decode(&token, &options).unwrap_err().kind(),
        ErrorKind::InvalidSignature
    );

    assert!(decode(&token, &options.verify(false)).is_ok());
    Ok(())
}

#[test]
fn header_without_alg() {
    let header = base64::encode_url(r#"{"typ":"JWT"}"#);
    let token = format!("{header}.{FAR_FUTURE}.c2ln");

    for verify in [true, false] {
        let options = DecodeOptions::new()
            .algorithms(["HS256"])
            .secret("secret")
            .verify(verify);
        let decoded = decode_with_status(&token, &options);
        assert_eq!(decoded.kind(), Some(ErrorKind::AlgHeaderMissing), "verify: {verify}");
        assert_eq!(
            decoded.error.as_ref().and_then(|e| e.stage()),
            Some(Stage::HeaderDecode)
        );
    }
}

#[test]
fn header_fields_survive() -> TestResult {
    let mut jwt = jose_jwt::JsonWebToken::builder()
        .algorithm(Algorithm::HS256)
        .secret("secret")
        .header("kid", "key-1")
        .claim("sub", "admin")
        .build();
    jwt.add_claim("exp", 4513863371_u64);
    let token = jwt.signature()?;

    let decoded = decode(&token, &DecodeOptions::new().algorithms(["HS256"]).secret("secret"))?;
    assert_eq!(decoded.header(), jwt.header());
    assert_eq!(decoded.payload(), jwt.payload());
    Ok(())
}

#[test]
fn duplicate_claims_are_rejected() {
    let payload = jose_jwt::base64::encode_url(r#"{"sub":"a","SUB":"b"}"#);
    let token = format!("{NONE_HEADER}.{payload}.");

    let decoded = decode_with_status(&token, &DecodeOptions::new().algorithms(["none"]));
    assert_eq!(decoded.kind(), Some(ErrorKind::DuplicateClaims));
}
