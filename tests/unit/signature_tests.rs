//! Unit tests for webhook signature verification.

use reply_bot::line::signature::{sign, verify};
use reply_bot::AppError;

const SECRET: &str = "channel-secret";
const BODY: &[u8] = br#"{"destination":"U1","events":[]}"#;

#[test]
fn signature_round_trips() {
    let sig = sign(SECRET, BODY).expect("sign");
    verify(SECRET, BODY, &sig).expect("valid signature");
}

#[test]
fn known_vector_matches() {
    // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog"), base64.
    let sig = sign("key", b"The quick brown fox jumps over the lazy dog").expect("sign");
    assert_eq!(sig, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
}

#[test]
fn tampered_body_is_rejected() {
    let sig = sign(SECRET, BODY).expect("sign");
    let err = verify(SECRET, br#"{"destination":"U2","events":[]}"#, &sig).unwrap_err();
    assert!(matches!(err, AppError::Signature(_)));
}

#[test]
fn wrong_secret_is_rejected() {
    let sig = sign("other-secret", BODY).expect("sign");
    assert!(verify(SECRET, BODY, &sig).is_err());
}

#[test]
fn non_base64_signature_is_rejected() {
    let err = verify(SECRET, BODY, "not base64 !!").unwrap_err();
    assert!(err.to_string().contains("not base64"));
}

#[test]
fn empty_signature_is_rejected() {
    assert!(verify(SECRET, BODY, "").is_err());
}
