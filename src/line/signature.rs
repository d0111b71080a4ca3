//! Webhook signature verification.
//!
//! The platform signs each request body with HMAC-SHA256 keyed by the
//! channel secret and sends the base64 digest in `X-Line-Signature`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{AppError, Result};

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &str) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| AppError::Signature(format!("invalid channel secret: {err}")))
}

/// Compute the base64 signature of `body`.
///
/// # Errors
///
/// Returns `AppError::Signature` if the HMAC cannot be keyed.
pub fn sign(secret: &str, body: &[u8]) -> Result<String> {
    let mut mac = mac(secret)?;
    mac.update(body);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check `signature` against `body` in constant time.
///
/// # Errors
///
/// Returns `AppError::Signature` if the signature is not valid base64 or
/// does not match.
pub fn verify(secret: &str, body: &[u8], signature: &str) -> Result<()> {
    let expected = STANDARD
        .decode(signature.trim())
        .map_err(|err| AppError::Signature(format!("signature is not base64: {err}")))?;
    let mut mac = mac(secret)?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| AppError::Signature("signature mismatch".into()))
}
