//! Admin cookie authentication.
//!
//! One shared secret distinguishes admin callers from anonymous ones.
//! After a successful password challenge the server sets an http-only,
//! SameSite=Lax cookie holding `<expiry-unix>.<signature>` where the
//! signature is HMAC-SHA256 over `"admin:<expiry>"` keyed by the admin
//! secret. The gate has exactly two transitions: password match sets the
//! cookie, explicit logout (or passive expiry) clears it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::http::error::AppError;
use crate::state::AppState;
use secrecy::ExposeSecret;

type HmacSha256 = Hmac<Sha256>;

/// Cookie name for the admin gate.
pub const COOKIE_NAME: &str = "fdesk_admin";

/// Fixed multi-day cookie lifetime (7 days).
pub const COOKIE_TTL_SECS: i64 = 7 * 24 * 3600;

/// Authenticated admin marker. Extracting this validates the cookie.
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // No secret configured means nothing can ever validate: closed.
        let Some(secret) = &state.config.admin.secret else {
            return Err(AppError::Unauthorized("unauthorized".to_string()));
        };

        let value = cookie_value(parts)
            .ok_or_else(|| AppError::Unauthorized("unauthorized".to_string()))?;

        if verify_cookie(secret.expose_secret(), &value, Utc::now().timestamp()) {
            Ok(AdminSession)
        } else {
            Err(AppError::Unauthorized("unauthorized".to_string()))
        }
    }
}

/// Pull the admin cookie's value out of the `Cookie` header.
fn cookie_value(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(axum::http::header::COOKIE)?;
    let raw = header.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == COOKIE_NAME).then(|| value.to_string())
    })
}

/// Mint a cookie value valid for [`COOKIE_TTL_SECS`] from `now_unix`.
pub fn issue_cookie_value(secret: &str, now_unix: i64) -> String {
    let expiry = now_unix + COOKIE_TTL_SECS;
    format!("{expiry}.{}", sign(secret, expiry))
}

/// Check signature and expiry of a presented cookie value.
pub fn verify_cookie(secret: &str, value: &str, now_unix: i64) -> bool {
    let Some((expiry_str, signature_hex)) = value.split_once('.') else {
        return false;
    };
    let Ok(expiry) = expiry_str.parse::<i64>() else {
        return false;
    };
    if expiry <= now_unix {
        return false;
    }
    let Ok(signature) = hex_decode(signature_hex) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(format!("admin:{expiry}").as_bytes());
    mac.verify_slice(&signature).is_ok()
}

/// `Set-Cookie` header establishing the admin session.
pub fn set_cookie_header(value: &str) -> String {
    format!("{COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={COOKIE_TTL_SECS}")
}

/// `Set-Cookie` header clearing the admin session.
pub fn clear_cookie_header() -> String {
    format!("{COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Constant-time comparison of the password challenge against the secret.
pub fn verify_password(secret: &str, provided: &str) -> bool {
    constant_time_eq(secret.as_bytes(), provided.as_bytes())
}

fn sign(secret: &str, expiry: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(format!("admin:{expiry}").as_bytes());
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn hex_decode(s: &str) -> Result<Vec<u8>, ()> {
    if s.len() % 2 != 0 {
        return Err(());
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_cookie_verifies() {
        let now = 1_700_000_000;
        let value = issue_cookie_value(SECRET, now);
        assert!(verify_cookie(SECRET, &value, now));
        assert!(verify_cookie(SECRET, &value, now + COOKIE_TTL_SECS - 1));
    }

    #[test]
    fn expired_cookie_rejected() {
        let now = 1_700_000_000;
        let value = issue_cookie_value(SECRET, now);
        assert!(!verify_cookie(SECRET, &value, now + COOKIE_TTL_SECS));
    }

    #[test]
    fn tampered_signature_rejected() {
        let now = 1_700_000_000;
        let value = issue_cookie_value(SECRET, now);
        let mut tampered = value.clone();
        tampered.pop();
        tampered.push(if value.ends_with('0') { '1' } else { '0' });
        assert!(!verify_cookie(SECRET, &tampered, now));
    }

    #[test]
    fn forged_expiry_rejected() {
        let now = 1_700_000_000;
        let value = issue_cookie_value(SECRET, now);
        let signature = value.split_once('.').unwrap().1.to_string();
        let forged = format!("{}.{signature}", now + COOKIE_TTL_SECS * 10);
        assert!(!verify_cookie(SECRET, &forged, now));
    }

    #[test]
    fn wrong_secret_rejected() {
        let now = 1_700_000_000;
        let value = issue_cookie_value(SECRET, now);
        assert!(!verify_cookie("other-secret", &value, now));
    }

    #[test]
    fn garbage_values_rejected() {
        let now = 1_700_000_000;
        assert!(!verify_cookie(SECRET, "", now));
        assert!(!verify_cookie(SECRET, "no-dot-here", now));
        assert!(!verify_cookie(SECRET, "abc.def", now));
        assert!(!verify_cookie(SECRET, "123.zz", now));
    }

    #[test]
    fn password_check_is_exact() {
        assert!(verify_password("hunter2", "hunter2"));
        assert!(!verify_password("hunter2", "hunter"));
        assert!(!verify_password("hunter2", "hunter3"));
        assert!(!verify_password("hunter2", ""));
    }
}
