//! HTTP layer for Frontdesk.
//!
//! Axum-based JSON API: the public chat surface (`/chat/session`,
//! `/chat/messages`), the cookie-gated admin surface (`/chat/sessions`,
//! history clearing) and the login/logout endpoints that issue the cookie.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;

#[cfg(test)]
mod tests;
