// ABOUTME: Error types for the OAuth authorization flow.
// ABOUTME: Covers nonce verification, code exchange, identity fetch, and state storage.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The `state` returned on the redirect does not match the stored nonce.
    #[error("GitHub authorization failed due to security check (state mismatch). Please try again.")]
    StateMismatch,

    /// No authorization was started, or its nonce was already consumed.
    #[error("no pending authorization; run `promptfolio login` first")]
    NoPendingAuthorization,

    #[error("failed to exchange authorization code: {0}")]
    ExchangeFailed(String),

    #[error("identity provider error: {0}")]
    Provider(String),

    #[error("no access token received")]
    MissingToken,

    #[error("failed to fetch identity: {0}")]
    IdentityFailed(String),

    #[error("failed to generate state nonce: {0}")]
    Nonce(String),

    #[error("authorization state store error: {0}")]
    Store(String),
}
