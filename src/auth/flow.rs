// ABOUTME: Two halves of the OAuth round trip: before and after the browser redirect.
// ABOUTME: Persists a CSRF nonce and profile snapshot, then verifies and consumes them once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuthError, KeyValueStore};
use crate::github::{IdentityProvider, Session};
use crate::types::Profile;

/// Store key for the CSRF nonce sent as the OAuth `state` parameter.
pub const STATE_KEY: &str = "oauth_state";
/// Store key for the profile snapshot that survives the redirect.
pub const PROFILE_KEY: &str = "pending_profile";

const NONCE_BYTES: usize = 16;

/// Profile captured before leaving for the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingDeployment {
    pub profile: Profile,
    pub requested_at: DateTime<Utc>,
}

/// Result of a verified callback.
#[derive(Debug)]
pub struct Authorized {
    pub session: Session,
    /// `None` when no snapshot was stored or it could not be read back.
    pub pending: Option<PendingDeployment>,
}

/// Random hex nonce for the OAuth `state` parameter.
pub fn generate_nonce() -> Result<String, AuthError> {
    let mut bytes = [0u8; NONCE_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| AuthError::Nonce(e.to_string()))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

/// Record a fresh nonce and the profile, and return the URL to send the user to.
pub fn begin_authorization<S, P>(
    store: &S,
    provider: &P,
    profile: &Profile,
) -> Result<String, AuthError>
where
    S: KeyValueStore + ?Sized,
    P: IdentityProvider + ?Sized,
{
    let nonce = generate_nonce()?;
    let pending = PendingDeployment {
        profile: profile.clone(),
        requested_at: Utc::now(),
    };
    let snapshot = serde_json::to_string(&pending).map_err(|e| AuthError::Store(e.to_string()))?;

    store.set(STATE_KEY, &nonce)?;
    store.set(PROFILE_KEY, &snapshot)?;
    tracing::debug!("stored authorization nonce and profile snapshot");

    Ok(provider.authorize_url(&nonce))
}

/// Verify the returned `state`, consume the stored context, and exchange `code`.
///
/// The nonce and snapshot are removed before anything else happens, whether or
/// not verification succeeds. On a mismatch the identity provider is never
/// contacted.
pub async fn complete_authorization<S, P>(
    store: &S,
    provider: &P,
    code: &str,
    returned_state: &str,
) -> Result<Authorized, AuthError>
where
    S: KeyValueStore + ?Sized,
    P: IdentityProvider + ?Sized,
{
    let stored_state = store.get(STATE_KEY)?;
    let snapshot = store.get(PROFILE_KEY)?;
    store.remove(STATE_KEY)?;
    store.remove(PROFILE_KEY)?;

    let Some(expected) = stored_state else {
        return Err(AuthError::NoPendingAuthorization);
    };
    if expected != returned_state {
        tracing::warn!("authorization state mismatch; discarding pending deployment");
        return Err(AuthError::StateMismatch);
    }

    let pending = snapshot.and_then(|json| match serde_json::from_str(&json) {
        Ok(pending) => Some(pending),
        Err(error) => {
            tracing::warn!(%error, "stored profile snapshot unreadable");
            None
        }
    });

    let session = provider.exchange(code).await?;
    Ok(Authorized { session, pending })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_is_hex_and_unique() {
        let a = generate_nonce().unwrap();
        let b = generate_nonce().unwrap();
        assert_eq!(a.len(), NONCE_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
