// ABOUTME: OAuth continuity across the browser redirect.
// ABOUTME: Injected key-value store, CSRF nonce handling, and code exchange hand-off.

mod error;
mod flow;
mod store;

pub use error::AuthError;
pub use flow::{
    Authorized, PROFILE_KEY, PendingDeployment, STATE_KEY, begin_authorization,
    complete_authorization, generate_nonce,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, STORE_FILENAME};
