// ABOUTME: Command module aggregator for the promptfolio CLI.
// ABOUTME: Re-exports deploy, login/callback, and offline preview handlers.

mod deploy;
mod login;
mod preview;

pub use deploy::deploy_with_token;
pub use login::{callback, login};
pub use preview::{render_page, status};
