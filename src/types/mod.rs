// ABOUTME: Domain types shared by rendering, authentication, and deployment.
// ABOUTME: Profile data, GitHub identity, derived repository names, and site URLs.

mod identity;
mod profile;
mod target_name;
mod urls;

pub use identity::{Credential, Identity};
pub use profile::{Experience, Profile, ProfileError, Project};
pub use target_name::{DEFAULT_SUFFIX, TargetName, slugify};
pub use urls::{SiteUrls, hosting_url, repository_url};
