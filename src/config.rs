//! Session configuration: endpoint locations, storage keys, contact link.
//!
//! Everything defaults to the same-origin layout the billing UI is served
//! with, so the browser build normally uses [`SessionConfig::default`].

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_LOGIN_PATH: &str = "/api/login";
pub const DEFAULT_PROJECTS_PATH: &str = "/api/projects";
pub const DEFAULT_CONTACT_URL: &str = "https://cancercollaboratory.org/contact-us";

/// Keys the session is persisted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub token: String,
    pub username: String,
    pub roles: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self { token: "token".to_owned(), username: "username".to_owned(), roles: "roles".to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Prefix for both endpoints. Empty means same origin.
    pub api_base_url: String,
    pub login_path: String,
    pub projects_path: String,
    /// Shown to users who authenticate but hold no billing role.
    pub contact_url: String,
    pub keys: StorageKeys,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            projects_path: DEFAULT_PROJECTS_PATH.to_owned(),
            contact_url: DEFAULT_CONTACT_URL.to_owned(),
            keys: StorageKeys::default(),
        }
    }
}

impl SessionConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `BILLING_API_BASE_URL`: default empty (same origin)
    /// - `BILLING_LOGIN_PATH`: default `/api/login`
    /// - `BILLING_PROJECTS_PATH`: default `/api/projects`
    /// - `BILLING_CONTACT_URL`: default collaboratory contact page
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Blank values count as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_base_url: get("BILLING_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.api_base_url),
            login_path: get("BILLING_LOGIN_PATH").map_or(defaults.login_path, |v| normalize_path(&v)),
            projects_path: get("BILLING_PROJECTS_PATH").map_or(defaults.projects_path, |v| normalize_path(&v)),
            contact_url: get("BILLING_CONTACT_URL").unwrap_or(defaults.contact_url),
            keys: defaults.keys,
        }
    }

    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.login_path)
    }

    #[must_use]
    pub fn projects_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.projects_path)
    }
}

fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('/') { trimmed.to_owned() } else { format!("/{trimmed}") }
}
