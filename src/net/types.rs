//! Wire DTOs for the login and projects endpoints.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Body of `POST /api/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The parts of a login response the session cares about.
///
/// Status handling lives in the session store, so the transport hands back
/// every status instead of turning non-2xx into an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginResponse {
    pub status: u16,
    /// Value of the `authorization` response header.
    pub authorization: Option<String>,
    pub body: String,
}

/// Error body returned with HTTP 403.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// A project (tenant) the caller can see, with the caller's roles in it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Project {
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Result of `GET /api/projects`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
    /// Renewed session token from the `authorization` response header.
    pub renewed_token: Option<String>,
}
