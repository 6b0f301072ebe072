pub mod http;
pub mod todo;

pub use todo::TodoClient;

use crate::error::ClientError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Opaque bearer credential forwarded to the Todo backend.
///
/// Supplied per incoming chat request and discarded afterwards — never
/// stored, inspected, or parsed by this crate.
#[derive(Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Extract the token from an `Authorization: Bearer <token>` header
    /// value. Missing or malformed headers yield an empty token, which the
    /// client rejects before any network call.
    pub fn from_bearer_header(header: Option<&str>) -> Self {
        let token = header
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or("")
            .trim();
        Self(token.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the credential itself.
        if self.0.is_empty() {
            write!(f, "AuthToken(empty)")
        } else {
            write!(f, "AuthToken([redacted])")
        }
    }
}

/// A task as owned by the remote Todo service. The core only ever holds
/// transient per-request snapshots of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}

/// Server-side status filter for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn as_query_value(self) -> &'static str {
        match self {
            StatusFilter::Completed => "completed",
            StatusFilter::Pending => "pending",
        }
    }
}

/// Seam over the remote Todo CRUD API.
///
/// `TodoClient` is the production implementation; dispatcher tests swap in
/// counting mocks to prove which endpoints were (not) called.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn create(&self, auth: &AuthToken, title: &str) -> Result<Task, ClientError>;

    async fn list(
        &self,
        auth: &AuthToken,
        filter: Option<StatusFilter>,
    ) -> Result<Vec<Task>, ClientError>;

    async fn complete(&self, auth: &AuthToken, id: i64) -> Result<Task, ClientError>;

    async fn update(&self, auth: &AuthToken, id: i64, new_title: &str)
    -> Result<Task, ClientError>;

    async fn delete(&self, auth: &AuthToken, id: i64) -> Result<(), ClientError>;
}
