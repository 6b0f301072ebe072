use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `TaskBridge`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum BridgeError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Todo backend client ─────────────────────────────────────────────
    #[error("client: {0}")]
    Client(#[from] ClientError),

    // ── Gateway ─────────────────────────────────────────────────────────
    #[error("gateway: {0}")]
    Gateway(String),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Todo backend client errors ─────────────────────────────────────────────

/// Failure taxonomy for calls against the remote Todo API.
///
/// `Unauthenticated` is raised locally before any network I/O when no bearer
/// credential was supplied. `Transport` covers connection and timeout
/// failures; `Remote` carries the backend's own error detail for any
/// non-success HTTP status. The client never retries — every failure is
/// reported once to the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("you must be signed in to manage tasks")]
    Unauthenticated,

    #[error("network error: {0}")]
    Transport(String),

    #[error("backend error ({status}): {detail}")]
    Remote { status: u16, detail: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Transport(format!("request timed out: {err}"))
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, BridgeError>;
