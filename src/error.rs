use thiserror::Error;

// ─── Fetch cycle errors ──────────────────────────────────────────────────────

/// Error hierarchy for `sidefetch`.
///
/// Every variant is terminal for the current fetch only. The widget clears its
/// loading state, surfaces the message, and stays usable. Binary and config
/// code continue to use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum FetchError {
    // ── Validation (checked before any network activity) ────────────────
    #[error("{0}")]
    InvalidEndpoint(String),

    #[error("unsupported HTTP method: {0}")]
    InvalidMethod(String),

    // ── Transport / decode ──────────────────────────────────────────────
    #[error("{0}")]
    RequestFailed(String),

    // ── Admission ───────────────────────────────────────────────────────
    #[error("a request is already in flight")]
    Busy,

    // ── Collaborators ───────────────────────────────────────────────────
    #[error("settings store: {0}")]
    Settings(String),

    #[error("context: {0}")]
    Context(String),
}

impl FetchError {
    /// Message shown to the operator in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::RequestFailed(message) => format!("Failed to fetch data: {message}"),
            other => other.to_string(),
        }
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, FetchError>;
