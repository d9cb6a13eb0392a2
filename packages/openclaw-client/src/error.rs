use thiserror::Error;

/// Error type for all gateway operations.
///
/// Callers treat this as a single failure kind: connectivity problems,
/// rejected auth, and undecodable responses all land here. The reconciler
/// does not branch on sub-variants.
#[derive(Debug, Error)]
pub enum OpenClawError {
    /// Transport-level failure (connect, timeout, body decode).
    #[error("gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway answered with a non-success status.
    #[error("gateway API error {status}: {message}")]
    Api { status: u16, message: String },
}

pub type Result<T, E = OpenClawError> = std::result::Result<T, E>;
