use thiserror::Error;

/// Outcome taxonomy for catalog lookups.
///
/// `NotFound` and `Unavailable` are consumed by the chat pipeline and turned
/// into in-band messages; `Config` means the service cannot function at all
/// and is the only variant that escapes the chat framing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("set `{set_num}` was not found in the catalog")]
    NotFound { set_num: String },
    #[error("catalog service unavailable: {0}")]
    Unavailable(String),
    #[error("catalog access is not configured: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn not_found(set_num: impl Into<String>) -> Self {
        Self::NotFound { set_num: set_num.into() }
    }

    /// Chat-facing rendering of the failure, used when the error is folded
    /// into a `ChatResult` rather than surfaced as a fault.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { set_num } => format!(
                "I couldn't find set {set_num} in the catalog. \
                 Double-check the set number and try again."
            ),
            Self::Unavailable(detail) => format!(
                "I couldn't reach the set catalog right now ({detail}). \
                 Please try again in a moment."
            ),
            Self::Config(detail) => format!("The catalog service is not configured: {detail}"),
        }
    }
}
