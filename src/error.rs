use thiserror::Error;

/// Errors produced while parsing Tibia.com content or talking to the site.
#[derive(Error, Debug)]
pub enum Error {
    /// The content does not belong to the section being parsed.
    ///
    /// This is distinct from a valid page with no results: it usually means the wrong URL
    /// was fetched, or the site's markup changed.
    #[error("invalid content: {0}")]
    InvalidContent(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Tibia.com answers with 403 when it is rate limiting the client.
    #[error("403 Forbidden: might be getting rate-limited")]
    Forbidden,
    #[error("Tibia.com is down for maintenance")]
    Maintenance,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent(message.into())
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether the error came from the transport rather than from the content.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Forbidden | Self::Maintenance | Self::Network(_) | Self::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
