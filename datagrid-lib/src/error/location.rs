//! Location parsing errors

/// Errors that can occur when parsing a location.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// The href could not be parsed as an absolute or relative URL.
    #[error("Invalid URL '{href}': {source}")]
    InvalidUrl {
        /// The href that failed to parse.
        href: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

impl LocationError {
    /// Creates a new invalid URL error.
    pub fn invalid_url(href: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            href: href.into(),
            source,
        }
    }

    /// The href that failed to parse.
    pub fn href(&self) -> &str {
        match self {
            Self::InvalidUrl { href, .. } => href,
        }
    }
}
