//! Where a request came from, as far as link composition cares.

/// Scheme and host of the inbound request.
///
/// Used to build share links when no public base URL is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    /// `http` or `https`.
    pub scheme: String,
    /// Host header value, including any port.
    pub host: String,
}

impl RequestOrigin {
    /// Creates a new request origin.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// `scheme://host`.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}
