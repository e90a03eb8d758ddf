use crate::error::Result;
use async_trait::async_trait;

/// The HTTP layer used to fetch pages from Tibia.com.
///
/// Implementations map a 403 response to [`Error::Forbidden`](crate::Error::Forbidden) and any
/// other failure to a network error, so callers can tell rate limiting apart.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a page and return its body.
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<String>;

    /// POST form data and return the response body.
    async fn post(&self, url: &str, form: &[(&str, &str)]) -> Result<String>;
}
