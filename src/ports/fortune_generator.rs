use thiserror::Error;

use crate::domain::zodiac::{Category, Subject};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    #[error("failed to build the generation client")]
    ClientSetup,
    #[error("generation service is unreachable")]
    Transport,
    #[error("generation request timed out")]
    Timeout,
    #[error("generation service rejected the API key")]
    InvalidApiKey,
    #[error("generation service is rate limiting requests")]
    RateLimited,
    #[error("generation service answered with status {status}")]
    Status { status: u16 },
    #[error("generation service returned a malformed response")]
    MalformedResponse,
    #[error("generation service returned no text")]
    EmptyResponse,
}

#[async_trait::async_trait]
pub trait FortuneGenerator: Send + Sync {
    /// Generates a short fortune for one subject and category. Exactly one
    /// request is sent to the generation service per call. The returned text
    /// is trimmed and never empty.
    async fn generate(
        &self,
        subject: Subject,
        category: Category,
    ) -> error_stack::Result<String, GenerationError>;
}
