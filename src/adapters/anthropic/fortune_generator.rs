use error_stack::report;
use tracing::instrument;

use crate::adapters::config::anthropic_config::AnthropicConfig;
use crate::application::fortune::prompt::PromptTemplate;
use crate::domain::zodiac::{Category, Subject};
use crate::ports::fortune_generator::{FortuneGenerator, GenerationError};

use super::client::AnthropicClient;
use super::types::MessageRequest;

/// Writes fortunes with a Claude model.
#[derive(Debug)]
pub struct AnthropicFortuneGenerator {
    client: AnthropicClient,
    model: Box<str>,
    max_tokens: u32,
    prompt: PromptTemplate,
}

impl AnthropicFortuneGenerator {
    pub fn new(
        config: &AnthropicConfig,
        prompt: PromptTemplate,
    ) -> error_stack::Result<Self, GenerationError> {
        Ok(Self {
            client: AnthropicClient::new(config)?,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            prompt,
        })
    }

    fn request(&self, subject: Subject, category: Category) -> MessageRequest {
        MessageRequest::user_prompt(
            &self.model,
            self.max_tokens,
            self.prompt.render(subject, category),
        )
    }
}

#[async_trait::async_trait]
impl FortuneGenerator for AnthropicFortuneGenerator {
    #[instrument(skip(self), name = "AnthropicFortuneGenerator::generate")]
    async fn generate(
        &self,
        subject: Subject,
        category: Category,
    ) -> error_stack::Result<String, GenerationError> {
        let response = self
            .client
            .create_message(&self.request(subject, category))
            .await?;

        response.text().ok_or_else(|| {
            report!(GenerationError::EmptyResponse).attach_printable(format!(
                "stop_reason: {:?}",
                response.stop_reason
            ))
        })
    }
}
