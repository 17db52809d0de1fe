use std::fmt;

#[derive(serde::Deserialize, Clone)]
pub struct AnthropicConfig {
    pub api_key: Box<str>,
    pub model: Box<str>,
    pub max_tokens: u32,
    pub base_url: Box<str>,
    pub timeout_secs: u64,
}

impl fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
