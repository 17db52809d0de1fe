#[derive(serde::Deserialize, Debug, Clone)]
pub struct FortuneConfig {
    pub fallback_text: String,
}
