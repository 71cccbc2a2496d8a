use crate::error::{BotError, Result};
use crate::http;
use crate::models::{CompletionMessage, CompletionOptions, CompletionRequest, CompletionResponse};
use crate::storage::InstructionStore;
use async_trait::async_trait;
use tracing::{debug, error};

const COMPLETION_API_URL: &str = "https://llm.api.cloud.yandex.net/foundationModels/v1/completion";
const SERVICE: &str = "completion";
const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u32 = 1000;

/// A hosted language model that continues a single user prompt.
#[async_trait(?Send)]
pub trait LanguageModel {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

pub struct YandexGpt {
    api_key: String,
    model_uri: String,
}

impl YandexGpt {
    pub fn new(api_key: impl Into<String>, model_uri: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_uri: model_uri.into(),
        }
    }

    fn request<'a>(&self, prompt: &'a str) -> CompletionRequest<'a> {
        CompletionRequest {
            model_uri: self.model_uri.clone(),
            completion_options: CompletionOptions {
                stream: false,
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS,
            },
            messages: vec![CompletionMessage {
                role: "user",
                text: prompt,
            }],
        }
    }
}

#[async_trait(?Send)]
impl LanguageModel for YandexGpt {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = self.request(prompt);
        let response: CompletionResponse =
            http::post_json(SERVICE, COMPLETION_API_URL, &self.api_key, &body).await?;

        response
            .result
            .alternatives
            .into_iter()
            .next()
            .map(|alternative| alternative.message.text)
            .ok_or_else(|| BotError::malformed(SERVICE, "no alternatives"))
    }
}

pub fn build_prompt(instructions: &str, question: &str) -> String {
    format!("{}\nВопрос: {}\nОтвет:", instructions, question)
}

/// Asks the model to answer `question` using the stored instructions.
///
/// A storage failure aborts with an error. A model failure is logged and
/// reported as `Ok(None)`.
pub async fn find_answer(
    store: &dyn InstructionStore,
    model: &dyn LanguageModel,
    question: &str,
) -> Result<Option<String>> {
    let instructions = store.instructions().await?;
    let prompt = build_prompt(&instructions, question);
    debug!(prompt_chars = prompt.chars().count(), "requesting completion");

    match model.complete(&prompt).await {
        Ok(answer) => Ok(Some(answer.trim().to_string())),
        Err(e) => {
            error!(error = %e, "YandexGPT API error");
            Ok(None)
        }
    }
}
