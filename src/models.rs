use serde::{Deserialize, Serialize};

// ===== Telegram API Models =====
#[derive(Debug, Deserialize, Serialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Message {
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub photo: Option<Vec<PhotoSize>>,
}

impl Message {
    /// A `{}` message carries nothing to act on and is handled like no message at all.
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.text.is_none() && self.photo.is_none()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
}

/// One resolution of a photo. Telegram lists sizes from smallest to largest.
#[derive(Debug, Deserialize, Serialize)]
pub struct PhotoSize {
    pub file_id: String,
}

#[derive(Deserialize)]
pub struct GetFileResponse {
    #[serde(default)]
    pub result: Option<TelegramFile>,
}

#[derive(Deserialize)]
pub struct TelegramFile {
    #[serde(default)]
    pub file_path: Option<String>,
}

// ===== Yandex Vision OCR Models =====
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrRequest<'a> {
    pub language_codes: Vec<&'a str>,
    pub model: &'a str,
    pub content: &'a str,
}

#[derive(Deserialize)]
pub struct OcrResponse {
    pub result: OcrResult,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResult {
    pub text_annotation: TextAnnotation,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    #[serde(default)]
    pub full_text: String,
}

// ===== YandexGPT Models =====
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest<'a> {
    pub model_uri: String,
    pub completion_options: CompletionOptions,
    pub messages: Vec<CompletionMessage<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Serialize)]
pub struct CompletionMessage<'a> {
    pub role: &'a str,
    pub text: &'a str,
}

#[derive(Deserialize)]
pub struct CompletionResponse {
    pub result: CompletionResult,
}

#[derive(Deserialize)]
pub struct CompletionResult {
    pub alternatives: Vec<Alternative>,
}

#[derive(Deserialize)]
pub struct Alternative {
    pub message: AlternativeMessage,
}

#[derive(Deserialize)]
pub struct AlternativeMessage {
    pub text: String,
}
