use crate::error::{BotError, Result};
use crate::http;
use crate::messages::BAD_PHOTO_MESSAGE;
use crate::models::{OcrRequest, OcrResponse};
use crate::telegram::ChatPlatform;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

const OCR_API_URL: &str = "https://ocr.api.cloud.yandex.net/ocr/v1/recognizeText";
const SERVICE: &str = "ocr";

/// Turns a base64-encoded image into text.
#[async_trait(?Send)]
pub trait TextRecognizer {
    async fn recognize(&self, image_base64: &str) -> Result<String>;
}

/// Yandex Vision OCR, any language, full-page layout model.
pub struct YandexOcr {
    api_key: String,
}

impl YandexOcr {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait(?Send)]
impl TextRecognizer for YandexOcr {
    async fn recognize(&self, image_base64: &str) -> Result<String> {
        let body = OcrRequest {
            language_codes: vec!["*"],
            model: "page",
            content: image_base64,
        };
        let response: OcrResponse =
            http::post_json(SERVICE, OCR_API_URL, &self.api_key, &body).await?;
        Ok(response.result.text_annotation.full_text)
    }
}

/// Recognizes the text on a Telegram photo.
///
/// Never fails: every problem along the way is logged and replaced by
/// [`BAD_PHOTO_MESSAGE`], which the caller then treats like any other question.
pub async fn recognize_text(
    chat: &dyn ChatPlatform,
    ocr: &dyn TextRecognizer,
    file_id: &str,
) -> String {
    match try_recognize(chat, ocr, file_id).await {
        Ok(text) => text,
        Err(e) => {
            warn!(file_id, error = %e, "could not recognize photo");
            BAD_PHOTO_MESSAGE.to_string()
        }
    }
}

async fn try_recognize(
    chat: &dyn ChatPlatform,
    ocr: &dyn TextRecognizer,
    file_id: &str,
) -> Result<String> {
    let url = chat.file_url(file_id).await?;
    let image = chat.download(&url).await?;
    let encoded = STANDARD.encode(image);

    let text = ocr.recognize(&encoded).await?;
    if text.trim().is_empty() {
        return Err(BotError::malformed(SERVICE, "empty fullText"));
    }
    debug!(file_id, chars = text.chars().count(), "photo recognized");
    Ok(text)
}
