use crate::error::{BotError, Result};
use crate::http;
use crate::models::GetFileResponse;
use async_trait::async_trait;
use tracing::debug;
use worker::Url;

// Telegram API constants
const TELEGRAM_API_BASE: &str = "https://api.telegram.org/bot";
const TELEGRAM_FILE_BASE: &str = "https://api.telegram.org/file/bot";
const SERVICE: &str = "telegram";

/// The chat platform as seen by the bot: file lookup, download and replies.
#[async_trait(?Send)]
pub trait ChatPlatform {
    /// Resolves a `file_id` to a time-limited download URL.
    async fn file_url(&self, file_id: &str) -> Result<String>;

    async fn download(&self, url: &str) -> Result<Vec<u8>>;

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
}

/// Bot API client bound to one bot token.
pub struct TelegramClient {
    token: String,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = format!("{}{}/{}", TELEGRAM_API_BASE, self.token, method);
        Url::parse_with_params(&base, params).map_err(|e| BotError::malformed(SERVICE, e))
    }

    /// Builds the file download URL from a `getFile` reply.
    fn download_url(&self, file: GetFileResponse) -> Result<String> {
        let file_path = file
            .result
            .and_then(|f| f.file_path)
            .ok_or(BotError::MissingField("result.file_path"))?;

        Ok(format!("{}{}/{}", TELEGRAM_FILE_BASE, self.token, file_path))
    }
}

#[async_trait(?Send)]
impl ChatPlatform for TelegramClient {
    async fn file_url(&self, file_id: &str) -> Result<String> {
        let url = self.method_url("getFile", &[("file_id", file_id)])?;
        let mut response = http::get(SERVICE, url).await?;
        let file: GetFileResponse = response
            .json()
            .await
            .map_err(|e| BotError::malformed(SERVICE, e))?;
        self.download_url(file)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url).map_err(|e| BotError::malformed(SERVICE, e))?;
        let mut response = http::get(SERVICE, url).await?;
        let bytes = response.bytes().await?;
        debug!(size = bytes.len(), "downloaded photo");
        Ok(bytes)
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let chat_id = chat_id.to_string();
        let params = [("chat_id", chat_id.as_str()), ("text", text)];
        let url = self.method_url("sendMessage", &params)?;
        http::get(SERVICE, url).await?;
        Ok(())
    }
}
