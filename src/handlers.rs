use crate::config::Config;
use crate::error::{BotError, Result};
use crate::gpt::{self, LanguageModel, YandexGpt};
use crate::messages::{NO_ANSWER_MESSAGE, START_MESSAGE, UNKNOWN_REQUEST_MESSAGE};
use crate::models::{Message, Update};
use crate::ocr::{self, TextRecognizer, YandexOcr};
use crate::storage::{BucketInstructions, InstructionStore};
use crate::telegram::{ChatPlatform, TelegramClient};
use tracing::{info, warn};
use worker::Env;

/// Acknowledgment returned to the webhook caller. Always HTTP 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    Ok,
    NoMessage,
}

impl Ack {
    pub const STATUS_CODE: u16 = 200;

    pub fn body(self) -> &'static str {
        match self {
            Ack::Ok => "OK",
            Ack::NoMessage => "No message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

impl Command {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/start" => Some(Command::Start),
            "/help" => Some(Command::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Command(Command),
    Question(String),
    /// Only the largest size of the photo is kept.
    Photo { file_id: String },
    Unsupported,
}

/// A Telegram message reduced to what the bot acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub kind: MessageKind,
}

impl TryFrom<Message> for IncomingMessage {
    type Error = BotError;

    fn try_from(message: Message) -> Result<Self> {
        let chat_id = message
            .from
            .map(|user| user.id)
            .ok_or(BotError::MissingField("message.from.id"))?;

        let kind = if let Some(text) = message.text {
            match Command::parse(&text) {
                Some(command) => MessageKind::Command(command),
                None => MessageKind::Question(text),
            }
        } else if let Some(photo) = message.photo.and_then(|sizes| sizes.into_iter().last()) {
            MessageKind::Photo {
                file_id: photo.file_id,
            }
        } else {
            MessageKind::Unsupported
        };

        Ok(Self { chat_id, kind })
    }
}

/// The bot wired to its four collaborators.
pub struct ExamBot {
    chat: Box<dyn ChatPlatform>,
    ocr: Box<dyn TextRecognizer>,
    model: Box<dyn LanguageModel>,
    instructions: Box<dyn InstructionStore>,
}

impl ExamBot {
    pub fn new(
        chat: Box<dyn ChatPlatform>,
        ocr: Box<dyn TextRecognizer>,
        model: Box<dyn LanguageModel>,
        instructions: Box<dyn InstructionStore>,
    ) -> Self {
        Self {
            chat,
            ocr,
            model,
            instructions,
        }
    }

    /// Builds the production bot: Telegram, Yandex Vision OCR, YandexGPT and R2.
    pub fn from_config(env: &Env, config: &Config) -> Result<Self> {
        Ok(Self::new(
            Box::new(TelegramClient::new(config.bot_token.clone())),
            Box::new(YandexOcr::new(config.api_key.clone())),
            Box::new(YandexGpt::new(config.api_key.clone(), config.model_uri())),
            Box::new(BucketInstructions::new(
                env,
                &config.bucket_name,
                config.bucket_key.clone(),
            )?),
        ))
    }

    pub async fn handle_update(&self, update: Update) -> Result<Ack> {
        let Some(message) = update.message.filter(|m| !m.is_empty()) else {
            info!(update_id = ?update.update_id, "update without message");
            return Ok(Ack::NoMessage);
        };

        let incoming = IncomingMessage::try_from(message)?;
        self.handle_message(incoming).await?;
        Ok(Ack::Ok)
    }

    /// Sends exactly one reply for `message`.
    pub async fn handle_message(&self, message: IncomingMessage) -> Result<()> {
        let chat_id = message.chat_id;
        let reply = match message.kind {
            MessageKind::Command(command) => {
                info!(chat_id, ?command, "command received");
                START_MESSAGE.to_string()
            }
            MessageKind::Question(text) => {
                info!(chat_id, "question received");
                self.answer(&text).await?
            }
            MessageKind::Photo { file_id } => {
                info!(chat_id, %file_id, "photo received");
                let text =
                    ocr::recognize_text(self.chat.as_ref(), self.ocr.as_ref(), &file_id).await;
                self.answer(&text).await?
            }
            MessageKind::Unsupported => {
                info!(chat_id, "unsupported message");
                UNKNOWN_REQUEST_MESSAGE.to_string()
            }
        };

        self.reply(chat_id, &reply).await;
        Ok(())
    }

    async fn answer(&self, question: &str) -> Result<String> {
        let answer =
            gpt::find_answer(self.instructions.as_ref(), self.model.as_ref(), question).await?;
        Ok(answer.unwrap_or_else(|| NO_ANSWER_MESSAGE.to_string()))
    }

    async fn reply(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.chat.send_message(chat_id, text).await {
            warn!(chat_id, error = %e, "failed to send message");
        }
    }
}
