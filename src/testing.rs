//! Recording fakes for the bot's collaborators.

use crate::error::{BotError, Result};
use crate::gpt::LanguageModel;
use crate::ocr::TextRecognizer;
use crate::storage::InstructionStore;
use crate::telegram::ChatPlatform;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct ChatCalls {
    pub file_lookups: Vec<String>,
    pub downloads: Vec<String>,
    pub sent: Vec<(i64, String)>,
}

impl ChatCalls {
    pub fn is_empty(&self) -> bool {
        self.file_lookups.is_empty() && self.downloads.is_empty() && self.sent.is_empty()
    }
}

#[derive(Clone, Default)]
pub struct FakeChat {
    calls: Rc<RefCell<ChatCalls>>,
    fail_file_url: bool,
    fail_download: bool,
    fail_send: bool,
}

impl FakeChat {
    pub const IMAGE: &'static [u8] = b"\x89PNG fake image";

    pub fn failing_file_url(mut self) -> Self {
        self.fail_file_url = true;
        self
    }

    pub fn failing_download(mut self) -> Self {
        self.fail_download = true;
        self
    }

    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn calls(&self) -> ChatCalls {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ChatPlatform for FakeChat {
    async fn file_url(&self, file_id: &str) -> Result<String> {
        self.calls.borrow_mut().file_lookups.push(file_id.to_string());
        if self.fail_file_url {
            return Err(BotError::MissingField("result.file_path"));
        }
        Ok(format!("https://files.test/{}", file_id))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.borrow_mut().downloads.push(url.to_string());
        if self.fail_download {
            return Err(BotError::Status {
                service: "telegram",
                status: 404,
            });
        }
        Ok(Self::IMAGE.to_vec())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .sent
            .push((chat_id, text.to_string()));
        if self.fail_send {
            return Err(BotError::Status {
                service: "telegram",
                status: 403,
            });
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakeOcr {
    text: String,
    fail_status: Option<u16>,
    images: Rc<RefCell<Vec<String>>>,
}

impl FakeOcr {
    pub fn returning(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail_status: None,
            images: Rc::default(),
        }
    }

    pub fn failing_with_status(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::returning("")
        }
    }

    pub fn images(&self) -> Vec<String> {
        self.images.borrow().clone()
    }
}

#[async_trait(?Send)]
impl TextRecognizer for FakeOcr {
    async fn recognize(&self, image_base64: &str) -> Result<String> {
        self.images.borrow_mut().push(image_base64.to_string());
        match self.fail_status {
            Some(status) => Err(BotError::Status {
                service: "ocr",
                status,
            }),
            None => Ok(self.text.clone()),
        }
    }
}

#[derive(Clone)]
pub struct FakeModel {
    answer: Option<String>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl FakeModel {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            prompts: Rc::default(),
        }
    }

    /// Behaves like a completion endpoint returning a body that is not JSON.
    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Rc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

#[async_trait(?Send)]
impl LanguageModel for FakeModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answer
            .clone()
            .ok_or_else(|| BotError::malformed("completion", "expected value at line 1 column 1"))
    }
}

#[derive(Clone)]
pub struct FakeStore {
    instructions: Option<String>,
    reads: Rc<Cell<usize>>,
}

impl FakeStore {
    pub fn with(instructions: &str) -> Self {
        Self {
            instructions: Some(instructions.to_string()),
            reads: Rc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            instructions: None,
            reads: Rc::default(),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

#[async_trait(?Send)]
impl InstructionStore for FakeStore {
    async fn instructions(&self) -> Result<String> {
        self.reads.set(self.reads.get() + 1);
        self.instructions
            .clone()
            .ok_or_else(|| BotError::Worker(worker::Error::from("Instructions not found")))
    }
}
