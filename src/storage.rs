use crate::error::{BotError, Result};
use async_trait::async_trait;
use worker::{Bucket, Env};

/// Source of the instruction preamble placed before every question.
#[async_trait(?Send)]
pub trait InstructionStore {
    async fn instructions(&self) -> Result<String>;
}

/// Reads the preamble from one object in an R2 bucket.
pub struct BucketInstructions {
    bucket: Bucket,
    key: String,
}

impl BucketInstructions {
    pub fn new(env: &Env, bucket_name: &str, key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            bucket: env.bucket(bucket_name)?,
            key: key.into(),
        })
    }
}

#[async_trait(?Send)]
impl InstructionStore for BucketInstructions {
    async fn instructions(&self) -> Result<String> {
        let object = self
            .bucket
            .get(&self.key)
            .execute()
            .await?
            .ok_or_else(|| BotError::Worker(worker::Error::from("Instructions not found")))?;
        let text = object
            .body()
            .ok_or_else(|| BotError::Worker(worker::Error::from("Instructions not found")))?
            .text()
            .await?;
        Ok(text)
    }
}
