use thiserror::Error;

/// Errors raised while talking to Telegram, Yandex Cloud or the bucket.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: worker::Error,
    },

    #[error("{service} responded with status {status}")]
    Status { service: &'static str, status: u16 },

    #[error("unexpected {service} response: {message}")]
    Malformed {
        service: &'static str,
        message: String,
    },

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Worker(#[from] worker::Error),
}

impl BotError {
    pub fn malformed(service: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Malformed {
            service,
            message: message.to_string(),
        }
    }

    /// Whether the error was caused by the inbound payload rather than a collaborator.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::MissingField(_))
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_a_bad_request() {
        assert!(BotError::MissingField("message.from.id").is_bad_request());
        assert!(!BotError::Status {
            service: "ocr",
            status: 503
        }
        .is_bad_request());
        assert!(!BotError::Config("API_KEY".into()).is_bad_request());
    }

    #[test]
    fn display_names_the_service() {
        let err = BotError::Status {
            service: "completion",
            status: 429,
        };
        assert_eq!(err.to_string(), "completion responded with status 429");

        let err = BotError::malformed("ocr", "no text annotation");
        assert_eq!(err.to_string(), "unexpected ocr response: no text annotation");
    }
}
