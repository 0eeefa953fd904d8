use thiserror::Error;

/// Top-level error type for tgbot.
#[derive(Debug, Error)]
pub enum TgError {
    /// Connection, TLS or timeout failure below the HTTP layer.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx response whose body was not a decodable envelope.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },

    /// Malformed or unexpected JSON.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with `ok: false`.
    #[error("api error {}: {description}", display_code(.code))]
    Api {
        code: Option<i64>,
        description: String,
    },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_code(code: &Option<i64>) -> String {
    code.map_or_else(|| "?".to_string(), |c| c.to_string())
}

impl TgError {
    /// Whether repeating the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Api { code: Some(c), .. } => *c == 429 || *c >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(TgError::Transport("reset".into()).is_retryable());
        assert!(TgError::Http {
            status: 502,
            body: String::new()
        }
        .is_retryable());
        assert!(!TgError::Http {
            status: 404,
            body: String::new()
        }
        .is_retryable());
        assert!(TgError::Api {
            code: Some(429),
            description: "Too Many Requests".into()
        }
        .is_retryable());
        assert!(!TgError::Api {
            code: Some(401),
            description: "Unauthorized".into()
        }
        .is_retryable());
        assert!(!TgError::Config("bad".into()).is_retryable());
    }

    #[test]
    fn test_api_error_display() {
        let err = TgError::Api {
            code: Some(400),
            description: "Bad Request: chat not found".into(),
        };
        assert_eq!(err.to_string(), "api error 400: Bad Request: chat not found");

        let err = TgError::Api {
            code: None,
            description: "nope".into(),
        };
        assert_eq!(err.to_string(), "api error ?: nope");
    }
}
