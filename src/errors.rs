// src/errors.rs

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

impl AppError {
    /// Wiadomość, którą pokazujemy użytkownikowi. Dla błędów z API jest to
    /// dokładnie to, co odesłał serwer.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_surfaces_server_message_verbatim() {
        let err = AppError::Api {
            status: StatusCode::BAD_REQUEST,
            message: "Dessert already exists".to_string(),
        };
        assert_eq!(err.user_message(), "Dessert already exists");
    }

    #[test]
    fn local_errors_use_display_text() {
        assert_eq!(
            AppError::InvalidImage("'a.png' is empty".into()).user_message(),
            "Invalid image: 'a.png' is empty"
        );
        assert_eq!(
            AppError::Config("DESSERT_API_URL".into()).user_message(),
            "Invalid configuration: DESSERT_API_URL"
        );
    }
}
