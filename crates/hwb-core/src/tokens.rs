//! Startup credential check.
//!
//! The poll loop only accepts [`Tokens`], which can only be produced here, so it
//! cannot start with a missing credential.

use crate::{config::Credentials, domain::ChatId, errors::Error, Result};

/// Checked credentials. Every field is non-empty.
#[derive(Clone, Debug)]
pub struct Tokens {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: ChatId,
}

/// Verify that every required credential is present.
///
/// Each missing variable is logged at critical severity. The caller is expected to
/// terminate on `Err`.
pub fn check_tokens(credentials: &Credentials) -> Result<Tokens> {
    let mut missing = Vec::new();
    let practicum_token = require("PRACTICUM_TOKEN", &credentials.practicum_token, &mut missing);
    let telegram_token = require("TELEGRAM_TOKEN", &credentials.telegram_token, &mut missing);
    let chat_id = require("CHAT_ID", &credentials.chat_id, &mut missing);

    match (practicum_token, telegram_token, chat_id) {
        (Some(practicum_token), Some(telegram_token), Some(chat_id)) => Ok(Tokens {
            practicum_token,
            telegram_token,
            chat_id: ChatId(chat_id),
        }),
        _ => Err(Error::MissingCredential(missing.join(", "))),
    }
}

fn require(
    name: &'static str,
    value: &Option<String>,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let value = value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    if value.is_none() {
        tracing::error!(
            severity = "critical",
            variable = name,
            "required environment variable is missing"
        );
        missing.push(name);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Credentials {
        Credentials {
            practicum_token: Some("p-token".to_string()),
            telegram_token: Some("t-token".to_string()),
            chat_id: Some(" 12345 ".to_string()),
        }
    }

    #[test]
    fn passes_with_all_credentials() {
        let tokens = check_tokens(&full()).unwrap();
        assert_eq!(tokens.practicum_token, "p-token");
        assert_eq!(tokens.telegram_token, "t-token");
        assert_eq!(tokens.chat_id, ChatId("12345".to_string()));
    }

    #[test]
    fn names_the_missing_variable() {
        let mut creds = full();
        creds.telegram_token = None;
        let err = check_tokens(&creds).unwrap_err();
        assert!(matches!(err, Error::MissingCredential(ref n) if n == "TELEGRAM_TOKEN"));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut creds = full();
        creds.chat_id = Some(String::new());
        let err = check_tokens(&creds).unwrap_err();
        assert!(matches!(err, Error::MissingCredential(ref n) if n == "CHAT_ID"));
    }

    #[test]
    fn lists_every_missing_variable() {
        let err = check_tokens(&Credentials::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Программа принудительно остановлена. Отсутствует обязательная переменная окружения: \
             PRACTICUM_TOKEN, TELEGRAM_TOKEN, CHAT_ID"
        );
    }
}
