/// Core error type for the homework bot.
///
/// Display texts double as the chat notification for recovered failures, so they
/// are written for the person reading the chat, not for a developer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Программа принудительно остановлена. Отсутствует обязательная переменная окружения: {0}")]
    MissingCredential(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("Ошибка при выполнении запроса: {0}")]
    ApiRequest(#[source] reqwest::Error),

    #[error("Статус запроса не 200: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Данные не допустимы: {0}")]
    InvalidData(String),

    #[error("Неверный тип данных: {0}")]
    UnexpectedType(String),

    #[error("В ответе API отсутствует ключ {0}")]
    MissingKey(&'static str),

    #[error("{0}")]
    UndocumentedStatus(String),

    #[error("Ошибка отправки сообщения: {0}")]
    MessageSend(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_texts_are_chat_ready() {
        assert_eq!(
            Error::MissingKey("homeworks").to_string(),
            "В ответе API отсутствует ключ homeworks"
        );
        assert_eq!(
            Error::UnexpectedStatus { status: 503 }.to_string(),
            "Статус запроса не 200: 503"
        );
        assert_eq!(
            Error::MissingCredential("CHAT_ID".to_string()).to_string(),
            "Программа принудительно остановлена. Отсутствует обязательная переменная окружения: CHAT_ID"
        );
    }
}
