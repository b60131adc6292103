use std::sync::Arc;

use crate::{domain::ChatId, errors::Error, messaging::port::MessagingPort, Result};

/// Delivers notification text to the configured chat.
///
/// Failures come back as `Error::MessageSend`; nothing here panics or retries.
#[derive(Clone)]
pub struct Notifier {
    messenger: Arc<dyn MessagingPort>,
    chat_id: ChatId,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn MessagingPort>, chat_id: ChatId) -> Self {
        Self { messenger, chat_id }
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    pub async fn send_message(&self, text: &str) -> Result<()> {
        let limit = self.messenger.capabilities().max_message_len;
        let text = truncate_chars(text, limit);

        match self.messenger.send_text(&self.chat_id, &text).await {
            Ok(()) => {
                tracing::debug!(chat_id = %self.chat_id, "message sent");
                Ok(())
            }
            Err(e) => {
                tracing::error!(chat_id = %self.chat_id, error = %e, "message send failed");
                Err(Error::MessageSend(e.to_string()))
            }
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::types::MessagingCapabilities;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeMessenger {
        fail: bool,
        max_len: Option<usize>,
        sends: Mutex<Vec<(ChatId, String)>>,
    }

    #[async_trait]
    impl MessagingPort for FakeMessenger {
        fn capabilities(&self) -> MessagingCapabilities {
            match self.max_len {
                Some(max_message_len) => MessagingCapabilities { max_message_len },
                None => MessagingCapabilities::default(),
            }
        }

        async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<()> {
            self.sends
                .lock()
                .unwrap()
                .push((chat_id.clone(), text.to_string()));
            if self.fail {
                return Err(Error::External("telegram error: chat not found".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn delivers_to_configured_chat() {
        let messenger = Arc::new(FakeMessenger::default());
        let notifier = Notifier::new(messenger.clone(), ChatId("100".to_string()));

        notifier.send_message("hello").await.unwrap();

        let sends = messenger.sends.lock().unwrap().clone();
        assert_eq!(sends, vec![(ChatId("100".to_string()), "hello".to_string())]);
    }

    #[tokio::test]
    async fn delivery_failure_is_returned_not_raised() {
        let messenger = Arc::new(FakeMessenger {
            fail: true,
            ..Default::default()
        });
        let notifier = Notifier::new(messenger.clone(), ChatId("100".to_string()));

        let err = notifier.send_message("hello").await.unwrap_err();
        assert!(matches!(err, Error::MessageSend(ref m) if m.contains("chat not found")));
        assert_eq!(messenger.sends.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn long_text_is_truncated_to_capability() {
        let messenger = Arc::new(FakeMessenger {
            max_len: Some(5),
            ..Default::default()
        });
        let notifier = Notifier::new(messenger.clone(), ChatId("1".to_string()));

        notifier.send_message("Ошибка при выполнении").await.unwrap();

        let sends = messenger.sends.lock().unwrap().clone();
        assert_eq!(sends[0].1, "Ошиб…");
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abcd", 3), "ab…");
    }
}
