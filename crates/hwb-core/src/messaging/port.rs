use async_trait::async_trait;

use crate::{domain::ChatId, messaging::types::MessagingCapabilities, Result};

/// Outbound chat delivery port.
///
/// Adapters map their transport errors into `Error::External`.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<()>;
}
