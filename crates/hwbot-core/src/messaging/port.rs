use async_trait::async_trait;

use crate::{domain::ChatId, errors::Error, Result};

/// Messenger port: one plain-text "send to chat" call.
///
/// Implementations should map transport failures into `Error::Notification`.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;
}

/// Deliver `message` to the configured chat.
///
/// Failures are returned as `Error::Notification` and left for the caller to log.
pub async fn notify(messenger: &dyn MessagingPort, chat_id: ChatId, message: &str) -> Result<()> {
    match messenger.send_text(chat_id, message).await {
        Ok(()) => {
            tracing::info!("message {message:?} delivered to chat {}", chat_id.0);
            Ok(())
        }
        Err(Error::Notification(cause)) => Err(Error::Notification(cause)),
        Err(other) => Err(Error::Notification(other.to_string())),
    }
}
