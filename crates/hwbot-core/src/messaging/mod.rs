//! Outbound chat messaging (Telegram today).

pub mod port;

pub use port::{notify, MessagingPort};
