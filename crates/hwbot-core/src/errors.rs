/// Core error type for the notifier.
///
/// Adapter crates map their specific errors into this type so the poll loop
/// can handle every failure of a cycle the same way (log, summarize, notify).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("review API request failed: {0}")]
    ApiFetch(String),

    #[error("review API returned malformed JSON: {0}")]
    Decode(String),

    #[error("review API response is empty")]
    EmptyResponse,

    #[error("unexpected data type: {0}")]
    TypeMismatch(String),

    #[error("review API response has unexpected shape: {0}")]
    IncorrectShape(String),

    #[error("no homework information in the review API response")]
    NoHomeworkInfo,

    #[error("homework record has no `{0}` field")]
    MissingField(&'static str),

    #[error("undocumented homework status: {0:?}")]
    UnknownStatus(String),

    #[error("failed to send message: {0}")]
    Notification(String),
}

impl Error {
    /// Only configuration problems stop the process; everything else is retried next cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Whether a cycle failure should be relayed to the chat.
    ///
    /// A failed send is only logged: the chat is the thing that just failed.
    pub fn is_reportable(&self) -> bool {
        match self {
            Error::Notification(_) => false,
            Error::Config(_)
            | Error::ApiFetch(_)
            | Error::Decode(_)
            | Error::EmptyResponse
            | Error::TypeMismatch(_)
            | Error::IncorrectShape(_)
            | Error::NoHomeworkInfo
            | Error::MissingField(_)
            | Error::UnknownStatus(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_config_errors_are_fatal() {
        assert!(Error::Config("PRACTICUM_TOKEN".to_string()).is_fatal());
        assert!(!Error::ApiFetch("timeout".to_string()).is_fatal());
        assert!(!Error::NoHomeworkInfo.is_fatal());
        assert!(!Error::Notification("blocked".to_string()).is_fatal());
    }

    #[test]
    fn send_failures_are_not_reported_to_chat() {
        assert!(!Error::Notification("bot was blocked".to_string()).is_reportable());
        assert!(Error::EmptyResponse.is_reportable());
        assert!(Error::UnknownStatus("on_hold".to_string()).is_reportable());
    }

    #[test]
    fn display_embeds_cause() {
        let e = Error::UnknownStatus("on_hold".to_string());
        assert_eq!(e.to_string(), "undocumented homework status: \"on_hold\"");
        let e = Error::MissingField("status");
        assert_eq!(e.to_string(), "homework record has no `status` field");
    }
}
