/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Unix timestamp in seconds, as used by the review API `from_date` parameter.
pub type UnixTime = i64;

/// Current wall-clock time in unix seconds.
pub fn now_unix() -> UnixTime {
    chrono::Utc::now().timestamp()
}
