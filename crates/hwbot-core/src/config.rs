use std::{env, fs, path::Path, time::Duration};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::{domain::ChatId, errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_AUTH_SCHEME: &str = "OAuth";
pub const DEFAULT_RETRY_TIME: Duration = Duration::from_secs(600);

const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Everything needed to talk to the review API and the chat.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: ChatId,
    pub endpoint: String,
    pub auth_scheme: String,
}

impl Credentials {
    /// Request headers for the review API (`Authorization: <scheme> <token>`).
    pub fn headers(&self) -> Result<HeaderMap> {
        let value = format!("{} {}", self.auth_scheme, self.practicum_token);
        let mut value = HeaderValue::from_str(&value)
            .map_err(|e| Error::Config(format!("PRACTICUM_TOKEN is not a valid header: {e}")))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

/// Typed configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub credentials: Credentials,
    pub retry_time: Duration,
}

impl Config {
    /// Load from the process environment, after applying `./.env` if present.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let practicum_token = get("PRACTICUM_TOKEN").unwrap_or_default();
        let telegram_token = get("TELEGRAM_TOKEN").unwrap_or_default();
        let raw_chat_id = get("TELEGRAM_CHAT_ID").unwrap_or_default();
        let chat_id = raw_chat_id.trim().parse::<i64>().map(ChatId).map_err(|_| {
            Error::Config(format!("TELEGRAM_CHAT_ID is not an integer: {raw_chat_id:?}"))
        })?;

        let endpoint = get("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let auth_scheme =
            get("PRACTICUM_AUTH_SCHEME").unwrap_or_else(|| DEFAULT_AUTH_SCHEME.to_string());

        let retry_time = match get("RETRY_TIME") {
            None => DEFAULT_RETRY_TIME,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| {
                    Error::Config(format!("RETRY_TIME is not a number of seconds: {raw:?}"))
                })?,
        };

        Ok(Self {
            credentials: Credentials {
                practicum_token,
                telegram_token,
                chat_id,
                endpoint: endpoint.trim().to_string(),
                auth_scheme: auth_scheme.trim().to_string(),
            },
            retry_time,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
