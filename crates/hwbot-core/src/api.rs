//! Review API client.
//!
//! One timestamped GET per cycle. Transport and HTTP-status failures become
//! `Error::ApiFetch`; a body that is not JSON is logged and reported as "no
//! response" so the validator rejects it as empty.

use async_trait::async_trait;
use reqwest::{header::HeaderMap, StatusCode};
use serde_json::Value;

use crate::{
    config::Credentials,
    domain::{now_unix, UnixTime},
    errors::Error,
    Result,
};

/// Port for the homework review service.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Fetch homework updates since `since` (unix seconds); `None` means "now".
    ///
    /// `Ok(None)` is returned when the service answered 200 with a body that
    /// could not be decoded.
    async fn fetch_updates(&self, since: Option<UnixTime>) -> Result<Option<Value>>;
}

#[derive(Clone, Debug)]
pub struct PracticumClient {
    endpoint: String,
    headers: HeaderMap,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::ApiFetch(format!("http client build failed: {e}")))?;
        Ok(Self {
            endpoint: credentials.endpoint.clone(),
            headers: credentials.headers()?,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn fetch_updates(&self, since: Option<UnixTime>) -> Result<Option<Value>> {
        let timestamp = since.unwrap_or_else(now_unix);

        let resp = self
            .http
            .get(&self.endpoint)
            .headers(self.headers.clone())
            .query(&[("from_date", timestamp)])
            .send()
            .await
            .map_err(|e| {
                let err = Error::ApiFetch(format!(
                    "request to {:?} failed: {}",
                    self.endpoint,
                    e.without_url()
                ));
                tracing::error!("{err}");
                err
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            let err = Error::ApiFetch(format!(
                "request to {:?} returned status {}",
                self.endpoint,
                status.as_u16()
            ));
            tracing::error!("{err}");
            return Err(err);
        }

        match resp.json::<Value>().await {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                tracing::error!("{}", Error::Decode(e.to_string()));
                Ok(None)
            }
        }
    }
}
