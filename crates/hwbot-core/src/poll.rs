//! The poll loop: fetch, validate, format, notify, sleep.
//!
//! State is carried explicitly in `PollState` and handed from one cycle to the
//! next. Every error raised inside a cycle is turned into one summary message,
//! logged, and (unless identical to the last one sent) relayed to the chat.

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;

use crate::{
    api::ReviewApi,
    domain::{now_unix, ChatId, UnixTime},
    errors::Error,
    messaging::{notify, MessagingPort},
    status::StatusCatalog,
    validate::ApiResponse,
    Result,
};

/// What the loop remembers between cycles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollState {
    /// Passed as `from_date` on the next request.
    pub current_timestamp: UnixTime,
    pub last_sent_status_message: Option<String>,
    pub last_sent_error_message: Option<String>,
}

impl PollState {
    pub fn new(current_timestamp: UnixTime) -> Self {
        Self {
            current_timestamp,
            last_sent_status_message: None,
            last_sent_error_message: None,
        }
    }

    pub fn starting_now() -> Self {
        Self::new(now_unix())
    }
}

/// Result of a single cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// A new status message was delivered.
    Notified(String),
    /// The status message equals the last one sent.
    Unchanged,
    /// The cycle failed; `notified` tells whether the error summary reached the chat.
    Failed { error: Error, notified: bool },
}

pub struct Poller {
    api: Arc<dyn ReviewApi>,
    messenger: Arc<dyn MessagingPort>,
    catalog: StatusCatalog,
    chat_id: ChatId,
    retry_time: Duration,
}

impl Poller {
    pub fn new(
        api: Arc<dyn ReviewApi>,
        messenger: Arc<dyn MessagingPort>,
        catalog: StatusCatalog,
        chat_id: ChatId,
        retry_time: Duration,
    ) -> Self {
        Self {
            api,
            messenger,
            catalog,
            chat_id,
            retry_time,
        }
    }

    /// Poll forever, sleeping `retry_time` after every cycle whatever its outcome.
    pub async fn run_forever(&self, mut state: PollState) {
        tracing::info!(
            "polling every {}s, starting from {}",
            self.retry_time.as_secs(),
            state.current_timestamp
        );
        loop {
            let (next, _) = self.run_cycle(state).await;
            state = next;
            sleep(self.retry_time).await;
        }
    }

    /// Run one cycle. Never fails: errors are reported and returned in the outcome.
    pub async fn run_cycle(&self, mut state: PollState) -> (PollState, CycleOutcome) {
        match self.check_once(&mut state).await {
            Ok(outcome) => {
                tracing::info!("cycle completed without errors");
                (state, outcome)
            }
            Err(error) => {
                let notified = self.report_failure(&mut state, &error).await;
                (state, CycleOutcome::Failed { error, notified })
            }
        }
    }

    async fn check_once(&self, state: &mut PollState) -> Result<CycleOutcome> {
        let body = self.api.fetch_updates(Some(state.current_timestamp)).await?;
        let response = ApiResponse::from_value(body.as_ref())?;

        let Some(homework) = response.homeworks.first() else {
            tracing::info!("{}", Error::NoHomeworkInfo);
            return Err(Error::NoHomeworkInfo);
        };

        let message = self.catalog.describe_status(homework)?;
        let outcome = if state.last_sent_status_message.as_deref() == Some(message.as_str()) {
            tracing::debug!("homework status has not changed");
            CycleOutcome::Unchanged
        } else {
            notify(self.messenger.as_ref(), self.chat_id, &message).await?;
            state.last_sent_status_message = Some(message.clone());
            CycleOutcome::Notified(message)
        };

        state.current_timestamp = response.current_date.unwrap_or_else(now_unix);
        Ok(outcome)
    }

    async fn report_failure(&self, state: &mut PollState, error: &Error) -> bool {
        let message = format!("Bot failure: {error}");
        tracing::error!("{message}");

        if !error.is_reportable() {
            return false;
        }
        if state.last_sent_error_message.as_deref() == Some(message.as_str()) {
            tracing::debug!("error already reported, not sending again");
            return false;
        }

        match notify(self.messenger.as_ref(), self.chat_id, &message).await {
            Ok(()) => {
                state.last_sent_error_message = Some(message);
                true
            }
            Err(e) => {
                tracing::error!("could not report failure to chat: {e}");
                false
            }
        }
    }
}
