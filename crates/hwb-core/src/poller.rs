//! Poll-evaluate-notify loop.
//!
//! One sequential task: fetch, validate, translate, notify, sleep, repeat. Every
//! failure except the startup ones is turned into a chat notification here, and
//! identical consecutive notifications are suppressed.

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;

use crate::{
    api::HomeworkApi,
    config::Config,
    notifier::Notifier,
    status::{check_response, current_date, parse_status},
    Result,
};

#[derive(Clone, Copy, Debug)]
pub struct PollSettings {
    pub retry_period: Duration,
    /// Initial `from_date` cursor (unix seconds).
    pub from_date: i64,
}

impl PollSettings {
    pub fn starting_now(cfg: &Config) -> Self {
        Self::from_config(cfg, chrono::Utc::now().timestamp())
    }

    /// Start the window `from_date_offset` before `now` so boundary events are not missed.
    pub fn from_config(cfg: &Config, now: i64) -> Self {
        let offset = i64::try_from(cfg.from_date_offset.as_secs()).unwrap_or(i64::MAX);
        Self {
            retry_period: cfg.retry_period,
            from_date: now.saturating_sub(offset),
        }
    }
}

/// What a single iteration did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Empty homework list; nothing sent.
    NoChange,
    /// Text differed from the last notification and was delivered.
    Delivered,
    /// Text equalled the last notification; nothing sent.
    Duplicate,
    /// Text differed from the last notification but delivery failed.
    DeliveryFailed,
}

pub struct Poller {
    api: Arc<dyn HomeworkApi>,
    notifier: Notifier,
    retry_period: Duration,
    from_date: i64,
    last_notified: Option<String>,
}

impl Poller {
    pub fn new(api: Arc<dyn HomeworkApi>, notifier: Notifier, settings: PollSettings) -> Self {
        Self {
            api,
            notifier,
            retry_period: settings.retry_period,
            from_date: settings.from_date,
            last_notified: None,
        }
    }

    pub fn from_date(&self) -> i64 {
        self.from_date
    }

    pub fn last_notified(&self) -> Option<&str> {
        self.last_notified.as_deref()
    }

    /// Poll forever. Each iteration is followed by the same fixed sleep.
    pub async fn run(mut self) {
        tracing::info!(
            chat_id = %self.notifier.chat_id(),
            from_date = self.from_date,
            retry_period_secs = self.retry_period.as_secs(),
            "polling started"
        );
        loop {
            let outcome = self.tick().await;
            tracing::debug!(?outcome, "iteration finished");
            sleep(self.retry_period).await;
        }
    }

    /// Run one iteration without sleeping.
    pub async fn tick(&mut self) -> TickOutcome {
        let (next_from_date, checked) = self.check_homeworks().await;
        let (outcome, notice) = match checked {
            Ok(None) => {
                tracing::debug!(from_date = self.from_date, "no status change");
                (TickOutcome::NoChange, None)
            }
            Ok(Some(text)) => (
                self.notify_once(text, Notice::Verdict).await,
                Some(Notice::Verdict),
            ),
            Err(e) => {
                tracing::error!(error = %e, "poll iteration failed");
                (
                    self.notify_once(e.to_string(), Notice::Failure).await,
                    Some(Notice::Failure),
                )
            }
        };

        // An undelivered verdict keeps the old window so the record is fetched again.
        let verdict_lost =
            outcome == TickOutcome::DeliveryFailed && notice == Some(Notice::Verdict);
        if let Some(date) = next_from_date.filter(|_| !verdict_lost) {
            if date != self.from_date {
                tracing::info!(from = self.from_date, to = date, "advancing poll cursor");
                self.from_date = date;
            }
        }

        outcome
    }

    /// Fetch and translate. The returned cursor is only staged; `tick` commits it.
    async fn check_homeworks(&self) -> (Option<i64>, Result<Option<String>>) {
        let response = match self.api.homework_statuses(self.from_date).await {
            Ok(response) => response,
            Err(e) => return (None, Err(e)),
        };
        let homeworks = match check_response(&response) {
            Ok(homeworks) => homeworks,
            Err(e) => return (None, Err(e)),
        };

        // Only the most recent entry is reported.
        let message = homeworks.first().map(parse_status).transpose();
        (current_date(&response), message)
    }

    async fn notify_once(&mut self, text: String, notice: Notice) -> TickOutcome {
        if self.last_notified.as_deref() == Some(text.as_str()) {
            tracing::debug!("same text as last notification, not sending");
            return TickOutcome::Duplicate;
        }

        match self.notifier.send_message(&text).await {
            Ok(()) => {
                self.last_notified = Some(text);
                TickOutcome::Delivered
            }
            Err(_) => {
                // Failure texts count as notified so an outage is not re-sent every
                // iteration; verdicts stay pending until they get through.
                if notice == Notice::Failure {
                    self.last_notified = Some(text);
                }
                TickOutcome::DeliveryFailed
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Notice {
    Verdict,
    Failure,
}
