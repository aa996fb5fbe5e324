//! The polling loop: fetch, validate, compare, notify, sleep.

use homework_rust_core::clients::{HomeworkSource, MessageSink};
use homework_rust_core::error::{ErrorFingerprint, NotifierError, Result};
use homework_rust_core::{check_response, HomeworkBatch, HomeworkRecord};
use log::{debug, error, info};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use crate::formatters::{format_failure, parse_status};
use crate::scheduler::Sleeper;

/// What the tracker remembers between cycles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastSeenState {
    /// Raw status value of the last notified homework
    pub last_status: Option<Value>,
    /// Last error sent to the chat; cleared by a successful cycle
    pub last_error: Option<ErrorFingerprint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    NoHomeworks,
    Unchanged,
    StatusChanged { message: String, delivered: bool },
    Failed { error: NotifierError, reported: bool },
}

pub struct StatusTracker {
    source: Box<dyn HomeworkSource>,
    sink: Box<dyn MessageSink>,
    cursor: i64,
    retry_period: Duration,
    state: LastSeenState,
}

impl StatusTracker {
    pub fn new(
        source: Box<dyn HomeworkSource>,
        sink: Box<dyn MessageSink>,
        cursor: i64,
        retry_period: Duration,
    ) -> Self {
        Self {
            source,
            sink,
            cursor,
            retry_period,
            state: LastSeenState::default(),
        }
    }

    /// `from_date` for the next request
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn state(&self) -> &LastSeenState {
        &self.state
    }

    /// Tick until `shutdown` resolves. Returns the number of completed ticks.
    ///
    /// Every tick is one cycle followed by one retry-period sleep, whether the
    /// cycle failed or not. Shutdown may interrupt a tick at any await point.
    pub async fn run<F>(&mut self, sleeper: &dyn Sleeper, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut ticks = 0u64;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested after {} cycles", ticks);
                    return ticks;
                }
                _ = self.tick(sleeper) => {
                    ticks += 1;
                }
            }
        }
    }

    async fn tick(&mut self, sleeper: &dyn Sleeper) {
        self.run_cycle().await;
        debug!(
            "Waiting {} minutes before next poll",
            self.retry_period.as_secs() / 60
        );
        sleeper.sleep(self.retry_period).await;
    }

    /// One polling cycle. Never fails: errors are logged and reported to the chat.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        debug!("Starting polling cycle (from_date={})", self.cursor);

        match self.poll().await {
            Ok(outcome) => {
                self.state.last_error = None;
                outcome
            }
            Err(error) => self.report_failure(error).await,
        }
    }

    async fn poll(&mut self) -> Result<CycleOutcome> {
        let response = self.source.get_api_answer(self.cursor).await?;
        check_response(&response)?;
        let batch = HomeworkBatch::from_checked(&response);

        // Only the most recent submission is tracked
        let outcome = match batch.latest() {
            None => {
                debug!("Homework list is empty");
                CycleOutcome::NoHomeworks
            }
            Some(record) => self.compare_and_notify(record?).await?,
        };

        if let Some(current_date) = batch.current_date {
            self.cursor = current_date;
        }
        debug!("Cursor is now {}", self.cursor);

        Ok(outcome)
    }

    async fn compare_and_notify(&mut self, record: HomeworkRecord) -> Result<CycleOutcome> {
        if record.status == self.state.last_status {
            debug!("No new statuses");
            return Ok(CycleOutcome::Unchanged);
        }

        let message = parse_status(&record)?;
        let delivered = self.send_message(&message).await;
        info!(
            "Status change detected: {:?} -> {:?}",
            self.state.last_status, record.status
        );
        self.state.last_status = record.status;

        Ok(CycleOutcome::StatusChanged { message, delivered })
    }

    async fn report_failure(&mut self, error: NotifierError) -> CycleOutcome {
        let message = format_failure(&error);
        error!("{}", message);

        let fingerprint = error.fingerprint();
        let reported = if self.state.last_error.as_ref() != Some(&fingerprint) {
            self.send_message(&message).await;
            self.state.last_error = Some(fingerprint);
            true
        } else {
            debug!("Repeated {} error, chat notification suppressed", error.kind());
            false
        };

        CycleOutcome::Failed { error, reported }
    }

    /// Best-effort delivery; failures are logged and swallowed.
    async fn send_message(&self, text: &str) -> bool {
        match self.sink.send_message(text).await {
            Ok(()) => {
                debug!("Bot sent message: \"{}\"", text);
                true
            }
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }
}
