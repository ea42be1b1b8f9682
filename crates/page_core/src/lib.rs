use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};
use url::Url;

pub mod countdown;
pub mod error;
pub mod protocol;

pub use countdown::{
    PauseLabel, Phase, ReloadCountdown, TickOutcome, ToggleOutcome, PAUSED_SENTINEL,
};
pub use error::PageUrlError;
pub use protocol::{LogEntry, RigCommand};

/// Default countdown duration before the page reloads itself.
pub const DEFAULT_RELOAD_TIMEOUT_SECS: u64 = 60;
const TICK_PERIOD: Duration = Duration::from_secs(1);
const FLRIG_ENDPOINT: &str = "flrig";
const LOGDATA_ENDPOINT: &str = "logdata";

/// UI seam for the countdown readout and the pause control caption.
pub trait CountdownDisplay: Send + Sync {
    fn show_remaining(&self, seconds: u64);
    fn show_paused(&self);
    fn set_pause_label(&self, label: PauseLabel);
}

/// Display for a page without the countdown elements: every update is a no-op.
pub struct MissingDisplay;

impl CountdownDisplay for MissingDisplay {
    fn show_remaining(&self, _seconds: u64) {}

    fn show_paused(&self) {}

    fn set_pause_label(&self, _label: PauseLabel) {}
}

/// Seam for the full-page reload the countdown requests at zero.
#[async_trait]
pub trait PageReloader: Send + Sync {
    async fn reload(&self);
}

pub struct MissingReloader;

#[async_trait]
impl PageReloader for MissingReloader {
    async fn reload(&self) {
        warn!("reload: no reloader attached; page reload dropped");
    }
}

/// Issues the page's two backend requests relative to the page URL.
///
/// Both requests are fire-and-forget: the response is never awaited or
/// inspected, and failures surface only as debug logs.
#[derive(Debug)]
pub struct SpotPageClient {
    http: Client,
    page_url: Url,
}

impl SpotPageClient {
    pub fn new(page_url: &str) -> Result<Self, PageUrlError> {
        Self::with_http(Client::new(), page_url)
    }

    pub fn with_http(http: Client, page_url: &str) -> Result<Self, PageUrlError> {
        let parsed = Url::parse(page_url).map_err(|source| PageUrlError::Parse {
            url: page_url.to_string(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(PageUrlError::CannotBeBase {
                url: page_url.to_string(),
            });
        }
        Ok(Self {
            http,
            page_url: parsed,
        })
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    fn endpoint_url(&self, endpoint: &str) -> Url {
        let mut url = self.page_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }
        url
    }

    /// Ask the backend to retune the transceiver to the command's
    /// frequency and mode. Values are opaque; the backend interprets them.
    pub fn tune_rig(&self, command: RigCommand) {
        info!(freq = %command.freq, mode = %command.mode, "rig: tune requested");
        self.send_and_forget(
            self.http
                .get(self.endpoint_url(FLRIG_ENDPOINT))
                .query(&command),
            "rig",
        );
    }

    /// Ask the backend to persist one contact.
    pub fn save_log_entry(&self, entry: LogEntry) {
        info!(
            call = %entry.call,
            freq = %entry.freq,
            mode = %entry.mode,
            reference = %entry.reference,
            "log: save requested"
        );
        self.send_and_forget(
            self.http
                .get(self.endpoint_url(LOGDATA_ENDPOINT))
                .query(&entry),
            "log",
        );
    }

    fn send_and_forget(&self, request: RequestBuilder, what: &'static str) {
        tokio::spawn(async move {
            match request.send().await {
                Ok(response) => debug!(status = %response.status(), "{what}: request completed"),
                Err(err) => debug!("{what}: request failed: {err}"),
            }
        });
    }
}

/// One page lifetime: the countdown state plus the ticker task driving it.
pub struct PageSession {
    countdown: Mutex<ReloadCountdown>,
    display: Arc<dyn CountdownDisplay>,
    reloader: Arc<dyn PageReloader>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl PageSession {
    pub fn new(
        timeout_secs: u64,
        display: Arc<dyn CountdownDisplay>,
        reloader: Arc<dyn PageReloader>,
    ) -> Arc<Self> {
        Arc::new(Self {
            countdown: Mutex::new(ReloadCountdown::new(timeout_secs)),
            display,
            reloader,
            ticker: Mutex::new(None),
        })
    }

    /// Show the configured timeout and start the one-second ticker.
    ///
    /// The ticker runs once per session; a second call is a no-op.
    pub async fn start(self: &Arc<Self>) {
        let mut ticker = self.ticker.lock().await;
        if ticker.is_some() {
            warn!("reload: ticker already running; start ignored");
            return;
        }
        let timeout = self.countdown.lock().await.timeout();
        self.display.show_remaining(timeout);
        info!(timeout_secs = timeout, "reload: countdown started");
        let session = Arc::clone(self);
        *ticker = Some(tokio::spawn(async move {
            let mut ticks = interval(TICK_PERIOD);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately; skip it so the
            // first decrement lands a full second after start.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                session.tick().await;
            }
        }));
    }

    /// Advance the countdown one second and apply the outcome to the seams.
    pub async fn tick(&self) {
        let outcome = self.countdown.lock().await.tick();
        match outcome {
            TickOutcome::Show(seconds) => self.display.show_remaining(seconds),
            TickOutcome::ShowPaused => self.display.show_paused(),
            TickOutcome::Reload => {
                self.display.show_remaining(0);
                info!("reload: countdown expired; reloading page");
                self.reloader.reload().await;
            }
        }
    }

    /// The user's pause control: freeze while running, restart from the
    /// full timeout while paused.
    pub async fn toggle_pause(&self) {
        let outcome = self.countdown.lock().await.toggle_pause();
        match outcome {
            ToggleOutcome::Paused => {
                self.display.show_paused();
                self.display.set_pause_label(PauseLabel::Restart);
                info!("reload: countdown paused");
            }
            ToggleOutcome::Restarted { remaining } => {
                self.display.show_remaining(remaining);
                self.display.set_pause_label(PauseLabel::Pause);
                info!(timeout_secs = remaining, "reload: countdown restarted");
            }
        }
    }

    /// Cancel the ticker. The page never does this on its own; hosts may on
    /// teardown.
    pub async fn stop(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
            info!("reload: ticker stopped");
        }
    }
}

#[cfg(test)]
mod tests;
