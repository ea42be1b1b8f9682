use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::Parser;
use page_core::{
    CountdownDisplay, LogEntry, PageReloader, PageSession, PauseLabel, RigCommand, SpotPageClient,
    PAUSED_SENTINEL,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Page URL the controller issues requests against.
    #[arg(long)]
    page_url: Option<String>,
    /// Countdown duration in seconds before the page reloads.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Tune the rig to this frequency (kHz) on startup.
    #[arg(long, requires = "mode")]
    freq: Option<String>,
    /// Rig mode to set alongside --freq.
    #[arg(long, requires = "freq")]
    mode: Option<String>,
    /// Save a log entry for this callsign on startup.
    #[arg(long)]
    call: Option<String>,
    /// Park reference for the log entry.
    #[arg(long)]
    park: Option<String>,
    /// Operator name for the log entry.
    #[arg(long)]
    op_name: Option<String>,
}

struct TerminalDisplay;

impl CountdownDisplay for TerminalDisplay {
    fn show_remaining(&self, seconds: u64) {
        println!("reload in {seconds}s");
    }

    fn show_paused(&self) {
        println!("reload in {PAUSED_SENTINEL}");
    }

    fn set_pause_label(&self, label: PauseLabel) {
        println!("[{}]", label.caption());
    }
}

/// Terminal stand-in for the browser reload: fetch the page again.
struct PageFetchReloader {
    http: reqwest::Client,
    page_url: String,
}

#[async_trait]
impl PageReloader for PageFetchReloader {
    async fn reload(&self) {
        match self.http.get(&self.page_url).send().await {
            Ok(response) => info!(status = %response.status(), "reload: page fetched"),
            Err(err) => info!("reload: page fetch failed: {err}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings();

    let page_url = args.page_url.unwrap_or(settings.page_url);
    let timeout_secs = args.timeout_secs.unwrap_or(settings.reload_timeout_secs);
    if timeout_secs == 0 {
        return Err(anyhow!("--timeout-secs must be positive"));
    }

    let client = SpotPageClient::new(&page_url)?;

    if let (Some(freq), Some(mode)) = (args.freq.as_ref(), args.mode.as_ref()) {
        client.tune_rig(RigCommand {
            freq: freq.clone(),
            mode: mode.clone(),
        });
    }

    if let Some(call) = args.call {
        let entry = LogEntry {
            call,
            freq: args.freq.unwrap_or_default(),
            mode: args.mode.unwrap_or_default(),
            reference: args.park.unwrap_or_default(),
            name: args.op_name.unwrap_or_default(),
        };
        println!("Saving log entry: {}", serde_json::to_string(&entry)?);
        client.save_log_entry(entry);
    }

    let session = PageSession::new(
        timeout_secs,
        Arc::new(TerminalDisplay),
        Arc::new(PageFetchReloader {
            http: reqwest::Client::new(),
            page_url: page_url.clone(),
        }),
    );
    session.start().await;

    println!("p = pause/restart countdown, q = quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line?.as_deref() {
                Some("p") | Some("P") => session.toggle_pause().await,
                Some("q") | Some("Q") | None => break,
                Some(_) => {}
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.stop().await;
    Ok(())
}
