//! Wiring of session, client and view context for one CLI run

use crate::output;
use crate::Format;
use anyhow::{Context as _, Result};
use masakin_api_client::{ClientConfig, MasakinClient};
use masakin_app::{App, History, NotificationCenter};
use masakin_core::session::SessionStore;
use masakin_core::storage::FileStorage;
use owo_colors::OwoColorize;
use std::sync::Arc;
use tracing::debug;

pub struct Context {
    pub app: App,
    pub history: Arc<History>,
    pub notices: Arc<NotificationCenter>,
    pub format: Format,
}

impl Context {
    pub fn new(base_url: Option<String>, format: Format) -> Result<Self> {
        let storage = FileStorage::default_location();
        debug!(path = %storage.path().display(), "Opening session");
        let session = SessionStore::open(storage).context("Failed to open session")?;

        let mut config = ClientConfig::from_env()?;
        if let Some(url) = base_url {
            config = config.with_base_url(url);
        }

        let history = Arc::new(History::new());
        let notices = Arc::new(NotificationCenter::new());
        let client = MasakinClient::with_config(config, session, history.clone())?;
        let app = App::new(client, history.clone(), notices.clone());

        Ok(Self {
            app,
            history,
            notices,
            format,
        })
    }

    pub fn json(&self) -> bool {
        self.format == Format::Json
    }

    /// Print queued notifications and any forced sign-out
    pub fn flush(&self) {
        if self.json() {
            return;
        }
        for notice in self.notices.drain() {
            output::notification(&notice);
        }
        if self.history.hard_resets() > 0 {
            println!(
                "  {} {}",
                "!".yellow().bold(),
                "Session expired. Run `masakin login` to sign in again.".yellow()
            );
        }
    }
}
