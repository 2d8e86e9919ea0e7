// src/loader.rs
use crate::app::App;
use crate::calendar::SessionState;
use crate::errors::FetchError;
use crate::event::AppEvent;
use crate::events_download::{DocumentFetcher, SourceLocation, download_session};
use chrono::Utc;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Issues the single fetch of the event document.
pub struct DataLoader {
    fetcher: Arc<dyn DocumentFetcher>,
    location: SourceLocation,
}

impl DataLoader {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, location: SourceLocation) -> Self {
        Self { fetcher, location }
    }

    pub async fn load(&self) -> Result<SessionState, FetchError> {
        download_session(&self.location, self.fetcher.as_ref()).await
    }

    /// Runs the fetch in the background and posts the outcome to the UI loop.
    pub fn spawn(self, tx: UnboundedSender<AppEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let result = self.load().await;
            let event = AppEvent::DocumentLoaded { result, timestamp: Utc::now() };
            if tx.send(event).is_err() {
                info!("DataLoader: UI loop is gone, dropping result for {}", self.location);
            }
        })
    }
}

/// Settles the loading indicator and, on success, installs the new session
/// and re-renders. Failures are logged and shown; there is no retry.
pub fn apply_load_result(app: &mut App, result: Result<SessionState, FetchError>) {
    match result {
        Ok(state) => {
            info!("DataLoader: document loaded\n{}", state);
            app.install_session(state);
        }
        Err(e) => {
            error!("Failed to load events.json: {}", e);
            app.fail_loading();
        }
    }
}
