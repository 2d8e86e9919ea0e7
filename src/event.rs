// src/event.rs
use crate::calendar::SessionState;
use crate::errors::FetchError;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub enum AppEvent {
    /// Emitted once, when the startup fetch of the event document settles.
    DocumentLoaded {
        result: Result<SessionState, FetchError>,
        timestamp: DateTime<Utc>,
    },
}
