// src/events_download.rs
use crate::calendar::{EventDocument, SessionState};
use crate::errors::FetchError;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Where the event document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Remote(Url),
    Local(PathBuf),
}

impl SourceLocation {
    /// Resolves `raw` the way a page resolves `fetch("events.json")`: absolute
    /// http(s) URLs are used as is, relative ones are joined onto `base` when
    /// one is given, and everything else is a local path.
    pub fn resolve(raw: &str, base: Option<&str>) -> Result<Self, FetchError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FetchError::InvalidLocation("empty source location".to_string()));
        }

        if let Ok(url) = Url::parse(raw) {
            return match url.scheme() {
                "http" | "https" => Ok(SourceLocation::Remote(url)),
                "file" => url.to_file_path().map(SourceLocation::Local).map_err(|_| {
                    FetchError::InvalidLocation(format!("not a usable file URL: {}", raw))
                }),
                other => Err(FetchError::InvalidLocation(format!(
                    "unsupported scheme '{}' in {}. Only http/https/file supported",
                    other, raw
                ))),
            };
        }

        match base {
            Some(base) => {
                let base_url = Url::parse(base).map_err(|e| {
                    FetchError::InvalidLocation(format!("invalid base URL '{}': {}", base, e))
                })?;
                let joined = base_url.join(raw).map_err(|e| {
                    FetchError::InvalidLocation(format!("cannot join '{}' onto '{}': {}", raw, base, e))
                })?;
                SourceLocation::resolve(joined.as_str(), None)
            }
            None => Ok(SourceLocation::Local(PathBuf::from(raw))),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Remote(url) => write!(f, "{}", url),
            SourceLocation::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

// ===== fetcher
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError>;
}

// ===== Live http fetcher
pub struct HttpDocumentFetcher {
    client: Client,
}

impl HttpDocumentFetcher {
    pub fn new() -> Result<Self, FetchError> {
        const APP_USER_AGENT: &str = concat!("eventboard/", env!("CARGO_PKG_VERSION"));

        let client: Client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError> {
        let SourceLocation::Remote(url) = location else {
            return Err(FetchError::InvalidLocation(format!(
                "HttpDocumentFetcher cannot read {}",
                location
            )));
        };
        info!("HttpDocumentFetcher: fetching {}", url);
        let response: Response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::BadStatus(response.status()));
        }
        Ok(response.text().await?)
    }
}

// ===== Local file fetcher
pub struct FileDocumentFetcher;

#[async_trait]
impl DocumentFetcher for FileDocumentFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError> {
        let SourceLocation::Local(path) = location else {
            return Err(FetchError::InvalidLocation(format!(
                "FileDocumentFetcher cannot read {}",
                location
            )));
        };
        info!("FileDocumentFetcher: reading {}", path.display());
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::Io { location: location.to_string(), source })
    }
}

// ===== Fake fetcher for testing
pub struct FakeFetcher {
    /// `None` simulates an unreachable host.
    pub response: Option<String>,
}

impl FakeFetcher {
    pub fn with_body(body: &str) -> Self {
        Self { response: Some(body.to_string()) }
    }

    pub fn unreachable() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl DocumentFetcher for FakeFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError> {
        match &self.response {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::Io {
                location: location.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ),
            }),
        }
    }
}

pub fn fetcher_for(location: &SourceLocation) -> Result<Arc<dyn DocumentFetcher>, FetchError> {
    Ok(match location {
        SourceLocation::Remote(_) => Arc::new(HttpDocumentFetcher::new()?),
        SourceLocation::Local(_) => Arc::new(FileDocumentFetcher),
    })
}

pub fn parse_document(content: &str) -> Result<EventDocument, FetchError> {
    Ok(serde_json::from_str(content)?)
}

pub async fn download_session(
    location: &SourceLocation,
    fetcher: &dyn DocumentFetcher,
) -> Result<SessionState, FetchError> {
    info!("download_session: fetching document from {}", location);
    let content: String = fetcher.fetch(location).await?;
    debug!("download_session: content fetched, length: {}", content.len());
    let document: EventDocument = parse_document(&content)?;
    Ok(SessionState::from(document))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_DOC: &str = r#"{"events":[{"date":"2025-09-01","time":"7pm","venue":"Hall A",
        "venue_info":{"description":"d","photo_url":"p","yelp_url":"y","maps_url":"m"},
        "description":"Jazz night","link":"http://x","category":"music","is_new":true}],
        "sources":[],"last_updated":"2025-09-01T00:00:00Z"}"#;

    #[test]
    fn test_resolve_remote_and_local() {
        let remote = SourceLocation::resolve("https://example.com/events.json", None).unwrap();
        assert!(matches!(remote, SourceLocation::Remote(_)));

        let local = SourceLocation::resolve("events.json", None).unwrap();
        assert_eq!(local, SourceLocation::Local(PathBuf::from("events.json")));
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let loc =
            SourceLocation::resolve("events.json", Some("https://example.com/board/index.html"))
                .unwrap();
        assert_eq!(loc.to_string(), "https://example.com/board/events.json");
    }

    #[test]
    fn test_resolve_rejects_unsupported_scheme() {
        let result = SourceLocation::resolve("ftp://example.com/events.json", None);
        assert!(matches!(result, Err(FetchError::InvalidLocation(_))));
        assert!(matches!(SourceLocation::resolve("  ", None), Err(FetchError::InvalidLocation(_))));
    }

    #[tokio::test]
    async fn test_download_session() {
        let fetcher = FakeFetcher::with_body(SCENARIO_DOC);
        let location = SourceLocation::Local(PathBuf::from("events.json"));

        let state = download_session(&location, &fetcher).await.unwrap();

        assert_eq!(state.events().len(), 1);
        assert_eq!(state.events()[0].venue(), "Hall A");
        assert_eq!(state.last_updated(), "2025-09-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_file_fetcher_reads_document() {
        let path = std::env::temp_dir().join(format!("eventboard-test-{}.json", std::process::id()));
        tokio::fs::write(&path, SCENARIO_DOC).await.unwrap();

        let location = SourceLocation::Local(path.clone());
        let state = download_session(&location, &FileDocumentFetcher).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(state.events()[0].description(), "Jazz night");
    }

    // SAD PATHS

    #[tokio::test]
    async fn test_malformed_document() {
        let fetcher = FakeFetcher::with_body(r#"{"events": [ {"#);
        let location = SourceLocation::Local(PathBuf::from("events.json"));

        let result = download_session(&location, &fetcher).await;
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_source() {
        let location = SourceLocation::Local(PathBuf::from("events.json"));
        let result = download_session(&location, &FakeFetcher::unreachable()).await;
        assert!(matches!(result, Err(FetchError::Io { .. })));
    }

    #[tokio::test]
    async fn test_missing_local_file() {
        let location = SourceLocation::Local(PathBuf::from("/definitely/not/here/events.json"));
        let result = download_session(&location, &FileDocumentFetcher).await;
        assert!(matches!(result, Err(FetchError::Io { .. })));
    }

    #[tokio::test]
    async fn test_http_fetcher_rejects_local_location() {
        let fetcher = HttpDocumentFetcher::new().unwrap();
        let location = SourceLocation::Local(PathBuf::from("events.json"));
        let result = fetcher.fetch(&location).await;
        assert!(matches!(result, Err(FetchError::InvalidLocation(_))));
    }
}
