// src/cli.rs
use crate::events_download::SourceLocation;
use crate::errors::FetchError;
use crate::table::SortKey;
use crate::theme::Theme;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Terminal board for community events listed in an `events.json` document.
#[derive(Debug, Parser)]
#[command(name = "eventboard", version, about)]
pub struct Cli {
    /// Event document: an http(s) URL, a file:// URL or a local path.
    #[arg(long, default_value = "events.json")]
    pub source: String,

    /// Page URL a relative --source is resolved against.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Initial sort selection: date, venue, or anything else for fetch order.
    #[arg(long, default_value = "default")]
    pub sort: String,

    /// Initial theme.
    #[arg(long, default_value = "default", value_parser = parse_theme)]
    pub theme: Theme,

    /// File the log is written to; the terminal itself belongs to the UI.
    #[arg(long, default_value = "eventboard.log")]
    pub log_file: PathBuf,

    #[arg(long, default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

fn parse_theme(name: &str) -> Result<Theme, String> {
    Theme::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Theme::ALL.iter().map(|t| t.name()).collect();
        format!("unknown theme '{}', expected one of: {}", name, known.join(", "))
    })
}

fn parse_level(name: &str) -> Result<LevelFilter, String> {
    name.parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level '{}', expected off/error/warn/info/debug/trace", name))
}

impl Cli {
    pub fn sort_key(&self) -> SortKey {
        SortKey::from(self.sort.as_str())
    }

    pub fn source_location(&self) -> Result<SourceLocation, FetchError> {
        SourceLocation::resolve(&self.source, self.base_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["eventboard"]).unwrap();
        assert_eq!(cli.source, "events.json");
        assert_eq!(cli.sort_key(), SortKey::Unsorted);
        assert_eq!(cli.theme, Theme::Default);
        assert_eq!(cli.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_explicit_options() {
        let cli = Cli::try_parse_from([
            "eventboard",
            "--source",
            "events.json",
            "--base-url",
            "https://example.com/board/",
            "--sort",
            "venue",
            "--theme",
            "retro",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.sort_key(), SortKey::Venue);
        assert_eq!(cli.theme, Theme::Retro);
        assert_eq!(cli.log_level, LevelFilter::Debug);
        assert_eq!(
            cli.source_location().unwrap().to_string(),
            "https://example.com/board/events.json"
        );
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!(Cli::try_parse_from(["eventboard", "--theme", "plaid"]).is_err());
    }
}
