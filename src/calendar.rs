// src/calendar.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// === LENIENT FIELD DESERIALIZERS ===
// A null or oddly typed value in one field must not cost the whole document,
// so fields go through `Value` and fall back instead of failing.

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

// Truthiness, the way the page tested the flag.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn lenient_venue_info<'de, D: Deserializer<'de>>(deserializer: D) -> Result<VenueInfo, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(VenueInfo::deserialize(value).unwrap_or_default())
}

// === VENUE / EVENT STRUCTURES ===
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueInfo {
    #[serde(rename = "description", deserialize_with = "lenient_string")]
    description: String,
    #[serde(rename = "photo_url", deserialize_with = "lenient_string")]
    photo_url: String,
    #[serde(rename = "yelp_url", deserialize_with = "lenient_string")]
    yelp_url: String,
    #[serde(rename = "maps_url", deserialize_with = "lenient_string")]
    maps_url: String,
}

impl VenueInfo {
    pub fn new(description: &str, photo_url: &str, yelp_url: &str, maps_url: &str) -> Self {
        Self {
            description: description.to_string(),
            photo_url: photo_url.to_string(),
            yelp_url: yelp_url.to_string(),
            maps_url: maps_url.to_string(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn photo_url(&self) -> &str {
        &self.photo_url
    }

    pub fn yelp_url(&self) -> &str {
        &self.yelp_url
    }

    pub fn maps_url(&self) -> &str {
        &self.maps_url
    }
}

/// One calendar entry. Every field falls back to its default when the
/// document leaves it out, so a sparse entry still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(rename = "date", deserialize_with = "lenient_string")]
    date: String,
    #[serde(rename = "time", deserialize_with = "lenient_string")]
    time: String,
    #[serde(rename = "venue", deserialize_with = "lenient_string")]
    venue: String,
    #[serde(rename = "venue_info", deserialize_with = "lenient_venue_info")]
    venue_info: VenueInfo,
    #[serde(rename = "description", deserialize_with = "lenient_string")]
    description: String,
    #[serde(rename = "link", deserialize_with = "lenient_string")]
    link: String,
    #[serde(rename = "category", deserialize_with = "lenient_string")]
    category: String,
    #[serde(rename = "is_new", deserialize_with = "lenient_bool")]
    is_new: bool,
}

impl Event {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: &str,
        time: &str,
        venue: &str,
        venue_info: VenueInfo,
        description: &str,
        link: &str,
        category: &str,
        is_new: bool,
    ) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            venue: venue.to_string(),
            venue_info,
            description: description.to_string(),
            link: link.to_string(),
            category: category.to_string(),
            is_new,
        }
    }

    // Accessor methods

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn venue_info(&self) -> &VenueInfo {
        &self.venue_info
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }
}

// === SOURCE STRUCTURES ===
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    #[serde(rename = "title", deserialize_with = "lenient_string")]
    title: String,
    #[serde(rename = "url", deserialize_with = "lenient_string")]
    url: String,
}

impl Source {
    pub fn new(title: &str, url: &str) -> Self {
        Self { title: title.to_string(), url: url.to_string() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Wire shape of `events.json`. `null` and a missing key both land as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventDocument {
    #[serde(default)]
    pub events: Option<Vec<Event>>,
    #[serde(default)]
    pub sources: Option<Vec<Source>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_updated: String,
}

// === SESSION STATE ===

/// Snapshot of the most recently fetched document. Built once and never
/// edited; a new fetch replaces the whole value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    events: Vec<Event>,
    sources: Vec<Source>,
    last_updated: String,
}

impl SessionState {
    pub fn new(events: Vec<Event>, sources: Vec<Source>, last_updated: String) -> Self {
        Self { events, sources, last_updated }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn last_updated(&self) -> &str {
        &self.last_updated
    }

    pub fn event(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }
}

impl From<EventDocument> for SessionState {
    fn from(doc: EventDocument) -> Self {
        Self {
            events: doc.events.unwrap_or_default(),
            sources: doc.sources.unwrap_or_default(),
            last_updated: doc.last_updated,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Events      : {}", self.events.len())?;
        writeln!(f, "Sources     : {}", self.sources.len())?;
        if self.last_updated.is_empty() {
            writeln!(f, "Last updated: unknown")
        } else {
            writeln!(f, "Last updated: {}", self.last_updated)
        }
    }
}
