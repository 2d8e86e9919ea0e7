// src/modal.rs
use crate::calendar::{Source, VenueInfo};
use crate::widgets::scrollable_paragraph::ScrollableParagraphState;
use std::fmt;
use std::str::FromStr;

pub const EVENT_MODAL_TITLE: &str = "event details";

/// Query parameter that turns a maps link into driving directions.
pub const DIRECTIONS_PARAM: &str = "&dirflg=d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    Event,
    Venue,
    Sources,
}

impl ModalId {
    pub const ALL: [ModalId; 3] = [ModalId::Event, ModalId::Venue, ModalId::Sources];

    pub fn element_id(&self) -> &'static str {
        match self {
            ModalId::Event => "eventModal",
            ModalId::Venue => "venueModal",
            ModalId::Sources => "sourcesModal",
        }
    }
}

impl FromStr for ModalId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModalId::ALL
            .into_iter()
            .find(|id| id.element_id() == s)
            .ok_or_else(|| format!("unknown modal id: {}", s))
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

pub fn directions_url(maps_url: &str) -> String {
    format!("{}{}", maps_url, DIRECTIONS_PARAM)
}

#[derive(Debug, Clone, Default)]
pub struct EventPanel {
    pub visible: bool,
    pub title: String,
    pub link: String,
    pub details: ScrollableParagraphState,
}

#[derive(Debug, Clone, Default)]
pub struct VenuePanel {
    pub visible: bool,
    pub name: String,
    pub photo_url: String,
    pub yelp_url: String,
    pub maps_url: String,
    pub directions_url: String,
    pub details: ScrollableParagraphState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Default)]
pub struct SourcesPanel {
    pub visible: bool,
    pub links: Vec<SourceLink>,
    pub details: ScrollableParagraphState,
}

/// The three overlays. They are independent of each other; `open_order`
/// only remembers which one was shown last so `Esc` can close it.
#[derive(Debug, Clone, Default)]
pub struct ModalController {
    pub event: EventPanel,
    pub venue: VenuePanel,
    pub sources: SourcesPanel,
    open_order: Vec<ModalId>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    fn mark_open(&mut self, id: ModalId) {
        self.open_order.retain(|open| *open != id);
        self.open_order.push(id);
    }

    pub fn show_event(&mut self, description: &str, link: &str) {
        self.event.title = EVENT_MODAL_TITLE.to_string();
        self.event.details.set_content(description.to_string());
        self.event.link = link.to_string();
        self.event.visible = true;
        self.mark_open(ModalId::Event);
    }

    pub fn show_venue(&mut self, name: &str, info: &VenueInfo) {
        self.venue.name = name.to_string();
        self.venue.photo_url = info.photo_url().to_string();
        self.venue.details.set_content(info.description().to_string());
        self.venue.yelp_url = info.yelp_url().to_string();
        self.venue.maps_url = info.maps_url().to_string();
        self.venue.directions_url = directions_url(info.maps_url());
        self.venue.visible = true;
        self.mark_open(ModalId::Venue);
    }

    pub fn show_sources(&mut self, sources: &[Source]) {
        self.sources.links = sources
            .iter()
            .map(|s| SourceLink { text: s.title().to_string(), href: s.url().to_string() })
            .collect();
        let listing: Vec<String> =
            self.sources.links.iter().map(|l| format!("• {}\n  {}", l.text, l.href)).collect();
        self.sources.details.set_content(listing.join("\n"));
        self.sources.visible = true;
        self.mark_open(ModalId::Sources);
    }

    pub fn close(&mut self, id: ModalId) {
        match id {
            ModalId::Event => self.event.visible = false,
            ModalId::Venue => self.venue.visible = false,
            ModalId::Sources => self.sources.visible = false,
        }
        self.open_order.retain(|open| *open != id);
    }

    pub fn is_visible(&self, id: ModalId) -> bool {
        match id {
            ModalId::Event => self.event.visible,
            ModalId::Venue => self.venue.visible,
            ModalId::Sources => self.sources.visible,
        }
    }

    pub fn any_visible(&self) -> bool {
        !self.open_order.is_empty()
    }

    /// Most recently opened overlay that is still visible.
    pub fn top(&self) -> Option<ModalId> {
        self.open_order.last().copied()
    }

    /// Visible overlays, oldest first; that is also the draw order.
    pub fn visible_in_order(&self) -> &[ModalId] {
        &self.open_order
    }

    pub fn body_mut(&mut self, id: ModalId) -> &mut ScrollableParagraphState {
        match id {
            ModalId::Event => &mut self.event.details,
            ModalId::Venue => &mut self.venue.details,
            ModalId::Sources => &mut self.sources.details,
        }
    }
}
