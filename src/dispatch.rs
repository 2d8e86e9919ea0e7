// src/dispatch.rs
//! Input routing. Every interactive element of the board is registered here
//! once, keyed by what was touched and how, and key/mouse input is turned into
//! `UiEvent`s that go through this table.
use crate::app::App;
use crate::modal::ModalId;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    SortSelect,
    ThemeSelect,
    ApplyButton,
    SourcesLink,
    VenueCell,
    EventCell,
    CloseButton(ModalId),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    Change,
    Click,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    /// Index into the rendered rows.
    Row(usize),
    /// New value of a selector.
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub element: Element,
    pub kind: UiEventKind,
    pub payload: Payload,
}

impl UiEvent {
    pub fn click(element: Element) -> Self {
        Self { element, kind: UiEventKind::Click, payload: Payload::None }
    }

    pub fn click_row(element: Element, row: usize) -> Self {
        Self { element, kind: UiEventKind::Click, payload: Payload::Row(row) }
    }

    pub fn change(element: Element, value: &str) -> Self {
        Self { element, kind: UiEventKind::Change, payload: Payload::Value(value.to_string()) }
    }
}

pub type Handler = fn(&mut App, &UiEvent);

pub struct DispatchTable {
    handlers: HashMap<(Element, UiEventKind), Handler>,
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchTable {
    pub fn new() -> Self {
        let mut table = Self { handlers: HashMap::new() };
        table.register(Element::SortSelect, UiEventKind::Change, on_sort_change);
        table.register(Element::ThemeSelect, UiEventKind::Change, on_theme_change);
        table.register(Element::ApplyButton, UiEventKind::Click, on_apply);
        table.register(Element::SourcesLink, UiEventKind::Click, on_sources);
        table.register(Element::VenueCell, UiEventKind::Click, on_venue_cell);
        table.register(Element::EventCell, UiEventKind::Click, on_event_cell);
        for id in ModalId::ALL {
            table.register(Element::CloseButton(id), UiEventKind::Click, on_close);
        }
        table.register(Element::Quit, UiEventKind::Click, on_quit);
        table
    }

    pub fn register(&mut self, element: Element, kind: UiEventKind, handler: Handler) {
        self.handlers.insert((element, kind), handler);
    }

    pub fn handler(&self, element: Element, kind: UiEventKind) -> Option<Handler> {
        self.handlers.get(&(element, kind)).copied()
    }
}

// ==================================== Handlers ===============================================

fn on_sort_change(app: &mut App, ev: &UiEvent) {
    if let Payload::Value(value) = &ev.payload {
        app.set_sort_key(value.as_str().into());
    }
}

fn on_theme_change(app: &mut App, ev: &UiEvent) {
    if let Payload::Value(value) = &ev.payload {
        app.change_theme_by_name(value);
    }
}

fn on_apply(app: &mut App, _ev: &UiEvent) {
    app.render();
}

fn on_sources(app: &mut App, _ev: &UiEvent) {
    app.open_sources_modal();
}

fn on_venue_cell(app: &mut App, ev: &UiEvent) {
    if let Payload::Row(row) = ev.payload {
        app.open_venue_modal(row);
    }
}

fn on_event_cell(app: &mut App, ev: &UiEvent) {
    if let Payload::Row(row) = ev.payload {
        app.open_event_modal(row);
    }
}

fn on_close(app: &mut App, ev: &UiEvent) {
    if let Element::CloseButton(id) = ev.element {
        app.close_modal(id);
    }
}

fn on_quit(app: &mut App, _ev: &UiEvent) {
    app.should_quit = true;
}

// ================================= Input translation =========================================

/// Maps a key press to the element it stands in for. Navigation keys are
/// handled by the app directly and return `None` here.
pub fn key_to_ui_event(app: &App, key: KeyCode) -> Option<UiEvent> {
    match key {
        KeyCode::Char('q') => Some(UiEvent::click(Element::Quit)),
        KeyCode::Char('s') => Some(UiEvent::change(Element::SortSelect, app.sort_key.next().as_str())),
        KeyCode::Char('t') => Some(UiEvent::change(Element::ThemeSelect, app.theme.next().name())),
        KeyCode::Char('a') => Some(UiEvent::click(Element::ApplyButton)),
        KeyCode::Char('o') => Some(UiEvent::click(Element::SourcesLink)),
        KeyCode::Esc | KeyCode::Char('c') => {
            app.modals.top().map(|id| UiEvent::click(Element::CloseButton(id)))
        }
        KeyCode::Char('v') if !app.modals.any_visible() => {
            app.selected_row().map(|row| UiEvent::click_row(Element::VenueCell, row))
        }
        KeyCode::Enter | KeyCode::Char('e') if !app.modals.any_visible() => {
            app.selected_row().map(|row| UiEvent::click_row(Element::EventCell, row))
        }
        _ => None,
    }
}

/// Maps a left click on a table cell to a venue or event cell click.
pub fn mouse_to_ui_event(app: &App, mouse: MouseEvent) -> Option<UiEvent> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) || app.modals.any_visible() {
        return None;
    }
    let (row, column) =
        app.table_layout.hit_test(mouse.column, mouse.row, app.table_state.offset(), app.rows.len())?;
    match column {
        2 => Some(UiEvent::click_row(Element::VenueCell, row)),
        3 => Some(UiEvent::click_row(Element::EventCell, row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_element_has_a_handler() {
        let table = DispatchTable::new();
        assert!(table.handler(Element::SortSelect, UiEventKind::Change).is_some());
        assert!(table.handler(Element::ThemeSelect, UiEventKind::Change).is_some());
        assert!(table.handler(Element::ApplyButton, UiEventKind::Click).is_some());
        assert!(table.handler(Element::SourcesLink, UiEventKind::Click).is_some());
        assert!(table.handler(Element::VenueCell, UiEventKind::Click).is_some());
        assert!(table.handler(Element::EventCell, UiEventKind::Click).is_some());
        for id in ModalId::ALL {
            assert!(table.handler(Element::CloseButton(id), UiEventKind::Click).is_some());
        }
    }

    #[test]
    fn test_unregistered_pairs_have_no_handler() {
        let table = DispatchTable::new();
        assert!(table.handler(Element::SortSelect, UiEventKind::Click).is_none());
        assert!(table.handler(Element::VenueCell, UiEventKind::Change).is_none());
    }

    #[test]
    fn test_sort_key_press_becomes_change_with_next_value() {
        let app = App::new();
        let ev = key_to_ui_event(&app, KeyCode::Char('s')).unwrap();
        assert_eq!(ev, UiEvent::change(Element::SortSelect, "date"));
    }

    #[test]
    fn test_escape_without_modal_does_nothing() {
        let app = App::new();
        assert!(key_to_ui_event(&app, KeyCode::Esc).is_none());
    }
}
