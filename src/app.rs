use crate::calendar::SessionState;
use crate::dispatch::{DispatchTable, Payload, UiEvent, key_to_ui_event, mouse_to_ui_event};
use crate::event::AppEvent;
use crate::format::footer_text;
use crate::loader::apply_load_result;
use crate::modal::{ModalController, ModalId};
use crate::table::{SortKey, TableRow, render_rows};
use crate::theme::Theme;
use crate::ui::TableLayout;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info, warn};
use ratatui::{Terminal, backend::Backend, widgets::TableState};
use std::io;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl LoadStatus {
    pub fn loading_visible(&self) -> bool {
        *self == LoadStatus::Loading
    }

    pub fn error_visible(&self) -> bool {
        *self == LoadStatus::Failed
    }
}

pub struct App {
    pub should_quit: bool,
    session: SessionState,
    pub load_status: LoadStatus,
    pub sort_key: SortKey,
    pub theme: Theme,
    /// Class on the document root; replaced wholesale on every theme change.
    pub document_class: String,
    pub rows: Vec<TableRow>,
    pub table_state: TableState,
    pub footer: String,
    pub modals: ModalController,
    pub table_layout: TableLayout,
    dispatch: DispatchTable,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> App {
        App::with_preferences(SortKey::default(), Theme::default())
    }

    pub fn with_preferences(sort_key: SortKey, theme: Theme) -> App {
        App {
            should_quit: false,
            session: SessionState::default(),
            load_status: LoadStatus::default(),
            sort_key,
            theme,
            document_class: theme.class_name(),
            rows: Vec::new(),
            table_state: TableState::default(),
            footer: footer_text(""),
            modals: ModalController::new(),
            table_layout: TableLayout::default(),
            dispatch: DispatchTable::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // =================================== Loading =================================================

    pub fn begin_loading(&mut self) {
        self.load_status = LoadStatus::Loading;
    }

    // Only the loader calls this.
    pub(crate) fn install_session(&mut self, state: SessionState) {
        self.session = state;
        self.load_status = LoadStatus::Loaded;
        self.render();
        self.update_footer();
    }

    pub(crate) fn fail_loading(&mut self) {
        self.load_status = LoadStatus::Failed;
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DocumentLoaded { result, timestamp } => {
                debug!("App: document fetch settled at {}", timestamp);
                apply_load_result(self, result);
            }
        }
    }

    // =================================== Rendering ===============================================

    /// Rebuilds the whole table body from the session and the sort key.
    pub fn render(&mut self) {
        self.rows = render_rows(&self.session, self.sort_key);
        debug!("App: rendered {} rows (sort: {})", self.rows.len(), self.sort_key);

        let selected = match (self.rows.is_empty(), self.table_state.selected()) {
            (true, _) => None,
            (false, None) => Some(0),
            (false, Some(i)) => Some(i.min(self.rows.len() - 1)),
        };
        self.table_state.select(selected);
    }

    pub fn update_footer(&mut self) {
        self.footer = footer_text(self.session.last_updated());
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.render();
    }

    pub fn change_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.document_class = theme.class_name();
        self.render();
    }

    pub fn change_theme_by_name(&mut self, name: &str) {
        match Theme::from_name(name) {
            Some(theme) => self.change_theme(theme),
            None => warn!("App: ignoring unknown theme '{}'", name),
        }
    }

    // ================================== Table selection ==========================================

    pub fn selected_row(&self) -> Option<usize> {
        self.table_state.selected().filter(|&i| i < self.rows.len())
    }

    pub fn select_next_row(&mut self) {
        if self.rows.is_empty() {
            self.table_state.select(None);
            return;
        }
        let next = self.selected_row().map_or(0, |i| (i + 1) % self.rows.len());
        self.table_state.select(Some(next));
    }

    pub fn select_prev_row(&mut self) {
        if self.rows.is_empty() {
            self.table_state.select(None);
            return;
        }
        let len = self.rows.len();
        let prev = self.selected_row().map_or(len - 1, |i| (i + len - 1) % len);
        self.table_state.select(Some(prev));
    }

    // ===================================== Modals ================================================

    pub fn open_event_modal(&mut self, row: usize) {
        let Some(event) = self.rows.get(row).and_then(|r| self.session.event(r.source_index)) else {
            return;
        };
        self.modals.show_event(event.description(), event.link());
    }

    pub fn open_venue_modal(&mut self, row: usize) {
        let Some(event) = self.rows.get(row).and_then(|r| self.session.event(r.source_index)) else {
            return;
        };
        self.modals.show_venue(event.venue(), event.venue_info());
    }

    pub fn open_sources_modal(&mut self) {
        self.modals.show_sources(self.session.sources());
    }

    pub fn close_modal(&mut self, id: ModalId) {
        self.modals.close(id);
    }

    // ===================================== Input =================================================

    pub fn dispatch(&mut self, ev: UiEvent) {
        match self.dispatch.handler(ev.element, ev.kind) {
            Some(handler) => handler(self, &ev),
            None => debug!("App: no handler for {:?}", ev),
        }
    }

    pub fn on_key(&mut self, key: KeyCode) {
        if let Some(ev) = key_to_ui_event(self, key) {
            self.dispatch(ev);
            return;
        }

        match self.modals.top() {
            Some(id) => {
                let body = self.modals.body_mut(id);
                match key {
                    KeyCode::Down => body.scroll_down(1),
                    KeyCode::Up => body.scroll_up(1),
                    KeyCode::PageDown => body.scroll_down(5),
                    KeyCode::PageUp => body.scroll_up(5),
                    _ => {}
                }
            }
            None => match key {
                KeyCode::Down => self.select_next_row(),
                KeyCode::Up => self.select_prev_row(),
                _ => {}
            },
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if let Some(ev) = mouse_to_ui_event(self, mouse) {
            if let Payload::Row(row) = ev.payload {
                self.table_state.select(Some(row));
            }
            self.dispatch(ev);
        }
    }
}

pub fn start_ui(app: App, events: UnboundedReceiver<AppEvent>) -> Result<()> {
    // Set up the terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = app;
    let res = run_app_loop(&mut terminal, &mut app, events);

    // Restore the terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        log::error!("UI loop exited with error: {}", e);
    }
    res
}

pub fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    info!("App: entering UI loop");
    while !app.should_quit {
        while let Ok(app_event) = events.try_recv() {
            app.handle_app_event(app_event);
        }

        let frame_size = terminal.get_frame().size(); // Fetch once before drawing
        crate::ui::prepare_ui_layout(app, frame_size);
        terminal.draw(|f| crate::ui::ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    app.on_key(key_event.code)
                }
                Event::Mouse(mouse_event) => app.on_mouse(mouse_event),
                _ => {}
            }
        }
    }

    Ok(())
}
