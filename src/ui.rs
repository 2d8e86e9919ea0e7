// src/ui.rs
use crate::app::App;
use crate::modal::ModalId;
use crate::table::{COLUMN_TITLES, TableRow};
use crate::theme::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

pub const LOADING_MESSAGE: &str = "Loading events…";
pub const ERROR_MESSAGE: &str = "Failed to load events. Please try again later.";

const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Length(12),
    Constraint::Length(9),
    Constraint::Percentage(25),
    Constraint::Percentage(45),
    Constraint::Min(10),
];

pub struct LayoutChunks {
    pub toolbar_chunk: Rect,
    pub table_chunk: Rect,
    pub footer_chunk: Rect,
    pub hint_chunk: Rect,
}

pub fn compute_layout(frame_size: Rect) -> LayoutChunks {
    let main_chunks: Rc<[Rect]> = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame_size);

    LayoutChunks {
        toolbar_chunk: main_chunks[0],
        table_chunk: main_chunks[1],
        footer_chunk: main_chunks[2],
        hint_chunk: main_chunks[3],
    }
}

/// Screen geometry of the table body, kept for mouse hit-testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableLayout {
    pub body: Rect,
    /// (x, width) of each column.
    pub columns: Vec<(u16, u16)>,
}

impl TableLayout {
    pub fn from_table_chunk(table_chunk: Rect) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(table_chunk);
        // One line of header above the body.
        let body = Rect {
            x: inner.x,
            y: inner.y.saturating_add(1),
            width: inner.width,
            height: inner.height.saturating_sub(1),
        };
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(COLUMN_WIDTHS)
            .split(body)
            .iter()
            .map(|r| (r.x, r.width))
            .collect();
        Self { body, columns }
    }

    /// Returns `(row index, column index)` for a screen cell, if it lands on a rendered row.
    pub fn hit_test(&self, x: u16, y: u16, offset: usize, row_count: usize) -> Option<(usize, usize)> {
        if y < self.body.y || y >= self.body.y.saturating_add(self.body.height) {
            return None;
        }
        let row = offset + (y - self.body.y) as usize;
        if row >= row_count {
            return None;
        }
        let column = self.columns.iter().position(|&(cx, w)| x >= cx && x < cx.saturating_add(w))?;
        Some((row, column))
    }
}

pub struct ModalChunks {
    pub outer: Rect,
    pub body: Rect,
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

// Lines of fixed link text drawn under the scrolling body of each overlay.
fn modal_link_lines(id: ModalId) -> u16 {
    match id {
        ModalId::Event => 1,
        ModalId::Venue => 4,
        ModalId::Sources => 0,
    }
}

pub fn compute_modal_layout(id: ModalId, frame_size: Rect) -> ModalChunks {
    let outer = match id {
        ModalId::Event => centered_rect(60, 40, frame_size),
        ModalId::Venue => centered_rect(70, 60, frame_size),
        ModalId::Sources => centered_rect(60, 60, frame_size),
    };
    let inner = Block::default().borders(Borders::ALL).inner(outer);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(modal_link_lines(id)),
            Constraint::Length(1),
        ])
        .split(inner);
    ModalChunks { outer, body: parts[0] }
}

/// Updates layout-dependent state outside the draw closure: the table's
/// hit-test geometry and the size of every visible overlay body.
pub fn prepare_ui_layout(app: &mut App, frame_size: Rect) {
    let layout_chunks: LayoutChunks = compute_layout(frame_size);
    app.table_layout = TableLayout::from_table_chunk(layout_chunks.table_chunk);

    for id in ModalId::ALL {
        if app.modals.is_visible(id) {
            let body = compute_modal_layout(id, frame_size).body;
            app.modals.body_mut(id).set_dimensions(body.width, body.height);
        }
    }
}

fn table_row<'a>(index: usize, row: &'a TableRow, palette: &Palette) -> Row<'a> {
    let mut description = vec![Span::raw(row.description.as_str())];
    if let Some(badge) = row.badge() {
        description.push(Span::raw(" "));
        description.push(Span::styled(badge, palette.badge));
    }

    let style = if row.is_new {
        palette.row_new
    } else if index % 2 == 1 {
        palette.row_alt
    } else {
        palette.row
    };

    Row::new(vec![
        Cell::from(row.date.as_str()),
        Cell::from(row.time.as_str()),
        Cell::from(row.venue.as_str()),
        Cell::from(Line::from(description)),
        Cell::from(row.category.as_str()),
    ])
    .style(style)
}

fn render_overlay_message(f: &mut Frame, area: Rect, message: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let text_width = UnicodeWidthStr::width(message) as u16 + 4;
    let overlay_width = text_width.min(area.width);
    let overlay_height = 3.min(area.height);
    let overlay = Rect {
        x: area.x + (area.width.saturating_sub(overlay_width)) / 2,
        y: area.y + (area.height.saturating_sub(overlay_height)) / 2,
        width: overlay_width,
        height: overlay_height,
    };
    f.render_widget(Clear, overlay);
    let widget = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, overlay);
}

fn link_line<'a>(label: &'a str, href: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(vec![Span::raw(label), Span::styled(href, palette.link)])
}

fn render_modal(f: &mut Frame, app: &App, id: ModalId, palette: &Palette) {
    let chunks = compute_modal_layout(id, f.size());
    let inner = Block::default().borders(Borders::ALL).inner(chunks.outer);
    let links_area = Rect {
        x: inner.x,
        y: chunks.body.y + chunks.body.height,
        width: inner.width,
        height: modal_link_lines(id),
    };
    let close_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(1),
        width: inner.width,
        height: inner.height.min(1),
    };

    let (title, body_state, links): (String, _, Vec<Line>) = match id {
        ModalId::Event => {
            let panel = &app.modals.event;
            (panel.title.clone(), &panel.details, vec![link_line("Link: ", &panel.link, palette)])
        }
        ModalId::Venue => {
            let panel = &app.modals.venue;
            (
                panel.name.clone(),
                &panel.details,
                vec![
                    link_line("Photo: ", &panel.photo_url, palette),
                    link_line("Yelp: ", &panel.yelp_url, palette),
                    link_line("Map: ", &panel.maps_url, palette),
                    link_line("Directions: ", &panel.directions_url, palette),
                ],
            )
        }
        ModalId::Sources => ("Sources".to_string(), &app.modals.sources.details, Vec::new()),
    };

    f.render_widget(Clear, chunks.outer);
    f.render_widget(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(palette.border)
            .style(palette.overlay),
        chunks.outer,
    );
    f.render_widget(
        Paragraph::new(body_state.content.as_str())
            .wrap(Wrap { trim: true })
            .scroll((body_state.scroll_offset_vertical, 0)),
        chunks.body,
    );
    if !links.is_empty() {
        f.render_widget(Paragraph::new(Text::from(links)), links_area);
    }
    f.render_widget(
        Paragraph::new("[Esc] close").alignment(Alignment::Right).style(palette.footer),
        close_area,
    );
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let layout_chunks: LayoutChunks = compute_layout(f.size());
    let palette: Palette = app.theme.palette();

    // =================================== Toolbar =================================================
    let toolbar_line = Line::from(vec![
        Span::raw("Sort: "),
        Span::styled(app.sort_key.as_str(), palette.header),
        Span::raw("  Theme: "),
        Span::styled(app.theme.name(), palette.header),
        Span::raw("  [Apply]  "),
        Span::styled("Sources", palette.link),
    ]);
    let toolbar_widget = Paragraph::new(toolbar_line).block(
        Block::default()
            .title(format!("Events ({})", app.document_class))
            .borders(Borders::ALL)
            .border_style(palette.border),
    );
    f.render_widget(toolbar_widget, layout_chunks.toolbar_chunk);

    // ==================================== Table ==================================================
    let header = Row::new(COLUMN_TITLES.to_vec()).style(palette.header);
    let rows: Vec<Row> =
        app.rows.iter().enumerate().map(|(i, row)| table_row(i, row, &palette)).collect();
    let table_widget = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .column_spacing(0)
        .highlight_style(palette.selected)
        .block(Block::default().borders(Borders::ALL).border_style(palette.border));
    f.render_stateful_widget(table_widget, layout_chunks.table_chunk, &mut app.table_state);

    // ==================================== Footer =================================================
    let footer_widget = Paragraph::new(format!("Last updated: {}", app.footer)).style(palette.footer);
    f.render_widget(footer_widget, layout_chunks.footer_chunk);

    let hint_text: &str =
        "[↑/↓] Row | [Enter] Event | [v] Venue | [s] Sort | [t] Theme | [a] Apply | [o] Sources | [q] Quit";
    let hint_widget: Paragraph = Paragraph::new(hint_text)
        .style(palette.footer)
        .alignment(Alignment::Center);
    f.render_widget(hint_widget, layout_chunks.hint_chunk);

    // =================================== Indicators ==============================================
    if app.load_status.loading_visible() {
        render_overlay_message(f, layout_chunks.table_chunk, LOADING_MESSAGE, palette.overlay);
    }
    if app.load_status.error_visible() {
        render_overlay_message(f, layout_chunks.table_chunk, ERROR_MESSAGE, palette.overlay);
    }

    // ==================================== Modals =================================================
    for &id in app.modals.visible_in_order() {
        render_modal(f, app, id, &palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_maps_cells() {
        let layout = TableLayout::from_table_chunk(Rect::new(0, 0, 100, 10));
        // Borders take row 0, header row 1; first body row is y = 2.
        assert_eq!(layout.body.y, 2);

        let (venue_x, _) = layout.columns[2];
        assert_eq!(layout.hit_test(venue_x, 2, 0, 3), Some((0, 2)));
        assert_eq!(layout.hit_test(venue_x, 4, 0, 3), Some((2, 2)));
        assert_eq!(layout.hit_test(venue_x, 5, 0, 3), None);
        assert_eq!(layout.hit_test(venue_x, 1, 0, 3), None);
        assert_eq!(layout.hit_test(venue_x, 2, 1, 3), Some((1, 2)));
    }

    #[test]
    fn test_modal_body_fits_inside_outer() {
        let frame = Rect::new(0, 0, 80, 30);
        for id in ModalId::ALL {
            let chunks = compute_modal_layout(id, frame);
            assert!(chunks.body.y > chunks.outer.y);
            assert!(chunks.body.bottom() < chunks.outer.bottom());
        }
    }
}
