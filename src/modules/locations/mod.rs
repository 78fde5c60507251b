//! Locations module - searchable, group-filtered, paginated venue list
//!
//! Keys:
//! - `/` edit the search box (each keystroke re-filters)
//! - `g` cycle the group filter
//! - `n`/`p` or arrows: next/previous page
//! - `a` add, `e` edit, `d` delete (confirm with `y`)

pub mod controller;

pub use controller::{
    derive_pagination_ui, total_pages, FilterState, LocationController, PaginationUi,
    DEFAULT_PAGE_SIZE, NO_RESULTS_MESSAGE,
};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::core::{Action, Context, Module, NotifyLevel};
use crate::domain::{Location, ALL_GROUPS, GROUP_CATALOG};

pub const ADD_PENDING_MESSAGE: &str = "Funcionalidad de añadir ubicación en desarrollo.";

pub struct LocationPanel {
    controller: LocationController,
    /// Row within the visible page
    selected: usize,
    search_input: String,
    editing: bool,
    pending_delete: Option<u32>,
}

impl LocationPanel {
    pub fn new(locations: Vec<Location>, page_size: usize) -> Self {
        Self {
            controller: LocationController::new(locations, page_size),
            selected: 0,
            search_input: String::new(),
            editing: false,
            pending_delete: None,
        }
    }

    pub fn controller(&self) -> &LocationController {
        &self.controller
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn pending_delete(&self) -> Option<u32> {
        self.pending_delete
    }

    pub fn begin_search(&mut self) {
        self.editing = true;
    }

    pub fn search(&mut self, term: &str) -> Action {
        self.search_input = term.to_string();
        self.selected = 0;
        self.controller.set_search_term(term)
    }

    pub fn filter_group(&mut self, group: &str) -> Action {
        self.selected = 0;
        self.controller.set_group_filter(group.trim().to_lowercase().as_str())
    }

    /// all → madrid → barcelona → valencia → all
    pub fn cycle_group(&mut self) -> Action {
        let current = self.controller.filter().group_filter.clone();
        let next = match GROUP_CATALOG.iter().position(|g| *g == current) {
            Some(idx) if idx + 1 < GROUP_CATALOG.len() => GROUP_CATALOG[idx + 1],
            Some(_) => ALL_GROUPS,
            None => GROUP_CATALOG[0],
        };
        self.filter_group(next)
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.controller.next_page();
        if moved {
            self.selected = 0;
        }
        moved
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.controller.prev_page();
        if moved {
            self.selected = 0;
        }
        moved
    }

    pub fn selected_location(&self) -> Option<&Location> {
        self.controller.visible_page().get(self.selected).copied()
    }

    pub fn add(&self) -> Action {
        Action::notify(ADD_PENDING_MESSAGE, NotifyLevel::Info)
    }

    pub fn edit(&self) -> Action {
        match self.selected_location() {
            Some(location) => Action::notify(
                format!("Editando ubicación: {}", location.name),
                NotifyLevel::Info,
            ),
            None => Action::None,
        }
    }

    /// First step of a delete; `confirm_delete` finishes it
    pub fn request_delete(&mut self) -> Action {
        let Some((id, name)) = self
            .selected_location()
            .map(|location| (location.id, location.name.clone()))
        else {
            return Action::None;
        };
        self.pending_delete = Some(id);
        Action::notify(delete_prompt(&name), NotifyLevel::Warning)
    }

    /// The list itself is left untouched.
    pub fn confirm_delete(&mut self) -> Action {
        let Some(id) = self.pending_delete.take() else {
            return Action::None;
        };
        match self.controller.find(id) {
            Some(location) => Action::notify(
                format!("Ubicación {} eliminada correctamente.", location.name),
                NotifyLevel::Success,
            ),
            None => Action::None,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.editing = false;
                Action::None
            }
            KeyCode::Backspace => {
                let mut term = self.search_input.clone();
                term.pop();
                self.search(&term)
            }
            KeyCode::Char(c) => {
                let mut term = self.search_input.clone();
                term.push(c);
                self.search(&term)
            }
            _ => Action::None,
        }
    }
}

impl Module for LocationPanel {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        if self.editing {
            return self.handle_search_key(key);
        }

        if self.pending_delete.is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_delete(),
                _ => {
                    self.cancel_delete();
                    Action::None
                }
            };
        }

        match key.code {
            KeyCode::Char('/') => {
                self.begin_search();
                Action::None
            }
            KeyCode::Char('g') => self.cycle_group(),
            KeyCode::Char('n') | KeyCode::Right => {
                self.next_page();
                Action::None
            }
            KeyCode::Char('p') | KeyCode::Left => {
                self.prev_page();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.controller.visible_page().len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Char('a') => self.add(),
            KeyCode::Char('e') => self.edit(),
            KeyCode::Char('d') => self.request_delete(),
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        let palette = ctx.palette();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let filter = self.controller.filter();
        let search_style = if self.editing {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.grid)
        };
        let search = Paragraph::new(Line::from(vec![
            Span::styled("Buscar: ", Style::default().fg(palette.muted)),
            Span::styled(self.search_input.clone(), Style::default().fg(palette.text)),
            Span::styled(
                format!("   Grupo: {}", group_label(&filter.group_filter)),
                Style::default().fg(palette.muted),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Ubicaciones")
                .border_style(search_style),
        );
        frame.render_widget(search, chunks[0]);

        let page = self.controller.visible_page();
        let body = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.grid));
        if page.is_empty() {
            let empty = Paragraph::new(NO_RESULTS_MESSAGE)
                .style(Style::default().fg(palette.muted))
                .block(body);
            frame.render_widget(empty, chunks[1]);
        } else {
            let header = Row::new(vec!["Nombre", "Dirección", "Teléfono", "Estado", "Módulos"])
                .style(Style::default().fg(palette.muted).add_modifier(Modifier::BOLD));
            let rows = page.iter().map(|location| {
                let status_style = if location.active {
                    Style::default().fg(palette.accent)
                } else {
                    Style::default().fg(palette.muted)
                };
                Row::new(vec![
                    Cell::from(location.name.clone()),
                    Cell::from(location.address.clone()),
                    Cell::from(location.phone.clone()),
                    Cell::from(location.status_label()).style(status_style),
                    Cell::from(location.modules.join(", ")),
                ])
                .style(Style::default().fg(palette.text))
            });
            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(22),
                    Constraint::Percentage(30),
                    Constraint::Percentage(16),
                    Constraint::Percentage(10),
                    Constraint::Percentage(22),
                ],
            )
            .header(header)
            .block(body)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let mut state = TableState::default();
            state.select(Some(self.selected));
            frame.render_stateful_widget(table, chunks[1], &mut state);
        }

        let ui = self.controller.pagination_ui();
        let enabled = Style::default().fg(palette.text);
        let disabled = Style::default().fg(palette.muted).add_modifier(Modifier::DIM);
        let footer = Paragraph::new(Line::from(vec![
            Span::styled("‹ Anterior", if ui.prev_enabled { enabled } else { disabled }),
            Span::raw("  "),
            Span::styled(ui.page_text, Style::default().fg(palette.text)),
            Span::raw("  "),
            Span::styled("Siguiente ›", if ui.next_enabled { enabled } else { disabled }),
        ]));
        frame.render_widget(footer, chunks[2]);
    }
}

fn delete_prompt(name: &str) -> String {
    format!("¿Estás seguro de que deseas eliminar la ubicación \"{name}\"? Pulsa y para confirmar.")
}

fn group_label(group: &str) -> String {
    if group == ALL_GROUPS {
        "Todos".to_string()
    } else {
        let mut chars = group.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed_locations;

    fn panel() -> LocationPanel {
        LocationPanel::new(seed_locations(), DEFAULT_PAGE_SIZE)
    }

    fn press(panel: &mut LocationPanel, code: KeyCode) -> Action {
        let mut ctx = Context::new();
        panel.handle_key(KeyEvent::from(code), &mut ctx)
    }

    #[test]
    fn test_typing_filters_live() {
        let mut panel = panel();
        press(&mut panel, KeyCode::Char('/'));
        assert!(panel.is_editing());
        for c in "norte".chars() {
            press(&mut panel, KeyCode::Char(c));
        }
        assert_eq!(panel.controller().filtered_len(), 1);
        press(&mut panel, KeyCode::Backspace);
        assert_eq!(panel.search_input(), "nort");
        press(&mut panel, KeyCode::Enter);
        assert!(!panel.is_editing());
    }

    #[test]
    fn test_cycle_group_wraps_to_all() {
        let mut panel = panel();
        let seen: Vec<String> = (0..4)
            .map(|_| {
                panel.cycle_group();
                panel.controller().filter().group_filter.clone()
            })
            .collect();
        assert_eq!(seen, vec!["madrid", "barcelona", "valencia", "all"]);
    }

    #[test]
    fn test_stub_messages() {
        let mut panel = panel();
        assert_eq!(
            press(&mut panel, KeyCode::Char('a')),
            Action::Notify(ADD_PENDING_MESSAGE.to_string(), NotifyLevel::Info)
        );
        assert_eq!(
            press(&mut panel, KeyCode::Char('e')),
            Action::Notify(
                "Editando ubicación: Restaurante Central".to_string(),
                NotifyLevel::Info
            )
        );
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut panel = panel();
        press(&mut panel, KeyCode::Down);
        assert_eq!(
            press(&mut panel, KeyCode::Char('d')),
            Action::Notify(
                "¿Estás seguro de que deseas eliminar la ubicación \"La Terraza\"? \
                 Pulsa y para confirmar."
                    .to_string(),
                NotifyLevel::Warning
            )
        );
        assert_eq!(panel.pending_delete(), Some(2));
        assert_eq!(
            press(&mut panel, KeyCode::Char('y')),
            Action::Notify(
                "Ubicación La Terraza eliminada correctamente.".to_string(),
                NotifyLevel::Success
            )
        );
        assert_eq!(panel.controller().locations().len(), 3);

        press(&mut panel, KeyCode::Char('d'));
        assert_eq!(press(&mut panel, KeyCode::Esc), Action::None);
        assert_eq!(panel.pending_delete(), None);
    }

    #[test]
    fn test_group_label() {
        assert_eq!(group_label("all"), "Todos");
        assert_eq!(group_label("valencia"), "Valencia");
    }
}
