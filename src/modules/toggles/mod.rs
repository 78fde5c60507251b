//! Product modules that can be switched on and off from the Modules tab

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::core::{Action, Context, Module, NotifyLevel};
use crate::domain::MODULE_CATALOG;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCard {
    pub name: String,
    pub description: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct ModuleBoard {
    cards: Vec<ModuleCard>,
    selected: usize,
}

impl Default for ModuleBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleBoard {
    pub fn new() -> Self {
        let cards = MODULE_CATALOG
            .iter()
            .map(|name| ModuleCard {
                name: name.to_string(),
                description: describe(name),
                active: *name == "TPV",
            })
            .collect();
        Self { cards, selected: 0 }
    }

    pub fn cards(&self) -> &[ModuleCard] {
        &self.cards
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_active(&self, name: &str) -> Option<bool> {
        self.position(name).map(|idx| self.cards[idx].active)
    }

    /// Flips the named module; the name match ignores case.
    pub fn toggle(&mut self, name: &str) -> Action {
        match self.position(name) {
            Some(idx) => self.toggle_at(idx),
            None => Action::notify(format!("Módulo desconocido: {name}"), NotifyLevel::Warning),
        }
    }

    pub fn toggle_selected(&mut self) -> Action {
        self.toggle_at(self.selected)
    }

    fn toggle_at(&mut self, idx: usize) -> Action {
        let Some(card) = self.cards.get_mut(idx) else {
            return Action::None;
        };
        card.active = !card.active;
        if card.active {
            Action::notify(
                format!("Módulo {} activado correctamente.", card.name),
                NotifyLevel::Success,
            )
        } else {
            Action::notify(
                format!("Módulo {} desactivado correctamente.", card.name),
                NotifyLevel::Warning,
            )
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.cards
            .iter()
            .position(|card| card.name.eq_ignore_ascii_case(name))
    }
}

fn describe(name: &str) -> &'static str {
    match name {
        "TPV" => "Terminal punto de venta",
        "Tienda Online" => "Venta de entradas y productos online",
        "Reservas" => "Gestión de reservas de mesas",
        "QR Ordering" => "Pedidos desde la mesa con código QR",
        _ => "",
    }
}

impl Module for ModuleBoard {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.cards.len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        let palette = ctx.palette();
        let items: Vec<ListItem> = self
            .cards
            .iter()
            .map(|card| {
                let (marker, style) = if card.active {
                    ("[on] ", Style::default().fg(palette.accent))
                } else {
                    ("[off]", Style::default().fg(palette.muted))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::raw(" "),
                    Span::styled(
                        card.name.clone(),
                        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", card.description),
                        Style::default().fg(palette.muted),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Módulos Camarai.app")
                    .border_style(Style::default().fg(palette.grid)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
