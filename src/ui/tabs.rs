//! Tab bar and the views that only read app state

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Tabs as RataTabs};
use ratatui::Frame;

use crate::app::{App, Tab};
use crate::domain::OrdersState;
use crate::ui::layout::TAB_DIVIDER;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn spinner_char(frame: usize) -> char {
    SPINNER[frame % SPINNER.len()]
}

/// Draw the tab bar at the top
pub fn draw_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.ctx.palette();
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", tab.shortcut()),
                    Style::default().fg(palette.muted),
                ),
                Span::raw(tab.title()),
            ])
        })
        .collect();

    let selected = Tab::ALL
        .iter()
        .position(|t| *t == app.current_tab)
        .unwrap_or(0);

    let tabs = RataTabs::new(titles)
        .select(selected)
        .style(Style::default().fg(palette.text))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .divider(TAB_DIVIDER);

    f.render_widget(tabs, area);
}

/// Latest orders table
pub fn draw_orders_tab(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.ctx.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Pedidos recientes")
        .border_style(Style::default().fg(palette.grid));

    let orders = match &app.orders {
        OrdersState::Loading => {
            let line = Line::from(vec![
                Span::styled(
                    spinner_char(app.spinner_frame).to_string(),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(" Cargando pedidos…", Style::default().fg(palette.muted)),
            ]);
            f.render_widget(Paragraph::new(line).block(block), area);
            return;
        }
        OrdersState::Failed(message) => {
            let line = Line::from(Span::styled(
                message.clone(),
                Style::default().fg(crate::ui::level_color(crate::core::NotifyLevel::Error)),
            ));
            f.render_widget(Paragraph::new(line).block(block), area);
            return;
        }
        OrdersState::Loaded(orders) => orders,
    };

    let header = Row::new(vec![
        "Pedido",
        "Fecha de compra",
        "Cliente",
        "Evento",
        "Importe",
    ])
    .style(
        Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::BOLD),
    );
    let rows = orders.iter().map(|order| {
        Row::new(vec![
            format!("#{}", order.order_number),
            order.purchase_date.clone(),
            order.customer.clone(),
            order.event.clone(),
            order.amount.clone(),
        ])
        .style(Style::default().fg(palette.text))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(16),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_char(0), '⠋');
        assert_eq!(spinner_char(10), '⠋');
        assert_eq!(spinner_char(11), '⠙');
    }
}
