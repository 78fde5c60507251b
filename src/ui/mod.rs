use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

pub mod layout;
pub mod tabs;
pub mod widgets;

use crate::app::{App, InputMode, Tab};
use crate::core::{Module, NotifyLevel};
use crate::modules::date_range::custom_defaults;
use crate::modules::notify::Phase;
use crate::modules::shell::Menu;
use crate::modules::theme::Palette;

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();
    let palette = app.ctx.palette();
    let areas = layout::areas(size);

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        size,
    );

    draw_header(f, areas.header, app, &palette);
    tabs::draw_tab_bar(f, areas.tabs, app);

    match app.current_tab {
        Tab::Dashboard => app.dashboard.render(f, areas.main, &app.ctx),
        Tab::Kpis => app.dashboard.render_kpis(f, areas.main),
        Tab::Orders => tabs::draw_orders_tab(f, areas.main, app),
        Tab::Locations => app.locations.render(f, areas.main, &app.ctx),
        Tab::Modules => app.modules.render(f, areas.main, &app.ctx),
    }

    draw_status_line(f, areas.status_line, app, &palette);
    draw_command_line(f, areas.command_line, app, &palette);

    if app.shell.sidebar_open {
        draw_sidebar(f, areas.sidebar, app, &palette);
    }
    if let Some(menu) = app.shell.open_menu() {
        let area = match menu {
            Menu::User => areas.user_menu,
            Menu::Team => areas.team_menu,
        };
        draw_menu(f, area, menu, &palette);
    }
    if app.help_open {
        draw_help_popup(f, areas.size, &palette);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let title = Line::from(vec![
        Span::styled("☰ ", Style::default().fg(palette.muted)),
        Span::styled(
            "Camarai",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            app.header_title(),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ),
    ]);
    let left = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.grid)),
    );
    f.render_widget(left, chunks[0]);

    let controls = Line::from(vec![
        Span::styled("T ", Style::default().fg(palette.muted)),
        Span::styled(
            app.ctx.theme.toggle_label(),
            Style::default().fg(palette.text),
        ),
        Span::raw("  "),
        Span::styled("m ", Style::default().fg(palette.muted)),
        Span::styled(Menu::Team.title(), Style::default().fg(palette.text)),
        Span::raw("  "),
        Span::styled("u ", Style::default().fg(palette.muted)),
        Span::styled(app.ctx.user_name.clone(), Style::default().fg(palette.text)),
    ]);
    let right = Paragraph::new(controls).alignment(Alignment::Right).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.grid)),
    );
    f.render_widget(right, chunks[1]);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let items: Vec<ListItem> = Tab::ALL
        .iter()
        .map(|tab| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", tab.shortcut()),
                    Style::default().fg(palette.muted),
                ),
                Span::raw(tab.title()),
            ]))
        })
        .collect();
    let selected = Tab::ALL
        .iter()
        .position(|tab| *tab == app.current_tab)
        .unwrap_or(0);

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Camarai.app")
                .border_style(Style::default().fg(palette.accent)),
        )
        .style(Style::default().bg(palette.surface).fg(palette.text))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌");

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_menu(f: &mut Frame, area: Rect, menu: Menu, palette: &Palette) {
    let items: Vec<ListItem> = menu
        .items()
        .iter()
        .map(|item| ListItem::new(*item))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(menu.title())
                .border_style(Style::default().fg(palette.accent)),
        )
        .style(Style::default().bg(palette.surface).fg(palette.text));
    f.render_widget(Clear, area);
    f.render_widget(list, area);
}

pub fn level_color(level: NotifyLevel) -> Color {
    match level {
        NotifyLevel::Info => Color::LightBlue,
        NotifyLevel::Success => Color::LightGreen,
        NotifyLevel::Warning => Color::LightYellow,
        NotifyLevel::Error => Color::LightRed,
    }
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let now = Instant::now();
    let line = match app.notifications.current() {
        Some(notification) => {
            let mut style = Style::default().fg(level_color(notification.level));
            if app.notifications.phase(now) == Some(Phase::Fading) {
                style = style.add_modifier(Modifier::DIM);
            }
            Line::from(vec![
                Span::styled(
                    format!("{}: ", notification.level.as_str()),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(notification.message.clone(), style),
            ])
        }
        None => {
            let orders = if app.orders.is_loading() {
                "cargando".to_string()
            } else {
                app.orders.orders().len().to_string()
            };
            Line::from(vec![
                Span::styled("Tema ", Style::default().fg(palette.muted)),
                Span::raw(format!("{}  ", app.ctx.theme.as_str())),
                Span::styled("Pedidos ", Style::default().fg(palette.muted)),
                Span::raw(format!("{}  ", orders)),
                Span::styled("Ubicaciones ", Style::default().fg(palette.muted)),
                Span::raw(app.locations.controller().filtered_len().to_string()),
            ])
        }
    };

    f.render_widget(Paragraph::new(line), area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("theme", "Cambiar tema claro/oscuro"),
        ("search", "search <texto>"),
        ("group", "group <all|madrid|barcelona|valencia>"),
        ("page", "page <next|prev>"),
        (
            "range",
            "range <today|yesterday|last7|last30|thisMonth|lastMonth|custom> [inicio fin]",
        ),
        ("export", "export <report|earnings|income|occupancy> <csv|xlsx|pdf>"),
        ("module", "module <nombre>"),
        ("add", "Añadir ubicación"),
        ("edit", "Editar ubicación seleccionada"),
        ("delete", "Eliminar ubicación seleccionada"),
        ("quit", "Salir"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}

/// Suggested dates while `range custom` is still missing them
fn custom_range_hint(app: &App) -> Option<String> {
    let input = app.command.input.trim().to_lowercase();
    let rest = input
        .strip_prefix("range custom")
        .or_else(|| input.strip_prefix("rango custom"))?;
    if !rest.trim().is_empty() {
        return None;
    }
    let (start, end) = custom_defaults(app.today);
    Some(format!(
        "range custom {} {}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    ))
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = custom_range_hint(app).unwrap_or_else(|| {
                command_hint(&app.command.input)
                    .unwrap_or("Enter=ejecutar Esc=cancelar")
                    .to_string()
            });
            Line::from(vec![
                Span::styled(": ", Style::default().fg(palette.accent)),
                Span::raw(app.command.input.clone()),
                Span::styled(format!("  {}", hint), Style::default().fg(palette.muted)),
            ])
        }
        InputMode::Normal => action_hints(app, palette),
    };

    f.render_widget(Paragraph::new(content), area);
}

fn action_hints(app: &App, palette: &Palette) -> Line<'static> {
    let hints: &[(&str, &str)] = match app.current_tab {
        Tab::Dashboard => &[("Tab", "panel"), ("x/X", "csv/xlsx"), ("P", "pdf")],
        Tab::Kpis => &[],
        Tab::Orders => &[("r", "recargar"), ("y", "copiar")],
        Tab::Locations if app.locations.is_editing() => &[("Enter/Esc", "fin búsqueda")],
        Tab::Locations => &[
            ("/", "buscar"),
            ("g", "grupo"),
            ("n/p", "página"),
            ("a/e/d", "añadir/editar/eliminar"),
            ("y", "copiar email"),
        ],
        Tab::Modules => &[("Enter", "activar/desactivar")],
    };
    let common = [
        ("1-5", "vista"),
        ("b", "menú"),
        ("T", "tema"),
        (":", "comando"),
        ("?", "ayuda"),
        ("q", "salir"),
    ];

    let mut spans = Vec::new();
    for (key, label) in hints.iter().chain(common.iter()) {
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(palette.accent),
        ));
        spans.push(Span::styled(
            format!(" {}  ", label),
            Style::default().fg(palette.muted),
        ));
    }
    Line::from(spans)
}

fn draw_help_popup(f: &mut Frame, area: Rect, palette: &Palette) {
    let popup_area = centered_rect(60, 60, area);
    let rows = [
        ("1-5", "Dashboard, KPIs, Pedidos, Ubicaciones, Módulos"),
        ("b", "Abrir/cerrar menú lateral"),
        ("u / m", "Menú de usuario / equipo"),
        ("T", "Cambiar tema"),
        (":", "Línea de comandos"),
        ("Esc", "Cerrar menús y avisos"),
        ("y", "Copiar al portapapeles"),
        ("q", "Salir"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, text)| {
            Line::from(vec![
                Span::styled(format!("{:<8}", key), Style::default().fg(palette.accent)),
                Span::styled(*text, Style::default().fg(palette.text)),
            ])
        })
        .collect();
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Ayuda")
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.surface)),
    );
    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
