use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{error, info, warn};

use camarai::app::{App, AppSettings, InputMode, Tab};
use camarai::config;
use camarai::core::{Action, NotifyLevel};
use camarai::infrastructure::runtime::{RuntimeBridge, RuntimeCommand};
use camarai::logging;
use camarai::modules::shell::Menu;
use camarai::modules::theme::Theme;
use camarai::store::PreferenceStore;
use camarai::ui::{self, layout};

#[derive(Debug, Parser)]
#[command(
    name = "camarai",
    version,
    about = "Camarai: a terminal dashboard for restaurant and ticketing venues"
)]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/camarai/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting theme: light or dark
    #[arg(long)]
    theme: Option<Theme>,

    /// Locations shown per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Log file (default: data dir camarai.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    if let Some(log_path) = args.log_file.clone().or_else(config::default_log_path) {
        if let Err(err) = logging::init_file_logger(&log_path, args.verbose) {
            eprintln!("logging disabled ({}): {err}", log_path.display());
        }
    }

    let mut settings = AppSettings::from_config(&config);
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }

    let mut app = App::new(settings);
    if let Some(db_path) = config::prefs_db_path() {
        match open_store(&db_path) {
            Ok(store) => {
                app.attach_store(store);
                // An explicit flag beats the stored theme and replaces it
                if args.theme.is_some_and(|theme| theme != app.ctx.theme) {
                    app.toggle_theme();
                }
            }
            Err(err) => {
                warn!(error = %err, "preferences not persisted");
                app.notify(
                    format!("Preferencias sin guardar: {err}"),
                    NotifyLevel::Warning,
                );
            }
        }
    }

    let runtime = RuntimeBridge::new().context("start background runtime")?;
    info!("camarai started");

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "exited with error");
        eprintln!("{err:?}");
    }

    Ok(())
}

fn open_store(db_path: &std::path::Path) -> Result<PreferenceStore> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create data dir {}", parent.display()))?;
    }
    PreferenceStore::open(db_path)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit() {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, _) => app.shell.on_resize(width),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick(Instant::now());
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        app.apply_runtime_event(event);
    }
    for cmd in app.take_runtime_requests() {
        if let Err(err) = runtime.send(cmd) {
            app.notify(format!("{err:#}"), NotifyLevel::Error);
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.apply_action(Action::Quit);
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Search box and delete confirmation own the keyboard
    if app.is_typing()
        || (app.current_tab == Tab::Locations && app.locations.pending_delete().is_some())
    {
        app.handle_module_key(key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.apply_action(Action::Quit),
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char(':') => app.enter_command(),
        KeyCode::Char('T') => app.toggle_theme(),
        KeyCode::Char('b') => app.shell.toggle_sidebar(),
        KeyCode::Char('u') => app.shell.toggle_menu(Menu::User),
        KeyCode::Char('m') => app.shell.toggle_menu(Menu::Team),
        KeyCode::Char('y') => handle_copy_to_clipboard(app),
        KeyCode::Char('r') if app.current_tab == Tab::Orders => app.reload_orders(),
        KeyCode::Char(c) if Tab::from_shortcut(c).is_some() => {
            if let Some(tab) = Tab::from_shortcut(c) {
                app.set_tab(tab);
            }
        }
        KeyCode::Esc => {
            if !app.shell.escape() {
                app.notifications.close();
            }
        }
        _ => app.handle_module_key(key),
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.help_open || app.input_mode == InputMode::Command {
        return;
    }
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some(size) = terminal_rect() else {
        return;
    };
    handle_click(app, layout::areas(size), mouse.column, mouse.row);
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}

fn handle_click(app: &mut App, areas: layout::UiAreas, col: u16, row: u16) {
    if app.shell.sidebar_open {
        let inner = layout::rect_inner(areas.sidebar);
        if layout::rect_contains(inner, col, row) {
            if let Some(tab) = Tab::ALL.get((row - inner.y) as usize).copied() {
                app.set_tab(tab);
            }
        } else if !layout::rect_contains(areas.sidebar, col, row) {
            app.shell.click_overlay();
        }
        return;
    }

    if let Some(menu) = app.shell.open_menu() {
        let area = match menu {
            Menu::User => areas.user_menu,
            Menu::Team => areas.team_menu,
        };
        let inner = layout::rect_inner(area);
        if layout::rect_contains(inner, col, row) {
            if let Some(item) = menu.items().get((row - inner.y) as usize) {
                app.notify(*item, NotifyLevel::Info);
            }
        }
        app.shell.click_outside();
        return;
    }

    if row == areas.header.y && col < areas.header.x + 2 {
        app.shell.toggle_sidebar();
        return;
    }

    if layout::rect_contains(areas.tabs, col, row) {
        if let Some(tab) = layout::tab_at(areas.tabs, col) {
            app.set_tab(tab);
        }
    }
}

fn handle_copy_to_clipboard(app: &mut App) {
    use arboard::Clipboard;

    let Some(text) = app.copy_target() else {
        app.notify("Nada que copiar", NotifyLevel::Warning);
        return;
    };

    match Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(&text).is_ok() {
                app.notify(format!("Copiado: {text}"), NotifyLevel::Info);
            } else {
                app.notify("No se pudo copiar al portapapeles", NotifyLevel::Error);
            }
        }
        Err(_) => {
            app.notify("Portapapeles no disponible", NotifyLevel::Error);
        }
    }
}
