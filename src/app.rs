use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::{Action, Command, Context, Module, NavigateTarget, NotifyLevel, PageStep};
use crate::domain::{seed_locations, OrdersState};
use crate::infrastructure::runtime::{RuntimeCommand, RuntimeEvent};
use crate::modules::charts::ChartBoard;
use crate::modules::dashboard::Dashboard;
use crate::modules::date_range::{range_from_args, DateRange};
use crate::modules::export::{export_action, parse_export_args};
use crate::modules::locations::LocationPanel;
use crate::modules::notify::NotificationCenter;
use crate::modules::shell::ShellState;
use crate::modules::theme::{Theme, ThemeBus};
use crate::modules::toggles::ModuleBoard;
use crate::store::PreferenceStore;

pub const ORDERS_ERROR_MESSAGE: &str = "Error al cargar los datos";

/// Main tabs in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Kpis,
    Orders,
    Locations,
    Modules,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Kpis,
        Tab::Orders,
        Tab::Locations,
        Tab::Modules,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Kpis => "KPIs",
            Tab::Orders => "Pedidos",
            Tab::Locations => "Ubicaciones",
            Tab::Modules => "Módulos",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Dashboard => '1',
            Tab::Kpis => '2',
            Tab::Orders => '3',
            Tab::Locations => '4',
            Tab::Modules => '5',
        }
    }

    pub fn from_shortcut(c: char) -> Option<Tab> {
        Tab::ALL.iter().copied().find(|tab| tab.shortcut() == c)
    }
}

impl From<NavigateTarget> for Tab {
    fn from(target: NavigateTarget) -> Self {
        match target {
            NavigateTarget::Dashboard => Tab::Dashboard,
            NavigateTarget::Kpis => Tab::Kpis,
            NavigateTarget::Orders => Tab::Orders,
            NavigateTarget::Locations => Tab::Locations,
            NavigateTarget::Modules => Tab::Modules,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

/// Startup values resolved from config and CLI flags
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub theme: Theme,
    pub page_size: usize,
    pub user_name: String,
    pub notification_lifetime: Duration,
    pub export_dir: Option<PathBuf>,
    pub today: NaiveDate,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            theme: config.theme().unwrap_or_default(),
            page_size: config.page_size,
            user_name: config.user_name.clone(),
            notification_lifetime: config.notification_lifetime(),
            export_dir: config.export_dir.clone(),
            today: chrono::Local::now().date_naive(),
        }
    }
}

pub struct App {
    pub ctx: Context,
    pub current_tab: Tab,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub shell: ShellState,
    pub help_open: bool,
    pub dashboard: Dashboard,
    pub locations: LocationPanel,
    pub modules: ModuleBoard,
    pub notifications: NotificationCenter,
    pub theme_bus: ThemeBus,
    pub orders: OrdersState,
    pub range: Option<DateRange>,
    pub export_dir: Option<PathBuf>,
    pub prefs: Option<PreferenceStore>,
    pub today: NaiveDate,
    pub spinner_frame: usize,
    pending_requests: Vec<RuntimeCommand>,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let mut theme_bus = ThemeBus::new();
        let charts = ChartBoard::new(settings.theme).with_subscription(theme_bus.subscribe());
        let ctx = Context {
            theme: settings.theme,
            user_name: settings.user_name,
        };

        Self {
            ctx,
            current_tab: Tab::Dashboard,
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            shell: ShellState::new(),
            help_open: false,
            dashboard: Dashboard::new(charts),
            locations: LocationPanel::new(seed_locations(), settings.page_size),
            modules: ModuleBoard::new(),
            notifications: NotificationCenter::new(settings.notification_lifetime),
            theme_bus,
            orders: OrdersState::Loading,
            range: None,
            export_dir: settings.export_dir,
            prefs: None,
            today: settings.today,
            spinner_frame: 0,
            pending_requests: vec![RuntimeCommand::FetchOrders],
            should_quit: false,
        }
    }

    /// Restores the stored theme over the config default; `--theme` is
    /// re-applied afterwards by the binary and so wins over both.
    pub fn attach_store(&mut self, store: PreferenceStore) {
        match store.load_theme() {
            Ok(Some(theme)) if theme != self.ctx.theme => self.apply_theme(theme),
            Ok(_) => {}
            Err(err) => warn!(error = %err, "could not read stored theme"),
        }
        self.prefs = Some(store);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn header_title(&self) -> String {
        match &self.range {
            Some(range) => range.title(&self.ctx.user_name),
            None => format!("Buenos días, {}", self.ctx.user_name),
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, level: NotifyLevel) {
        self.notifications.show(message, level, Instant::now());
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.notifications.on_tick(now);
        self.dashboard.charts_mut().sync_theme();
        if self.orders.is_loading() || self.dashboard.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.shell.sidebar_open = false;
    }

    /// True while keystrokes are text input rather than shortcuts
    pub fn is_typing(&self) -> bool {
        self.input_mode == InputMode::Command
            || (self.current_tab == Tab::Locations && self.locations.is_editing())
    }

    // === Theme ===

    pub fn toggle_theme(&mut self) {
        let theme = self.ctx.theme.toggled();
        self.apply_theme(theme);
        if let Some(store) = self.prefs.as_ref() {
            if let Err(err) = store.save_theme(theme) {
                warn!(error = %err, "could not persist theme");
            }
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.ctx.theme = theme;
        self.theme_bus.publish(theme);
    }

    // === Command line ===

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        if input.is_empty() {
            self.exit_command();
            return;
        }

        let cmd = crate::core::parse_command(&input);
        let action = self.execute_command(&cmd);
        self.apply_action(action);
        self.command.last = Some(input);
        self.exit_command();
    }

    /// Execute a parsed command
    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Dashboard => Action::Navigate(NavigateTarget::Dashboard),
            Command::Kpis => Action::Navigate(NavigateTarget::Kpis),
            Command::Orders => Action::Navigate(NavigateTarget::Orders),
            Command::Locations => Action::Navigate(NavigateTarget::Locations),
            Command::Modules => Action::Navigate(NavigateTarget::Modules),

            Command::Theme => Action::ToggleTheme,

            Command::Search(term) => {
                self.set_tab(Tab::Locations);
                self.locations.search(term)
            }
            Command::Group(group) => {
                self.set_tab(Tab::Locations);
                self.locations.filter_group(group)
            }
            Command::Page(step) => {
                self.set_tab(Tab::Locations);
                match step {
                    PageStep::Next => self.locations.next_page(),
                    PageStep::Prev => self.locations.prev_page(),
                };
                Action::None
            }
            Command::Add => {
                self.set_tab(Tab::Locations);
                self.locations.add()
            }
            Command::Edit => {
                self.set_tab(Tab::Locations);
                self.locations.edit()
            }
            Command::Delete => {
                self.set_tab(Tab::Locations);
                self.locations.request_delete()
            }

            Command::Range(args) => match range_from_args(args, self.today) {
                Ok(range) => Action::ApplyRange(range),
                Err(err) => Action::notify(err.to_string(), NotifyLevel::Warning),
            },
            Command::Export(args) => match parse_export_args(args) {
                Ok((target, format)) => Action::Export(target, format),
                Err(err) => Action::notify(
                    format!(
                        "{err}. Uso: export <report|earnings|income|occupancy> <csv|xlsx|pdf>"
                    ),
                    NotifyLevel::Warning,
                ),
            },
            Command::Module(name) => self.modules.toggle(name),

            Command::Quit => Action::Quit,

            Command::Unknown(s) => {
                Action::notify(format!("Comando desconocido: {s}"), NotifyLevel::Warning)
            }
        }
    }

    /// Apply an action returned by a command or module
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(target) => self.set_tab(target.into()),
            Action::Notify(msg, level) => self.notify(msg, level),
            Action::ToggleTheme => self.toggle_theme(),
            Action::Export(target, format) => {
                let action = export_action(target, format, self.export_dir.as_deref(), self.today);
                self.apply_action(action);
            }
            Action::ApplyRange(range) => self.apply_range(range),
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn apply_range(&mut self, range: DateRange) {
        info!(
            preset = range.preset.key(),
            start = %range.start,
            end = %range.end,
            "date range applied"
        );
        self.range = Some(range);
        self.dashboard.set_loading(true);
        self.pending_requests.push(RuntimeCommand::ReloadDashboard);
    }

    // === Panels ===

    /// Route a key to the panel of the current tab
    pub fn handle_module_key(&mut self, key: KeyEvent) {
        let action = match self.current_tab {
            Tab::Dashboard => self.dashboard.handle_key(key, &mut self.ctx),
            Tab::Locations => self.locations.handle_key(key, &mut self.ctx),
            Tab::Modules => self.modules.handle_key(key, &mut self.ctx),
            Tab::Kpis | Tab::Orders => Action::None,
        };
        self.apply_action(action);
    }

    /// Text `y` copies on the current tab
    pub fn copy_target(&self) -> Option<String> {
        match self.current_tab {
            Tab::Locations => self
                .locations
                .selected_location()
                .map(|location| location.email.clone())
                .filter(|email| !email.is_empty()),
            Tab::Orders => self
                .orders
                .orders()
                .first()
                .map(|order| order.order_number.clone()),
            _ => None,
        }
    }

    // === Background work ===

    pub fn reload_orders(&mut self) {
        self.orders = OrdersState::Loading;
        self.pending_requests.push(RuntimeCommand::FetchOrders);
    }

    /// Commands queued for the runtime worker since the last call
    pub fn take_runtime_requests(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.pending_requests)
    }

    pub fn apply_runtime_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::OrdersLoaded { orders } => {
                self.orders = OrdersState::Loaded(orders);
            }
            RuntimeEvent::OrdersFailed { message } => {
                warn!(%message, "orders unavailable");
                self.orders = OrdersState::Failed(ORDERS_ERROR_MESSAGE.to_string());
            }
            RuntimeEvent::ReloadFinished => {
                self.dashboard.set_loading(false);
            }
            RuntimeEvent::Error { message } => {
                if self.orders.is_loading() {
                    self.orders = OrdersState::Failed(ORDERS_ERROR_MESSAGE.to_string());
                }
                self.dashboard.set_loading(false);
                self.notify(message, NotifyLevel::Error);
            }
        }
    }
}
