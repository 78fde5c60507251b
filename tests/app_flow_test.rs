//! App state driven through the `:` command line, without a terminal

use std::time::Duration;

use chrono::NaiveDate;
use tempfile::TempDir;

use camarai::app::{App, AppSettings, Tab, ORDERS_ERROR_MESSAGE};
use camarai::core::NotifyLevel;
use camarai::domain::OrdersState;
use camarai::infrastructure::runtime::{RuntimeCommand, RuntimeEvent};
use camarai::modules::date_range::MISSING_DATES_MESSAGE;
use camarai::modules::locations::NO_RESULTS_MESSAGE;
use camarai::modules::theme::Theme;
use camarai::store::PreferenceStore;

fn settings() -> AppSettings {
    AppSettings {
        theme: Theme::Light,
        page_size: 6,
        user_name: "Fénix".to_string(),
        notification_lifetime: Duration::from_secs(5),
        export_dir: None,
        today: NaiveDate::from_ymd_opt(2024, 5, 9).unwrap(),
    }
}

fn run(app: &mut App, input: &str) {
    app.enter_command();
    app.command.input = input.to_string();
    app.apply_command();
}

fn last_message(app: &App) -> Option<(String, NotifyLevel)> {
    app.notifications
        .current()
        .map(|n| (n.message.clone(), n.level))
}

#[test]
fn test_search_command_switches_to_locations() {
    let mut app = App::new(settings());
    assert_eq!(app.current_tab, Tab::Dashboard);

    run(&mut app, "search terraza");
    assert_eq!(app.current_tab, Tab::Locations);
    assert_eq!(app.locations.controller().filtered_len(), 1);
    assert_eq!(app.command.last.as_deref(), Some("search terraza"));

    let shown = app.notifications.shown_count();
    run(&mut app, "search xyz-no-match");
    assert_eq!(app.notifications.shown_count(), shown + 1);
    assert_eq!(
        last_message(&app),
        Some((NO_RESULTS_MESSAGE.to_string(), NotifyLevel::Warning))
    );
}

#[test]
fn test_group_and_page_commands() {
    let mut app = App::new(settings());

    run(&mut app, "group valencia");
    assert_eq!(app.locations.controller().filter().group_filter, "valencia");
    assert_eq!(app.locations.controller().filtered_len(), 1);

    run(&mut app, "page next");
    assert_eq!(app.locations.controller().current_page(), 1);

    run(&mut app, "group");
    assert_eq!(app.locations.controller().filter().group_filter, "all");
}

#[test]
fn test_range_updates_header_and_requests_reload() {
    let mut app = App::new(settings());
    assert_eq!(app.header_title(), "Buenos días, Fénix");
    let _ = app.take_runtime_requests();

    run(&mut app, "range custom");
    assert_eq!(
        last_message(&app),
        Some((MISSING_DATES_MESSAGE.to_string(), NotifyLevel::Warning))
    );
    assert_eq!(app.header_title(), "Buenos días, Fénix");
    assert!(app.take_runtime_requests().is_empty());

    run(&mut app, "range today");
    assert_eq!(app.header_title(), "Buenos días, Fénix (09/05/2024)");
    assert!(app.dashboard.is_loading());
    let requests = app.take_runtime_requests();
    assert_eq!(requests.len(), 1);
    assert!(matches!(requests[0], RuntimeCommand::ReloadDashboard));

    app.apply_runtime_event(RuntimeEvent::ReloadFinished);
    assert!(!app.dashboard.is_loading());

    run(&mut app, "range custom 2024-04-01 2024-04-30");
    assert_eq!(
        app.header_title(),
        "Buenos días, Fénix (01/04/2024 - 30/04/2024)"
    );
}

#[test]
fn test_range_errors_notify_in_spanish() {
    let mut app = App::new(settings());

    run(&mut app, "range weekly");
    assert_eq!(
        last_message(&app),
        Some((
            "Rango desconocido: weekly".to_string(),
            NotifyLevel::Warning
        ))
    );

    run(&mut app, "range custom 2024-04-01 30/04/2024");
    assert_eq!(
        last_message(&app),
        Some((
            "Fecha no válida: 30/04/2024 (formato AAAA-MM-DD)".to_string(),
            NotifyLevel::Warning
        ))
    );
    assert_eq!(app.header_title(), "Buenos días, Fénix");
}

#[test]
fn test_export_failure_notifies_in_spanish() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("informes");
    std::fs::write(&blocker, "no es un directorio").unwrap();

    let mut app = App::new(settings());
    app.export_dir = Some(blocker);
    run(&mut app, "export income csv");

    let (message, level) = last_message(&app).unwrap();
    assert_eq!(level, NotifyLevel::Error);
    assert!(message.starts_with("Error al exportar: Error de E/S: "), "{message}");
}

#[test]
fn test_module_toggle_command() {
    let mut app = App::new(settings());
    assert_eq!(app.modules.is_active("Reservas"), Some(false));

    run(&mut app, "module reservas");
    assert_eq!(app.modules.is_active("Reservas"), Some(true));
    assert_eq!(
        last_message(&app),
        Some((
            "Módulo Reservas activado correctamente.".to_string(),
            NotifyLevel::Success
        ))
    );

    run(&mut app, "module tpv");
    assert_eq!(app.modules.is_active("TPV"), Some(false));
    assert_eq!(last_message(&app).map(|(_, level)| level), Some(NotifyLevel::Warning));
}

#[test]
fn test_unknown_command_warns() {
    let mut app = App::new(settings());
    run(&mut app, "frobnicate");
    assert_eq!(
        last_message(&app),
        Some((
            "Comando desconocido: frobnicate".to_string(),
            NotifyLevel::Warning
        ))
    );
}

#[test]
fn test_export_writes_into_export_dir() {
    let dir = TempDir::new().unwrap();
    let mut app = App::new(settings());
    app.export_dir = Some(dir.path().to_path_buf());

    run(&mut app, "export income csv");
    let path = dir.path().join("ingresos.csv");
    assert!(path.exists());
    assert_eq!(last_message(&app).map(|(_, level)| level), Some(NotifyLevel::Success));

    run(&mut app, "export report pdf");
    assert_eq!(last_message(&app).map(|(_, level)| level), Some(NotifyLevel::Info));
    assert!(!dir.path().join("dashboard-report-2024-05-09.pdf").exists());

    run(&mut app, "export nowhere");
    let (message, level) = last_message(&app).unwrap();
    assert_eq!(level, NotifyLevel::Warning);
    assert!(message.starts_with("Exportación no soportada: nowhere. Uso: export"), "{message}");
}

#[test]
fn test_theme_change_reaches_charts_on_tick() {
    let mut app = App::new(settings());
    let generation = app.dashboard.charts().generation();

    run(&mut app, "theme");
    assert_eq!(app.ctx.theme, Theme::Dark);
    assert_eq!(app.dashboard.charts().theme(), Theme::Light);

    app.on_tick(std::time::Instant::now());
    assert_eq!(app.dashboard.charts().theme(), Theme::Dark);
    assert_eq!(app.dashboard.charts().generation(), generation + 1);

    app.on_tick(std::time::Instant::now());
    assert_eq!(app.dashboard.charts().generation(), generation + 1);
}

#[test]
fn test_theme_survives_restart() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("prefs.sqlite3");

    let mut app = App::new(settings());
    app.attach_store(PreferenceStore::open(&db).unwrap());
    app.toggle_theme();
    drop(app);

    let mut app = App::new(settings());
    assert_eq!(app.ctx.theme, Theme::Light);
    app.attach_store(PreferenceStore::open(&db).unwrap());
    assert_eq!(app.ctx.theme, Theme::Dark);
}

#[test]
fn test_theme_applied_after_attach_replaces_stored_one() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("prefs.sqlite3");
    let store = PreferenceStore::open(&db).unwrap();
    store.save_theme(Theme::Dark).unwrap();
    drop(store);

    // The binary re-applies `--theme light` this way once the store is attached
    let mut app = App::new(settings());
    app.attach_store(PreferenceStore::open(&db).unwrap());
    assert_eq!(app.ctx.theme, Theme::Dark);
    app.toggle_theme();
    drop(app);

    let mut app = App::new(settings());
    app.attach_store(PreferenceStore::open(&db).unwrap());
    assert_eq!(app.ctx.theme, Theme::Light);
}

#[test]
fn test_orders_lifecycle() {
    let mut app = App::new(settings());
    assert!(app.orders.is_loading());
    let requests = app.take_runtime_requests();
    assert!(matches!(requests.as_slice(), [RuntimeCommand::FetchOrders]));

    app.apply_runtime_event(RuntimeEvent::OrdersFailed {
        message: "timeout".to_string(),
    });
    assert_eq!(
        app.orders,
        OrdersState::Failed(ORDERS_ERROR_MESSAGE.to_string())
    );

    app.reload_orders();
    assert!(app.orders.is_loading());
    app.apply_runtime_event(RuntimeEvent::OrdersLoaded {
        orders: camarai::domain::sample_orders(),
    });
    app.set_tab(Tab::Orders);
    assert_eq!(app.copy_target().as_deref(), Some("3000"));
}

#[test]
fn test_copy_target_on_locations_is_selected_email() {
    let mut app = App::new(settings());
    app.set_tab(Tab::Locations);
    assert_eq!(
        app.copy_target().as_deref(),
        Some("central@restaurante.es")
    );
}
