//! Location search, group filter and pagination through the public API

use camarai::core::{Action, NotifyLevel};
use camarai::domain::{seed_locations, Location};
use camarai::modules::locations::{
    total_pages, LocationController, LocationPanel, DEFAULT_PAGE_SIZE, NO_RESULTS_MESSAGE,
};

fn no_results() -> Action {
    Action::notify(NO_RESULTS_MESSAGE, NotifyLevel::Warning)
}

fn numbered(count: u32, group: &str) -> Vec<Location> {
    (1..=count)
        .map(|id| {
            Location::new(
                id,
                &format!("Sala {id}"),
                &format!("Avenida {id}, {group}"),
                group,
            )
        })
        .collect()
}

#[test]
fn test_seed_list_fits_one_page() {
    let controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);

    assert_eq!(controller.filtered_len(), 3);
    assert_eq!(controller.visible_page().len(), 3);
    assert_eq!(controller.total_pages(), 1);

    let ui = controller.pagination_ui();
    assert_eq!(ui.page_text, "Página 1 de 1");
    assert!(!ui.prev_enabled);
    assert!(!ui.next_enabled);
}

#[test]
fn test_search_matches_name_or_address_ignoring_case() {
    let mut controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);

    assert_eq!(controller.set_search_term("TERRAZA"), Action::None);
    let names: Vec<&str> = controller.filtered().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["La Terraza"]);

    controller.set_search_term("valencia");
    let names: Vec<&str> = controller.filtered().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Café Norte"]);

    controller.set_search_term("");
    assert_eq!(controller.filtered_len(), 3);
}

#[test]
fn test_group_filter_combines_with_search() {
    let mut controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);

    controller.set_group_filter("barcelona");
    assert_eq!(controller.filtered_len(), 1);

    assert_eq!(controller.set_search_term("central"), no_results());
    assert_eq!(controller.filtered_len(), 0);

    controller.set_group_filter("all");
    assert_eq!(controller.filtered_len(), 1);
    assert_eq!(controller.filtered()[0].name, "Restaurante Central");
}

#[test]
fn test_empty_result_keeps_page_one_of_one() {
    let mut controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);

    assert_eq!(controller.set_search_term("sevilla"), no_results());
    assert_eq!(controller.total_pages(), 0);
    assert!(controller.visible_page().is_empty());

    let ui = controller.pagination_ui();
    assert_eq!(ui.page_text, "Página 1 de 1");
    assert!(!ui.prev_enabled);
    assert!(!ui.next_enabled);
    assert!(!controller.next_page());
    assert_eq!(controller.current_page(), 1);
}

#[test]
fn test_unknown_group_matches_nothing() {
    let mut controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);
    assert_eq!(controller.set_group_filter("sevilla"), no_results());
    assert_eq!(controller.filter().group_filter, "sevilla");
    assert_eq!(controller.filtered_len(), 0);
}

#[test]
fn test_paging_through_thirteen_locations() {
    let mut controller = LocationController::new(numbered(13, "madrid"), 6);
    assert_eq!(controller.total_pages(), 3);

    assert!(controller.next_page());
    assert_eq!(controller.pagination_ui().page_text, "Página 2 de 3");
    assert_eq!(controller.visible_page()[0].id, 7);

    assert!(controller.next_page());
    let last = controller.visible_page();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].id, 13);
    assert!(!controller.pagination_ui().next_enabled);

    assert!(!controller.next_page());
    assert_eq!(controller.current_page(), 3);

    assert!(controller.prev_page());
    assert!(controller.prev_page());
    assert!(!controller.prev_page());
    assert_eq!(controller.current_page(), 1);
}

#[test]
fn test_filter_change_returns_to_first_page() {
    let mut controller = LocationController::new(numbered(13, "madrid"), 6);
    controller.next_page();
    controller.next_page();
    assert_eq!(controller.current_page(), 3);

    controller.set_search_term("sala 1");
    assert_eq!(controller.current_page(), 1);
    // Sala 1, 10, 11, 12, 13
    assert_eq!(controller.filtered_len(), 5);
    assert_eq!(controller.total_pages(), 1);

    controller.set_search_term("");
    controller.next_page();
    controller.set_group_filter("madrid");
    assert_eq!(controller.current_page(), 1);
}

#[test]
fn test_page_count_rounds_up() {
    assert_eq!(total_pages(0, 6), 0);
    assert_eq!(total_pages(6, 6), 1);
    assert_eq!(total_pages(7, 6), 2);
    assert_eq!(total_pages(13, 6), 3);
}

#[test]
fn test_zero_page_size_is_clamped() {
    let controller = LocationController::new(numbered(4, "valencia"), 0);
    assert_eq!(controller.filter().page_size, 1);
    assert_eq!(controller.total_pages(), 4);
}

#[test]
fn test_panel_group_cycle_and_delete_flow() {
    let mut panel = LocationPanel::new(seed_locations(), DEFAULT_PAGE_SIZE);

    panel.cycle_group();
    assert_eq!(panel.controller().filter().group_filter, "madrid");
    panel.cycle_group();
    panel.cycle_group();
    assert_eq!(panel.controller().filter().group_filter, "valencia");
    panel.cycle_group();
    assert_eq!(panel.controller().filter().group_filter, "all");

    assert_eq!(
        panel.filter_group("  Barcelona "),
        Action::None,
        "group names are trimmed and lower-cased"
    );
    let selected = panel.selected_location().map(|l| l.name.clone());
    assert_eq!(selected.as_deref(), Some("La Terraza"));

    assert_eq!(
        panel.request_delete(),
        Action::notify(
            "¿Estás seguro de que deseas eliminar la ubicación \"La Terraza\"? Pulsa y para confirmar.",
            NotifyLevel::Warning
        )
    );
    assert_eq!(panel.pending_delete(), Some(2));
    assert_eq!(
        panel.confirm_delete(),
        Action::notify(
            "Ubicación La Terraza eliminada correctamente.",
            NotifyLevel::Success
        )
    );
    assert_eq!(panel.pending_delete(), None);
    assert_eq!(panel.controller().locations().len(), 3);
}
