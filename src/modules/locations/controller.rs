//! Search, group filter and pagination over the seeded location list

use tracing::debug;

use crate::core::{Action, NotifyLevel};
use crate::domain::{Location, ALL_GROUPS};

/// Locations shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Warning shown whenever a recompute leaves nothing to display
pub const NO_RESULTS_MESSAGE: &str = "No se encontraron ubicaciones con los criterios de búsqueda.";

/// Transient search/filter/pagination parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Lower-cased search term, empty when not searching
    pub search_term: String,
    /// `all` or a group tag
    pub group_filter: String,
    /// 1-based
    pub current_page: usize,
    pub page_size: usize,
}

impl FilterState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            group_filter: ALL_GROUPS.to_string(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn matches(&self, location: &Location) -> bool {
        let term_matches = self.search_term.is_empty()
            || location.name.to_lowercase().contains(&self.search_term)
            || location.address.to_lowercase().contains(&self.search_term);
        let group_matches =
            self.group_filter == ALL_GROUPS || location.group == self.group_filter;
        term_matches && group_matches
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Derived state of the pagination footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationUi {
    pub page_text: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// `ceil(count / page_size)`, zero for an empty result
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// The displayed denominator floors at 1 even though `total_pages` may be 0.
pub fn derive_pagination_ui(current_page: usize, total_pages: usize) -> PaginationUi {
    PaginationUi {
        page_text: format!("Página {} de {}", current_page, total_pages.max(1)),
        prev_enabled: current_page > 1,
        next_enabled: current_page < total_pages && total_pages > 0,
    }
}

#[derive(Debug, Clone)]
pub struct LocationController {
    locations: Vec<Location>,
    filter: FilterState,
    /// Indices into `locations` that survive the filter, in list order
    filtered: Vec<usize>,
    total_pages: usize,
}

impl LocationController {
    pub fn new(locations: Vec<Location>, page_size: usize) -> Self {
        let mut controller = Self {
            locations,
            filter: FilterState::new(page_size),
            filtered: Vec::new(),
            total_pages: 0,
        };
        controller.recompute();
        controller
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn set_search_term(&mut self, term: &str) -> Action {
        self.filter.search_term = term.to_lowercase();
        self.filter.current_page = 1;
        self.refresh()
    }

    /// Unknown tags are stored as-is and simply match nothing.
    pub fn set_group_filter(&mut self, group: &str) -> Action {
        self.filter.group_filter = group.to_string();
        self.filter.current_page = 1;
        self.refresh()
    }

    /// Filtered locations in original order, plus the raw page count.
    pub fn compute_filtered_view(&self) -> (Vec<&Location>, usize) {
        let filtered: Vec<&Location> = self
            .locations
            .iter()
            .filter(|location| self.filter.matches(location))
            .collect();
        let pages = total_pages(filtered.len(), self.filter.page_size);
        (filtered, pages)
    }

    pub fn filtered(&self) -> Vec<&Location> {
        self.filtered
            .iter()
            .filter_map(|&idx| self.locations.get(idx))
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn current_page(&self) -> usize {
        self.filter.current_page
    }

    pub fn pagination_ui(&self) -> PaginationUi {
        derive_pagination_ui(self.filter.current_page, self.total_pages)
    }

    /// Rows of the current page
    pub fn visible_page(&self) -> Vec<&Location> {
        let size = self.filter.page_size;
        let start = (self.filter.current_page - 1) * size;
        self.filtered
            .iter()
            .skip(start)
            .take(size)
            .filter_map(|&idx| self.locations.get(idx))
            .collect()
    }

    /// No-op when the next button would be disabled
    pub fn next_page(&mut self) -> bool {
        if !self.pagination_ui().next_enabled {
            return false;
        }
        self.filter.current_page += 1;
        true
    }

    /// No-op when the previous button would be disabled
    pub fn prev_page(&mut self) -> bool {
        if !self.pagination_ui().prev_enabled {
            return false;
        }
        self.filter.current_page -= 1;
        true
    }

    #[cfg(test)]
    fn set_page(&mut self, page: usize) {
        self.filter.current_page = page.clamp(1, self.total_pages.max(1));
    }

    pub fn find(&self, id: u32) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    fn recompute(&mut self) {
        self.filtered = self
            .locations
            .iter()
            .enumerate()
            .filter(|(_, location)| self.filter.matches(location))
            .map(|(idx, _)| idx)
            .collect();
        self.total_pages = total_pages(self.filtered.len(), self.filter.page_size);
    }

    fn refresh(&mut self) -> Action {
        self.recompute();
        debug!(
            term = %self.filter.search_term,
            group = %self.filter.group_filter,
            matches = self.filtered.len(),
            pages = self.total_pages,
            "location filter recomputed"
        );
        if self.filtered.is_empty() {
            Action::notify(NO_RESULTS_MESSAGE, NotifyLevel::Warning)
        } else {
            Action::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed_locations;

    fn many(count: u32) -> Vec<Location> {
        (1..=count)
            .map(|id| {
                Location::new(
                    id,
                    &format!("Local {id}"),
                    &format!("Calle {id}, Madrid"),
                    "madrid",
                )
            })
            .collect()
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 6), 0);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(13, 6), 3);
    }

    #[test]
    fn test_pagination_ui_floors_denominator() {
        let ui = derive_pagination_ui(1, 0);
        assert_eq!(ui.page_text, "Página 1 de 1");
        assert!(!ui.prev_enabled);
        assert!(!ui.next_enabled);

        let ui = derive_pagination_ui(2, 3);
        assert_eq!(ui.page_text, "Página 2 de 3");
        assert!(ui.prev_enabled);
        assert!(ui.next_enabled);

        let ui = derive_pagination_ui(3, 3);
        assert!(!ui.next_enabled);
    }

    #[test]
    fn test_search_matches_name_or_address_case_insensitively() {
        let mut controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);
        assert_eq!(controller.set_search_term("TERRAZA"), Action::None);
        let names: Vec<&str> = controller.filtered().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["La Terraza"]);

        controller.set_search_term("valencia");
        let names: Vec<&str> = controller.filtered().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Café Norte"]);
        assert_eq!(controller.filter().search_term, "valencia");
    }

    #[test]
    fn test_empty_search_returns_all_in_order() {
        let mut controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);
        controller.set_search_term("");
        let ids: Vec<u32> = controller.filtered().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_group_filter_selects_exact_group() {
        let mut controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);
        assert_eq!(controller.set_group_filter("barcelona"), Action::None);
        let (filtered, pages) = controller.compute_filtered_view();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].group, "barcelona");
        assert_eq!(pages, 1);
        assert_eq!(controller.pagination_ui().page_text, "Página 1 de 1");
    }

    #[test]
    fn test_unknown_group_is_accepted_and_matches_nothing() {
        let mut controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);
        let action = controller.set_group_filter("sevilla");
        assert_eq!(controller.filter().group_filter, "sevilla");
        assert_eq!(controller.filtered_len(), 0);
        assert_eq!(
            action,
            Action::Notify(NO_RESULTS_MESSAGE.to_string(), NotifyLevel::Warning)
        );
    }

    #[test]
    fn test_no_match_emits_single_warning() {
        let mut controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);
        let action = controller.set_search_term("xyz-no-match");
        assert_eq!(
            action,
            Action::Notify(NO_RESULTS_MESSAGE.to_string(), NotifyLevel::Warning)
        );
        assert_eq!(controller.total_pages(), 0);
        assert_eq!(controller.pagination_ui().page_text, "Página 1 de 1");
        assert!(controller.visible_page().is_empty());
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut controller = LocationController::new(many(13), DEFAULT_PAGE_SIZE);
        controller.set_page(3);
        assert_eq!(controller.current_page(), 3);
        controller.set_search_term("local");
        assert_eq!(controller.current_page(), 1);

        controller.set_page(2);
        controller.set_group_filter("all");
        assert_eq!(controller.current_page(), 1);
    }

    #[test]
    fn test_last_page_of_thirteen() {
        let mut controller = LocationController::new(many(13), DEFAULT_PAGE_SIZE);
        assert_eq!(controller.total_pages(), 3);
        assert!(controller.next_page());
        assert!(controller.next_page());
        assert!(!controller.next_page());
        let ui = controller.pagination_ui();
        assert_eq!(ui.page_text, "Página 3 de 3");
        assert!(ui.prev_enabled);
        assert!(!ui.next_enabled);
        let ids: Vec<u32> = controller.visible_page().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![13]);
    }

    #[test]
    fn test_prev_page_stops_at_first() {
        let mut controller = LocationController::new(many(7), DEFAULT_PAGE_SIZE);
        assert_eq!(controller.total_pages(), 2);
        assert!(!controller.prev_page());
        assert!(controller.next_page());
        assert_eq!(controller.visible_page().len(), 1);
        assert!(controller.prev_page());
        assert_eq!(controller.visible_page().len(), 6);
    }

    #[test]
    fn test_search_and_group_combine() {
        let mut controller = LocationController::new(seed_locations(), DEFAULT_PAGE_SIZE);
        controller.set_group_filter("madrid");
        let action = controller.set_search_term("terraza");
        assert_eq!(controller.filtered_len(), 0);
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Warning)));
    }
}
