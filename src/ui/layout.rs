use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::Tab;

pub const SIDEBAR_WIDTH: u16 = 24;
pub const MENU_WIDTH: u16 = 26;
pub const TAB_DIVIDER: &str = " │ ";

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub tabs: Rect,
    pub main: Rect,
    pub footer: Rect,
    /// Overlay drawn over the left edge while open
    pub sidebar: Rect,
    pub team_menu: Rect,
    pub user_menu: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[3]);

    let sidebar = Rect {
        x: size.x,
        y: vertical[1].y,
        width: SIDEBAR_WIDTH.min(size.width),
        height: vertical[1].height + vertical[2].height,
    };

    let menu_top = vertical[0].y + vertical[0].height;
    let menu_height = 6.min(vertical[2].height + 1);
    let user_menu = Rect {
        x: size.x + size.width.saturating_sub(MENU_WIDTH),
        y: menu_top,
        width: MENU_WIDTH.min(size.width),
        height: menu_height,
    };
    let team_menu = Rect {
        x: user_menu.x.saturating_sub(MENU_WIDTH),
        ..user_menu
    };

    UiAreas {
        size,
        header: vertical[0],
        tabs: vertical[1],
        main: vertical[2],
        footer: vertical[3],
        sidebar,
        team_menu,
        user_menu,
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

pub fn tab_label(tab: Tab) -> String {
    format!("{}:{}", tab.shortcut(), tab.title())
}

/// Which tab title sits under column `col` of the tab bar
pub fn tab_at(tabs: Rect, col: u16) -> Option<Tab> {
    let mut x = tabs.x;
    for tab in Tab::ALL {
        // one column of padding either side of the title
        let width = tab_label(tab).chars().count() as u16 + 2;
        if col >= x && col < x + width {
            return Some(tab);
        }
        x += width + TAB_DIVIDER.chars().count() as u16;
    }
    None
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_stack_vertically() {
        let areas = areas(Rect::new(0, 0, 120, 40));
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.tabs.y, 3);
        assert_eq!(areas.main.y, 4);
        assert_eq!(areas.status_line.y, 38);
        assert_eq!(areas.command_line.y, 39);
        assert_eq!(areas.user_menu.x, 120 - MENU_WIDTH);
        assert_eq!(areas.team_menu.x, 120 - 2 * MENU_WIDTH);
    }

    #[test]
    fn test_tab_at() {
        let tabs = Rect::new(0, 3, 120, 1);
        assert_eq!(tab_at(tabs, 0), Some(Tab::Dashboard));
        // " 1:Dashboard " is 13 wide, then the divider
        assert_eq!(tab_at(tabs, 13), None);
        assert_eq!(tab_at(tabs, 16), Some(Tab::Kpis));
        assert_eq!(tab_at(tabs, 119), None);
    }
}
