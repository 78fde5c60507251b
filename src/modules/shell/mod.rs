//! Sidebar and header menu visibility

/// Terminal width above which the sidebar is docked rather than overlaid
pub const DESKTOP_BREAKPOINT: u16 = 100;

pub const USER_MENU: [&str; 3] = ["Perfil", "Ajustes", "Cerrar sesión"];
pub const TEAM_MENU: [&str; 3] = ["Camarai Madrid", "Camarai Barcelona", "Camarai Valencia"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    User,
    Team,
}

impl Menu {
    pub fn title(&self) -> &'static str {
        match self {
            Menu::User => "Usuario",
            Menu::Team => "Equipo",
        }
    }

    pub fn items(&self) -> &'static [&'static str] {
        match self {
            Menu::User => &USER_MENU,
            Menu::Team => &TEAM_MENU,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellState {
    pub sidebar_open: bool,
    pub user_menu_open: bool,
    pub team_menu_open: bool,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Click on the dimmed overlay behind the sidebar
    pub fn click_overlay(&mut self) {
        self.sidebar_open = false;
    }

    /// Opening one menu closes the other
    pub fn toggle_menu(&mut self, menu: Menu) {
        match menu {
            Menu::User => {
                self.user_menu_open = !self.user_menu_open;
                if self.user_menu_open {
                    self.team_menu_open = false;
                }
            }
            Menu::Team => {
                self.team_menu_open = !self.team_menu_open;
                if self.team_menu_open {
                    self.user_menu_open = false;
                }
            }
        }
    }

    pub fn click_outside(&mut self) {
        self.user_menu_open = false;
        self.team_menu_open = false;
    }

    /// Returns true if anything was open
    pub fn escape(&mut self) -> bool {
        let was_open = self.any_open();
        self.sidebar_open = false;
        self.click_outside();
        was_open
    }

    pub fn on_resize(&mut self, width: u16) {
        if width > DESKTOP_BREAKPOINT {
            self.sidebar_open = false;
        }
    }

    pub fn any_open(&self) -> bool {
        self.sidebar_open || self.user_menu_open || self.team_menu_open
    }

    pub fn open_menu(&self) -> Option<Menu> {
        if self.user_menu_open {
            Some(Menu::User)
        } else if self.team_menu_open {
            Some(Menu::Team)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menus_are_exclusive() {
        let mut shell = ShellState::new();
        shell.toggle_menu(Menu::User);
        assert_eq!(shell.open_menu(), Some(Menu::User));
        shell.toggle_menu(Menu::Team);
        assert!(!shell.user_menu_open);
        assert!(shell.team_menu_open);
        shell.toggle_menu(Menu::Team);
        assert_eq!(shell.open_menu(), None);
    }

    #[test]
    fn test_escape_closes_everything() {
        let mut shell = ShellState::new();
        shell.toggle_sidebar();
        shell.toggle_menu(Menu::Team);
        assert!(shell.escape());
        assert!(!shell.any_open());
        assert!(!shell.escape());
    }

    #[test]
    fn test_overlay_and_outside_clicks() {
        let mut shell = ShellState::new();
        shell.toggle_sidebar();
        shell.toggle_menu(Menu::User);
        shell.click_outside();
        assert!(shell.sidebar_open);
        assert!(!shell.user_menu_open);
        shell.click_overlay();
        assert!(!shell.sidebar_open);
    }

    #[test]
    fn test_wide_resize_closes_sidebar() {
        let mut shell = ShellState::new();
        shell.toggle_sidebar();
        shell.on_resize(DESKTOP_BREAKPOINT);
        assert!(shell.sidebar_open);
        shell.on_resize(DESKTOP_BREAKPOINT + 1);
        assert!(!shell.sidebar_open);
    }
}
