//! Command parser for the : command system

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Dashboard,
    Kpis,
    Orders,
    Locations,
    Modules,

    // Appearance
    Theme,

    // Location list
    Search(String),
    Group(String),
    Page(PageStep),
    Add,
    Edit,
    Delete,

    // Dashboard filters and export
    Range(Vec<String>),
    Export(Vec<String>),
    Module(String),

    Quit,

    // Unknown command
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Next,
    Prev,
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim().to_string());

    match cmd.to_lowercase().as_str() {
        "dashboard" | "home" => Command::Dashboard,
        "kpis" | "kpi" => Command::Kpis,
        "orders" | "pedidos" => Command::Orders,
        "locations" | "loc" | "ubicaciones" => Command::Locations,
        "modules" | "modulos" => Command::Modules,

        "theme" | "tema" => Command::Theme,

        // An empty search clears the term
        "search" | "buscar" => Command::Search(args.unwrap_or_default()),
        "group" | "grupo" => match args {
            Some(group) if !group.is_empty() => Command::Group(group),
            _ => Command::Group("all".to_string()),
        },
        "page" | "pagina" => match args.as_deref().map(str::to_lowercase).as_deref() {
            Some("next") | Some("n") | Some("siguiente") => Command::Page(PageStep::Next),
            Some("prev") | Some("p") | Some("anterior") => Command::Page(PageStep::Prev),
            _ => Command::Unknown(input.to_string()),
        },
        "add" => Command::Add,
        "edit" => Command::Edit,
        "delete" | "del" => Command::Delete,

        "range" | "rango" => Command::Range(split_args(args)),
        "export" | "exp" => Command::Export(split_args(args)),
        "module" | "mod" => {
            if let Some(name) = args.filter(|s| !s.is_empty()) {
                Command::Module(name)
            } else {
                Command::Unknown(input.to_string())
            }
        }

        "quit" | "q" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

fn split_args(args: Option<String>) -> Vec<String> {
    args.map(|s| s.split_whitespace().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(parse_command("dashboard"), Command::Dashboard);
        assert_eq!(parse_command("loc"), Command::Locations);
        assert_eq!(parse_command("ORDERS"), Command::Orders);
    }

    #[test]
    fn test_parse_location_commands() {
        assert_eq!(
            parse_command("search gran vía"),
            Command::Search("gran vía".to_string())
        );
        assert_eq!(parse_command("search"), Command::Search(String::new()));
        assert_eq!(
            parse_command("group barcelona"),
            Command::Group("barcelona".to_string())
        );
        assert_eq!(parse_command("group"), Command::Group("all".to_string()));
        assert_eq!(parse_command("page next"), Command::Page(PageStep::Next));
        assert_eq!(parse_command("page p"), Command::Page(PageStep::Prev));
    }

    #[test]
    fn test_parse_range_and_export() {
        assert_eq!(
            parse_command("range custom 2024-05-01 2024-05-09"),
            Command::Range(vec![
                "custom".to_string(),
                "2024-05-01".to_string(),
                "2024-05-09".to_string()
            ])
        );
        assert_eq!(
            parse_command("export occupancy xlsx"),
            Command::Export(vec!["occupancy".to_string(), "xlsx".to_string()])
        );
        assert_eq!(
            parse_command("module QR Ordering"),
            Command::Module("QR Ordering".to_string())
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
        assert_eq!(parse_command("page"), Command::Unknown("page".to_string()));
        assert_eq!(parse_command("module"), Command::Unknown("module".to_string()));
    }
}
