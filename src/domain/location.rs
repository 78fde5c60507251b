//! Managed venues shown in the location list

/// Group tags the location filter offers, besides the `all` sentinel
pub const GROUP_CATALOG: [&str; 3] = ["madrid", "barcelona", "valencia"];

/// Sentinel group filter value matching every location
pub const ALL_GROUPS: &str = "all";

/// Modules a location can have enabled
pub const MODULE_CATALOG: [&str; 4] = ["TPV", "Tienda Online", "Reservas", "QR Ordering"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub group: String,
    pub active: bool,
    pub modules: Vec<String>,
}

impl Location {
    pub fn new(id: u32, name: &str, address: &str, group: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            address: address.to_string(),
            phone: String::new(),
            email: String::new(),
            group: group.to_string(),
            active: true,
            modules: Vec::new(),
        }
    }

    pub fn with_contact(mut self, phone: &str, email: &str) -> Self {
        self.phone = phone.to_string();
        self.email = email.to_string();
        self
    }

    pub fn with_modules(mut self, modules: &[&str]) -> Self {
        self.modules = modules.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Activa"
        } else {
            "Inactiva"
        }
    }
}

/// The fixed in-memory list the location panel starts from
pub fn seed_locations() -> Vec<Location> {
    vec![
        Location::new(1, "Restaurante Central", "Calle Gran Vía 41, Madrid", "madrid")
            .with_contact("+34 912 456 789", "central@restaurante.es")
            .with_modules(&["TPV", "Tienda Online", "Reservas"]),
        Location::new(2, "La Terraza", "Paseo Marítimo 22, Barcelona", "barcelona")
            .with_contact("+34 933 456 123", "terraza@restaurante.es")
            .with_modules(&["TPV", "Reservas", "QR Ordering"]),
        Location::new(3, "Café Norte", "Alameda Principal 5, Valencia", "valencia")
            .with_contact("+34 963 789 456", "norte@restaurante.es")
            .with_modules(&["TPV"])
            .inactive(),
    ]
}
