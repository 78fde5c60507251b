pub mod location;
pub mod order;

pub use location::{seed_locations, Location, ALL_GROUPS, GROUP_CATALOG, MODULE_CATALOG};
pub use order::{sample_orders, Order, OrdersState};
