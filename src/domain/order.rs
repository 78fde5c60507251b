//! Ticket orders listed in the dashboard table

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_number: String,
    pub purchase_date: String,
    pub customer: String,
    pub event: String,
    pub amount: String,
}

impl Order {
    fn sample(number: &str, date: &str, customer: &str, amount: &str) -> Self {
        Self {
            order_number: number.to_string(),
            purchase_date: date.to_string(),
            customer: customer.to_string(),
            event: "Día de la madre".to_string(),
            amount: amount.to_string(),
        }
    }
}

/// Example orders returned by the simulated fetch
pub fn sample_orders() -> Vec<Order> {
    vec![
        Order::sample("3000", "9 May, 2024", "María García", "€80.00"),
        Order::sample("3001", "5 May, 2024", "Juan Martínez", "€299.00"),
        Order::sample("3002", "28 Apr, 2024", "Ana López", "€150.00"),
    ]
}

/// Loading lifecycle of the orders table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrdersState {
    Loading,
    Loaded(Vec<Order>),
    Failed(String),
}

impl OrdersState {
    pub fn is_loading(&self) -> bool {
        matches!(self, OrdersState::Loading)
    }

    pub fn orders(&self) -> &[Order] {
        match self {
            OrdersState::Loaded(orders) => orders,
            _ => &[],
        }
    }
}
