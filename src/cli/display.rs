//! Formato de pedidos y customers para la consola

use crate::models::{Customer, OrderDetails};
use crate::utils::validation::format_money;

pub fn format_order(details: &OrderDetails) -> String {
    let order = &details.order;
    let customer = details
        .customer
        .as_ref()
        .map(|c| c.full_name())
        .unwrap_or_else(|| format!("Unknown customer {}", order.customer_id));
    let restaurant = details
        .restaurant
        .as_ref()
        .map(|r| format!("{} ({})", r.name, r.city))
        .unwrap_or_else(|| format!("Unknown restaurant {}", order.restaurant_id));
    let total = order
        .total_cost
        .map(|total| format!("R{}", format_money(total)))
        .unwrap_or_else(|| "Not calculated".to_string());
    let driver = details
        .driver
        .as_ref()
        .map(|d| d.name.clone())
        .unwrap_or_else(|| "Not allocated".to_string());

    let mut lines = vec![
        format!("Order Number: {}", order.id),
        format!("Customer: {}", customer),
        format!("Restaurant: {}", restaurant),
        format!("Total: {}", total),
        format!("Driver: {}", driver),
        format!("Status: {}", order.stage().label()),
    ];

    if details.lines.is_empty() {
        lines.push("No items ordered yet".to_string());
    }
    for entry in &details.lines {
        let mut text = format!(
            "  {} x {} (R{})",
            entry.line.quantity,
            entry.item_name.as_deref().unwrap_or("Unknown item"),
            format_money(entry.line.unit_price)
        );
        if let Some(instructions) = &entry.line.instructions {
            text.push_str(&format!(" Special Instructions: {}", instructions));
        }
        lines.push(text);
    }

    lines.join("\n")
}

pub fn format_customer(customer: &Customer) -> String {
    let missing: Vec<&str> = customer
        .missing_fields()
        .iter()
        .map(|field| field.label())
        .collect();
    format!(
        "Customer {}: {} (missing: {})",
        customer.id,
        customer.full_name(),
        missing.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Order;
    use chrono::Utc;
    use rust_decimal::Decimal;

    #[test]
    fn test_unprovisioned_order() {
        let details = OrderDetails {
            order: Order {
                id: 4,
                customer_id: 1,
                restaurant_id: 2,
                total_cost: None,
                driver_id: None,
                finalised: false,
                created_at: Utc::now(),
            },
            customer: None,
            restaurant: None,
            driver: None,
            lines: Vec::new(),
        };

        let text = format_order(&details);
        assert!(text.contains("Order Number: 4"));
        assert!(text.contains("Total: Not calculated"));
        assert!(text.contains("Driver: Not allocated"));
        assert!(text.contains("Status: Opened"));
        assert!(text.contains("No items ordered yet"));
    }

    #[test]
    fn test_status_follows_stage() {
        let mut details = OrderDetails {
            order: Order {
                id: 5,
                customer_id: 1,
                restaurant_id: 2,
                total_cost: Some(Decimal::new(8000, 2)),
                driver_id: Some(3),
                finalised: false,
                created_at: Utc::now(),
            },
            customer: None,
            restaurant: None,
            driver: None,
            lines: Vec::new(),
        };
        assert!(format_order(&details).contains("Status: Provisioned"));

        details.order.finalised = true;
        assert!(format_order(&details).contains("Status: Finalised"));
    }

    #[test]
    fn test_customer_missing_labels() {
        let customer = Customer {
            id: 9,
            first_name: "Lerato".to_string(),
            surname: "Dlamini".to_string(),
            phone: None,
            address: Some("3 Long Street".to_string()),
            city: Some("Cape Town".to_string()),
            email: None,
        };
        assert_eq!(
            format_customer(&customer),
            "Customer 9: Lerato Dlamini (missing: Phone Number, Email)"
        );
    }
}
