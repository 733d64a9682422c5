use chrono::{SecondsFormat, Utc};

use crate::models::{Order, OrderStatus};

use super::unique_id;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub id: Option<i64>,
    pub pet_id: Option<i64>,
    pub quantity: Option<i32>,
    pub ship_date: Option<String>,
    pub status: Option<OrderStatus>,
    pub complete: Option<bool>,
}

impl OrderPatch {
    fn apply_to(self, order: &mut Order) {
        if let Some(id) = self.id {
            order.id = Some(id);
        }
        if let Some(pet_id) = self.pet_id {
            order.pet_id = Some(pet_id);
        }
        if let Some(quantity) = self.quantity {
            order.quantity = Some(quantity);
        }
        if let Some(ship_date) = self.ship_date {
            order.ship_date = Some(ship_date);
        }
        if let Some(status) = self.status {
            order.status = Some(status);
        }
        if let Some(complete) = self.complete {
            order.complete = Some(complete);
        }
    }
}

/// ISO-8601 UTC timestamp with millisecond precision.
pub fn ship_date_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A placed, incomplete order for one unit of a generated pet id.
pub fn build(patch: OrderPatch) -> Order {
    let mut order = Order {
        id: Some(unique_id()),
        pet_id: Some(unique_id()),
        quantity: Some(1),
        ship_date: Some(ship_date_now()),
        status: Some(OrderStatus::Placed),
        complete: Some(false),
    };
    patch.apply_to(&mut order);
    order
}

pub fn update(order: &Order, patch: OrderPatch) -> Order {
    let mut updated = order.clone();
    patch.apply_to(&mut updated);
    updated
}
