//! # Resource models
//!
//! Wire shapes for the three pet-store resources. Every optional field is an
//! `Option` that is skipped when `None`, so "not sent" and "sent empty" stay
//! distinguishable.

mod order;
mod pet;
mod user;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use order::{Order, OrderStatus};
pub use pet::{Category, Pet, PetStatus, Tag};
pub use user::User;

/// Status name to count, as returned by `store/inventory`.
pub type Inventory = HashMap<String, i64>;

/// Generic envelope the server answers with for deletes, login, uploads and bulk creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub code: i32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_reads_type_field() {
        let msg: ApiMessage =
            serde_json::from_str(r#"{"code":200,"type":"unknown","message":"logged in user session:1"}"#)
                .unwrap();
        assert_eq!(msg.code, 200);
        assert_eq!(msg.kind.as_deref(), Some("unknown"));
        assert!(msg.message.unwrap().starts_with("logged in"));
    }

    #[test]
    fn inventory_is_a_plain_map() {
        let inventory: Inventory = serde_json::from_str(r#"{"available": 3, "sold": 1}"#).unwrap();
        assert_eq!(inventory["available"], 3);
    }
}
