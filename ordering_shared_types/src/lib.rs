//! Shared entity types for the restaurant ordering backend.
//!
//! Both the store and the API crates depend on these types, so wire-format
//! concerns (camelCase field names, kebab-case status values) live here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A menu item.
///
/// `id` is assigned on creation and immutable thereafter; `price` is always
/// a positive integer (smallest currency unit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
}

/// Lifecycle state of an order.
///
/// `Delivered` is terminal: once an order reaches it, no further mutation
/// of the order is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Wire representation, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out-for-delivery",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "out-for-delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// One line of an order: which dish, and how many of it.
///
/// `dish_id` is carried through unvalidated (the original data set uses
/// free-form ids); `quantity` is always a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDish {
    #[serde(default)]
    pub dish_id: String,
    pub quantity: u32,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    pub dishes: Vec<OrderDish>,
}

/// Generate a fresh identifier for a new record.
///
/// Identifiers stay unique across deletions and re-insertions, so the store
/// never has to track which ids were handed out before.
pub fn next_id() -> String {
    Uuid::new_v4().to_string()
}
