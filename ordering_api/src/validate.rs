//! Request validation pipeline.
//!
//! Each operation runs an ordered list of check functions over its payload,
//! evaluated fail-fast by [`run_checks`]: the first failing check produces
//! the response and nothing after it runs. Payload types keep every field
//! optional so a missing field and an invalid field are distinct failures
//! with distinct messages.

use serde_json::Number;

use ordering_shared_types::{Order, OrderDish, OrderStatus};

use crate::error::{ApiError, ApiResult};
use crate::handlers::{DishPayload, OrderDishPayload, OrderPayload};

const DISH_PRICE_MESSAGE: &str = "Dish must have a price that is an integer greater than 0";
const ORDER_DISHES_MESSAGE: &str = "Order must include at least one dish";
const ORDER_STATUS_MESSAGE: &str =
    "Order must have a status of pending, preparing, out-for-delivery, delivered";
const ORDER_DELIVERED_MESSAGE: &str = "A delivered order cannot be changed";
const ORDER_DELETE_MESSAGE: &str = "An order cannot be deleted unless it is pending";

/// A single validation step over a payload.
type Check<T> = fn(&T) -> ApiResult<()>;

/// Evaluate checks in order, stopping at the first failure.
fn run_checks<T>(payload: &T, checks: &[Check<T>]) -> ApiResult<()> {
    for check in checks {
        check(payload)?;
    }
    Ok(())
}

fn missing(entity: &str, field: &str) -> ApiError {
    ApiError::validation(format!("{entity} must include a {field}"))
}

fn require_text(value: Option<&str>, entity: &str, field: &str) -> ApiResult<()> {
    match value {
        Some(text) if !text.is_empty() => Ok(()),
        _ => Err(missing(entity, field)),
    }
}

// ============================================================================
// Dish checks
// ============================================================================

/// Fields of a dish payload that survived validation.
#[derive(Debug, Clone)]
pub struct DishFields {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
}

const DISH_CHECKS: &[Check<DishPayload>] = &[
    dish_has_name,
    dish_has_description,
    dish_has_price,
    dish_has_image_url,
    dish_name_not_empty,
    dish_description_not_empty,
    dish_price_positive_integer,
    dish_image_url_not_empty,
];

fn dish_has_name(payload: &DishPayload) -> ApiResult<()> {
    payload.name.as_ref().map(|_| ()).ok_or_else(|| missing("Dish", "name"))
}

fn dish_has_description(payload: &DishPayload) -> ApiResult<()> {
    payload
        .description
        .as_ref()
        .map(|_| ())
        .ok_or_else(|| missing("Dish", "description"))
}

fn dish_has_price(payload: &DishPayload) -> ApiResult<()> {
    payload.price.as_ref().map(|_| ()).ok_or_else(|| missing("Dish", "price"))
}

fn dish_has_image_url(payload: &DishPayload) -> ApiResult<()> {
    payload
        .image_url
        .as_ref()
        .map(|_| ())
        .ok_or_else(|| missing("Dish", "image_url"))
}

fn dish_name_not_empty(payload: &DishPayload) -> ApiResult<()> {
    require_text(payload.name.as_deref(), "Dish", "name")
}

fn dish_description_not_empty(payload: &DishPayload) -> ApiResult<()> {
    require_text(payload.description.as_deref(), "Dish", "description")
}

// A price that is present but not a positive integer (zero, negative, or
// fractional) gets the price-specific message; absence is reported by the
// presence check ahead of this one.
fn dish_price_positive_integer(payload: &DishPayload) -> ApiResult<()> {
    let Some(price) = payload.price.as_ref() else {
        return Ok(());
    };
    match price.as_i64() {
        Some(value) if value > 0 => Ok(()),
        _ => Err(ApiError::validation(DISH_PRICE_MESSAGE)),
    }
}

fn dish_image_url_not_empty(payload: &DishPayload) -> ApiResult<()> {
    require_text(payload.image_url.as_deref(), "Dish", "image_url")
}

/// Validate a dish payload and extract its fields.
pub fn dish_fields(payload: &DishPayload) -> ApiResult<DishFields> {
    run_checks(payload, DISH_CHECKS)?;
    Ok(DishFields {
        name: payload.name.clone().unwrap_or_default(),
        description: payload.description.clone().unwrap_or_default(),
        price: payload.price.as_ref().and_then(Number::as_i64).unwrap_or_default(),
        image_url: payload.image_url.clone().unwrap_or_default(),
    })
}

// ============================================================================
// Order checks
// ============================================================================

/// Fields of an order payload that survived validation. Status is handled
/// separately because create and update treat it differently.
#[derive(Debug, Clone)]
pub struct OrderFields {
    pub deliver_to: String,
    pub mobile_number: String,
    pub dishes: Vec<OrderDish>,
}

const ORDER_CHECKS: &[Check<OrderPayload>] = &[
    order_has_deliver_to,
    order_has_mobile_number,
    order_has_dishes,
    order_deliver_to_not_empty,
    order_mobile_number_not_empty,
    order_dish_list_not_empty,
    order_quantities_positive_integers,
];

fn order_has_deliver_to(payload: &OrderPayload) -> ApiResult<()> {
    payload
        .deliver_to
        .as_ref()
        .map(|_| ())
        .ok_or_else(|| missing("Order", "deliverTo"))
}

fn order_has_mobile_number(payload: &OrderPayload) -> ApiResult<()> {
    payload
        .mobile_number
        .as_ref()
        .map(|_| ())
        .ok_or_else(|| missing("Order", "mobileNumber"))
}

fn order_has_dishes(payload: &OrderPayload) -> ApiResult<()> {
    payload.dishes.as_ref().map(|_| ()).ok_or_else(|| missing("Order", "dishes"))
}

fn order_deliver_to_not_empty(payload: &OrderPayload) -> ApiResult<()> {
    require_text(payload.deliver_to.as_deref(), "Order", "deliverTo")
}

fn order_mobile_number_not_empty(payload: &OrderPayload) -> ApiResult<()> {
    require_text(payload.mobile_number.as_deref(), "Order", "mobileNumber")
}

fn order_dish_list_not_empty(payload: &OrderPayload) -> ApiResult<()> {
    match payload.dishes.as_deref() {
        Some([]) | None => Err(ApiError::validation(ORDER_DISHES_MESSAGE)),
        Some(_) => Ok(()),
    }
}

// Short-circuits on the first offending entry so the reported index is
// always the first invalid one.
fn order_quantities_positive_integers(payload: &OrderPayload) -> ApiResult<()> {
    let Some(dishes) = payload.dishes.as_deref() else {
        return Ok(());
    };
    for (index, dish) in dishes.iter().enumerate() {
        let quantity = dish.quantity.as_ref().and_then(Number::as_u64);
        match quantity {
            Some(value) if value > 0 && u32::try_from(value).is_ok() => {}
            _ => {
                return Err(ApiError::validation(format!(
                    "Dish {index} must have a quantity that is an integer greater than 0"
                )))
            }
        }
    }
    Ok(())
}

fn order_dish(entry: &OrderDishPayload) -> OrderDish {
    OrderDish {
        dish_id: entry.dish_id.clone(),
        quantity: entry
            .quantity
            .as_ref()
            .and_then(Number::as_u64)
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or_default(),
    }
}

/// Validate an order payload and extract its fields.
pub fn order_fields(payload: &OrderPayload) -> ApiResult<OrderFields> {
    run_checks(payload, ORDER_CHECKS)?;
    Ok(OrderFields {
        deliver_to: payload.deliver_to.clone().unwrap_or_default(),
        mobile_number: payload.mobile_number.clone().unwrap_or_default(),
        dishes: payload.dishes.as_deref().unwrap_or_default().iter().map(order_dish).collect(),
    })
}

// ============================================================================
// Guards
// ============================================================================

/// Resolve the status for a newly created order.
///
/// An unspecified status defaults to `pending`, the natural initial state of
/// the lifecycle; a supplied status must name a known state.
pub fn order_create_status(requested: Option<&str>) -> ApiResult<OrderStatus> {
    match requested {
        None => Ok(OrderStatus::Pending),
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::validation(ORDER_STATUS_MESSAGE)),
    }
}

/// Resolve the status for an order update.
///
/// `delivered` is terminal, so it is never a legal target of an update; any
/// other unknown or missing status gets the generic message.
pub fn order_update_status(requested: Option<&str>) -> ApiResult<OrderStatus> {
    match requested {
        Some("delivered") => Err(ApiError::conflict(ORDER_DELIVERED_MESSAGE)),
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::validation(ORDER_STATUS_MESSAGE)),
        None => Err(ApiError::validation(ORDER_STATUS_MESSAGE)),
    }
}

/// Reject any mutation of an order that has already been delivered.
pub fn ensure_order_mutable(order: &Order) -> ApiResult<()> {
    if order.status == OrderStatus::Delivered {
        return Err(ApiError::conflict(ORDER_DELIVERED_MESSAGE));
    }
    Ok(())
}

/// Deletion is only permitted while an order is still pending.
pub fn ensure_order_deletable(order: &Order) -> ApiResult<()> {
    if order.status != OrderStatus::Pending {
        return Err(ApiError::conflict(ORDER_DELETE_MESSAGE));
    }
    Ok(())
}

/// Reject a body id that contradicts the route id. A body without an id (or
/// with an empty one) always passes.
pub fn route_id_match(entity: &'static str, body_id: Option<&str>, route_id: &str) -> ApiResult<()> {
    match body_id {
        Some(id) if !id.is_empty() && id != route_id => Err(ApiError::conflict(format!(
            "{entity} id does not match route id. {entity}: {id}, Route: {route_id}"
        ))),
        _ => Ok(()),
    }
}
