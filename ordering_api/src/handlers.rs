//! API request handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use ordering_shared_types::{next_id, Dish, Order};

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::ApiState;
use crate::validate;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Envelope every request body arrives in: `{"data": {...}}`.
///
/// A missing envelope behaves like an empty payload so the field-presence
/// checks report the specific missing fields.
#[derive(Debug, Deserialize)]
pub struct RequestBody<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// Envelope every success response is wrapped in: `{"data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Incoming dish fields, all optional so validation can tell a missing
/// field from an invalid one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishPayload {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Number>,
    pub image_url: Option<String>,
}

/// Incoming order fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub id: Option<String>,
    pub deliver_to: Option<String>,
    pub mobile_number: Option<String>,
    pub status: Option<String>,
    pub dishes: Option<Vec<OrderDishPayload>>,
}

/// One entry of an incoming order's dish list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDishPayload {
    #[serde(default)]
    pub dish_id: String,
    pub quantity: Option<Number>,
}

// ============================================================================
// Lookups
// ============================================================================

/// Look up a dish by route id, or fail with 404 carrying the id.
async fn find_dish(state: &ApiState, id: &str) -> ApiResult<Dish> {
    state
        .store
        .get_dish(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Dish", id))
}

/// Look up an order by route id, or fail with 404 carrying the id.
async fn find_order(state: &ApiState, id: &str) -> ApiResult<Order> {
    state
        .store
        .get_order(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Order", id))
}

// ============================================================================
// Dish Handlers
// ============================================================================

/// List all dishes in store order.
pub async fn list_dishes(State(state): State<ApiState>) -> ApiResult<impl IntoResponse> {
    let dishes = state.store.list_dishes().await.map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: dishes }))
}

/// Create a new dish.
pub async fn create_dish(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<RequestBody<DishPayload>>,
) -> ApiResult<impl IntoResponse> {
    let payload = body.data.unwrap_or_default();
    let fields = validate::dish_fields(&payload)?;

    let dish = Dish {
        id: next_id(),
        name: fields.name,
        description: fields.description,
        price: fields.price,
        image_url: fields.image_url,
    };

    state.store.put_dish(dish.clone()).await.map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: dish })))
}

/// Get a dish by id.
pub async fn get_dish(
    State(state): State<ApiState>,
    Path(dish_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let dish = find_dish(&state, &dish_id).await?;
    Ok(Json(DataResponse { data: dish }))
}

/// Update a dish. The id is immutable: a body id differing from the route
/// id is rejected, and the stored id is kept regardless.
pub async fn update_dish(
    State(state): State<ApiState>,
    Path(dish_id): Path<String>,
    ApiJson(body): ApiJson<RequestBody<DishPayload>>,
) -> ApiResult<impl IntoResponse> {
    let existing = find_dish(&state, &dish_id).await?;
    let payload = body.data.unwrap_or_default();
    let fields = validate::dish_fields(&payload)?;
    validate::route_id_match("Dish", payload.id.as_deref(), &dish_id)?;

    let dish = Dish {
        id: existing.id,
        name: fields.name,
        description: fields.description,
        price: fields.price,
        image_url: fields.image_url,
    };

    state.store.put_dish(dish.clone()).await.map_err(ApiError::from)?;

    Ok(Json(DataResponse { data: dish }))
}

// ============================================================================
// Order Handlers
// ============================================================================

/// List all orders in store order.
pub async fn list_orders(State(state): State<ApiState>) -> ApiResult<impl IntoResponse> {
    let orders = state.store.list_orders().await.map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: orders }))
}

/// Create a new order. Status defaults to `pending` when unspecified.
pub async fn create_order(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<RequestBody<OrderPayload>>,
) -> ApiResult<impl IntoResponse> {
    let payload = body.data.unwrap_or_default();
    let fields = validate::order_fields(&payload)?;
    let status = validate::order_create_status(payload.status.as_deref())?;

    let order = Order {
        id: next_id(),
        deliver_to: fields.deliver_to,
        mobile_number: fields.mobile_number,
        status,
        dishes: fields.dishes,
    };

    state.store.put_order(order.clone()).await.map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// Get an order by id.
pub async fn get_order(
    State(state): State<ApiState>,
    Path(order_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let order = find_order(&state, &order_id).await?;
    Ok(Json(DataResponse { data: order }))
}

/// Update an order.
///
/// A delivered order is terminal and rejects every mutation, so that guard
/// runs before any field validation.
pub async fn update_order(
    State(state): State<ApiState>,
    Path(order_id): Path<String>,
    ApiJson(body): ApiJson<RequestBody<OrderPayload>>,
) -> ApiResult<impl IntoResponse> {
    let existing = find_order(&state, &order_id).await?;
    validate::ensure_order_mutable(&existing)?;

    let payload = body.data.unwrap_or_default();
    let fields = validate::order_fields(&payload)?;
    validate::route_id_match("Order", payload.id.as_deref(), &order_id)?;
    let status = validate::order_update_status(payload.status.as_deref())?;

    let order = Order {
        id: existing.id,
        deliver_to: fields.deliver_to,
        mobile_number: fields.mobile_number,
        status,
        dishes: fields.dishes,
    };

    state.store.put_order(order.clone()).await.map_err(ApiError::from)?;

    Ok(Json(DataResponse { data: order }))
}

/// Delete an order. Only pending orders may be deleted.
pub async fn delete_order(
    State(state): State<ApiState>,
    Path(order_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let existing = find_order(&state, &order_id).await?;
    validate::ensure_order_deletable(&existing)?;

    state
        .store
        .delete_order(&existing.id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Health
// ============================================================================

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
