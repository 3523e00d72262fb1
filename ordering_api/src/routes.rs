//! Route table for the ordering API.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::ApiState;

/// Build the API router over shared state.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/dishes",
            get(handlers::list_dishes).post(handlers::create_dish),
        )
        .route(
            "/dishes/:dish_id",
            get(handlers::get_dish).put(handlers::update_dish),
        )
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/orders/:order_id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use ordering_shared_types::{next_id, Order, OrderDish, OrderStatus};
    use ordering_store_interface::InMemoryDataStore;

    use super::*;

    fn app() -> Router {
        build_router(ApiState::new(Arc::new(InMemoryDataStore::new())))
    }

    fn app_with_orders(orders: Vec<Order>) -> Router {
        let store = InMemoryDataStore::with_data(Vec::new(), orders);
        build_router(ApiState::new(Arc::new(store)))
    }

    fn order_with_status(status: OrderStatus) -> Order {
        Order {
            id: next_id(),
            deliver_to: "123 Main".to_string(),
            mobile_number: "555-0100".to_string(),
            status,
            dishes: vec![OrderDish {
                dish_id: "1".to_string(),
                quantity: 2,
            }],
        }
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(value) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn dish_body() -> Value {
        json!({
            "data": {
                "name": "Taco",
                "description": "Crunchy",
                "price": 9,
                "image_url": "https://example.com/taco.png"
            }
        })
    }

    fn order_body() -> Value {
        json!({
            "data": {
                "deliverTo": "123 Main",
                "mobileNumber": "555-0100",
                "dishes": [{ "dishId": "1", "quantity": 2 }]
            }
        })
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let app = app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn created_dishes_get_unique_ids_and_list_in_order() {
        let app = app();

        let (status, first) = send(&app, "POST", "/dishes", Some(dish_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        let mut second_body = dish_body();
        second_body["data"]["name"] = json!("Burrito");
        let (status, second) = send(&app, "POST", "/dishes", Some(second_body)).await;
        assert_eq!(status, StatusCode::CREATED);

        assert_ne!(first["data"]["id"], second["data"]["id"]);

        let (status, listed) = send(&app, "GET", "/dishes", None).await;
        assert_eq!(status, StatusCode::OK);
        let dishes = listed["data"].as_array().unwrap();
        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0]["name"], "Taco");
        assert_eq!(dishes[1]["name"], "Burrito");
    }

    #[tokio::test]
    async fn repeated_get_returns_identical_results() {
        let app = app();
        send(&app, "POST", "/dishes", Some(dish_body())).await;

        let (_, first) = send(&app, "GET", "/dishes", None).await;
        let (_, second) = send(&app, "GET", "/dishes", None).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn dish_create_rejects_missing_fields() {
        let app = app();

        let mut body = dish_body();
        body["data"].as_object_mut().unwrap().remove("name");
        let (status, error) = send(&app, "POST", "/dishes", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Dish must include a name");
        assert_eq!(error["status"], 400);

        let (status, error) = send(&app, "POST", "/dishes", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Dish must include a name");
    }

    #[tokio::test]
    async fn dish_create_rejects_non_positive_price() {
        let app = app();
        for price in [json!(0), json!(-5), json!(2.5)] {
            let mut body = dish_body();
            body["data"]["price"] = price;
            let (status, error) = send(&app, "POST", "/dishes", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                error["message"],
                "Dish must have a price that is an integer greater than 0"
            );
        }
    }

    #[tokio::test]
    async fn unknown_dish_id_is_not_found() {
        let app = app();
        let (status, error) = send(&app, "GET", "/dishes/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["message"], "Dish does not exist: nope");
        assert_eq!(error["status"], 404);
    }

    #[tokio::test]
    async fn dish_update_keeps_id_and_overwrites_fields() {
        let app = app();
        let (_, created) = send(&app, "POST", "/dishes", Some(dish_body())).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let mut body = dish_body();
        body["data"]["name"] = json!("Quesadilla");
        let (status, updated) = send(&app, "PUT", &format!("/dishes/{id}"), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["id"], id.as_str());
        assert_eq!(updated["data"]["name"], "Quesadilla");
    }

    #[tokio::test]
    async fn dish_update_rejects_mismatched_body_id() {
        let app = app();
        let (_, created) = send(&app, "POST", "/dishes", Some(dish_body())).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let mut body = dish_body();
        body["data"]["id"] = json!("other");
        let (status, error) = send(&app, "PUT", &format!("/dishes/{id}"), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error["message"],
            format!("Dish id does not match route id. Dish: other, Route: {id}")
        );
    }

    #[tokio::test]
    async fn order_create_defaults_status_to_pending() {
        let app = app();
        let (status, created) = send(&app, "POST", "/orders", Some(order_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["status"], "pending");
        assert_eq!(created["data"]["deliverTo"], "123 Main");
        assert_eq!(created["data"]["mobileNumber"], "555-0100");
        assert_eq!(created["data"]["dishes"][0]["dishId"], "1");
        assert_eq!(created["data"]["dishes"][0]["quantity"], 2);
        assert!(created["data"]["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn order_create_rejects_empty_or_missing_dishes() {
        let app = app();

        let mut body = order_body();
        body["data"]["dishes"] = json!([]);
        let (status, error) = send(&app, "POST", "/orders", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Order must include at least one dish");

        let mut body = order_body();
        body["data"].as_object_mut().unwrap().remove("dishes");
        let (status, error) = send(&app, "POST", "/orders", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Order must include a dishes");
    }

    #[tokio::test]
    async fn order_create_names_first_invalid_quantity_index() {
        let app = app();
        let mut body = order_body();
        body["data"]["dishes"] = json!([
            { "dishId": "1", "quantity": 2 },
            { "dishId": "2", "quantity": 0 },
            { "dishId": "3" }
        ]);
        let (status, error) = send(&app, "POST", "/orders", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error["message"],
            "Dish 1 must have a quantity that is an integer greater than 0"
        );
    }

    #[tokio::test]
    async fn unknown_order_id_is_not_found_for_every_verb() {
        let app = app();
        for method in ["GET", "DELETE"] {
            let (status, error) = send(&app, method, "/orders/nope", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(error["message"], "Order does not exist: nope");
        }

        let mut body = order_body();
        body["data"]["status"] = json!("preparing");
        let (status, _) = send(&app, "PUT", "/orders/nope", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn order_update_rejects_mismatched_body_id() {
        let app = app();
        let (_, created) = send(&app, "POST", "/orders", Some(order_body())).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        // Mismatch wins even though the rest of the body is valid.
        let mut body = order_body();
        body["data"]["id"] = json!("other");
        body["data"]["status"] = json!("preparing");
        let (status, error) = send(&app, "PUT", &format!("/orders/{id}"), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error["message"],
            format!("Order id does not match route id. Order: other, Route: {id}")
        );
    }

    #[tokio::test]
    async fn order_update_requires_valid_status() {
        let app = app();
        let (_, created) = send(&app, "POST", "/orders", Some(order_body())).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let (status, error) =
            send(&app, "PUT", &format!("/orders/{id}"), Some(order_body())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error["message"],
            "Order must have a status of pending, preparing, out-for-delivery, delivered"
        );

        let mut body = order_body();
        body["data"]["status"] = json!("delivered");
        let (status, error) = send(&app, "PUT", &format!("/orders/{id}"), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "A delivered order cannot be changed");
    }

    #[tokio::test]
    async fn delivered_orders_reject_all_updates() {
        let delivered = order_with_status(OrderStatus::Delivered);
        let id = delivered.id.clone();
        let app = app_with_orders(vec![delivered]);

        let mut body = order_body();
        body["data"]["status"] = json!("preparing");
        let (status, error) = send(&app, "PUT", &format!("/orders/{id}"), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "A delivered order cannot be changed");
    }

    #[tokio::test]
    async fn pending_orders_can_be_deleted_and_disappear_from_lists() {
        let pending = order_with_status(OrderStatus::Pending);
        let id = pending.id.clone();
        let app = app_with_orders(vec![pending]);

        let (status, body) = send(&app, "DELETE", &format!("/orders/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (_, listed) = send(&app, "GET", "/orders", None).await;
        assert!(listed["data"].as_array().unwrap().is_empty());

        let (status, _) = send(&app, "GET", &format!("/orders/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_pending_orders_cannot_be_deleted() {
        let preparing = order_with_status(OrderStatus::Preparing);
        let id = preparing.id.clone();
        let app = app_with_orders(vec![preparing]);

        let (status, error) = send(&app, "DELETE", &format!("/orders/{id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "An order cannot be deleted unless it is pending");

        let (_, listed) = send(&app, "GET", "/orders", None).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_json_uses_the_error_envelope() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/orders")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let error: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error["status"], 400);
        assert!(error["message"].as_str().is_some());
    }
}
