//! Order HTTP handlers.
//!
//! ```text
//! POST   /orders
//! GET    /orders
//! GET    /orders/{id}
//! PUT    /orders/{id}
//! DELETE /orders/{id}
//! POST   /orders/{id}/close
//! ```
//!
//! Bodies use the same snake_case field names as the order store.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, Order, OrderDraft, OrderId, OrderItem};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// One order line as sent and returned over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct OrderItemPayload {
    /// Menu product reference.
    #[serde(default)]
    #[schema(example = "latte")]
    pub product_id: String,
    /// Units ordered; must be positive.
    #[serde(default)]
    #[schema(example = 2)]
    pub quantity: i64,
}

impl From<OrderItemPayload> for OrderItem {
    fn from(value: OrderItemPayload) -> Self {
        Self::new(value.product_id, value.quantity)
    }
}

impl From<OrderItem> for OrderItemPayload {
    fn from(value: OrderItem) -> Self {
        Self {
            product_id: value.product_id,
            quantity: value.quantity,
        }
    }
}

/// Request body for creating or replacing an order.
///
/// Server-owned fields (`id`, `status`, `created_at`) are ignored if sent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct OrderRequest {
    /// Free-form customer reference.
    #[serde(default)]
    #[schema(example = "Ada")]
    pub customer_name: Option<String>,
    /// Order lines in the order they should be kept.
    pub items: Option<Vec<OrderItemPayload>>,
}

/// Order representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct OrderResponse {
    /// Server-assigned identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Free-form customer reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Order lines.
    pub items: Vec<OrderItemPayload>,
    /// `open` or `closed`.
    #[schema(example = "open")]
    pub status: String,
    /// Creation time, RFC 3339.
    #[schema(example = "2024-05-01T08:30:00Z")]
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        Self {
            id: value.id.to_string(),
            customer_name: value.customer_name,
            items: value.items.into_iter().map(OrderItemPayload::from).collect(),
            status: value.status.to_string(),
            created_at: value.created_at.into(),
        }
    }
}

/// Confirmation body for deletions.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    #[schema(example = "Order deleted successfully")]
    pub message: String,
}

/// Confirmation body for closing an order.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CloseOrderResponse {
    /// Human-readable confirmation.
    #[schema(example = "Order closed successfully")]
    pub message: String,
    /// The order in its closed state.
    pub order: OrderResponse,
}

/// JSON extractor settings that turn malformed bodies into `400` domain errors.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request("request body is not a valid order")
            .with_details(json!({
                "reason": err.to_string(),
                "code": "invalid_body",
            }))
            .into()
    })
}

fn parse_order_request(payload: OrderRequest) -> Result<OrderDraft, Error> {
    let items = payload.items.ok_or_else(|| {
        Error::invalid_request("missing required field: items").with_details(json!({
            "field": "items",
            "code": "missing_field",
        }))
    })?;
    Ok(OrderDraft {
        customer_name: payload.customer_name,
        items: items.into_iter().map(OrderItem::from).collect(),
    })
}

/// Update and close report an unknown id as a bad request rather than 404.
fn not_found_as_invalid_request(error: Error) -> Error {
    if error.code() != ErrorCode::NotFound {
        return error;
    }
    let mut remapped = Error::invalid_request(error.message());
    if let Some(details) = error.details() {
        remapped = remapped.with_details(details.clone());
    }
    if let Some(id) = error.trace_id() {
        remapped = remapped.with_trace_id(id);
    }
    remapped
}

/// Create an order.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid order", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<OrderRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_order_request(payload.into_inner())?;
    let order = state.orders.create_order(draft).await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// List every order.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<OrderResponse>>> {
    let orders = state.orders_query.list_orders().await?;
    Ok(web::Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// Fetch one order.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "The order", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderResponse>> {
    let id = OrderId::new(path.into_inner());
    let order = state.orders_query.fetch_order(&id).await?;
    Ok(web::Json(OrderResponse::from(order)))
}

/// Replace the items and customer reference of an order.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Updated order", body = OrderResponse),
        (status = 400, description = "Invalid body or unknown order", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "updateOrder"
)]
#[put("/orders/{id}")]
pub async fn update_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<OrderRequest>,
) -> ApiResult<web::Json<OrderResponse>> {
    let id = OrderId::new(path.into_inner());
    let changes = parse_order_request(payload.into_inner())?;
    let order = state
        .orders
        .update_order(&id, changes)
        .await
        .map_err(not_found_as_invalid_request)?;
    Ok(web::Json(OrderResponse::from(order)))
}

/// Delete an order.
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 404, description = "Order not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "deleteOrder"
)]
#[delete("/orders/{id}")]
pub async fn delete_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = OrderId::new(path.into_inner());
    state.orders.delete_order(&id).await?;
    Ok(web::Json(MessageResponse {
        message: "Order deleted successfully".to_owned(),
    }))
}

/// Close an open order.
#[utoipa::path(
    post,
    path = "/orders/{id}/close",
    params(("id" = String, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order closed", body = CloseOrderResponse),
        (status = 400, description = "Order already closed or unknown", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "closeOrder"
)]
#[post("/orders/{id}/close")]
pub async fn close_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CloseOrderResponse>> {
    let id = OrderId::new(path.into_inner());
    let order = state
        .orders
        .close_order(&id)
        .await
        .map_err(not_found_as_invalid_request)?;
    Ok(web::Json(CloseOrderResponse {
        message: "Order closed successfully".to_owned(),
        order: OrderResponse::from(order),
    }))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
