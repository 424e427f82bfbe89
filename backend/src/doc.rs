//! OpenAPI document for the order API.
//!
//! Served through Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::orders::{
    CloseOrderResponse, MessageResponse, OrderItemPayload, OrderRequest, OrderResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hot Coffee order API",
        description = "Create, read, update, delete, and close coffee shop orders."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::update_order,
        crate::inbound::http::orders::delete_order,
        crate::inbound::http::orders::close_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        OrderRequest,
        OrderItemPayload,
        OrderResponse,
        MessageResponse,
        CloseOrderResponse,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "orders", description = "Order lifecycle"),
        (name = "health", description = "Probes for orchestrators")
    )
)]
pub struct ApiDoc;
