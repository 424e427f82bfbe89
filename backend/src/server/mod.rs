//! Server construction and dependency wiring.

mod config;

pub use config::ServerConfig;

use std::io;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use hot_coffee::Trace;
#[cfg(debug_assertions)]
use hot_coffee::doc::ApiDoc;
use hot_coffee::domain::OrderService;
use hot_coffee::inbound::http::health::{HealthState, live, ready};
use hot_coffee::inbound::http::orders::{
    close_order, create_order, delete_order, get_order, json_config, list_orders, update_order,
};
use hot_coffee::inbound::http::state::HttpState;
use hot_coffee::outbound::persistence::JsonFileOrderRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Open the order store and wire the service behind the HTTP ports.
fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let repo = JsonFileOrderRepository::open(config.data_dir()).map_err(io::Error::other)?;
    info!(path = %repo.file_path().display(), "order store opened");
    let service = Arc::new(OrderService::new(Arc::new(repo), Arc::new(DefaultClock)));
    Ok(web::Data::new(HttpState::new(service.clone(), service)))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(create_order)
        .service(list_orders)
        .service(get_order)
        .service(update_order)
        .service(delete_order)
        .service(close_order)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Returns an error when the data directory cannot be opened or the socket
/// cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    info!(bind_addr = %config.bind_addr(), "hot-coffee listening");
    Ok(server)
}
