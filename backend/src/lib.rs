//! Hot Coffee order service.
//!
//! A small order-lifecycle backend: orders are created, listed, fetched,
//! updated, deleted, and closed over HTTP and persisted to a JSON file.
//!
//! Layout follows ports and adapters:
//! - [`domain`]: order rules, [`domain::OrderService`], and the ports.
//! - [`inbound`]: actix-web handlers.
//! - [`outbound`]: the JSON file repository.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
