//! HTTP inbound adapter.
//!
//! Handlers translate requests into calls on the order driving ports held in
//! [`state::HttpState`] and render [`crate::domain::Error`] through
//! [`error`].

pub mod error;
pub mod health;
pub mod orders;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
