//! HTTP implementations of the Zirkl remote interfaces.
//!
//! Each client wraps one remote surface from `zirkl-core::api` over a
//! shared reqwest transport with bearer auth and per-request timeouts.
//! Payload-shape normalization happens here, at the boundary; everything
//! downstream sees canonical types only.

mod config;
mod notes_api;
mod notifications_api;
mod payload;
mod profile_api;
mod step_api;
mod transport;

pub use config::ApiConfig;
pub use notes_api::HttpNotesApi;
pub use notifications_api::HttpNotificationsApi;
pub use profile_api::HttpProfileApi;
pub use step_api::HttpStepApi;
