//! # devhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON device API** (`/devices`, `/devices/{id}`,
//!   `/devices/{id}/commands`) and a dependency-free `/health` probe
//! - Map HTTP requests into application service calls (driving adapter)
//! - Wrap results in the `{"success": …}` envelope and map every
//!   [`DevHubError`](devhub_domain::error::DevHubError) variant to a stable
//!   status code
//!
//! ## Dependency rule
//! Depends on `devhub-app` (for port traits and services) and `devhub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
