//! # devhub-adapter-upstream-reqwest
//!
//! Outbound HTTP adapter using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement `LightService`, `TemperatureService` and `TelemetrySink`
//!   from `devhub-app::ports`
//! - Bound every call with the configured timeout
//! - Classify failures: unreachable or timed out becomes
//!   `ServiceUnavailable`, a non-success status becomes `DispatchFailed`
//!
//! ## Dependency rule
//! Depends on `devhub-app` (for port traits) and `devhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod config;
mod endpoint;
mod error;
mod light;
mod telemetry;
mod temperature;

#[cfg(test)]
mod testing;

pub use config::{Upstream, UpstreamConfig};
pub use error::UpstreamError;
pub use light::HttpLightService;
pub use telemetry::HttpTelemetrySink;
pub use temperature::HttpTemperatureService;
