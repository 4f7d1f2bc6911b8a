//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod command_router;
pub mod device_service;
pub mod enrichment;
pub mod telemetry;

pub use command_router::CommandRouter;
pub use device_service::DeviceService;
pub use enrichment::Enricher;
pub use telemetry::TelemetryEmitter;
