//! # devhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository` — the device registry
//!   - `LightService` / `TemperatureService` — per-family upstream services
//!   - `TelemetrySink` — telemetry ingestion
//! - Translate generic commands into family calls (the **adapter set**)
//! - Define **driving/inbound** use-cases:
//!   - `DeviceService` — register, get, list, update, delete
//!   - `CommandRouter` — validate device state, dispatch, report
//! - Enrich device views with live upstream state, tolerating upstream failure
//! - Emit best-effort telemetry that never changes an operation's outcome
//!
//! ## Dependency rule
//! Depends on `devhub-domain` only (plus `futures` and `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod command_adapter;
pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;
