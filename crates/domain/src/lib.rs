//! # devhub-domain
//!
//! Pure domain model for the devhub device-management gateway.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error taxonomy, timestamps
//! - Define **Devices** (registry records with a type, an owning house and a lifecycle status)
//! - Define **Commands** (transient control requests) and their **Outcomes**
//! - Define **Telemetry events** (advisory records of state-changing operations)
//! - Define **Overlays** (read-time enrichment merged onto a device view)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod device;
pub mod enrichment;
pub mod telemetry;
