//! # signet-runtime
//!
//! Startup wiring. [`SignetRuntime::bootstrap`] validates the configuration and
//! probes the identity model once; the runtime then hands out the query-time
//! producer wrapper and the batch-time reconciler wrapper, both sharing the
//! same configuration and adapter.

#![deny(unsafe_code)]

pub mod error;
pub mod runtime;
pub mod telemetry;

pub use error::{Result, RuntimeError};
pub use runtime::SignetRuntime;
pub use telemetry::init_tracing;
