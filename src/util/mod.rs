//! Shared utilities.

pub mod clock;
pub mod telemetry;

pub use clock::delay_until;
pub use telemetry::init_tracing;
