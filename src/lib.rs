// Library surface for headless/integration tests and reuse.
// The presentation layer (ui) stays bin-only in main.rs.
pub mod clock;
pub mod config;
pub mod input;
pub mod runtime;
pub mod session;
pub mod words;

/// Tick interval of the event runtime in milliseconds.
pub const TICK_RATE_MS: u64 = 100;
