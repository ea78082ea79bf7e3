//! Logging facilities for Horizon Brain.
//!
//! Horizon Brain uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the host application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_brain=debug")
//!         .init();
//! }
//! ```
//!
//! Every event is emitted with an explicit target from [`targets`], so a
//! filter directive can select a single subsystem.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "horizon_brain_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_brain_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "horizon_brain_core::property";
}
