//! Log targets for Horizon Brain components.
//!
//! Use these with `tracing` directives to filter logs by component, e.g.
//! `RUST_LOG=horizon_brain::accordion::navigator=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Accordion container and bindings.
    pub const ACCORDION: &str = "horizon_brain::accordion";
    /// Open-set bookkeeping.
    pub const EXPANSION: &str = "horizon_brain::accordion::expansion";
    /// Roving focus navigation.
    pub const NAVIGATOR: &str = "horizon_brain::accordion::navigator";
}
