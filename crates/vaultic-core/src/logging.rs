//! Logging facilities for vaultic.
//!
//! vaultic uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core plumbing target.
    pub const CORE: &str = "vaultic_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "vaultic_core::signal";
    /// List model target.
    pub const LIST_MODEL: &str = "vaultic::list_model";
    /// Database client boundary target.
    pub const CLIENT: &str = "vaultic::client";
}
