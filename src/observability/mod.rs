//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ConfigStore::replace / loader failures / callers
//!     → events.rs (ChangeEvent, Environment)
//!     → formatter.rs forwarders (log_* honour the auto-log switch, force_* do not)
//!     → FormatterSink (default: structured tracing records)
//! ```
//!
//! # Design Decisions
//! - Structured logging through `tracing`
//! - A process-wide sink for compatibility, injectable `ChangeLogger` for everything else

pub mod events;
pub mod formatter;
pub mod logging;

pub use events::{ChangeEvent, Environment, EventKind};
pub use formatter::{
    force_log_config_change, force_log_config_error, force_log_env_change, ChangeLogger,
    FormatterSink, TracingFormatter,
};
pub use logging::init_logging;
