//! Safe configuration access.
//!
//! # Data Flow
//! ```text
//! AppConfig (loaded, immutable)
//!     → SafeAccess::new(&config)          present handle
//!     → .field("Monitoring").field(...)   absent as soon as a step is missing
//!     → .string("/metrics")               value or caller default
//! ```
//!
//! # Design Decisions
//! - Reads are total: callers never handle "value missing"
//! - Records publish static field tables (`reflect_record!`)
//! - Handles are short-lived borrows; do not keep them across a reload

mod accessors;
pub mod reflect;
pub mod safe;

pub use reflect::{Reflect, Scalar};
pub use safe::SafeAccess;
