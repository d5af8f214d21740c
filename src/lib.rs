//! Safe configuration access.
//!
//! Typed configuration records, a nil-tolerant traversal handle over them,
//! and change-event logging.

pub mod access;
pub mod config;
pub mod observability;

pub use access::{Reflect, SafeAccess, Scalar};
pub use config::schema::AppConfig;
pub use config::{Configurable, ConfigStore};
pub use observability::{ChangeEvent, Environment, EventKind};
