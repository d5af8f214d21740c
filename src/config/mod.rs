//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated)
//!     → store.rs (atomic swap of Arc<AppConfig>)
//!     → readers take a snapshot and walk it with SafeAccess
//! ```
//!
//! # Design Decisions
//! - Records start zero-valued; optional sections are `None` until set
//! - Builders (`with_*`) mutate in place and never validate
//! - Field tables (fields.rs) make every record traversable by name

pub mod builder;
pub mod configurable;
pub mod deep_copy;
mod fields;
pub mod loader;
mod presets;
pub mod schema;
pub mod store;
pub mod validation;

pub use configurable::Configurable;
pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::*;
pub use store::ConfigStore;
pub use validation::{validate_config, ValidationError};
