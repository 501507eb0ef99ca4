//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AutologConfig (validated)
//!     → optionally stored as the process-wide default (global.rs)
//!     → cloned into each client at construction
//! ```
//!
//! # Design Decisions
//! - Each client owns its configuration; nothing is shared mutably
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod global;
pub mod loader;
pub mod schema;
pub mod validation;

pub use global::{clear_global_configuration, global_configuration, set_global_configuration};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AutologConfig, LogFormat, LoggerSettings};
