//! Logging client subsystem.
//!
//! # Data Flow
//! ```text
//! Request
//!     → autolog.rs (resolve URL, merge default headers, read LogIgnored)
//!     → call.rs (Idle → InFlight: timer starts)
//!     → Transport::execute
//!     → call.rs (InFlight → Completed: timer stops, outcome fixed)
//!     → capture::collector → observability::enricher → LogSink
//!     → Response returned to the caller
//! ```

pub mod autolog;
pub mod call;

pub use autolog::AutologClient;
pub use call::{CallState, Outcome};
