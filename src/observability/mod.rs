//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! PropertySet (from capture)
//!     → enricher.rs (ignore rule, destructure flags, set-if-absent)
//!     → event.rs (LogEvent: level + template + captured properties)
//!     → sink.rs (TracingSink → tracing, MemorySink → tests)
//!
//! template.rs renders `{Placeholder}` messages for sinks that need text.
//! logging.rs installs the tracing subscriber on request.
//! ```
//!
//! # Design Decisions
//! - The sink is an explicit handle, never a process-wide logger
//! - Rendering the template is the sink's job; events carry it unrendered

#[cfg(test)]
pub(crate) mod capture_layer;
pub mod enricher;
pub mod event;
pub mod logging;
pub mod sink;
pub mod template;

pub use enricher::{DestructureRule, IgnoreRule, LogEnricher};
pub use event::{CaptureMode, EventProperty, Level, LogEvent};
pub use sink::{LogSink, MemorySink, TracingSink};
