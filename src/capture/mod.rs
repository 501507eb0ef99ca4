//! Call capture subsystem.
//!
//! # Data Flow
//! ```text
//! completed call (OutgoingRequest + Response + elapsed)
//!     → collector.rs (fixed-order PropertySet)
//!         → classifier.rs (JSON / FORM / OPAQUE)
//!         → masking.rs (request JSON only)
//!         → decoder.rs (JSON tree, form map)
//!         → exception.rs (error tree)
//!     → properties.rs (PropertySet handed to the enricher)
//! ```
//!
//! # Design Decisions
//! - Masking and decoding failures are warnings, never call failures
//! - Each body is handled independently; one failing does not affect the other

pub mod classifier;
pub mod collector;
pub mod decoder;
pub mod exception;
pub mod masking;
pub mod properties;

pub use classifier::{BodyKind, ContentClassifier, SubstringClassifier};
pub use collector::{CallMetadata, PropertyCollector};
pub use exception::{flatten_error, AggregateError, ErrorTree};
pub use masking::{FieldMasker, MaskingError, MASK};
pub use properties::PropertySet;
