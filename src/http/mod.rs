//! HTTP call descriptors and transport adapters.
//!
//! # Data Flow
//! ```text
//! caller builds Request
//!     → client resolves it (base URL, default headers) into an OutgoingRequest
//!     → transport.rs executes it (reqwest, or any Transport impl)
//!     → response.rs (Response descriptor, transport failures folded in)
//! ```
//!
//! # Design Decisions
//! - Transport failures never surface as `Err`; they travel inside `Response`
//!   so every call can still be logged
//! - Headers are kept as an ordered list, not a map, so duplicates survive

pub mod request;
pub mod response;
pub mod transport;

pub use request::{
    BodyContent, BodyParameter, DataFormat, Header, OutgoingRequest, Request, RequestError,
    LOG_IGNORED_HEADER,
};
pub use response::{BoxError, Response, ResponseStatus};
pub use transport::{ReqwestTransport, Transport};
