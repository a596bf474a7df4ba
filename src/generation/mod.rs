pub mod client;
pub mod prompt;
pub mod transport;

pub use client::{GenerationClient, GenerationError, StudyAidContent};
pub use transport::{GenerationRequest, GenerationTransport, HttpTransport, TransportError};
