// Configuration for talking to a device: address, timeout, ownership and failure handling options
pub mod config;

// Error type shared by every call
pub mod error;

// The {success, data, code, messages} wrapper the device puts around every response
pub mod envelope;

// Blocking HTTP transport, one request in and one RawResponse out
pub mod http;

// Checks status, decodes the envelope and hands back the payload
pub mod response;

// Owns the transport and the client key proving ownership of the device
pub mod session;

// Typed wrappers for system and instrument resources
pub mod devices;

pub use config::Config;
pub use envelope::{ApplicationFailure, Envelope, Payload};
pub use error::{Error, Result};
pub use http::{RawResponse, CLIENT_KEY_HEADER};
pub use response::{unwrap, FailurePolicy, Reply};
pub use session::Session;
