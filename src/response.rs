//! Turning a raw HTTP response into a payload.
//!
//! Three layers have to agree before the caller sees data: the HTTP status must be 200, the body must
//! decode as an [`Envelope`], and the envelope should say `success: true`. The first two are hard errors.
//! The third is only reported, because the device often still returns something useful in `data`; a
//! session configured with [`FailurePolicy::Raise`] turns it into [`Error::Application`] instead.

use tracing::warn;

use crate::envelope::{ApplicationFailure, Envelope, Payload};
use crate::error::{Error, Result};
use crate::http::RawResponse;

pub const HTTP_OK:u16 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the diagnostic and carry on with whatever `data` holds.
    Report,
    /// Treat `success: false` as an error.
    Raise,
}

impl Default for FailurePolicy {
    fn default() -> Self { FailurePolicy::Report }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub payload: Payload,
    pub failure: Option<ApplicationFailure>,
}

impl Reply {

    pub fn succeeded(&self) -> bool { self.failure.is_none() }

    /// Apply a failure policy. Under `Report` this is the identity.
    pub fn check(self, policy:FailurePolicy) -> Result<Self> {
        match (policy, self.failure) {
            (FailurePolicy::Raise, Some(failure)) => Err(failure.into()),
            (_, failure) => Ok(Reply{ payload: self.payload, failure }),
        }
    }

    pub fn into_payload(self) -> Payload { self.payload }

}

pub fn unwrap(raw:&RawResponse) -> Result<Reply> {
    if raw.status != HTTP_OK {
        return Err(Error::Transport{ status: raw.status });
    }

    let envelope:Envelope = serde_json::from_str(&raw.body)?;
    let (payload, failure) = envelope.into_parts();

    if let Some(f) = &failure {
        warn!(code = ?f.code, messages = ?f.messages, "device reported failure");
    }

    Ok(Reply{ payload, failure })
}
