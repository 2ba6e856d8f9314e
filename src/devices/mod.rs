// Typed wrappers for the handful of resources used so far. Anything not covered here can still be reached
// through Session::get and Session::post.

use crate::envelope::Payload;
use crate::error::{Error, Result};

// System resources under /api/moku
pub mod moku;

// The Oscilloscope instrument under /api/oscilloscope (or /api/slotN/oscilloscope in multi-instrument mode)
pub mod oscilloscope;

// Scalar replies (names, serial numbers) come back as strings on some firmware and numbers on others
fn text_of(payload:Payload, what:&str) -> Result<String> {
	match payload {
		Payload::Text(s) => Ok(s),
		Payload::Value(v) if v.is_number() => Ok(v.to_string()),
		other => Err(Error::UnexpectedPayload(format!("expected {} as text, got {:?}", what, other))),
	}
}
