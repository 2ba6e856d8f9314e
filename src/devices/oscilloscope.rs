use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::envelope::Payload;
use crate::error::{Error, Result};
use crate::session::Session;

lazy_static! {
	static ref RANGE_RE: Regex = Regex::new(r"^(\d+(?:\.\d+)?)(m?)Vpp$").unwrap();
}

pub const NUM_CHANNELS:u8 = 4;

fn err(msg:String) -> Error { Error::InvalidArgument(msg) }

pub fn chan_ok(n:u8) -> Result<()> {
	if n == 0 || n > NUM_CHANNELS { Err(err(format!("channel {} out of range, expected 1 to {}", n, NUM_CHANNELS))) }
	else { Ok(()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coupling { AC, DC }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impedance {
	#[serde(rename = "1MOhm")] OneMegaOhm,
	#[serde(rename = "50Ohm")] FiftyOhm,
}

/// Input range written the way the device spells it, e.g. `10Vpp` or `400mVpp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Range {
	label: String,
	volts_pp: f64,
}

impl Range {
	pub fn volts_pp(&self) -> f64 { self.volts_pp }
	pub fn as_str(&self) -> &str { &self.label }
}

impl FromStr for Range {
	type Err = Error;

	fn from_str(s:&str) -> Result<Self> {
		let caps = RANGE_RE.captures(s.trim()).ok_or_else(|| err(format!("'{}' is not a range like 10Vpp or 400mVpp", s)))?;
		let magnitude:f64 = caps[1].parse().map_err(|_| err(format!("bad magnitude in range '{}'", s)))?;
		let scale:f64 = if &caps[2] == "m" { 1e-3 } else { 1.0 };

		Ok(Self{ label: s.trim().to_owned(), volts_pp: magnitude * scale })
	}
}

impl TryFrom<String> for Range {
	type Error = Error;
	fn try_from(s:String) -> Result<Self> { s.parse() }
}

impl From<Range> for String {
	fn from(r:Range) -> String { r.label }
}

impl fmt::Display for Range {
	fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.label) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frontend {
	pub channel: u8,
	pub range: Range,
	pub coupling: Coupling,
	pub impedance: Impedance,
}

impl Frontend {
	pub fn new(channel:u8, range:&str, coupling:Coupling, impedance:Impedance) -> Result<Self> {
		chan_ok(channel)?;
		Ok(Self{ channel, range: range.parse()?, coupling, impedance })
	}
}

/// One acquisition. Channels that are switched off (or don't exist on smaller hardware) are `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Frame {
	pub time: Vec<f64>,
	#[serde(default)] pub ch1: Option<Vec<f64>>,
	#[serde(default)] pub ch2: Option<Vec<f64>>,
	#[serde(default)] pub ch3: Option<Vec<f64>>,
	#[serde(default)] pub ch4: Option<Vec<f64>>,
}

impl Frame {
	pub fn channel(&self, n:u8) -> Option<&[f64]> {
		match n {
			1 => self.ch1.as_deref(),
			2 => self.ch2.as_deref(),
			3 => self.ch3.as_deref(),
			4 => self.ch4.as_deref(),
			_ => None,
		}
	}
}

pub struct Oscilloscope<'a> {
	session: &'a Session,
	slot: Option<u8>,
}

impl<'a> Oscilloscope<'a> {

	pub fn new(session:&'a Session) -> Self { Self{ session, slot: None } }

	/// The oscilloscope deployed in a slot of a multi-instrument configuration.
	pub fn in_slot(session:&'a Session, slot:u8) -> Self { Self{ session, slot: Some(slot) } }

	pub fn endpoint(&self, method:&str) -> String {
		match self.slot {
			Some(n) => format!("slot{}/oscilloscope/{}", n, method),
			None    => format!("oscilloscope/{}", method),
		}
	}

	/// Apply frontend settings. The device echoes back what it actually applied, which may be a subset of
	/// the fields; anything it leaves out is taken from the request. A refused call is an error whatever
	/// the session's failure policy.
	pub fn set_frontend(&self, frontend:&Frontend) -> Result<Frontend> {
		chan_ok(frontend.channel)?;
		let reply = self.session.post(&self.endpoint("set_frontend"), frontend)?;

		// The request can't stand in for what the device applied if it refused the call
		if let Some(failure) = reply.failure {
			return Err(failure.into());
		}

		let mut applied:Value = serde_json::to_value(frontend).map_err(|e| err(e.to_string()))?;
		match reply.payload {
			Payload::Value(Value::Object(echo)) | Payload::Encoded(Value::Object(echo)) => {
				if let Value::Object(fields) = &mut applied {
					fields.extend(echo);
				}
			},
			Payload::Absent => {},
			other => return Err(Error::UnexpectedPayload(format!("set_frontend returned {:?}", other))),
		}

		serde_json::from_value(applied).map_err(|e| Error::UnexpectedPayload(e.to_string()))
	}

	/// Set the span of the time axis relative to the trigger point, in seconds.
	pub fn set_timebase(&self, t1:f64, t2:f64) -> Result<()> {
		if !(t1 < t2) {
			return Err(err(format!("timebase start {} must be before end {}", t1, t2)));
		}

		self.session.post(&self.endpoint("set_timebase"), &json!({ "t1": t1, "t2": t2 }))?;
		Ok(())
	}

	pub fn get_data(&self, wait_reacquire:bool) -> Result<Frame> {
		let reply = self.session.post(&self.endpoint("get_data"), &json!({ "wait_reacquire": wait_reacquire }))?;
		reply.into_payload().decode()
	}

}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn range_parses_volts_and_millivolts() {
		let r:Range = "10Vpp".parse().unwrap();
		assert_eq!(r.volts_pp(), 10.0);
		assert_eq!(r.as_str(), "10Vpp");

		let r:Range = "400mVpp".parse().unwrap();
		assert!((r.volts_pp() - 0.4).abs() < 1e-12);
	}

	#[test]
	fn range_rejects_junk() {
		assert!("10V".parse::<Range>().is_err());
		assert!("ten Vpp".parse::<Range>().is_err());
		assert!("".parse::<Range>().is_err());
	}

	#[test]
	fn frontend_serializes_to_wire_shape() {
		let fe = Frontend::new(1, "10Vpp", Coupling::AC, Impedance::OneMegaOhm).unwrap();
		let v = serde_json::to_value(&fe).unwrap();
		assert_eq!(v, json!({"channel": 1, "range": "10Vpp", "coupling": "AC", "impedance": "1MOhm"}));
	}

	#[test]
	fn frontend_rejects_bad_channel() {
		assert!(Frontend::new(0, "10Vpp", Coupling::DC, Impedance::FiftyOhm).is_err());
		assert!(Frontend::new(5, "10Vpp", Coupling::DC, Impedance::FiftyOhm).is_err());
	}

	#[test]
	fn frame_with_two_channels() {
		let frame:Frame = serde_json::from_value(json!({
			"time": [-0.001, 0.0, 0.001],
			"ch1": [0.1, 0.2, 0.3],
			"ch2": [0.0, 0.0, 0.0]
		})).unwrap();

		assert_eq!(frame.channel(1), Some(&[0.1, 0.2, 0.3][..]));
		assert_eq!(frame.channel(2).map(|c| c.len()), Some(3));
		assert_eq!(frame.channel(3), None);
		assert_eq!(frame.channel(9), None);
	}
}
