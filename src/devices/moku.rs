use crate::error::Result;
use crate::session::Session;

use super::text_of;

pub const NAME:&str          = "moku/name";
pub const SERIAL_NUMBER:&str = "moku/serial_number";

pub struct Moku<'a> {
	session: &'a Session,
}

impl<'a> Moku<'a> {

	pub fn new(session:&'a Session) -> Self { Self{ session } }

	pub fn name(&self) -> Result<String> {
		text_of(self.session.get(NAME)?.into_payload(), "name")
	}

	pub fn serial_number(&self) -> Result<String> {
		text_of(self.session.get(SERIAL_NUMBER)?.into_payload(), "serial number")
	}

}
