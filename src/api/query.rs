use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::FetchError;

/// Bytes left alone by `encodeURIComponent`; everything else is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Percent-encodes a single query value.
pub fn encode_component(value: &str) -> String {
	utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// The two selected endpoints of a path lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathQuery {
	from: String,
	to: String,
}

impl PathQuery {
	/// Fails fast when either selection is empty.
	pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self, FetchError> {
		let (from, to) = (from.into(), to.into());
		if from.is_empty() {
			return Err(FetchError::EmptySelection("from"));
		}
		if to.is_empty() {
			return Err(FetchError::EmptySelection("to"));
		}
		Ok(Self { from, to })
	}

	pub fn from(&self) -> &str {
		&self.from
	}

	pub fn to(&self) -> &str {
		&self.to
	}

	/// `<path>?from=<from>&to=<to>` with both values encoded.
	pub fn address(&self, path: &str) -> String {
		format!(
			"{path}?from={}&to={}",
			encode_component(&self.from),
			encode_component(&self.to)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn plain_values_pass_through() {
		let query = PathQuery::new("Astronomy", "Star").unwrap();
		assert_eq!(query.address("/path"), "/path?from=Astronomy&to=Star");
	}

	#[test]
	fn reserved_characters_are_escaped() {
		let query = PathQuery::new("a b&c", "x=y?z/w").unwrap();
		assert_eq!(
			query.address("/path"),
			"/path?from=a%20b%26c&to=x%3Dy%3Fz%2Fw"
		);
	}

	#[test]
	fn unreserved_marks_match_encode_uri_component() {
		assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
		assert_eq!(encode_component("#+,;:@$"), "%23%2B%2C%3B%3A%40%24");
	}

	#[test]
	fn non_ascii_is_utf8_encoded() {
		assert_eq!(encode_component("Café"), "Caf%C3%A9");
		assert_eq!(encode_component("/wiki/Ångström"), "%2Fwiki%2F%C3%85ngstr%C3%B6m");
	}

	#[test]
	fn empty_selection_fails_fast() {
		assert_eq!(PathQuery::new("", "b"), Err(FetchError::EmptySelection("from")));
		assert_eq!(PathQuery::new("a", ""), Err(FetchError::EmptySelection("to")));
	}
}
