/// A grammar violation at the offending token, or one past the last token if
/// the input ran out.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("offset {offset}: {message}")]
pub struct ParseError {
	pub message: String,
	pub offset:  usize,
}

impl ParseError {
	pub fn new(message: impl Into<String>, offset: usize) -> Self { Self { message: message.into(), offset } }
}
