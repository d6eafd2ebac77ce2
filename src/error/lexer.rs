/// A malformed token, reported at the offset of the offending character.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("offset {offset}: {type}")]
pub struct LexError {
	/// Byte offset of the character that cannot start or continue a token.
	pub offset: usize,
	/// The kind of lexing error.
	pub r#type: LexErrorType,
}

impl LexError {
	pub fn new(offset: usize, r#type: LexErrorType) -> Self { Self { offset, r#type } }
}

/// Kinds of lexing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorType {
	/// `0` followed directly by another digit, e.g. `01`.
	LeadingZero,
	/// A `.` that is not followed by a digit, e.g. `1.`.
	TrailingDecimalPoint,
	/// A `\` followed by anything other than `b n r t ' " \`.
	InvalidEscape,
	/// `''`.
	EmptyCharacter,
	/// A character literal missing its closing `'` or holding more than one character.
	UnterminatedCharacter,
	/// A string literal missing its closing `"`.
	UnterminatedString,
}

impl std::fmt::Display for LexErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use LexErrorType::*;
		match self {
			LeadingZero => write!(f, "Leading zero in integer literal"),
			TrailingDecimalPoint => write!(f, "Expected digit after decimal point"),
			InvalidEscape => write!(f, "Invalid escape sequence"),
			EmptyCharacter => write!(f, "Empty character literal"),
			UnterminatedCharacter => write!(f, "Unterminated character literal"),
			UnterminatedString => write!(f, "Unterminated string"),
		}
	}
}
