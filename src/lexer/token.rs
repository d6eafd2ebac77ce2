/// Words with a grammatical role. They are lexed as ordinary identifiers and
/// recognized by the parser through literal comparison.
pub const KEYWORDS: &[&str] = &[
	"LIST", "VAR", "VAL", "FUN", "DO", "END", "IF", "ELSE", "SWITCH", "CASE", "DEFAULT", "WHILE", "RETURN", "LET",
	"NIL", "TRUE", "FALSE",
];

/// A token produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
	pub kind:    TokenKind,
	/// The exact source text of the token, quotes and escapes included.
	pub literal: &'a str,
	/// Byte offset of the first character of the token.
	pub offset:  usize,
}

impl<'a> Token<'a> {
	pub fn new(kind: TokenKind, literal: &'a str, offset: usize) -> Self { Self { kind, literal, offset } }

	/// Offset one past the end of the token.
	pub fn end(&self) -> usize { self.offset + self.literal.len() }

	pub fn is(&self, literal: &str) -> bool { self.literal == literal }

	pub fn is_keyword(&self) -> bool { self.kind == TokenKind::Identifier && KEYWORDS.contains(&self.literal) }
}

/// The lexical class of a token, the copying is lightweight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
	/// Names and keywords, e.g. `x`, `@count`, `LET`.
	Identifier,
	/// `0`, `42`, `-7`.
	Integer,
	/// `1.5`, `-0.25`.
	Decimal,
	/// `'c'`, `'\n'`.
	Character,
	/// `"hello"`.
	String,
	/// Everything else, one character or one of `!= == && ||`.
	Operator,
}
