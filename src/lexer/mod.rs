//! Converts source text into tokens.
//!
//! The lexer only classifies runs of characters: keywords are plain
//! identifiers here and the parser tells them apart by comparing literals.
//! Literal values keep their source text (quotes and escapes included), the
//! parser decodes them when it builds the AST.
//!
//! The rules that determine how characters group into lexemes:
//!
//! ``` BNF
//! identifier ::= [A-Za-z@] [A-Za-z0-9_-]*
//! number     ::= '-'? ('0' | [1-9] [0-9]*) ('.' [0-9]+)?
//! character  ::= ['] ([^'\\] | escape) [']
//! string     ::= '"' ([^"\\] | escape)* '"'
//! escape     ::= '\' [bnrt'"\\]
//! operator   ::= '!=' | '==' | '&&' | '||' | any other single character
//! whitespace ::= [ \b\n\r\t\\]
//! ```
//!
//! Every match is maximal munch: `1.4.7` is `1.4`, `.`, `7`.
mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenKind::*;
use log::trace;
pub use token::*;

use crate::error::lexer::{LexError, LexErrorType};

/// A lexer for source code
pub struct Lexer<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points one past the last consumed character
	cursor:      usize,
}

impl<'a> Lexer<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0 }
	}

	/// Lex all tokens from the source code, stopping at the first malformed one
	pub fn lex(mut self) -> Result<Vec<Token<'a>>, LexError> {
		let mut tokens = Vec::new();
		loop {
			self.skip_whitespace();
			let Some(&(index, _)) = self.source_iter.peek() else { break };
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = index;
			tokens.push(self.lex_token()?);
		}
		trace!("Lexed {} tokens: {tokens:?}", tokens.len());
		Ok(tokens)
	}

	/// Lex a single token starting at the current character
	fn lex_token(&mut self) -> Result<Token<'a>, LexError> {
		let kind = match self.peek() {
			Some(c) if c == '@' || c.is_ascii_alphabetic() => self.identifier(),
			Some(c) if c.is_ascii_digit() => self.number()?,
			Some('-') if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => self.number()?,
			Some('\'') => self.character()?,
			Some('"') => self.string()?,
			_ => self.operator(),
		};
		Ok(Token::new(kind, &self.source[self.start..self.cursor], self.start))
	}

	/// Skip spaces, tabs, line breaks, backspaces and stray backslashes
	fn skip_whitespace(&mut self) {
		while self.peek().is_some_and(|c| matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{8}' | '\\')) {
			self.advance();
		}
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}

	/// Offset of the current character, or the source length at the end
	fn position(&mut self) -> usize { self.source_iter.peek().map_or(self.source.len(), |&(i, _)| i) }

	/// Lex an identifier or keyword
	fn identifier(&mut self) -> TokenKind {
		self.advance();
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
			self.advance();
		}
		Identifier
	}

	/// Lex an integer or decimal literal
	fn number(&mut self) -> Result<TokenKind, LexError> {
		self.match_next('-');
		if self.match_next('0') {
			if self.peek().is_some_and(|c| c.is_ascii_digit()) {
				return Err(LexError::new(self.position(), LexErrorType::LeadingZero));
			}
		} else {
			while self.peek().is_some_and(|c| c.is_ascii_digit()) {
				self.advance();
			}
		}

		// Look for a fractional part.
		if self.peek() != Some('.') {
			return Ok(Integer);
		}
		self.advance(); // consume '.'
		if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
			return Err(LexError::new(self.position(), LexErrorType::TrailingDecimalPoint));
		}
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}
		Ok(Decimal)
	}

	/// Lex a character literal holding exactly one character or escape
	fn character(&mut self) -> Result<TokenKind, LexError> {
		self.advance(); // The opening '
		let offset = self.position();
		match self.advance() {
			Some('\'') => return Err(LexError::new(offset, LexErrorType::EmptyCharacter)),
			Some('\\') => self.escape()?,
			Some('\n' | '\r') | None => return Err(LexError::new(offset, LexErrorType::UnterminatedCharacter)),
			Some(_) => {}
		}
		let offset = self.position();
		if self.match_next('\'') {
			Ok(Character)
		} else {
			Err(LexError::new(offset, LexErrorType::UnterminatedCharacter))
		}
	}

	/// Lex a string literal
	fn string(&mut self) -> Result<TokenKind, LexError> {
		self.advance(); // The opening "
		loop {
			let offset = self.position();
			match self.advance() {
				Some('"') => return Ok(String),
				Some('\\') => self.escape()?,
				Some(_) => {}
				None => return Err(LexError::new(offset, LexErrorType::UnterminatedString)),
			}
		}
	}

	/// Validate the character after a consumed backslash
	fn escape(&mut self) -> Result<(), LexError> {
		let offset = self.position();
		match self.advance() {
			Some('b' | 'n' | 'r' | 't' | '\'' | '"' | '\\') => Ok(()),
			_ => Err(LexError::new(offset, LexErrorType::InvalidEscape)),
		}
	}

	/// Lex an operator, preferring the doubled forms
	fn operator(&mut self) -> TokenKind {
		match self.advance() {
			Some('!' | '=') => self.match_next('='),
			Some('&') => self.match_next('&'),
			Some('|') => self.match_next('|'),
			_ => false,
		};
		Operator
	}
}
