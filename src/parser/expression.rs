//! Expression grammar, one method per precedence level.
//!
//! |Name|Operators|Associates
//! --|--|--
//! Logical|&& \|\||Left
//! Comparison|< <= > >= == !=|Left
//! Additive|+ -|Left
//! Multiplicative|* / ^|Left
//!
//! ``` BNF
//! expression     → logical ;
//! logical        → comparison ( ( "&&" | "||" ) comparison )* ;
//! comparison     → additive ( ( "<" | "<=" | ">" | ">=" | "==" | "!=" ) additive )* ;
//! additive       → multiplicative ( ( "+" | "-" ) multiplicative )* ;
//! multiplicative → primary ( ( "*" | "/" | "^" ) primary )* ;
//! primary        → "NIL" | "TRUE" | "FALSE" | INTEGER | DECIMAL | CHARACTER | STRING
//!                | "(" expression ")"
//!                | IDENTIFIER ( "(" arguments? ")" | "[" expression "]" )? ;
//! arguments      → expression ( "," expression )* ;
//! ```

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use super::Parser;
use crate::{
	ast::{BinaryOperator, Expression, Literal},
	error::parser::ParseError,
	lexer::{Token, TokenKind},
};

impl<'a> Parser<'a> {
	pub fn parse_expression(&mut self) -> Result<Expression, ParseError> { self.logical() }

	fn logical(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.comparison()?;
		while let Some(operator) = self.match_operator(&["&&", "||"]) {
			expression = Expression::binary(operator, expression, self.comparison()?);
		}
		Ok(expression)
	}

	fn comparison(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.additive()?;
		while let Some(operator) = self.match_operator(&["<", "<=", ">", ">=", "==", "!="]) {
			expression = Expression::binary(operator, expression, self.additive()?);
		}
		Ok(expression)
	}

	fn additive(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.multiplicative()?;
		while let Some(operator) = self.match_operator(&["+", "-"]) {
			expression = Expression::binary(operator, expression, self.multiplicative()?);
		}
		Ok(expression)
	}

	fn multiplicative(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.primary()?;
		while let Some(operator) = self.match_operator(&["*", "/", "^"]) {
			expression = Expression::binary(operator, expression, self.primary()?);
		}
		Ok(expression)
	}

	fn primary(&mut self) -> Result<Expression, ParseError> {
		let Some(token) = self.advance() else { return Err(self.error("Expected expression.")) };
		let literal = match token.kind {
			TokenKind::Integer => Literal::Integer(number::<BigInt>(token)?),
			TokenKind::Decimal => Literal::Decimal(number::<BigDecimal>(token)?),
			TokenKind::Character => {
				let value = unescape(quoted(token.literal)).chars().next();
				Literal::Character(value.ok_or_else(|| ParseError::new("Invalid character literal.", token.offset))?)
			}
			TokenKind::String => Literal::String(unescape(quoted(token.literal))),
			TokenKind::Identifier => match token.literal {
				"NIL" => Literal::Nil,
				"TRUE" => Literal::Boolean(true),
				"FALSE" => Literal::Boolean(false),
				_ if token.is_keyword() => return Err(ParseError::new("Invalid expression.", token.offset)),
				name => return self.named(name),
			},
			TokenKind::Operator if token.is("(") => {
				let expression = self.parse_expression()?;
				self.expect(")", "Expected `)`.")?;
				return Ok(Expression::group(expression));
			}
			TokenKind::Operator => return Err(ParseError::new("Invalid expression.", token.offset)),
		};
		Ok(Expression::literal(literal))
	}

	/// A variable access, a list element access or a function call; the name is already consumed.
	fn named(&mut self, name: &str) -> Result<Expression, ParseError> {
		if self.match_literal("(") {
			let arguments = self.parse_arguments(")", "Expected `)`.")?;
			Ok(Expression::function(name, arguments))
		} else if self.match_literal("[") {
			let offset = self.parse_expression()?;
			self.expect("]", "Expected `]`.")?;
			Ok(Expression::access(name, Some(offset)))
		} else {
			Ok(Expression::access(name, None))
		}
	}

	/// Comma separated expressions up to `closing`; the opening bracket is already consumed.
	pub(super) fn parse_arguments(&mut self, closing: &str, message: &str) -> Result<Vec<Expression>, ParseError> {
		let mut arguments = Vec::new();
		if self.match_literal(closing) {
			return Ok(arguments);
		}
		loop {
			arguments.push(self.parse_expression()?);
			if self.match_literal(closing) {
				return Ok(arguments);
			}
			self.expect(",", message)?;
		}
	}

	/// Consume the next token if it is one of the given binary operators.
	fn match_operator(&mut self, symbols: &[&str]) -> Option<BinaryOperator> {
		let token = self.peek().filter(|token| token.kind == TokenKind::Operator && symbols.contains(&token.literal))?;
		let operator = BinaryOperator::from_symbol(token.literal)?;
		self.current += 1;
		Some(operator)
	}
}

fn number<T: std::str::FromStr>(token: Token<'_>) -> Result<T, ParseError> {
	token.literal.parse().map_err(|_| ParseError::new("Invalid number literal.", token.offset))
}

/// Strip the surrounding quotes of a character or string literal.
fn quoted(literal: &str) -> &str { literal.get(1..literal.len().saturating_sub(1)).unwrap_or_default() }

/// Decode the escapes the lexer has already validated.
fn unescape(text: &str) -> String {
	let mut result = String::with_capacity(text.len());
	let mut chars = text.chars();
	while let Some(c) = chars.next() {
		result.push(match c {
			'\\' => match chars.next() {
				Some('b') => '\u{8}',
				Some('n') => '\n',
				Some('r') => '\r',
				Some('t') => '\t',
				Some(escaped) => escaped,
				None => '\\',
			},
			c => c,
		});
	}
	result
}
