//! The `Lexer` groups characters into tokens, the `Parser` groups tokens into
//! the AST.
//!
//! Keywords reach the parser as plain identifiers, so every rule that needs
//! one compares literals. Parsing stops at the first violation: a failed rule
//! returns a `ParseError` pointing at the offending token, or one past the last
//! token when the input ran out, and no partial tree is returned.
//!
//! Program grammar:
//!
//! ``` BNF
//! source      → global* function* ;
//! global      → list | mutable | immutable ;
//! list        → "LIST" IDENTIFIER ( ":" IDENTIFIER )? "=" "[" ( expression ( "," expression )* )? "]" ";" ;
//! mutable     → "VAR" IDENTIFIER ( ":" IDENTIFIER )? ( "=" expression )? ";" ;
//! immutable   → "VAL" IDENTIFIER ( ":" IDENTIFIER )? "=" expression ";" ;
//! function    → "FUN" IDENTIFIER "(" ( IDENTIFIER ":" IDENTIFIER ( "," IDENTIFIER ":" IDENTIFIER )* )? ")"
//!               ( ":" IDENTIFIER )? "DO" block "END" ;
//! block       → statement* ;
//! statement   → "LET" IDENTIFIER ( ":" IDENTIFIER )? ( "=" expression )? ";"
//!             | "IF" expression "DO" block ( "ELSE" block )? "END"
//!             | "SWITCH" expression ( "CASE" expression ":" block )* "DEFAULT" block "END"
//!             | "WHILE" expression "DO" block "END"
//!             | "RETURN" expression ";"
//!             | expression ( "=" expression )? ";" ;
//! ```
//!
//! The expression grammar lives in `expression.rs`.

mod expression;

use log::trace;

use crate::{
	ast::{Case, Expression, Function, Global, Source, Statement},
	error::parser::ParseError,
	lexer::{Token, TokenKind},
};

/// Keywords that close a block; the rule that opened the block consumes them.
const BLOCK_TERMINATORS: &[&str] = &["END", "ELSE", "CASE", "DEFAULT"];

/// A recursive descent parser over a lexed token sequence
pub struct Parser<'a> {
	tokens:  Vec<Token<'a>>,
	/// Index of the next token to consume
	current: usize,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token<'a>>) -> Self { Self { tokens, current: 0 } }

	/// Parse a whole program, every global before every function.
	pub fn parse_source(&mut self) -> Result<Source, ParseError> {
		let mut source = Source::default();
		while let Some(&token) = self.peek() {
			if token.is("FUN") {
				source.functions.push(self.parse_function()?);
			} else if matches!(token.literal, "LIST" | "VAR" | "VAL") {
				if !source.functions.is_empty() {
					return Err(ParseError::new("Globals cannot come after functions.", token.offset));
				}
				source.globals.push(self.parse_global()?);
			} else {
				return Err(ParseError::new("Expected global or function declaration.", token.offset));
			}
		}
		trace!("Parsed source:\n{source}");
		Ok(source)
	}

	/// Parse a `LIST`, `VAR` or `VAL` declaration.
	pub fn parse_global(&mut self) -> Result<Global, ParseError> {
		if self.match_literal("LIST") {
			self.parse_list()
		} else if self.match_literal("VAR") {
			self.parse_mutable()
		} else if self.match_literal("VAL") {
			self.parse_immutable()
		} else {
			Err(self.error("Expected LIST, VAR or VAL."))
		}
	}

	/// `LIST` already consumed.
	fn parse_list(&mut self) -> Result<Global, ParseError> {
		let name = self.expect_identifier("Expected list name.")?;
		let type_name = self.parse_type_annotation()?;
		self.expect("=", "Expected `=` after list name.")?;
		self.expect("[", "Expected `[`.")?;
		let values = self.parse_arguments("]", "Expected `]`.")?;
		self.expect(";", "Expected `;`.")?;
		Ok(Global::new(name, type_name, true, Some(Expression::list(values))))
	}

	/// `VAR` already consumed.
	fn parse_mutable(&mut self) -> Result<Global, ParseError> {
		let name = self.expect_identifier("Expected variable name.")?;
		let type_name = self.parse_type_annotation()?;
		let value = if self.match_literal("=") { Some(self.parse_expression()?) } else { None };
		self.expect(";", "Expected `;`.")?;
		Ok(Global::new(name, type_name, true, value))
	}

	/// `VAL` already consumed.
	fn parse_immutable(&mut self) -> Result<Global, ParseError> {
		let name = self.expect_identifier("Expected value name.")?;
		let type_name = self.parse_type_annotation()?;
		self.expect("=", "Expected `=`, a VAL must be initialized.")?;
		let value = self.parse_expression()?;
		self.expect(";", "Expected `;`.")?;
		Ok(Global::new(name, type_name, false, Some(value)))
	}

	/// Parse a `FUN` declaration.
	pub fn parse_function(&mut self) -> Result<Function, ParseError> {
		self.expect("FUN", "Expected FUN.")?;
		let name = self.expect_identifier("Expected function name.")?;
		self.expect("(", "Expected `(`.")?;
		let mut parameters = Vec::new();
		if !self.match_literal(")") {
			loop {
				let parameter = self.expect_identifier("Expected parameter name.")?;
				self.expect(":", "Expected `:` after parameter name.")?;
				let type_name = self.expect_identifier("Expected parameter type.")?;
				parameters.push((parameter, type_name));
				if self.match_literal(")") {
					break;
				}
				self.expect(",", "Expected `,` or `)`.")?;
			}
		}
		let return_type_name = self.parse_type_annotation()?;
		self.expect("DO", "Expected function DO.")?;
		let statements = self.parse_block()?;
		self.expect("END", "Expected function END.")?;
		Ok(Function::new(name, parameters, return_type_name, statements))
	}

	/// Parse statements up to the next block terminator or the end of input.
	pub fn parse_block(&mut self) -> Result<Vec<Statement>, ParseError> {
		let mut statements = Vec::new();
		while self.peek().is_some_and(|token| !BLOCK_TERMINATORS.contains(&token.literal)) {
			statements.push(self.parse_statement()?);
		}
		Ok(statements)
	}

	pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
		if self.match_literal("LET") {
			self.parse_declaration()
		} else if self.match_literal("IF") {
			self.parse_if()
		} else if self.match_literal("SWITCH") {
			self.parse_switch()
		} else if self.match_literal("WHILE") {
			self.parse_while()
		} else if self.match_literal("RETURN") {
			self.parse_return()
		} else {
			self.parse_expression_statement()
		}
	}

	/// `LET` already consumed.
	fn parse_declaration(&mut self) -> Result<Statement, ParseError> {
		let name = self.expect_identifier("Expected variable name.")?;
		let type_name = self.parse_type_annotation()?;
		let value = if self.match_literal("=") { Some(self.parse_expression()?) } else { None };
		self.expect(";", "Expected `;`.")?;
		Ok(Statement::declaration(name, type_name, value))
	}

	/// `IF` already consumed.
	fn parse_if(&mut self) -> Result<Statement, ParseError> {
		let condition = self.parse_expression()?;
		self.expect("DO", "Expected if DO.")?;
		let then_statements = self.parse_block()?;
		let else_statements = if self.match_literal("ELSE") {
			let statements = self.parse_block()?;
			self.expect("END", "Expected if else END.")?;
			statements
		} else {
			self.expect("END", "Expected if END.")?;
			Vec::new()
		};
		Ok(Statement::If { condition, then_statements, else_statements })
	}

	/// `SWITCH` already consumed.
	fn parse_switch(&mut self) -> Result<Statement, ParseError> {
		let condition = self.parse_expression()?;
		let mut cases = Vec::new();
		while self.match_literal("CASE") {
			let value = self.parse_expression()?;
			self.expect(":", "Expected case `:`.")?;
			cases.push(Case::new(Some(value), self.parse_block()?));
		}
		self.expect("DEFAULT", "Expected switch DEFAULT.")?;
		cases.push(Case::new(None, self.parse_block()?));
		self.expect("END", "Expected switch END.")?;
		Ok(Statement::Switch { condition, cases })
	}

	/// `WHILE` already consumed.
	fn parse_while(&mut self) -> Result<Statement, ParseError> {
		let condition = self.parse_expression()?;
		self.expect("DO", "Expected while DO.")?;
		let statements = self.parse_block()?;
		self.expect("END", "Expected while END.")?;
		Ok(Statement::While { condition, statements })
	}

	/// `RETURN` already consumed.
	fn parse_return(&mut self) -> Result<Statement, ParseError> {
		let value = self.parse_expression()?;
		self.expect(";", "Expected `;`.")?;
		Ok(Statement::Return(value))
	}

	/// An expression statement, or an assignment if the expression is followed by `=`.
	fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
		let start = self.error_offset();
		let expression = self.parse_expression()?;
		if self.match_literal("=") {
			if !matches!(expression, Expression::Access { .. }) {
				return Err(ParseError::new("Invalid assignment receiver.", start));
			}
			let value = self.parse_expression()?;
			self.expect(";", "Expected `;`.")?;
			return Ok(Statement::Assignment { receiver: expression, value });
		}
		self.expect(";", "Expected `;`.")?;
		Ok(Statement::Expression(expression))
	}

	/// An optional `: Type` annotation.
	fn parse_type_annotation(&mut self) -> Result<Option<String>, ParseError> {
		if self.match_literal(":") { Ok(Some(self.expect_identifier("Expected type name.")?)) } else { Ok(None) }
	}

	/// Peek the next token without consuming it.
	fn peek(&self) -> Option<&Token<'a>> { self.tokens.get(self.current) }

	fn peek_literal(&self, literal: &str) -> bool { self.peek().is_some_and(|token| token.is(literal)) }

	/// Consume the next token.
	fn advance(&mut self) -> Option<Token<'a>> {
		let token = self.tokens.get(self.current).copied();
		if token.is_some() {
			self.current += 1;
		}
		token
	}

	/// Consume the next token if its literal is the expected one.
	fn match_literal(&mut self, literal: &str) -> bool { self.peek_literal(literal) && self.advance().is_some() }

	fn expect(&mut self, literal: &str, message: &str) -> Result<Token<'a>, ParseError> {
		if !self.peek_literal(literal) {
			return Err(self.error(message));
		}
		self.advance().ok_or_else(|| self.error(message))
	}

	/// Consume a name: an identifier that is not a keyword.
	fn expect_identifier(&mut self, message: &str) -> Result<String, ParseError> {
		match self.peek() {
			Some(token) if token.kind == TokenKind::Identifier && !token.is_keyword() => {
				let name = token.literal.to_string();
				self.current += 1;
				Ok(name)
			}
			_ => Err(self.error(message)),
		}
	}

	/// Offset of the next token, or one past the last token at the end of input.
	fn error_offset(&self) -> usize {
		match self.peek() {
			Some(token) => token.offset,
			None => self.tokens.last().map_or(0, Token::end),
		}
	}

	fn error(&self, message: &str) -> ParseError { ParseError::new(message, self.error_offset()) }
}
