//! Expression AST nodes
//!
//! An `Expression` is a tree structure representing code like `-123 *
//! (45.67)` as nested nodes. Every node carries a `ty` slot the analyzer fills
//! with the node's static type.

use std::fmt::{Display, Write};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{environment::Variable, types::{Signature, Type}};

/// Expression AST nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
	Literal {
		literal: Literal,
		ty:      Option<Type>,
	},
	Group {
		expression: Box<Expression>,
		ty:         Option<Type>,
	},
	Binary {
		operator: BinaryOperator,
		left:     Box<Expression>,
		right:    Box<Expression>,
		ty:       Option<Type>,
	},
	/// `name` or `name[offset]`.
	Access {
		name:     String,
		offset:   Option<Box<Expression>>,
		variable: Option<Variable<Type>>,
		ty:       Option<Type>,
	},
	/// `name(arguments...)`.
	Function {
		name:      String,
		arguments: Vec<Expression>,
		function:  Option<Signature>,
		ty:        Option<Type>,
	},
	/// `[values...]`, only valid as the initializer of a `LIST` global.
	List {
		values: Vec<Expression>,
		ty:     Option<Type>,
	},
}

impl Expression {
	pub fn literal(literal: Literal) -> Self { Expression::Literal { literal, ty: None } }

	pub fn group(expression: Self) -> Self { Expression::Group { expression: Box::new(expression), ty: None } }

	pub fn binary(operator: BinaryOperator, left: Self, right: Self) -> Self {
		Expression::Binary { operator, left: Box::new(left), right: Box::new(right), ty: None }
	}

	pub fn access(name: impl Into<String>, offset: Option<Self>) -> Self {
		Expression::Access { name: name.into(), offset: offset.map(Box::new), variable: None, ty: None }
	}

	pub fn function(name: impl Into<String>, arguments: Vec<Self>) -> Self {
		Expression::Function { name: name.into(), arguments, function: None, ty: None }
	}

	pub fn list(values: Vec<Self>) -> Self { Expression::List { values, ty: None } }

	/// The static type resolved by the analyzer, `None` before analysis.
	pub fn ty(&self) -> Option<&Type> {
		match self {
			Expression::Literal { ty, .. }
			| Expression::Group { ty, .. }
			| Expression::Binary { ty, .. }
			| Expression::Access { ty, .. }
			| Expression::Function { ty, .. }
			| Expression::List { ty, .. } => ty.as_ref(),
		}
	}
}

/// Literal values in the AST
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Nil,
	Boolean(bool),
	Character(char),
	String(String),
	Integer(BigInt),
	Decimal(BigDecimal),
}

/// Binary operators, from lowest to highest binding power
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
	And,
	Or,
	Less,
	LessEqual,
	Greater,
	GreaterEqual,
	Equal,
	NotEqual,
	Add,
	Subtract,
	Multiply,
	Divide,
	Power,
}

impl BinaryOperator {
	pub fn from_symbol(symbol: &str) -> Option<Self> {
		use BinaryOperator::*;

		Some(match symbol {
			"&&" => And,
			"||" => Or,
			"<" => Less,
			"<=" => LessEqual,
			">" => Greater,
			">=" => GreaterEqual,
			"==" => Equal,
			"!=" => NotEqual,
			"+" => Add,
			"-" => Subtract,
			"*" => Multiply,
			"/" => Divide,
			"^" => Power,
			_ => return None,
		})
	}

	pub fn symbol(&self) -> &'static str {
		use BinaryOperator::*;

		match self {
			And => "&&",
			Or => "||",
			Less => "<",
			LessEqual => "<=",
			Greater => ">",
			GreaterEqual => ">=",
			Equal => "==",
			NotEqual => "!=",
			Add => "+",
			Subtract => "-",
			Multiply => "*",
			Divide => "/",
			Power => "^",
		}
	}
}

impl Display for BinaryOperator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.symbol()) }
}

/// Renders the expression back into source text that lexes and parses to an
/// equal node.
impl Display for Expression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Expression::Literal { literal, .. } => write!(f, "{literal}"),
			Expression::Group { expression, .. } => write!(f, "({expression})"),
			Expression::Binary { operator, left, right, .. } => write!(f, "{left} {operator} {right}"),
			Expression::Access { name, offset: None, .. } => write!(f, "{name}"),
			Expression::Access { name, offset: Some(offset), .. } => write!(f, "{name}[{offset}]"),
			Expression::Function { name, arguments, .. } => write!(f, "{name}({})", join(arguments)),
			Expression::List { values, .. } => write!(f, "[{}]", join(values)),
		}
	}
}

impl Display for Literal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal::Nil => write!(f, "NIL"),
			Literal::Boolean(true) => write!(f, "TRUE"),
			Literal::Boolean(false) => write!(f, "FALSE"),
			Literal::Character(c) => {
				f.write_char('\'')?;
				write_escaped(f, *c)?;
				f.write_char('\'')
			}
			Literal::String(s) => {
				f.write_char('"')?;
				for c in s.chars() {
					write_escaped(f, c)?;
				}
				f.write_char('"')
			}
			Literal::Integer(n) => write!(f, "{n}"),
			Literal::Decimal(n) => f.write_str(&n.to_plain_string()),
		}
	}
}

fn write_escaped(f: &mut std::fmt::Formatter<'_>, c: char) -> std::fmt::Result {
	match c {
		'\u{8}' => f.write_str("\\b"),
		'\n' => f.write_str("\\n"),
		'\r' => f.write_str("\\r"),
		'\t' => f.write_str("\\t"),
		'\'' => f.write_str("\\'"),
		'"' => f.write_str("\\\""),
		'\\' => f.write_str("\\\\"),
		c => f.write_char(c),
	}
}

pub(crate) fn join<T: Display>(items: &[T]) -> String {
	items.iter().map(|item| item.to_string()).collect::<Vec<_>>().join(", ")
}
