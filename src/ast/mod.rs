//! The abstract syntax tree.
//!
//! ``` markdown
//! Source
//! ├── Global (LIST | VAR | VAL)*
//! └── Function (FUN)*
//!     └── Statement*
//!         └── Expression*
//! ```
//!
//! Nodes own their children. The only slots that change after parsing are the
//! resolved type and binding slots, which the analyzer fills in.

pub mod expression;
pub mod statement;

use std::fmt::Display;

pub use expression::{BinaryOperator, Expression, Literal};
pub use statement::{Case, Statement};

use crate::{ast::{expression::join, statement::Block}, environment::Variable, types::{Signature, Type}};

/// A whole program: every global precedes every function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Source {
	pub globals:   Vec<Global>,
	pub functions: Vec<Function>,
}

/// A `LIST`, `VAR` or `VAL` declaration at the top of a program.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
	pub name:      String,
	pub type_name: Option<String>,
	pub mutable:   bool,
	pub value:     Option<Expression>,
	/// Binding resolved by the analyzer.
	pub variable:  Option<Variable<Type>>,
}

/// `FUN name(parameter: Type, ...): ReturnType DO statements END`
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
	pub name:                 String,
	pub parameters:           Vec<String>,
	pub parameter_type_names: Vec<String>,
	pub return_type_name:     Option<String>,
	pub statements:           Vec<Statement>,
	/// Signature resolved by the analyzer.
	pub function:             Option<Signature>,
}

impl Source {
	pub fn new(globals: Vec<Global>, functions: Vec<Function>) -> Self { Self { globals, functions } }
}

impl Global {
	pub fn new(name: impl Into<String>, type_name: Option<String>, mutable: bool, value: Option<Expression>) -> Self {
		Self { name: name.into(), type_name, mutable, value, variable: None }
	}

	fn keyword(&self) -> &'static str {
		match (&self.value, self.mutable) {
			(Some(Expression::List { .. }), _) => "LIST",
			(_, true) => "VAR",
			(_, false) => "VAL",
		}
	}
}

impl Function {
	pub fn new(
		name: impl Into<String>,
		parameters: Vec<(String, String)>,
		return_type_name: Option<String>,
		statements: Vec<Statement>,
	) -> Self {
		let (parameters, parameter_type_names) = parameters.into_iter().unzip();
		Self { name: name.into(), parameters, parameter_type_names, return_type_name, statements, function: None }
	}

	/// Whether this is the program entry point `main(): Integer`.
	pub fn is_main(&self) -> bool {
		self.name == "main" && self.parameters.is_empty() && self.return_type_name.as_deref() == Some("Integer")
	}
}

impl Display for Source {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for global in &self.globals {
			writeln!(f, "{global}")?;
		}
		for function in &self.functions {
			writeln!(f, "{function}")?;
		}
		Ok(())
	}
}

impl Display for Global {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.keyword(), self.name)?;
		if let Some(type_name) = &self.type_name {
			write!(f, ": {type_name}")?;
		}
		if let Some(value) = &self.value {
			write!(f, " = {value}")?;
		}
		write!(f, ";")
	}
}

impl Display for Function {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let parameters: Vec<_> = self
			.parameters
			.iter()
			.zip(&self.parameter_type_names)
			.map(|(name, type_name)| format!("{name}: {type_name}"))
			.collect();
		write!(f, "FUN {}({})", self.name, join(&parameters))?;
		if let Some(return_type_name) = &self.return_type_name {
			write!(f, ": {return_type_name}")?;
		}
		write!(f, " DO{} END", Block(&self.statements))
	}
}
