//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. The body of a `WHILE` loop is always a block of statements.

use std::fmt::Display;

use crate::{ast::expression::Expression, environment::Variable, types::Type};

/// A statement in the programming language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
	/// An expression used as a statement, e.g. `print(x);`.
	Expression(Expression),
	/// `LET name (: Type)? (= value)?;`
	Declaration {
		name:      String,
		type_name: Option<String>,
		value:     Option<Expression>,
		/// Binding resolved by the analyzer.
		variable:  Option<Variable<Type>>,
	},
	/// `receiver = value;`, the receiver is always an `Expression::Access`.
	Assignment { receiver: Expression, value: Expression },
	If {
		condition:       Expression,
		then_statements: Vec<Statement>,
		else_statements: Vec<Statement>,
	},
	Switch { condition: Expression, cases: Vec<Case> },
	While { condition: Expression, statements: Vec<Statement> },
	Return(Expression),
}

/// One arm of a `SWITCH`. Only the trailing `DEFAULT` arm has no value.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
	pub value:      Option<Expression>,
	pub statements: Vec<Statement>,
}

impl Statement {
	pub fn declaration(name: impl Into<String>, type_name: Option<String>, value: Option<Expression>) -> Self {
		Statement::Declaration { name: name.into(), type_name, value, variable: None }
	}
}

impl Case {
	pub fn new(value: Option<Expression>, statements: Vec<Statement>) -> Self { Self { value, statements } }
}

impl Display for Statement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Statement::Expression(expression) => write!(f, "{expression};"),
			Statement::Declaration { name, type_name, value, .. } => {
				write!(f, "LET {name}")?;
				if let Some(type_name) = type_name {
					write!(f, ": {type_name}")?;
				}
				if let Some(value) = value {
					write!(f, " = {value}")?;
				}
				write!(f, ";")
			}
			Statement::Assignment { receiver, value } => write!(f, "{receiver} = {value};"),
			Statement::If { condition, then_statements, else_statements } => {
				write!(f, "IF {condition} DO{}", Block(then_statements))?;
				if !else_statements.is_empty() {
					write!(f, " ELSE{}", Block(else_statements))?;
				}
				write!(f, " END")
			}
			Statement::Switch { condition, cases } => {
				write!(f, "SWITCH {condition}")?;
				for case in cases {
					write!(f, " {case}")?;
				}
				write!(f, " END")
			}
			Statement::While { condition, statements } => write!(f, "WHILE {condition} DO{} END", Block(statements)),
			Statement::Return(value) => write!(f, "RETURN {value};"),
		}
	}
}

impl Display for Case {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.value {
			Some(value) => write!(f, "CASE {value}:{}", Block(&self.statements)),
			None => write!(f, "DEFAULT{}", Block(&self.statements)),
		}
	}
}

/// Statements separated by single spaces, each preceded by one.
pub(crate) struct Block<'a>(pub &'a [Statement]);

impl Display for Block<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for statement in self.0 {
			write!(f, " {statement}")?;
		}
		Ok(())
	}
}
