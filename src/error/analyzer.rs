use std::fmt::Display;

use crate::{ast::BinaryOperator, error::environment::EnvironmentError, types::Type};

/// Errors that reject a program during static analysis
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TypeError {
	#[error("A main/0 function returning Integer is required.")]
	MissingMain,
	#[error("Unknown type `{0}`.")]
	UnknownType(String),
	#[error("Expected type {expected}, received {received}.")]
	Mismatch { expected: Type, received: Type },
	#[error("Declaration of `{0}` needs a type or an initial value.")]
	MissingTypeOrValue(String),
	#[error("Integer literal {0} does not fit in 32 bits.")]
	IntegerOutOfRange(String),
	#[error("Decimal literal {0} does not fit in a 64-bit float.")]
	DecimalOutOfRange(String),
	#[error("`{0}` is not a list.")]
	NotAList(String),
	#[error("Cannot infer the element type of an empty list.")]
	EmptyList,
	#[error("IF statement requires at least one statement in its DO block.")]
	EmptyThenBlock,
	#[error("The final case must be the DEFAULT case with no value.")]
	FinalCaseNotDefault,
	#[error("Only the final case may omit its value.")]
	DefaultNotLast,
	#[error("Cannot assign to immutable variable `{0}`.")]
	ImmutableAssignment(String),
	#[error("Assignment receiver must be a variable or a list element.")]
	InvalidReceiver,
	#[error("Invalid operands for `{operator}`: {left} and {right}.")]
	InvalidOperands { operator: BinaryOperator, left: Type, right: Type },
	#[error("Function returns {expected}, but RETURN gives {received}.")]
	ReturnMismatch { expected: Type, received: Type },
	#[error("{error} In `{node}`.")]
	Located { node: String, error: Box<TypeError> },
	#[error(transparent)]
	Environment(#[from] EnvironmentError),
}

impl TypeError {
	/// Attach the rendered `node` to a type mismatch, unless an inner node already claimed it.
	pub fn within(self, node: impl Display) -> Self {
		match self {
			TypeError::Mismatch { .. } | TypeError::InvalidOperands { .. } | TypeError::ReturnMismatch { .. } => {
				TypeError::Located { node: node.to_string(), error: Box::new(self) }
			}
			error => error,
		}
	}
}
