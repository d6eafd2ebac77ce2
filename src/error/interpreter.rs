use num_bigint::BigInt;

use crate::{ast::BinaryOperator, error::environment::EnvironmentError};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur during interpretation
pub enum RuntimeError {
	/// Name resolution failed, only reachable when analysis was skipped
	#[error(transparent)]
	Environment(#[from] EnvironmentError),
	/// Write to a binding declared immutable
	#[error("Cannot assign to immutable variable `{0}`.")]
	ImmutableAssignment(String),
	/// List element access outside `0..length`
	#[error("Index {index} is out of range for a list of length {length}.")]
	IndexOutOfRange { index: BigInt, length: usize },
	/// Integer or decimal division by zero
	#[error("Cannot divide by zero.")]
	DivisionByZero,
	/// A value of the wrong runtime type
	#[error("Expected type {expected}, received {received}.")]
	TypeMismatch { expected: &'static str, received: &'static str },
	/// Operand types the operator does not accept
	#[error("Invalid binary operation: {left} {operator} {right}")]
	InvalidOperands { operator: BinaryOperator, left: &'static str, right: &'static str },
	/// An integer that does not fit the native width an operation needs
	#[error("Integer {0} does not fit in 32 bits.")]
	Narrowing(BigInt),
	/// Assignment to something other than a variable or list element
	#[error("Assignment receiver must be a variable or a list element.")]
	InvalidReceiver,
	/// The output sink of `print` failed
	#[error("Failed write output: {0}")]
	Output(#[from] std::io::Error),
}
