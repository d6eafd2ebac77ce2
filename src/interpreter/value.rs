use std::{cmp::Ordering, fmt::Display};

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::{
	ast::{BinaryOperator, Literal, expression::join},
	error::interpreter::RuntimeError,
};

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Nil,
	Boolean(bool),
	Integer(BigInt),
	Decimal(BigDecimal),
	Character(char),
	String(String),
	/// A `LIST` global, elements are replaced in place but never added or removed.
	List(Vec<Value>),
}

/// The textual form `print` writes and `+` concatenates.
impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Nil => write!(f, "NIL"),
			Value::Boolean(b) => write!(f, "{b}"),
			Value::Integer(n) => write!(f, "{n}"),
			Value::Decimal(n) => f.write_str(&n.to_plain_string()),
			Value::Character(c) => write!(f, "{c}"),
			Value::String(s) => f.write_str(s),
			Value::List(values) => write!(f, "[{}]", join(values)),
		}
	}
}

impl From<&Literal> for Value {
	fn from(literal: &Literal) -> Self {
		match literal {
			Literal::Nil => Value::Nil,
			Literal::Boolean(b) => Value::Boolean(*b),
			Literal::Character(c) => Value::Character(*c),
			Literal::String(s) => Value::String(s.clone()),
			Literal::Integer(n) => Value::Integer(n.clone()),
			Literal::Decimal(n) => Value::Decimal(n.clone()),
		}
	}
}

impl Value {
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Nil => "Nil",
			Value::Boolean(_) => "Boolean",
			Value::Integer(_) => "Integer",
			Value::Decimal(_) => "Decimal",
			Value::Character(_) => "Character",
			Value::String(_) => "String",
			Value::List(_) => "List",
		}
	}

	pub fn as_boolean(&self) -> Result<bool, RuntimeError> {
		match self {
			Value::Boolean(b) => Ok(*b),
			_ => Err(RuntimeError::TypeMismatch { expected: "Boolean", received: self.type_name() }),
		}
	}

	/// Apply an operator that needs both operands evaluated; `&&` and `||` are handled by the caller.
	pub fn binary_op(&self, operator: BinaryOperator, right: &Self) -> Result<Value, RuntimeError> {
		use BinaryOperator::*;

		Ok(match operator {
			Add => self.plus(right)?,
			Subtract => self.minus(right)?,
			Multiply => self.star(right)?,
			Divide => self.slash(right)?,
			Power => self.power(right)?,
			Less => Value::Boolean(self.compare(operator, right)?.is_lt()),
			LessEqual => Value::Boolean(self.compare(operator, right)?.is_le()),
			Greater => Value::Boolean(self.compare(operator, right)?.is_gt()),
			GreaterEqual => Value::Boolean(self.compare(operator, right)?.is_ge()),
			Equal => Value::Boolean(self == right),
			NotEqual => Value::Boolean(self != right),
			And => Value::Boolean(self.as_boolean()? & right.as_boolean()?),
			Or => Value::Boolean(self.as_boolean()? | right.as_boolean()?),
		})
	}

	fn invalid(&self, operator: BinaryOperator, right: &Self) -> RuntimeError {
		RuntimeError::InvalidOperands { operator, left: self.type_name(), right: right.type_name() }
	}

	/// Concatenate if either side is a string, otherwise add matching numbers.
	pub fn plus(&self, other: &Self) -> Result<Value, RuntimeError> {
		match (self, other) {
			(Value::String(_), _) | (_, Value::String(_)) => Ok(Value::String(format!("{self}{other}"))),
			(Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l + r)),
			(Value::Decimal(l), Value::Decimal(r)) => Ok(Value::Decimal(l + r)),
			_ => Err(self.invalid(BinaryOperator::Add, other)),
		}
	}

	pub fn minus(&self, other: &Self) -> Result<Value, RuntimeError> {
		match (self, other) {
			(Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l - r)),
			(Value::Decimal(l), Value::Decimal(r)) => Ok(Value::Decimal(l - r)),
			_ => Err(self.invalid(BinaryOperator::Subtract, other)),
		}
	}

	pub fn star(&self, other: &Self) -> Result<Value, RuntimeError> {
		match (self, other) {
			(Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l * r)),
			(Value::Decimal(l), Value::Decimal(r)) => Ok(Value::Decimal(l * r)),
			_ => Err(self.invalid(BinaryOperator::Multiply, other)),
		}
	}

	/// Integer division truncates toward zero; decimal division keeps the
	/// dividend's scale and rounds half to even.
	pub fn slash(&self, other: &Self) -> Result<Value, RuntimeError> {
		match (self, other) {
			(Value::Integer(_), Value::Integer(r)) if r.is_zero() => Err(RuntimeError::DivisionByZero),
			(Value::Decimal(_), Value::Decimal(r)) if r.is_zero() => Err(RuntimeError::DivisionByZero),
			(Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l / r)),
			(Value::Decimal(l), Value::Decimal(r)) => {
				let (_, scale) = l.as_bigint_and_exponent();
				Ok(Value::Decimal((l / r).with_scale_round(scale, RoundingMode::HalfEven)))
			}
			_ => Err(self.invalid(BinaryOperator::Divide, other)),
		}
	}

	/// Exponentiation in native width: both operands must fit in 32 bits.
	pub fn power(&self, other: &Self) -> Result<Value, RuntimeError> {
		match (self, other) {
			(Value::Integer(base), Value::Integer(exponent)) => {
				let narrow = |n: &BigInt| n.to_i32().ok_or_else(|| RuntimeError::Narrowing(n.clone()));
				let result = f64::from(narrow(base)?).powf(f64::from(narrow(exponent)?)) as i32;
				Ok(Value::Integer(BigInt::from(result)))
			}
			_ => Err(self.invalid(BinaryOperator::Power, other)),
		}
	}

	/// Natural order of two values of the same ordered type.
	pub fn compare(&self, operator: BinaryOperator, other: &Self) -> Result<Ordering, RuntimeError> {
		match (self, other) {
			(Value::Integer(l), Value::Integer(r)) => Ok(l.cmp(r)),
			(Value::Decimal(l), Value::Decimal(r)) => Ok(l.cmp(r)),
			(Value::Character(l), Value::Character(r)) => Ok(l.cmp(r)),
			(Value::String(l), Value::String(r)) => Ok(l.cmp(r)),
			_ => Err(self.invalid(operator, other)),
		}
	}

	/// The list element at `index`.
	pub fn element(&self, index: &Value) -> Result<&Value, RuntimeError> {
		let Value::List(values) = self else {
			return Err(RuntimeError::TypeMismatch { expected: "List", received: self.type_name() });
		};
		Ok(&values[position(index, values.len())?])
	}

	pub fn element_mut(&mut self, index: &Value) -> Result<&mut Value, RuntimeError> {
		let received = self.type_name();
		let Value::List(values) = self else { return Err(RuntimeError::TypeMismatch { expected: "List", received }) };
		let at = position(index, values.len())?;
		Ok(&mut values[at])
	}
}

/// Narrow an index value to a position in a list of `length` elements.
fn position(index: &Value, length: usize) -> Result<usize, RuntimeError> {
	let Value::Integer(index) = index else {
		return Err(RuntimeError::TypeMismatch { expected: "Integer", received: index.type_name() });
	};
	index
		.to_usize()
		.filter(|&position| position < length)
		.ok_or_else(|| RuntimeError::IndexOutOfRange { index: index.clone(), length })
}
