//! Static types of the language.
//!
//! `Comparable` and `Any` are pseudo-types: no value is ever typed with them,
//! they only appear as the target of an assignability check (a parameter of
//! `print`, the operands of `<`).

use std::fmt::Display;

use crate::error::analyzer::TypeError;

/// A static type assigned by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
	Any,
	Nil,
	Comparable,
	Boolean,
	Integer,
	Decimal,
	Character,
	String,
	/// A fixed-size list declared with `LIST`, holding elements of one type.
	List(Box<Type>),
}

impl Type {
	/// Resolve a type name written in source, e.g. the `Integer` in `VAR x: Integer;`.
	pub fn from_name(name: &str) -> Result<Self, TypeError> {
		Ok(match name {
			"Any" => Type::Any,
			"Nil" => Type::Nil,
			"Comparable" => Type::Comparable,
			"Boolean" => Type::Boolean,
			"Integer" => Type::Integer,
			"Decimal" => Type::Decimal,
			"Character" => Type::Character,
			"String" => Type::String,
			_ => return Err(TypeError::UnknownType(name.to_string())),
		})
	}

	pub fn list(element: Type) -> Self { Type::List(Box::new(element)) }

	/// The element type if this is a list type.
	pub fn element(&self) -> Option<&Type> {
		match self {
			Type::List(element) => Some(element),
			_ => None,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Any => write!(f, "Any"),
			Type::Nil => write!(f, "Nil"),
			Type::Comparable => write!(f, "Comparable"),
			Type::Boolean => write!(f, "Boolean"),
			Type::Integer => write!(f, "Integer"),
			Type::Decimal => write!(f, "Decimal"),
			Type::Character => write!(f, "Character"),
			Type::String => write!(f, "String"),
			Type::List(element) => write!(f, "List<{element}>"),
		}
	}
}

/// Parameter and return types of a function binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
	pub parameter_types: Vec<Type>,
	pub return_type:     Type,
}

impl Signature {
	pub fn new(parameter_types: Vec<Type>, return_type: Type) -> Self { Self { parameter_types, return_type } }
}

/// Check that a value of type `source` may be stored where `target` is expected.
///
/// `Any` accepts everything, `Comparable` accepts the four ordered scalar
/// types, every other target accepts only itself.
pub fn require_assignable(target: &Type, source: &Type) -> Result<(), TypeError> {
	let assignable = match target {
		Type::Any => true,
		Type::Comparable => {
			matches!(source, Type::Integer | Type::Decimal | Type::Character | Type::String)
		}
		_ => target == source,
	};
	if assignable {
		Ok(())
	} else {
		Err(TypeError::Mismatch { expected: target.clone(), received: source.clone() })
	}
}
