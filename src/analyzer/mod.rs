//! Static checking.
//!
//! The analyzer walks a parsed `Source` once, fills every expression's `ty`
//! slot and every declaration's binding slot, and rejects the program on the
//! first violation. Scopes are threaded through the walk as `ScopeId`
//! arguments and the enclosing function's return type is passed down the same
//! way, so nothing has to be saved and restored around a nested block.
//!
//! Every run starts from a fresh copy of the prelude, so analyzing an already
//! annotated tree rewrites the same annotations.
//!
//! Global initializers are checked before any user function is bound. They
//! may only call prelude functions, since a user function body could read a
//! global that is not initialized yet.

use log::{debug, trace};
use num_traits::ToPrimitive;

use crate::{
	ast::{BinaryOperator, Case, Expression, Function, Global, Literal, Source, Statement},
	environment::{Environment, ScopeId},
	error::{analyzer::TypeError, environment::EnvironmentError},
	types::{Signature, Type, require_assignable},
};

/// A static type checker for a whole program
pub struct Analyzer {
	/// Outer bindings every program is checked against.
	prelude:     Environment<Type, Signature>,
	environment: Environment<Type, Signature>,
}

impl Default for Analyzer {
	fn default() -> Self { Self::new() }
}

impl Analyzer {
	pub fn new() -> Self { Self::with_prelude(Self::prelude()) }

	/// An analyzer whose programs are checked against the bindings in the root scope of `prelude`.
	pub fn with_prelude(prelude: Environment<Type, Signature>) -> Self {
		Self { environment: prelude.clone(), prelude }
	}

	/// The built-in bindings, `print` only.
	pub fn prelude() -> Environment<Type, Signature> {
		let mut environment = Environment::new();
		environment.define_native("print", 1, Signature::new(vec![Type::Any], Type::Nil));
		environment
	}

	/// Check `source` and annotate it in place.
	pub fn analyze(&mut self, source: &mut Source) -> Result<(), TypeError> {
		self.environment = self.prelude.clone();
		if !source.functions.iter().any(Function::is_main) {
			return Err(TypeError::MissingMain);
		}

		let root = self.environment.root();
		for global in &mut source.globals {
			self.visit_global(root, global)?;
		}
		// Every signature before any body, so bodies may call forward and recursively.
		for function in &mut source.functions {
			self.declare_function(root, function)?;
		}
		for function in &mut source.functions {
			self.visit_function(root, function)?;
		}
		debug!("Analyzed {} globals and {} functions", source.globals.len(), source.functions.len());
		Ok(())
	}

	/// Run `visit` in a new child scope of `parent`, closing it on every exit path.
	fn scoped<T>(
		&mut self,
		parent: ScopeId,
		visit: impl FnOnce(&mut Self, ScopeId) -> Result<T, TypeError>,
	) -> Result<T, TypeError> {
		let scope = self.environment.push(parent);
		let result = visit(self, scope);
		self.environment.pop(scope);
		result
	}

	fn declare_function(&mut self, scope: ScopeId, function: &mut Function) -> Result<(), TypeError> {
		let parameter_types =
			function.parameter_type_names.iter().map(|name| Type::from_name(name)).collect::<Result<Vec<_>, _>>()?;
		let return_type = function.return_type_name.as_deref().map_or(Ok(Type::Nil), Type::from_name)?;
		let signature = Signature::new(parameter_types, return_type);
		self.environment.define_function(scope, &function.name, function.parameters.len(), signature.clone())?;
		function.function = Some(signature);
		Ok(())
	}

	fn visit_global(&mut self, scope: ScopeId, global: &mut Global) -> Result<(), TypeError> {
		let ty = self.global_type(scope, global).map_err(|error| error.within(&*global))?;
		let variable = self.environment.define_variable(scope, &global.name, ty, global.mutable)?;
		global.variable = Some(variable.clone());
		Ok(())
	}

	fn global_type(&mut self, scope: ScopeId, global: &mut Global) -> Result<Type, TypeError> {
		Ok(match &mut global.value {
			Some(Expression::List { values, ty }) => {
				let declared = global.type_name.as_deref().map(Type::from_name).transpose()?;
				let list = Type::list(self.visit_list(scope, values, declared)?);
				*ty = Some(list.clone());
				list
			}
			value => self.declared_type(scope, &global.name, global.type_name.as_deref(), value.as_mut())?,
		})
	}

	fn visit_function(&mut self, scope: ScopeId, function: &mut Function) -> Result<(), TypeError> {
		trace!("Analyzing function {}/{}", function.name, function.parameters.len());
		let Some(signature) = function.function.clone() else {
			let (name, arity) = (function.name.clone(), function.parameters.len());
			return Err(EnvironmentError::UndefinedFunction { name, arity }.into());
		};
		self.scoped(scope, |this, scope| {
			for (parameter, ty) in function.parameters.iter().zip(&signature.parameter_types) {
				this.environment.define_variable(scope, parameter, ty.clone(), false)?;
			}
			this.visit_block(scope, &mut function.statements, &signature.return_type)
		})
	}

	/// The type of a `LET` or global: the declared type if present, else the initializer's.
	fn declared_type(
		&mut self,
		scope: ScopeId,
		name: &str,
		type_name: Option<&str>,
		value: Option<&mut Expression>,
	) -> Result<Type, TypeError> {
		match (type_name, value) {
			(None, None) => Err(TypeError::MissingTypeOrValue(name.to_string())),
			(Some(type_name), None) => Type::from_name(type_name),
			(None, Some(value)) => self.visit_expression(scope, value),
			(Some(type_name), Some(value)) => {
				let declared = Type::from_name(type_name)?;
				require_assignable(&declared, &self.visit_expression(scope, value)?)?;
				Ok(declared)
			}
		}
	}

	/// The element type of a list literal, `declared` or else the first element's.
	fn visit_list(
		&mut self,
		scope: ScopeId,
		values: &mut [Expression],
		declared: Option<Type>,
	) -> Result<Type, TypeError> {
		let mut element = declared;
		for value in values {
			let received = self.visit_expression(scope, value)?;
			match &element {
				Some(expected) => require_assignable(expected, &received)?,
				None => element = Some(received),
			}
		}
		element.ok_or(TypeError::EmptyList)
	}

	fn visit_block(&mut self, scope: ScopeId, statements: &mut [Statement], returns: &Type) -> Result<(), TypeError> {
		statements.iter_mut().try_for_each(|statement| self.visit_statement(scope, statement, returns))
	}

	fn visit_statement(&mut self, scope: ScopeId, statement: &mut Statement, returns: &Type) -> Result<(), TypeError> {
		self.check_statement(scope, statement, returns).map_err(|error| error.within(&*statement))
	}

	fn check_statement(&mut self, scope: ScopeId, statement: &mut Statement, returns: &Type) -> Result<(), TypeError> {
		match statement {
			Statement::Expression(expression) => {
				self.visit_expression(scope, expression)?;
			}
			Statement::Declaration { name, type_name, value, variable } => {
				let ty = self.declared_type(scope, name, type_name.as_deref(), value.as_mut())?;
				*variable = Some(self.environment.define_variable(scope, name, ty, true)?.clone());
			}
			Statement::Assignment { receiver, value } => {
				let Expression::Access { name, .. } = receiver else { return Err(TypeError::InvalidReceiver) };
				let name = name.clone();
				let target = self.visit_expression(scope, receiver)?;
				if !self.environment.lookup_variable(scope, &name)?.mutable {
					return Err(TypeError::ImmutableAssignment(name));
				}
				require_assignable(&target, &self.visit_expression(scope, value)?)?;
			}
			Statement::If { condition, then_statements, else_statements } => {
				require_assignable(&Type::Boolean, &self.visit_expression(scope, condition)?)?;
				if then_statements.is_empty() {
					return Err(TypeError::EmptyThenBlock);
				}
				self.scoped(scope, |this, scope| this.visit_block(scope, then_statements, returns))?;
				self.scoped(scope, |this, scope| this.visit_block(scope, else_statements, returns))?;
			}
			Statement::Switch { condition, cases } => {
				let ty = self.visit_expression(scope, condition)?;
				self.visit_cases(scope, &ty, cases, returns)?;
			}
			Statement::While { condition, statements } => {
				require_assignable(&Type::Boolean, &self.visit_expression(scope, condition)?)?;
				self.scoped(scope, |this, scope| this.visit_block(scope, statements, returns))?;
			}
			Statement::Return(value) => {
				let received = self.visit_expression(scope, value)?;
				if received != *returns {
					return Err(TypeError::ReturnMismatch { expected: returns.clone(), received });
				}
			}
		}
		Ok(())
	}

	/// Every case but the last carries a value of the condition's type, the last is the default.
	fn visit_cases(&mut self, scope: ScopeId, ty: &Type, cases: &mut [Case], returns: &Type) -> Result<(), TypeError> {
		let last = cases.len().checked_sub(1).ok_or(TypeError::FinalCaseNotDefault)?;
		for (index, case) in cases.iter_mut().enumerate() {
			match &mut case.value {
				Some(_) if index == last => return Err(TypeError::FinalCaseNotDefault),
				None if index != last => return Err(TypeError::DefaultNotLast),
				Some(value) => require_assignable(ty, &self.visit_expression(scope, value)?)?,
				None => {}
			}
			self.scoped(scope, |this, scope| this.visit_block(scope, &mut case.statements, returns))?;
		}
		Ok(())
	}

	/// Resolve the static type of `expression` and record it in the node.
	fn visit_expression(&mut self, scope: ScopeId, expression: &mut Expression) -> Result<Type, TypeError> {
		let resolved = self.expression_type(scope, expression).map_err(|error| error.within(&*expression))?;
		match expression {
			Expression::Literal { ty, .. }
			| Expression::Group { ty, .. }
			| Expression::Binary { ty, .. }
			| Expression::Access { ty, .. }
			| Expression::Function { ty, .. }
			| Expression::List { ty, .. } => *ty = Some(resolved.clone()),
		}
		Ok(resolved)
	}

	fn expression_type(&mut self, scope: ScopeId, expression: &mut Expression) -> Result<Type, TypeError> {
		Ok(match expression {
			Expression::Literal { literal, .. } => Self::literal_type(literal)?,
			Expression::Group { expression, .. } => self.visit_expression(scope, expression)?,
			Expression::Binary { operator, left, right, .. } => self.visit_binary(scope, *operator, left, right)?,
			Expression::Access { name, offset, variable, .. } => {
				let binding = self.environment.lookup_variable(scope, name)?.clone();
				let ty = match offset {
					Some(offset) => {
						let element = binding.value.element().ok_or_else(|| TypeError::NotAList(name.clone()))?.clone();
						require_assignable(&Type::Integer, &self.visit_expression(scope, offset)?)?;
						element
					}
					None => binding.value.clone(),
				};
				*variable = Some(binding);
				ty
			}
			Expression::Function { name, arguments, function, .. } => {
				let signature = self.environment.lookup_function(scope, name, arguments.len())?.clone();
				for (argument, parameter) in arguments.iter_mut().zip(&signature.parameter_types) {
					require_assignable(parameter, &self.visit_expression(scope, argument)?)?;
				}
				let ty = signature.return_type.clone();
				*function = Some(signature);
				ty
			}
			Expression::List { values, .. } => Type::list(self.visit_list(scope, values, None)?),
		})
	}

	fn literal_type(literal: &Literal) -> Result<Type, TypeError> {
		Ok(match literal {
			Literal::Nil => Type::Nil,
			Literal::Boolean(_) => Type::Boolean,
			Literal::Character(_) => Type::Character,
			Literal::String(_) => Type::String,
			Literal::Integer(value) if value.to_i32().is_none() => {
				return Err(TypeError::IntegerOutOfRange(value.to_string()));
			}
			Literal::Integer(_) => Type::Integer,
			Literal::Decimal(value) if !value.to_f64().is_some_and(f64::is_finite) => {
				return Err(TypeError::DecimalOutOfRange(value.to_string()));
			}
			Literal::Decimal(_) => Type::Decimal,
		})
	}

	fn visit_binary(
		&mut self,
		scope: ScopeId,
		operator: BinaryOperator,
		left: &mut Expression,
		right: &mut Expression,
	) -> Result<Type, TypeError> {
		use BinaryOperator::*;

		let left = self.visit_expression(scope, left)?;
		let right = self.visit_expression(scope, right)?;
		match operator {
			And | Or => {
				require_assignable(&Type::Boolean, &left)?;
				require_assignable(&Type::Boolean, &right)?;
				Ok(Type::Boolean)
			}
			Less | LessEqual | Greater | GreaterEqual => {
				require_assignable(&Type::Comparable, &left)?;
				require_assignable(&Type::Comparable, &right)?;
				Ok(Type::Boolean)
			}
			Equal | NotEqual => Ok(Type::Boolean),
			Add if left == Type::String || right == Type::String => Ok(Type::String),
			Add | Subtract | Multiply | Divide if matches!(left, Type::Integer | Type::Decimal) => {
				require_assignable(&left, &right)?;
				Ok(left)
			}
			Power if left == Type::Integer && right == Type::Integer => Ok(Type::Integer),
			_ => Err(TypeError::InvalidOperands { operator, left, right }),
		}
	}
}

/// Check `source` in a fresh analyzer.
pub fn analyze(source: &mut Source) -> Result<(), TypeError> { Analyzer::new().analyze(source) }

#[cfg(test)]
mod tests {
	use num_bigint::BigInt;

	use super::*;
	use crate::{lexer::Lexer, parser::Parser};

	fn parse(input: &str) -> Source { Parser::new(Lexer::new(input).lex().unwrap()).parse_source().unwrap() }

	/// Analyze a whole program and expect it to be accepted or rejected
	fn check(input: &str, ok: bool) {
		let result = analyze(&mut parse(input));
		assert!(result.is_ok() == ok, "{input:?}: {result:?}");
	}

	fn error(input: &str) -> TypeError { analyze(&mut parse(input)).unwrap_err() }

	/// Wrap statements in a `main` function
	fn body(statements: &str) -> String { format!("FUN main(): Integer DO {statements} RETURN 0; END") }

	fn main_returning(expression: &str) -> String { format!("FUN main(): Integer DO RETURN {expression}; END") }

	#[test]
	fn requires_main() {
		assert_eq!(error(""), TypeError::MissingMain);
		assert_eq!(error("FUN main() DO END"), TypeError::MissingMain);
		assert_eq!(error("FUN main(x: Integer): Integer DO RETURN x; END"), TypeError::MissingMain);
		// The check happens before any declaration is visited.
		assert_eq!(error("VAR x: Unknown; FUN f() DO END"), TypeError::MissingMain);
		check(&body(""), true);
	}

	#[test]
	fn annotates_in_place() {
		let mut source = parse("VAL x = 1; FUN main(): Integer DO RETURN x; END");
		analyze(&mut source).unwrap();
		let variable = source.globals[0].variable.as_ref().unwrap();
		assert_eq!(variable.value, Type::Integer);
		assert!(!variable.mutable);
		assert_eq!(source.functions[0].function, Some(Signature::new(vec![], Type::Integer)));
		let Statement::Return(value) = &source.functions[0].statements[0] else { panic!() };
		assert_eq!(value.ty(), Some(&Type::Integer));
	}

	#[test]
	fn analysis_is_idempotent() {
		let mut source = parse(
			"LIST nums: Integer = [1, 2]; VAR x: Decimal; FUN f(a: Integer): Integer DO LET y = a + nums[0]; RETURN y; END \
			 FUN main(): Integer DO print(x); RETURN f(1); END",
		);
		analyze(&mut source).unwrap();
		let annotated = source.clone();
		analyze(&mut source).unwrap();
		assert_eq!(source, annotated);
	}

	#[test]
	fn function_with_parameters() {
		let mut source = parse(&format!("FUN f(a: Integer, b: Decimal): Decimal DO RETURN b; END {}", body("")));
		analyze(&mut source).unwrap();
		assert_eq!(source.functions[0].function, Some(Signature::new(vec![Type::Integer, Type::Decimal], Type::Decimal)));
		check(&format!("FUN f(a: Integer, b: Decimal): Decimal DO RETURN b; END {}", body("f(1, 2.0);")), true);
		check(&format!("FUN f(a: Integer, b: Decimal): Decimal DO RETURN b; END {}", body("f(1.0, 2.0);")), false);
		check(&format!("FUN f(a: Integer): Integer DO RETURN a; END {}", body("f(1, 2);")), false);
	}

	#[test]
	fn forward_and_recursive_calls() {
		check(&format!("{} FUN later(): Integer DO RETURN later(); END", main_returning("later()")), true);
	}

	#[test]
	fn declarations() {
		check(&body("LET x: Integer;"), true);
		check(&body("LET x = 'c';"), true);
		check(&body("LET x: Comparable = 1.5;"), true);
		check(&body("LET x: Any = NIL;"), true);
		check(&body("LET x: Integer = 1.5;"), false);
		check(&body("LET x: Unknown;"), false);
		assert_eq!(error(&body("LET x;")), TypeError::MissingTypeOrValue("x".into()));
		assert_eq!(
			error(&body("LET x = 1; LET x = 2;")),
			TypeError::Environment(EnvironmentError::VariableRedefinition("x".into()))
		);
		check(&body("LET x = 1; IF TRUE DO LET x = 'c'; END"), true);
	}

	#[test]
	fn globals() {
		check(&format!("VAR x: Integer; VAL y = 'c'; {}", body("x = 2;")), true);
		check(&format!("VAR x; {}", body("")), false);
		check(&format!("VAL y: Boolean = 1; {}", body("")), false);
		assert_eq!(error(&format!("VAL y = 1; {}", body("y = 2;"))), TypeError::ImmutableAssignment("y".into()));
	}

	#[test]
	fn list_globals() {
		check(&format!("LIST nums: Integer = [1, 2, 3]; {}", main_returning("nums[1]")), true);
		check(&format!("LIST things: Any = [1, 'c', NIL]; {}", body("")), true);
		check(&format!("LIST nums = [1, 2]; {}", main_returning("nums[0]")), true);
		check(&format!("LIST empty: Integer = []; {}", body("")), true);
		assert_eq!(error(&format!("LIST empty = []; {}", body(""))), TypeError::EmptyList);
		check(&format!("LIST nums: Integer = [1, 'c']; {}", body("")), false);
		check(&format!("LIST nums = [1, 2.0]; {}", body("")), false);
		check(&format!("LIST nums: Integer = [1]; {}", main_returning("nums[TRUE]")), false);
		check(&format!("LIST nums: Integer = [1]; {}", body("nums[0] = 'c';")), false);
		assert_eq!(error(&format!("VAR x = 1; {}", main_returning("x[0]"))), TypeError::NotAList("x".into()));
	}

	#[test]
	fn undefined_names() {
		assert_eq!(
			error(&main_returning("x")),
			TypeError::Environment(EnvironmentError::UndefinedVariable("x".into()))
		);
		assert_eq!(
			error(&body("print();")),
			TypeError::Environment(EnvironmentError::UndefinedFunction { name: "print".into(), arity: 0 })
		);
	}

	#[test]
	fn assignments() {
		check(&body("LET x = 1; x = 2;"), true);
		check(&body("LET x = 1; x = 'c';"), false);
		check(&format!("FUN f(a: Integer): Integer DO a = 2; RETURN a; END {}", body("")), false);
	}

	#[test]
	fn invalid_receiver() {
		let mut source = parse(&body(""));
		let receiver = Expression::literal(Literal::Integer(BigInt::from(1)));
		let value = Expression::literal(Literal::Integer(BigInt::from(2)));
		source.functions[0].statements.insert(0, Statement::Assignment { receiver, value });
		assert_eq!(analyze(&mut source).unwrap_err(), TypeError::InvalidReceiver);
	}

	#[test]
	fn integer_literal_range() {
		check(&main_returning("2147483647"), true);
		check(&main_returning("-2147483648"), true);
		assert_eq!(error(&main_returning("2147483648")), TypeError::IntegerOutOfRange("2147483648".into()));
		check(&main_returning("-2147483649"), false);
	}

	#[test]
	fn decimal_literal_range() {
		check(&body("LET x = 1.5;"), true);
		check(&body(&format!("LET x = 1{}.0;", "0".repeat(400))), false);
	}

	#[test]
	fn binary_typing() {
		check(&body("LET x: Boolean = TRUE && FALSE || TRUE;"), true);
		check(&body("LET x = 1 && TRUE;"), false);
		check(&body("LET x: Boolean = 1 < 2;"), true);
		check(&body("LET x: Boolean = 'a' > 'b';"), true);
		check(&body("LET x = TRUE < FALSE;"), false);
		check(&body("LET x: Boolean = 1 == 'c';"), true);
		check(&body("LET x: Boolean = NIL != 1;"), true);
		check(&body("LET x: String = \"a\" + 1;"), true);
		check(&body("LET x: String = TRUE + \"a\";"), true);
		check(&body("LET x: Integer = 1 + 2;"), true);
		check(&body("LET x: Decimal = 1.0 * 2.0;"), true);
		check(&body("LET x = 1 + 2.0;"), false);
		check(&body("LET x = 'a' - 'b';"), false);
		check(&body("LET x: Integer = 2 ^ 3;"), true);
		check(&body("LET x = 2.0 ^ 3;"), false);
		let operands = TypeError::InvalidOperands { operator: BinaryOperator::Add, left: Type::Boolean, right: Type::Integer };
		assert_eq!(
			error(&body("LET x = TRUE + 1;")),
			TypeError::Located { node: "TRUE + 1".into(), error: Box::new(operands) }
		);
	}

	#[test]
	fn control_flow() {
		check(&body("IF TRUE DO print(1); END"), true);
		check(&body("IF 1 DO print(1); END"), false);
		assert_eq!(error(&body("IF TRUE DO ELSE print(1); END")), TypeError::EmptyThenBlock);
		check(&body("WHILE FALSE DO END"), true);
		check(&body("WHILE 'c' DO END"), false);
		check(&body("SWITCH 1 CASE 1: print(1); CASE 2: DEFAULT print(3); END"), true);
		check(&body("SWITCH 1 CASE 'c': print(1); DEFAULT END"), false);
	}

	#[test]
	fn block_scopes_close() {
		check(&body("IF TRUE DO LET x = 1; END print(x);"), false);
		check(&body("WHILE FALSE DO LET x = 1; END LET x = 'c';"), true);
		check(&body("SWITCH 1 CASE 1: LET x = 1; DEFAULT LET x = 'c'; print(x); END LET x = 2.0;"), true);
		check(&body("SWITCH 1 CASE 1: LET x = 1; DEFAULT LET x = 'c'; END print(x);"), false);
	}

	#[test]
	fn globals_cannot_call_user_functions() {
		let program = format!("VAR a: Integer = f(); VAR b: Integer = 1; FUN f(): Integer DO RETURN b; END {}", body(""));
		assert_eq!(
			error(&program),
			TypeError::Environment(EnvironmentError::UndefinedFunction { name: "f".into(), arity: 0 })
		);
		check(&format!("VAR a: Integer = 1; FUN f(): Integer DO RETURN a; END {}", main_returning("f()")), true);
		check(&format!("VAR a = print(1); {}", body("")), true);
	}

	#[test]
	fn mismatches_name_their_node() {
		let mismatch = |expected, received| Box::new(TypeError::Mismatch { expected, received });
		assert_eq!(
			error(&body("LET x: Integer = 1.5;")),
			TypeError::Located { node: "LET x: Integer = 1.5;".into(), error: mismatch(Type::Integer, Type::Decimal) }
		);
		assert_eq!(
			error(&format!("VAL y: Boolean = 1; {}", body(""))),
			TypeError::Located { node: "VAL y: Boolean = 1;".into(), error: mismatch(Type::Boolean, Type::Integer) }
		);
		// The innermost node that failed is kept.
		assert_eq!(
			error(&body("IF TRUE DO print(1 + 'c'); END")),
			TypeError::Located { node: "1 + 'c'".into(), error: mismatch(Type::Integer, Type::Character) }
		);
		assert_eq!(
			error(&body("IF TRUE DO print(1 + 'c'); END")).to_string(),
			"Expected type Integer, received Character. In `1 + 'c'`."
		);
	}

	#[test]
	fn prelude_bindings_are_visible() {
		let program = main_returning("limit");
		assert!(analyze(&mut parse(&program)).is_err());

		let mut prelude = Analyzer::prelude();
		let root = prelude.root();
		prelude.define_variable(root, "limit", Type::Integer, false).unwrap();
		let mut analyzer = Analyzer::with_prelude(prelude);
		let mut source = parse(&program);
		analyzer.analyze(&mut source).unwrap();
		analyzer.analyze(&mut source).unwrap();
		let mut source = parse(&format!("VAR limit = 1; {program}"));
		assert_eq!(
			analyzer.analyze(&mut source).unwrap_err(),
			TypeError::Environment(EnvironmentError::VariableRedefinition("limit".into()))
		);
	}

	#[test]
	fn switch_case_layout() {
		let case = |value: Option<i32>| {
			let value = value.map(|value| Expression::literal(Literal::Integer(BigInt::from(value))));
			Case::new(value, Vec::new())
		};
		let switch = |cases| Statement::Switch { condition: Expression::literal(Literal::Integer(BigInt::from(1))), cases };
		let run = |statement| {
			let mut source = parse(&body(""));
			source.functions[0].statements.insert(0, statement);
			analyze(&mut source)
		};
		assert_eq!(run(switch(vec![case(Some(1)), case(Some(2)), case(Some(3))])), Err(TypeError::FinalCaseNotDefault));
		assert_eq!(run(switch(vec![case(None), case(Some(1)), case(None)])), Err(TypeError::DefaultNotLast));
		assert_eq!(run(switch(Vec::new())), Err(TypeError::FinalCaseNotDefault));
		assert_eq!(run(switch(vec![case(Some(1)), case(None)])), Ok(()));
	}

	#[test]
	fn return_types() {
		check(&main_returning("1"), true);
		check(&main_returning("1.0"), false);
		let mismatch = TypeError::ReturnMismatch { expected: Type::Integer, received: Type::String };
		assert_eq!(
			error(&main_returning("\"x\" + 1")),
			TypeError::Located { node: "RETURN \"x\" + 1;".into(), error: Box::new(mismatch) }
		);
		check(&format!("FUN f(): Any DO RETURN 1; END {}", body("")), false);
		check(&format!("FUN f() DO RETURN NIL; END {}", body("f();")), true);
	}
}
