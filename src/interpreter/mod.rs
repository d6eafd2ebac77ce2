//! Tree-walking interpreter.
//!
//! The interpreter walks an analyzed `Source`, keeping the runtime scopes in
//! an arena `Environment` and threading the current scope through every call
//! as a `ScopeId`.
//!
//! # Control flow
//!
//! - **Blocks**: every `IF` arm, `SWITCH` case, loop iteration and function
//!   call runs in a fresh child scope that is closed on every exit path
//! - **Return**: `RETURN` completes a statement with `Completion::Return`,
//!   which every enclosing block passes up unchanged until the call that owns
//!   it turns it into the call's result
//! - **Calls**: a call's scope is a child of the scope the function was
//!   declared in, never of the caller's scope

pub mod callable;
pub mod value;

use std::io::Write;

use callable::Callable;
use log::{debug, trace};
use value::Value;

use crate::{
	ast::{BinaryOperator, Case, Expression, Source, Statement},
	environment::{Environment, ScopeId},
	error::interpreter::RuntimeError,
};

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
	Normal,
	/// A `RETURN` is unwinding to the enclosing call.
	Return(Value),
}

/// Interpreter that executes programs.
pub struct Interpreter<'a, 'w> {
	/// Outer bindings every program runs against.
	prelude:     Environment<Value, Callable<'a>>,
	environment: Environment<Value, Callable<'a>>,
	/// Sink of the built-in `print`
	output:      &'w mut dyn Write,
}

impl<'a, 'w> Interpreter<'a, 'w> {
	pub fn new(output: &'w mut dyn Write) -> Self { Self::with_prelude(output, Self::prelude()) }

	/// An interpreter whose programs see the bindings in the root scope of `prelude`.
	pub fn with_prelude(output: &'w mut dyn Write, prelude: Environment<Value, Callable<'a>>) -> Self {
		Self { environment: prelude.clone(), prelude, output }
	}

	/// The built-in bindings, `print` only.
	pub fn prelude() -> Environment<Value, Callable<'a>> {
		let mut environment = Environment::new();
		environment.define_native("print", 1, Callable::Native(callable::print));
		environment
	}

	/// Load and run `source`, returning the value of `main()`.
	pub fn run(&mut self, source: &'a Source) -> Result<Value, RuntimeError> {
		self.load(source)?;
		self.invoke("main", Vec::new())
	}

	/// Define the globals and then the functions of `source` in a fresh copy of the prelude.
	pub fn load(&mut self, source: &'a Source) -> Result<(), RuntimeError> {
		self.environment = self.prelude.clone();
		let root = self.environment.root();
		for global in &source.globals {
			let value = match &global.value {
				Some(value) => self.evaluate(root, value)?,
				None => Value::Nil,
			};
			self.environment.define_variable(root, &global.name, value, global.mutable)?;
		}
		for function in &source.functions {
			let callable = Callable::Defined { function, scope: root };
			self.environment.define_function(root, &function.name, function.parameters.len(), callable)?;
		}
		debug!("Loaded {} globals and {} functions", source.globals.len(), source.functions.len());
		Ok(())
	}

	/// Call a loaded function by name.
	pub fn invoke(&mut self, name: &str, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
		let root = self.environment.root();
		self.call(root, name, arguments)
	}

	/// Run `execute` in a new child scope of `parent`, closing it on every exit path.
	fn scoped<T>(
		&mut self,
		parent: ScopeId,
		execute: impl FnOnce(&mut Self, ScopeId) -> Result<T, RuntimeError>,
	) -> Result<T, RuntimeError> {
		let scope = self.environment.push(parent);
		let result = execute(self, scope);
		self.environment.pop(scope);
		result
	}

	fn call(&mut self, scope: ScopeId, name: &str, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
		let callable = *self.environment.lookup_function(scope, name, arguments.len())?;
		debug!("Calling {name}/{}", arguments.len());
		match callable {
			Callable::Native(function) => function(&mut *self.output, &arguments),
			Callable::Defined { function, scope } => self.scoped(scope, |this, scope| {
				for (parameter, argument) in function.parameters.iter().zip(arguments) {
					this.environment.define_variable(scope, parameter, argument, false)?;
				}
				Ok(match this.execute_block(scope, &function.statements)? {
					Completion::Return(value) => value,
					Completion::Normal => Value::Nil,
				})
			}),
		}
	}

	fn execute_block(&mut self, scope: ScopeId, statements: &[Statement]) -> Result<Completion, RuntimeError> {
		for statement in statements {
			if let Completion::Return(value) = self.execute(scope, statement)? {
				return Ok(Completion::Return(value));
			}
		}
		Ok(Completion::Normal)
	}

	fn execute(&mut self, scope: ScopeId, statement: &Statement) -> Result<Completion, RuntimeError> {
		trace!("Executing {statement}");
		match statement {
			Statement::Expression(expression) => {
				self.evaluate(scope, expression)?;
			}
			Statement::Declaration { name, value, .. } => {
				let value = match value {
					Some(value) => self.evaluate(scope, value)?,
					None => Value::Nil,
				};
				self.environment.define_variable(scope, name, value, true)?;
			}
			Statement::Assignment { receiver, value } => {
				let Expression::Access { name, offset, .. } = receiver else { return Err(RuntimeError::InvalidReceiver) };
				let index = match offset {
					Some(offset) => Some(self.evaluate(scope, offset)?),
					None => None,
				};
				let value = self.evaluate(scope, value)?;
				self.assign(scope, name, index, value)?;
			}
			Statement::If { condition, then_statements, else_statements } => {
				let condition = self.evaluate(scope, condition)?.as_boolean()?;
				let statements = if condition { then_statements } else { else_statements };
				return self.scoped(scope, |this, scope| this.execute_block(scope, statements));
			}
			Statement::Switch { condition, cases } => {
				let value = self.evaluate(scope, condition)?;
				if let Some(case) = self.select_case(scope, &value, cases)? {
					return self.scoped(scope, |this, scope| this.execute_block(scope, &case.statements));
				}
			}
			Statement::While { condition, statements } => {
				while self.evaluate(scope, condition)?.as_boolean()? {
					let completion = self.scoped(scope, |this, scope| this.execute_block(scope, statements))?;
					if let Completion::Return(_) = completion {
						return Ok(completion);
					}
				}
			}
			Statement::Return(value) => return Ok(Completion::Return(self.evaluate(scope, value)?)),
		}
		Ok(Completion::Normal)
	}

	/// The first case whose value equals `value`, else the default case.
	fn select_case<'c>(
		&mut self,
		scope: ScopeId,
		value: &Value,
		cases: &'c [Case],
	) -> Result<Option<&'c Case>, RuntimeError> {
		for case in cases {
			let matched = match &case.value {
				Some(expression) => self.evaluate(scope, expression)? == *value,
				None => true,
			};
			if matched {
				return Ok(Some(case));
			}
		}
		Ok(None)
	}

	/// Store `value` in the variable `name`, or in its element at `index`.
	fn assign(&mut self, scope: ScopeId, name: &str, index: Option<Value>, value: Value) -> Result<(), RuntimeError> {
		let variable = self.environment.lookup_variable_mut(scope, name)?;
		if !variable.mutable {
			return Err(RuntimeError::ImmutableAssignment(name.to_string()));
		}
		match index {
			Some(index) => *variable.value.element_mut(&index)? = value,
			None => variable.value = value,
		}
		Ok(())
	}

	fn evaluate(&mut self, scope: ScopeId, expression: &Expression) -> Result<Value, RuntimeError> {
		match expression {
			Expression::Literal { literal, .. } => Ok(literal.into()),
			Expression::Group { expression, .. } => self.evaluate(scope, expression),
			Expression::Binary { operator, left, right, .. } => self.evaluate_binary(scope, *operator, left, right),
			Expression::Access { name, offset: None, .. } => {
				Ok(self.environment.lookup_variable(scope, name)?.value.clone())
			}
			Expression::Access { name, offset: Some(offset), .. } => {
				let index = self.evaluate(scope, offset)?;
				Ok(self.environment.lookup_variable(scope, name)?.value.element(&index)?.clone())
			}
			Expression::Function { name, arguments, .. } => {
				let arguments =
					arguments.iter().map(|argument| self.evaluate(scope, argument)).collect::<Result<Vec<_>, _>>()?;
				self.call(scope, name, arguments)
			}
			Expression::List { values, .. } => {
				Ok(Value::List(values.iter().map(|value| self.evaluate(scope, value)).collect::<Result<_, _>>()?))
			}
		}
	}

	/// Operands evaluate left to right; `||` skips its right operand when the left is true.
	fn evaluate_binary(
		&mut self,
		scope: ScopeId,
		operator: BinaryOperator,
		left: &Expression,
		right: &Expression,
	) -> Result<Value, RuntimeError> {
		let left = self.evaluate(scope, left)?;
		if operator == BinaryOperator::Or && left.as_boolean()? {
			return Ok(Value::Boolean(true));
		}
		let right = self.evaluate(scope, right)?;
		left.binary_op(operator, &right)
	}
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use bigdecimal::BigDecimal;
	use num_bigint::BigInt;

	use super::*;
	use crate::{
		analyzer::{Analyzer, analyze},
		error::environment::EnvironmentError,
		lexer::Lexer,
		parser::Parser,
		types::Type,
	};

	fn parse(input: &str) -> Source { Parser::new(Lexer::new(input).lex().unwrap()).parse_source().unwrap() }

	/// Analyze and run a program, returning `main`'s result and everything printed
	fn run(input: &str) -> (Result<Value, RuntimeError>, String) {
		let mut source = parse(input);
		analyze(&mut source).unwrap();
		run_unchecked(&source)
	}

	/// Run a parsed program without analyzing it first
	fn run_unchecked(source: &Source) -> (Result<Value, RuntimeError>, String) {
		let mut output = Vec::new();
		let result = Interpreter::new(&mut output).run(source);
		(result, String::from_utf8(output).unwrap())
	}

	fn value(input: &str) -> Value { run(input).0.unwrap() }

	fn error(input: &str) -> RuntimeError { run(input).0.unwrap_err() }

	fn body(statements: &str) -> String { format!("FUN main(): Integer DO {statements} RETURN 0; END") }

	fn integer(n: i64) -> Value { Value::Integer(BigInt::from(n)) }

	#[test]
	fn while_loop_prints_each_iteration() {
		let (result, output) =
			run("VAR x: Integer = 1; FUN main(): Integer DO WHILE x != 3 DO print(x); x = x + 1; END RETURN 0; END");
		assert_eq!(result.unwrap(), integer(0));
		assert_eq!(output, "1\n2\n");
	}

	#[test]
	fn list_element_assignment() {
		let input = "LIST nums: Integer = [1, 2, 3]; FUN main(): Integer DO nums[1] = 9; RETURN nums[1]; END";
		assert_eq!(value(input), integer(9));
		let (_, output) = run("LIST nums: Integer = [1, 2, 3]; FUN main(): Integer DO nums[0] = 7; print(nums); RETURN 0; END");
		assert_eq!(output, "[7, 2, 3]\n");
	}

	#[test]
	fn string_concatenation_without_analysis() {
		let source = parse("FUN main(): Integer DO RETURN \"x\" + 1; END");
		assert_eq!(run_unchecked(&source).0.unwrap(), Value::String("x1".into()));
	}

	#[test]
	fn list_index_bounds() {
		let program = |index: &str| format!("LIST nums: Integer = [1, 2, 3]; FUN main(): Integer DO RETURN nums[{index}]; END");
		assert_eq!(value(&program("2")), integer(3));
		assert!(matches!(error(&program("3")), RuntimeError::IndexOutOfRange { length: 3, .. }));
		assert!(matches!(error(&program("-1")), RuntimeError::IndexOutOfRange { .. }));
	}

	#[test]
	fn division_by_zero() {
		assert!(matches!(error(&body("LET x = 1 / 0;")), RuntimeError::DivisionByZero));
		assert!(matches!(error(&body("LET x = 1.0 / 0.0;")), RuntimeError::DivisionByZero));
	}

	#[test]
	fn decimal_division() {
		let (_, output) = run(&body("print(1.5 / 2.0); print(0.5 / 2.0); print(10.00 / 4.0);"));
		assert_eq!(output, "0.8\n0.2\n2.50\n");
	}

	#[test]
	fn immutable_assignment_at_runtime() {
		let source = parse("VAL x = 1; FUN main(): Integer DO x = 2; RETURN x; END");
		assert!(matches!(run_unchecked(&source).0, Err(RuntimeError::ImmutableAssignment(name)) if name == "x"));
	}

	#[test]
	fn undefined_name_without_analysis() {
		let source = parse("FUN main(): Integer DO RETURN y; END");
		assert!(matches!(
			run_unchecked(&source).0,
			Err(RuntimeError::Environment(EnvironmentError::UndefinedVariable(name))) if name == "y"
		));
	}

	#[test]
	fn or_short_circuits() {
		let input = "FUN boom(): Boolean DO print(\"boom\"); RETURN TRUE; END \
		             FUN main(): Integer DO print(TRUE || boom()); print(FALSE || boom()); RETURN 0; END";
		assert_eq!(run(input).1, "true\nboom\ntrue\n");
	}

	#[test]
	fn and_evaluates_both_operands() {
		let input = "FUN boom(): Boolean DO print(\"boom\"); RETURN TRUE; END \
		             FUN main(): Integer DO print(FALSE && boom()); RETURN 0; END";
		assert_eq!(run(input).1, "boom\nfalse\n");
	}

	#[test]
	fn operators() {
		let (_, output) = run(&body(
			"print(2 ^ 10); print(7 / 2); print(1 + 2 * 3); print(1 < 2); print('a' > 'b'); print(\"a\" + 'b' + NIL); \
			 print(1 == 1.0); print(NIL != NIL);",
		));
		assert_eq!(output, "1024\n3\n7\ntrue\nfalse\nabNIL\nfalse\nfalse\n");
	}

	#[test]
	fn if_else() {
		let (_, output) = run(&body("IF 1 < 2 DO print(\"then\"); ELSE print(\"else\"); END IF FALSE DO print(1); END"));
		assert_eq!(output, "then\n");
	}

	#[test]
	fn switch_selects_first_match_or_default() {
		let program = |value: &str| {
			body(&format!(
				"SWITCH {value} CASE 1: print(\"one\"); CASE 2: print(\"two\"); CASE 1: print(\"again\"); DEFAULT print(\"other\"); END"
			))
		};
		assert_eq!(run(&program("1")).1, "one\n");
		assert_eq!(run(&program("2")).1, "two\n");
		assert_eq!(run(&program("5")).1, "other\n");
	}

	#[test]
	fn return_unwinds_nested_blocks() {
		let input = "FUN find(): Integer DO LET i = 0; WHILE TRUE DO IF i == 3 DO RETURN i; END i = i + 1; END RETURN -1; END \
		             FUN main(): Integer DO RETURN find(); END";
		assert_eq!(value(input), integer(3));
	}

	#[test]
	fn recursion() {
		let input = "FUN fib(n: Integer): Integer DO IF n < 2 DO RETURN n; END RETURN fib(n - 1) + fib(n - 2); END \
		             FUN main(): Integer DO RETURN fib(10); END";
		assert_eq!(value(input), integer(55));
	}

	#[test]
	fn function_without_return_yields_nil() {
		let (_, output) = run("FUN noop() DO END FUN main(): Integer DO print(noop()); RETURN 0; END");
		assert_eq!(output, "NIL\n");
	}

	#[test]
	fn block_scopes_are_discarded() {
		let input = "FUN main(): Integer DO LET total = 0; LET i = 0; WHILE i < 3 DO LET step = i; total = total + step; i = i + 1; END \
		             IF TRUE DO LET total = 100; END RETURN total; END";
		assert_eq!(value(input), integer(3));
	}

	#[test]
	fn calls_do_not_see_caller_locals() {
		let source = parse("FUN peek(): Integer DO RETURN local; END FUN main(): Integer DO LET local = 1; RETURN peek(); END");
		assert!(matches!(run_unchecked(&source).0, Err(RuntimeError::Environment(EnvironmentError::UndefinedVariable(_)))));
	}

	#[test]
	fn scopes_close_after_errors() {
		let mut source = parse("FUN f(): Integer DO IF TRUE DO RETURN 1 / 0; END RETURN 0; END FUN main(): Integer DO RETURN f(); END");
		analyze(&mut source).unwrap();
		let mut output = Vec::new();
		let mut interpreter = Interpreter::new(&mut output);
		assert!(interpreter.run(&source).is_err());
		assert_eq!(interpreter.environment.depth(), 1);
	}

	#[test]
	fn invoke_with_arguments() {
		let mut source = parse(&format!("FUN f(a: Integer, b: Decimal): Decimal DO RETURN b; END {}", body("")));
		analyze(&mut source).unwrap();
		let mut output = Vec::new();
		let mut interpreter = Interpreter::new(&mut output);
		interpreter.load(&source).unwrap();
		let two = Value::Decimal(BigDecimal::from_str("2.0").unwrap());
		assert_eq!(interpreter.invoke("f", vec![integer(1), two.clone()]).unwrap(), two);
		assert_eq!(interpreter.invoke("f", vec![integer(1), two.clone()]).unwrap().to_string(), "2.0");
	}

	#[test]
	fn switch_case_scopes_are_discarded() {
		let program = |value: &str| {
			body(&format!(
				"LET x = 0; SWITCH {value} CASE 1: LET x = 1; print(x); DEFAULT LET x = 2; print(x); END print(x);"
			))
		};
		assert_eq!(run(&program("1")).1, "1\n0\n");
		assert_eq!(run(&program("5")).1, "2\n0\n");

		let source = parse(&body("SWITCH 1 CASE 1: LET y = 1; DEFAULT LET y = 2; END print(y);"));
		assert!(matches!(
			run_unchecked(&source).0,
			Err(RuntimeError::Environment(EnvironmentError::UndefinedVariable(name))) if name == "y"
		));
	}

	#[test]
	fn globals_are_defined_before_functions() {
		let source = parse(
			"VAR a: Integer = f(); VAR b: Integer = 1; FUN f(): Integer DO RETURN b; END \
			 FUN main(): Integer DO RETURN a; END",
		);
		assert!(matches!(
			run_unchecked(&source).0,
			Err(RuntimeError::Environment(EnvironmentError::UndefinedFunction { name, arity: 0 })) if name == "f"
		));
	}

	#[test]
	fn prelude_bindings_are_visible() {
		let mut source = parse("FUN main(): Integer DO print(limit); RETURN limit + 1; END");
		let mut prelude = Analyzer::prelude();
		let root = prelude.root();
		prelude.define_variable(root, "limit", Type::Integer, false).unwrap();
		Analyzer::with_prelude(prelude).analyze(&mut source).unwrap();

		let mut prelude = Interpreter::prelude();
		let root = prelude.root();
		prelude.define_variable(root, "limit", integer(7), false).unwrap();
		let mut output = Vec::new();
		let mut interpreter = Interpreter::with_prelude(&mut output, prelude);
		assert_eq!(interpreter.run(&source).unwrap(), integer(8));
		assert_eq!(interpreter.run(&source).unwrap(), integer(8));
		drop(interpreter);
		assert_eq!(String::from_utf8(output).unwrap(), "7\n7\n");
	}

	#[test]
	fn globals_initialize_in_order() {
		let (_, output) = run("VAL a = 1; VAR b: Integer = a + 1; VAR c: Decimal; FUN main(): Integer DO print(b); print(c); RETURN 0; END");
		assert_eq!(output, "2\nNIL\n");
	}
}
